use crate::domain::model::{ArtItem, Tier};
use crate::utils::error::{RenaissanceError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_positive_amount, validate_unique_ids};
use rust_decimal::Decimal;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Inclusive price bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRange {
    lo: Decimal,
    hi: Decimal,
}

impl PriceRange {
    pub fn new(lo: Decimal, hi: Decimal) -> Result<Self> {
        if lo > hi {
            return Err(RenaissanceError::InvalidPriceRange { lo, hi });
        }
        Ok(Self { lo, hi })
    }

    pub fn unbounded() -> Self {
        Self {
            lo: Decimal::ZERO,
            hi: Decimal::MAX,
        }
    }

    pub fn contains(&self, price: Decimal) -> bool {
        self.lo <= price && price <= self.hi
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::unbounded()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogQuery {
    pub text: String,
    pub price_range: PriceRange,
    pub category: Option<String>,
    pub medium: Option<String>,
    /// Empty means every tier.
    pub tiers: Vec<Tier>,
    pub ar_only: bool,
    pub vr_only: bool,
}

impl CatalogQuery {
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn price_range(mut self, range: PriceRange) -> Self {
        self.price_range = range;
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn medium(mut self, medium: impl Into<String>) -> Self {
        self.medium = Some(medium.into());
        self
    }

    pub fn tier(mut self, tier: Tier) -> Self {
        self.tiers.push(tier);
        self
    }

    pub fn ar_only(mut self) -> Self {
        self.ar_only = true;
        self
    }

    pub fn vr_only(mut self) -> Self {
        self.vr_only = true;
        self
    }

    pub fn matches(&self, item: &ArtItem) -> bool {
        let needle = self.text.trim().to_lowercase();
        if !needle.is_empty()
            && ![&item.title, &item.artist, &item.description]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        {
            return false;
        }

        self.price_range.contains(item.price)
            && facet_matches(self.category.as_deref(), &item.category)
            && facet_matches(self.medium.as_deref(), &item.medium)
            && (self.tiers.is_empty() || self.tiers.contains(&item.tier))
            && (!self.ar_only || item.ar_ready)
            && (!self.vr_only || item.vr_ready)
    }
}

fn facet_matches(wanted: Option<&str>, actual: &str) -> bool {
    match wanted.map(str::trim) {
        None | Some("") => true,
        Some(w) if w.eq_ignore_ascii_case("all") => true,
        Some(w) => w.to_lowercase() == actual.to_lowercase(),
    }
}

/// Read-only, insertion-ordered art catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<Arc<ArtItem>>,
}

impl Catalog {
    pub fn new(items: Vec<ArtItem>) -> Result<Self> {
        validate_unique_ids(items.iter().map(|item| item.id))?;
        for item in &items {
            validate_positive_amount(item.price)?;
            validate_non_empty_string(&format!("catalog[{}].title", item.id), &item.title)?;
            validate_non_empty_string(&format!("catalog[{}].artist", item.id), &item.artist)?;
        }
        Ok(Self {
            items: items.into_iter().map(Arc::new).collect(),
        })
    }

    pub fn items(&self) -> &[Arc<ArtItem>] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&Arc<ArtItem>> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn require(&self, id: u32) -> Result<Arc<ArtItem>> {
        self.get(id)
            .cloned()
            .ok_or(RenaissanceError::UnknownItem { id })
    }

    pub fn filter(&self, query: &CatalogQuery) -> Vec<Arc<ArtItem>> {
        let results = Self::filter_items(&self.items, query);
        tracing::debug!(
            query = %query.text,
            matched = results.len(),
            total = self.items.len(),
            "catalog filtered"
        );
        results
    }

    /// Applies `query` to an arbitrary slice, keeping order.
    pub fn filter_items(items: &[Arc<ArtItem>], query: &CatalogQuery) -> Vec<Arc<ArtItem>> {
        items
            .iter()
            .filter(|item| query.matches(item))
            .cloned()
            .collect()
    }

    pub fn categories(&self) -> Vec<String> {
        self.facet(|item| &item.category)
    }

    pub fn mediums(&self) -> Vec<String> {
        self.facet(|item| &item.medium)
    }

    fn facet(&self, field: impl Fn(&ArtItem) -> &String) -> Vec<String> {
        self.items
            .iter()
            .map(|item| field(item.as_ref()).clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            items: sample_items().into_iter().map(Arc::new).collect(),
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn art(
    id: u32,
    title: &str,
    artist: &str,
    medium: &str,
    category: &str,
    price: u32,
    tier: Tier,
    (ar_ready, vr_ready): (bool, bool),
    description: &str,
    image_url: &str,
) -> ArtItem {
    ArtItem {
        id,
        title: title.to_string(),
        artist: artist.to_string(),
        medium: medium.to_string(),
        category: category.to_string(),
        price: Decimal::from(price),
        tier,
        ar_ready,
        vr_ready,
        description: description.to_string(),
        image_url: image_url.to_string(),
    }
}

/// Built-in showcase catalog used when no catalog is configured.
pub fn sample_items() -> Vec<ArtItem> {
    vec![
        art(
            1,
            "Digital Sunset",
            "Alex Turner",
            "Digital Arts",
            "Abstract",
            550,
            Tier::SemiPro,
            (true, false),
            "A vibrant, abstract piece designed for AR viewing in a home setting.",
            "https://placehold.co/600x400/228B22/FFFFFF?text=Sunset",
        ),
        art(
            2,
            "The Iron Muse",
            "Maria Rodriguez",
            "Sculptor",
            "Modern",
            12000,
            Tier::StudioGallery,
            (true, true),
            "A large-scale metal sculpture. VR feature allows a tour of the physical studio where it was crafted.",
            "https://placehold.co/600x400/8B4513/FFFFFF?text=Sculpture",
        ),
        art(
            3,
            "A Quiet Day",
            "John Smith",
            "Painter",
            "Landscape",
            150,
            Tier::Emerging,
            (false, false),
            "A small, traditional oil on canvas. Limited digital presence.",
            "https://placehold.co/600x400/1E90FF/FFFFFF?text=Painting",
        ),
        art(
            4,
            "Metropolis Rhapsody",
            "Art Collective 7",
            "Graphic Designer",
            "Architectural",
            3500,
            Tier::StudioGallery,
            (true, true),
            "Architectural design concept, includes full 3D model for VR walkthrough.",
            "https://placehold.co/600x400/FFD700/000000?text=Design",
        ),
        art(
            5,
            "Winter's Poem",
            "Poet Laureate",
            "Literary Arts",
            "Poetry",
            50,
            Tier::SemiPro,
            (false, false),
            "First edition digital copy of a celebrated contemporary poem.",
            "https://placehold.co/600x400/FF6347/FFFFFF?text=Poem",
        ),
        art(
            6,
            "Neon Dreams",
            "Sarah Chen",
            "Digital Arts",
            "Cyberpunk",
            850,
            Tier::SemiPro,
            (true, false),
            "Cyberpunk aesthetic for digital displays.",
            "https://placehold.co/600x400/FF00FF/FFFFFF?text=Neon",
        ),
        art(
            7,
            "Marble Echo",
            "David Stone",
            "Sculptor",
            "Modern",
            4200,
            Tier::StudioGallery,
            (false, false),
            "Hand-carved marble study of negative space.",
            "https://placehold.co/600x400/708090/FFFFFF?text=Marble",
        ),
        art(
            8,
            "Fragmented Soul",
            "Elena Rossi",
            "Painter",
            "Abstract",
            3100,
            Tier::Emerging,
            (true, false),
            "Layered acrylic abstraction, scanned for AR placement.",
            "https://placehold.co/600x400/4B0082/FFFFFF?text=Abstract",
        ),
    ]
}
