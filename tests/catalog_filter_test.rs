use anyhow::Result;
use renaissance::{Catalog, CatalogQuery, Marketplace, PriceRange, Tier};
use rust_decimal::Decimal;

fn ids(items: &[std::sync::Arc<renaissance::ArtItem>]) -> Vec<u32> {
    items.iter().map(|item| item.id).collect()
}

#[test]
fn test_empty_query_returns_everything_in_order() {
    let catalog = Catalog::default();
    let results = catalog.filter(&CatalogQuery::default());
    assert_eq!(ids(&results), vec![1, 2, 3, 4, 5, 6, 7, 8]);
}

#[test]
fn test_text_search_is_case_insensitive() {
    let catalog = Catalog::default();

    let by_title = catalog.filter(&CatalogQuery::default().text("NEON"));
    assert_eq!(ids(&by_title), vec![6]);

    let by_artist = catalog.filter(&CatalogQuery::default().text("elena"));
    assert_eq!(ids(&by_artist), vec![8]);

    let by_description = catalog.filter(&CatalogQuery::default().text("Walkthrough"));
    assert_eq!(ids(&by_description), vec![4]);
}

#[test]
fn test_combined_filters() -> Result<()> {
    let catalog = Catalog::default();
    let query = CatalogQuery::default()
        .price_range(PriceRange::new(Decimal::from(1000), Decimal::from(13000))?)
        .tier(Tier::StudioGallery)
        .vr_only();

    let results = catalog.filter(&query);
    assert_eq!(ids(&results), vec![2, 4]);
    assert!(results.iter().all(|item| item.vr_ready && item.tier == Tier::StudioGallery));
    Ok(())
}

#[test]
fn test_price_bounds_are_inclusive() -> Result<()> {
    let catalog = Catalog::default();
    let query = CatalogQuery::default()
        .price_range(PriceRange::new(Decimal::from(50), Decimal::from(150))?);
    assert_eq!(ids(&catalog.filter(&query)), vec![3, 5]);
    Ok(())
}

#[test]
fn test_all_facet_matches_every_category() {
    let catalog = Catalog::default();
    let all = catalog.filter(&CatalogQuery::default().category("All"));
    assert_eq!(all.len(), catalog.len());

    let abstract_only = catalog.filter(&CatalogQuery::default().category("abstract"));
    assert_eq!(ids(&abstract_only), vec![1, 8]);
}

/// Filtering an already filtered list with the same query changes nothing.
#[test]
fn test_filter_is_idempotent() -> Result<()> {
    let catalog = Catalog::default();
    let queries = [
        CatalogQuery::default(),
        CatalogQuery::default().text("a").ar_only(),
        CatalogQuery::default()
            .price_range(PriceRange::new(Decimal::from(100), Decimal::from(4000))?)
            .tier(Tier::SemiPro)
            .tier(Tier::Emerging),
        CatalogQuery::default().medium("Painter"),
    ];

    for query in &queries {
        let once = catalog.filter(query);
        let twice = Catalog::filter_items(&once, query);
        assert_eq!(ids(&once), ids(&twice));
    }
    Ok(())
}

#[test]
fn test_inverted_price_range_rejected() {
    assert!(PriceRange::new(Decimal::from(500), Decimal::from(100)).is_err());
}

#[test]
fn test_no_match_is_empty_not_error() {
    let marketplace = Marketplace::default();
    let results = marketplace.browse(&CatalogQuery::default().text("no such artwork anywhere"));
    assert!(results.is_empty());
}
