use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

/// Membership level of a selling artist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tier {
    #[serde(alias = "Emerging")]
    Emerging,
    #[serde(alias = "Semi-Pro", alias = "semi_pro")]
    SemiPro,
    #[serde(alias = "Studio/Gallery", alias = "studio_gallery")]
    StudioGallery,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Emerging, Tier::SemiPro, Tier::StudioGallery];

    pub fn display_name(&self) -> &'static str {
        match self {
            Tier::Emerging => "Emerging",
            Tier::SemiPro => "Semi-Pro",
            Tier::StudioGallery => "Studio/Gallery",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tier '{0}', expected one of: emerging, semi-pro, studio-gallery")]
pub struct ParseTierError(pub String);

impl FromStr for Tier {
    type Err = ParseTierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "emerging" => Ok(Tier::Emerging),
            "semipro" => Ok(Tier::SemiPro),
            "studiogallery" | "studio" | "gallery" => Ok(Tier::StudioGallery),
            _ => Err(ParseTierError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierPolicy {
    pub color: String,
    /// Base platform fee in percent, e.g. `20` for 20%.
    pub fee_pct: Decimal,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtItem {
    pub id: u32,
    pub title: String,
    pub artist: String,
    pub medium: String,
    pub category: String,
    pub price: Decimal,
    pub tier: Tier,
    #[serde(default)]
    pub ar_ready: bool,
    #[serde(default)]
    pub vr_ready: bool,
    #[serde(default)]
    pub description: String,
    /// Opaque; never fetched or validated.
    #[serde(default)]
    pub image_url: String,
}

impl ArtItem {
    pub fn badges(&self) -> Vec<&'static str> {
        let mut badges = Vec::new();
        if self.ar_ready {
            badges.push("AR READY");
        }
        if self.vr_ready {
            badges.push("VR TOUR");
        }
        badges
    }

    pub fn is_immersive(&self) -> bool {
        self.ar_ready || self.vr_ready
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CartEntry {
    pub item: Arc<ArtItem>,
}

impl CartEntry {
    pub fn new(item: Arc<ArtItem>) -> Self {
        Self { item }
    }

    pub fn price(&self) -> Decimal {
        self.item.price
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettlementResult {
    pub gross: Decimal,
    pub platform_fee_pct: Decimal,
    pub platform_fee: Decimal,
    pub studio_fee_pct: Option<Decimal>,
    pub studio_fee: Option<Decimal>,
    pub artist_payout: Decimal,
    pub artist_pct: Decimal,
}

impl SettlementResult {
    pub fn total_commission(&self) -> Decimal {
        self.platform_fee + self.studio_fee.unwrap_or(Decimal::ZERO)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxBreakdown {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    CreditCard,
    Crypto,
    RenaissanceCredits,
    PayByBank,
    ManualEft,
}

impl PaymentMethod {
    pub fn display_name(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "Credit Card",
            PaymentMethod::Crypto => "Crypto (Ethereum)",
            PaymentMethod::RenaissanceCredits => "Renaissance Credits",
            PaymentMethod::PayByBank => "Pay by bank",
            PaymentMethod::ManualEft => "Manual EFT",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown payment method '{0}', expected one of: card, crypto, credits, bank, eft")]
pub struct ParsePaymentMethodError(pub String);

impl FromStr for PaymentMethod {
    type Err = ParsePaymentMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "card" | "credit-card" | "credit_card" => Ok(PaymentMethod::CreditCard),
            "crypto" | "ethereum" => Ok(PaymentMethod::Crypto),
            "credits" | "renaissance-credits" => Ok(PaymentMethod::RenaissanceCredits),
            "bank" | "pay-by-bank" => Ok(PaymentMethod::PayByBank),
            "eft" | "manual-eft" => Ok(PaymentMethod::ManualEft),
            _ => Err(ParsePaymentMethodError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentDetails {
    pub method: PaymentMethod,
    /// Card number, wallet address or bank reference.
    pub account: String,
}

impl PaymentDetails {
    pub fn new(method: PaymentMethod, account: impl Into<String>) -> Self {
        Self {
            method,
            account: account.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerStatus {
    Settled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerRecord {
    pub reference: String,
    pub settled_at: DateTime<Utc>,
    pub item_count: usize,
    /// Sum of the cart prices before tax handling.
    pub items_total: Decimal,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub gross_total: Decimal,
    /// Fractional rate, e.g. `0.08`.
    pub tax_rate: Decimal,
    pub payment_method: PaymentMethod,
    pub status: LedgerStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
