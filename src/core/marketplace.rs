use crate::core::catalog::{Catalog, CatalogQuery};
use crate::core::session::SettlementPolicy;
use crate::core::split::{compute_split, split_for_tier};
use crate::core::tiers::TierPolicies;
use crate::domain::model::{ArtItem, SettlementResult, Tier};
use crate::utils::error::Result;
use crate::utils::money::format_currency;
use rust_decimal::Decimal;
use std::sync::Arc;

pub const DEFAULT_CURRENCY_SYMBOL: &str = "$";

/// Read-only reference data and policies shared by every session.
#[derive(Debug, Clone)]
pub struct Marketplace {
    catalog: Catalog,
    tiers: TierPolicies,
    settlement: SettlementPolicy,
    currency_symbol: String,
}

impl Marketplace {
    pub fn new(
        catalog: Catalog,
        tiers: TierPolicies,
        settlement: SettlementPolicy,
        currency_symbol: impl Into<String>,
    ) -> Self {
        Self {
            catalog,
            tiers,
            settlement,
            currency_symbol: currency_symbol.into(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn tiers(&self) -> &TierPolicies {
        &self.tiers
    }

    pub fn settlement(&self) -> &SettlementPolicy {
        &self.settlement
    }

    pub fn currency_symbol(&self) -> &str {
        &self.currency_symbol
    }

    pub fn format_amount(&self, amount: Decimal) -> String {
        format_currency(&self.currency_symbol, amount)
    }

    pub fn browse(&self, query: &CatalogQuery) -> Vec<Arc<ArtItem>> {
        self.catalog.filter(query)
    }

    pub fn item(&self, id: u32) -> Result<Arc<ArtItem>> {
        self.catalog.require(id)
    }

    /// Split for an arbitrary sale at the given tier.
    pub fn split(
        &self,
        sale_price: Decimal,
        tier: Tier,
        studio_fee_pct: Option<Decimal>,
    ) -> Result<SettlementResult> {
        split_for_tier(sale_price, tier, &self.tiers, studio_fee_pct)
    }

    /// Split for a catalog item at its listed price and its artist's tier.
    pub fn quote(&self, item_id: u32, studio_fee_pct: Option<Decimal>) -> Result<SettlementResult> {
        let item = self.catalog.require(item_id)?;
        compute_split(item.price, self.tiers.fee_pct(item.tier), studio_fee_pct)
    }
}

impl Default for Marketplace {
    fn default() -> Self {
        Self::new(
            Catalog::default(),
            TierPolicies::default(),
            SettlementPolicy::default(),
            DEFAULT_CURRENCY_SYMBOL,
        )
    }
}
