pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::LocalStorage;
pub use config::AppConfig;
pub use crate::core::{
    cart::Cart,
    catalog::{Catalog, CatalogQuery, PriceRange},
    export::LedgerExporter,
    ledger::Ledger,
    marketplace::Marketplace,
    session::{Session, SessionManager, SettlementPolicy},
    split::{compute_split, split_for_tier},
    tax::{TaxMode, TaxPolicy},
    tiers::TierPolicies,
};
pub use domain::model::{
    ArtItem, CartEntry, LedgerRecord, LedgerStatus, PaymentDetails, PaymentMethod, SessionId,
    SettlementResult, TaxBreakdown, Tier, TierPolicy,
};
pub use utils::error::{ErrorCategory, RenaissanceError, Result};
