pub mod cart;
pub mod catalog;
pub mod export;
pub mod ledger;
pub mod marketplace;
pub mod session;
pub mod split;
pub mod tax;
pub mod tiers;

pub use crate::domain::model::{ArtItem, CartEntry, LedgerRecord, SettlementResult, Tier};
pub use crate::domain::ports::Storage;
pub use crate::utils::error::Result;
