use crate::core::catalog::{CatalogQuery, PriceRange};
use crate::domain::model::{PaymentDetails, PaymentMethod, Tier};
use crate::utils::error::{RenaissanceError, Result};
use crate::utils::validation::{validate_path, Validate};
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;

#[derive(Debug, Clone, Parser)]
#[command(name = "renaissance")]
#[command(about = "Art marketplace core: catalog search, commission splits and checkout")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List artist tiers and their platform fees
    Tiers,
    /// Search and filter the catalog
    Browse(BrowseArgs),
    /// Compute the commission split for a sale
    Split(SplitArgs),
    /// Add artworks to a cart and settle it
    Checkout(CheckoutArgs),
}

#[derive(Debug, Clone, Args)]
pub struct BrowseArgs {
    /// Case-insensitive text matched against title, artist and description
    #[arg(short, long, default_value = "")]
    pub query: String,

    #[arg(long)]
    pub min_price: Option<Decimal>,

    #[arg(long)]
    pub max_price: Option<Decimal>,

    #[arg(long)]
    pub category: Option<String>,

    #[arg(long)]
    pub medium: Option<String>,

    /// Restrict to one or more tiers (emerging, semi-pro, studio-gallery)
    #[arg(long = "tier")]
    pub tiers: Vec<Tier>,

    /// Only AR-ready artworks
    #[arg(long)]
    pub ar: bool,

    /// Only VR-ready artworks
    #[arg(long)]
    pub vr: bool,
}

impl BrowseArgs {
    pub fn to_query(&self) -> Result<CatalogQuery> {
        let range = PriceRange::new(
            self.min_price.unwrap_or(Decimal::ZERO),
            self.max_price.unwrap_or(Decimal::MAX),
        )?;
        Ok(CatalogQuery {
            text: self.query.clone(),
            price_range: range,
            category: self.category.clone(),
            medium: self.medium.clone(),
            tiers: self.tiers.clone(),
            ar_only: self.ar,
            vr_only: self.vr,
        })
    }
}

#[derive(Debug, Clone, Args)]
pub struct SplitArgs {
    /// Sale price; required unless --item is given
    #[arg(short, long, conflicts_with = "item")]
    pub price: Option<Decimal>,

    /// Artist tier; required together with --price
    #[arg(short, long, requires = "price")]
    pub tier: Option<Tier>,

    /// Quote a catalog item at its listed price and tier
    #[arg(short, long)]
    pub item: Option<u32>,

    /// Studio/gallery commission in percent; omit when no studio is involved
    #[arg(short, long)]
    pub studio_pct: Option<Decimal>,
}

impl Validate for SplitArgs {
    fn validate(&self) -> Result<()> {
        match (self.item, self.price, self.tier) {
            (Some(_), None, None) | (None, Some(_), Some(_)) => Ok(()),
            _ => Err(RenaissanceError::ValidationError {
                message: "pass either --item <id> or both --price and --tier".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct CheckoutArgs {
    /// Catalog item ids to add, in order; repeat for duplicates
    #[arg(short, long = "item", required = true)]
    pub items: Vec<u32>,

    /// Payment method (card, crypto, credits, bank, eft)
    #[arg(short, long, default_value = "card")]
    pub method: PaymentMethod,

    /// Card number, wallet address or bank reference
    #[arg(short, long, default_value = "")]
    pub account: String,

    /// Directory to write ledger.csv and ledger.json into
    #[arg(long)]
    pub export: Option<String>,
}

impl CheckoutArgs {
    pub fn payment(&self) -> PaymentDetails {
        PaymentDetails::new(self.method, self.account.clone())
    }
}

impl Validate for CheckoutArgs {
    fn validate(&self) -> Result<()> {
        if let Some(dir) = &self.export {
            validate_path("export", dir)?;
        }
        Ok(())
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = &self.config {
            validate_path("config", path)?;
        }
        match &self.command {
            Command::Split(args) => args.validate(),
            Command::Checkout(args) => args.validate(),
            Command::Tiers | Command::Browse(_) => Ok(()),
        }
    }
}
