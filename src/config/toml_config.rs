use crate::core::catalog::Catalog;
use crate::core::ledger::DEFAULT_REFERENCE_PREFIX;
use crate::core::marketplace::{Marketplace, DEFAULT_CURRENCY_SYMBOL};
use crate::core::session::SettlementPolicy;
use crate::core::tax::{TaxMode, TaxPolicy, DEFAULT_TAX_RATE_PCT};
use crate::core::tiers::TierPolicies;
use crate::domain::model::{ArtItem, Tier, TierPolicy};
use crate::utils::error::{RenaissanceError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_amount, validate_rate_below_hundred,
    validate_reference_prefix, validate_unique_ids, Validate,
};
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub marketplace: MarketplaceConfig,
    pub tax: TaxConfig,
    pub ledger: LedgerConfig,
    pub tiers: TiersConfig,
    /// Replaces the built-in showcase catalog when non-empty.
    pub catalog: Vec<ArtItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketplaceConfig {
    pub name: String,
    pub currency_symbol: String,
}

impl Default for MarketplaceConfig {
    fn default() -> Self {
        Self {
            name: "Renaissance".to_string(),
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxConfig {
    /// Percent, e.g. `8` for 8%.
    pub rate_pct: Decimal,
    pub mode: TaxMode,
}

impl Default for TaxConfig {
    fn default() -> Self {
        Self {
            rate_pct: Decimal::from(DEFAULT_TAX_RATE_PCT),
            mode: TaxMode::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    pub reference_prefix: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            reference_prefix: DEFAULT_REFERENCE_PREFIX.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TiersConfig {
    pub emerging: Option<TierPolicy>,
    pub semi_pro: Option<TierPolicy>,
    pub studio_gallery: Option<TierPolicy>,
}

impl TiersConfig {
    fn overrides(&self) -> impl Iterator<Item = (Tier, &TierPolicy)> {
        [
            (Tier::Emerging, self.emerging.as_ref()),
            (Tier::SemiPro, self.semi_pro.as_ref()),
            (Tier::StudioGallery, self.studio_gallery.as_ref()),
        ]
        .into_iter()
        .filter_map(|(tier, policy)| policy.map(|p| (tier, p)))
    }
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"))
}

impl AppConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| RenaissanceError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the value of `VAR`; unknown variables are left as-is.
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("marketplace.name", &self.marketplace.name)?;
        validate_non_empty_string("marketplace.currency_symbol", &self.marketplace.currency_symbol)?;
        validate_rate_below_hundred("tax.rate_pct", self.tax.rate_pct)?;
        validate_reference_prefix("ledger.reference_prefix", &self.ledger.reference_prefix)?;

        for (tier, policy) in self.tiers.overrides() {
            let field = format!("tiers.{}.fee_pct", tier_key(tier));
            validate_rate_below_hundred(&field, policy.fee_pct)?;
        }

        validate_unique_ids(self.catalog.iter().map(|item| item.id))?;
        for item in &self.catalog {
            validate_positive_amount(item.price).map_err(|_| {
                RenaissanceError::InvalidConfigValueError {
                    field: format!("catalog[{}].price", item.id),
                    value: item.price.to_string(),
                    reason: "Price must be positive".to_string(),
                }
            })?;
            validate_non_empty_string(&format!("catalog[{}].title", item.id), &item.title)?;
            validate_non_empty_string(&format!("catalog[{}].artist", item.id), &item.artist)?;
        }

        Ok(())
    }

    pub fn tier_policies(&self) -> TierPolicies {
        TierPolicies::with_overrides(
            self.tiers
                .overrides()
                .map(|(tier, policy)| (tier, policy.clone())),
        )
    }

    pub fn settlement_policy(&self) -> Result<SettlementPolicy> {
        Ok(SettlementPolicy {
            tax: TaxPolicy::from_percent(self.tax.rate_pct, self.tax.mode)?,
            reference_prefix: self.ledger.reference_prefix.clone(),
        })
    }

    pub fn build_catalog(&self) -> Result<Catalog> {
        if self.catalog.is_empty() {
            return Ok(Catalog::default());
        }
        Catalog::new(self.catalog.clone())
    }

    /// Validates and assembles the shared marketplace.
    pub fn build_marketplace(&self) -> Result<Marketplace> {
        self.validate_config()?;
        let marketplace = Marketplace::new(
            self.build_catalog()?,
            self.tier_policies(),
            self.settlement_policy()?,
            self.marketplace.currency_symbol.clone(),
        );
        tracing::info!(
            name = %self.marketplace.name,
            items = marketplace.catalog().len(),
            tax_rate_pct = %self.tax.rate_pct,
            tax_mode = ?self.tax.mode,
            "marketplace configured"
        );
        Ok(marketplace)
    }
}

fn tier_key(tier: Tier) -> &'static str {
    match tier {
        Tier::Emerging => "emerging",
        Tier::SemiPro => "semi_pro",
        Tier::StudioGallery => "studio_gallery",
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.tax.rate_pct, Decimal::from(8));
        assert_eq!(config.tax.mode, TaxMode::Exclusive);
        assert_eq!(config.ledger.reference_prefix, "TX");

        let marketplace = config.build_marketplace().unwrap();
        assert_eq!(marketplace.catalog().len(), 8);
        assert_eq!(marketplace.tiers(), &TierPolicies::default());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r##"
[marketplace]
name = "Renaissance ZA"
currency_symbol = "ZAR "

[tax]
rate_pct = 15
mode = "inclusive"

[ledger]
reference_prefix = "RNS"

[tiers.emerging]
color = "gray"
fee_pct = 25
description = "Trial tier"

[[catalog]]
id = 10
title = "Harbour Lights"
artist = "Thandi Mokoena"
medium = "Painter"
category = "Landscape"
price = 1800
tier = "Emerging"
ar_ready = true

[[catalog]]
id = 11
title = "Steel Bloom"
artist = "Ivo Petrov"
medium = "Sculptor"
category = "Modern"
price = 9500.50
tier = "studio-gallery"
vr_ready = true
"##;

        let config = AppConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_ok());

        let marketplace = config.build_marketplace().unwrap();
        assert_eq!(marketplace.currency_symbol(), "ZAR ");
        assert_eq!(marketplace.catalog().len(), 2);
        assert_eq!(marketplace.tiers().fee_pct(Tier::Emerging), Decimal::from(25));
        assert_eq!(marketplace.tiers().fee_pct(Tier::SemiPro), Decimal::from(10));
        assert_eq!(marketplace.settlement().tax.mode(), TaxMode::Inclusive);
        assert_eq!(marketplace.settlement().reference_prefix, "RNS");

        let steel = marketplace.item(11).unwrap();
        assert_eq!(steel.price, Decimal::new(950050, 2));
        assert_eq!(steel.tier, Tier::StudioGallery);
        assert!(steel.vr_ready && !steel.ar_ready);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("RENAISSANCE_TEST_PREFIX", "ENV");

        let toml_content = r#"
[ledger]
reference_prefix = "${RENAISSANCE_TEST_PREFIX}"
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.ledger.reference_prefix, "ENV");

        std::env::remove_var("RENAISSANCE_TEST_PREFIX");
    }

    #[test]
    fn test_config_validation_failures() {
        let bad_tax = AppConfig::from_toml_str("[tax]\nrate_pct = 100\n").unwrap();
        assert!(bad_tax.validate().is_err());

        let bad_tier = AppConfig::from_toml_str(
            "[tiers.semi_pro]\ncolor = \"blue\"\nfee_pct = 100\ndescription = \"x\"\n",
        )
        .unwrap();
        assert!(bad_tier.validate().is_err());

        let bad_prefix = AppConfig::from_toml_str("[ledger]\nreference_prefix = \"T X\"\n").unwrap();
        assert!(bad_prefix.validate().is_err());

        let duplicate = r#"
[[catalog]]
id = 1
title = "A"
artist = "B"
medium = "Painter"
category = "Modern"
price = 10
tier = "emerging"

[[catalog]]
id = 1
title = "C"
artist = "D"
medium = "Painter"
category = "Modern"
price = 20
tier = "emerging"
"#;
        let config = AppConfig::from_toml_str(duplicate).unwrap();
        assert!(matches!(
            config.validate(),
            Err(RenaissanceError::DuplicateItemId { id: 1 })
        ));
    }

    #[test]
    fn test_invalid_toml_reports_parse_error() {
        let err = AppConfig::from_toml_str("[tax\nrate_pct = ").unwrap_err();
        assert!(matches!(err, RenaissanceError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[marketplace]\nname = \"File Test\"\n")
            .unwrap();

        let config = AppConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.marketplace.name, "File Test");
        assert_eq!(config.marketplace.currency_symbol, "$");
    }
}
