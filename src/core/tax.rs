use crate::domain::model::TaxBreakdown;
use crate::utils::error::{RenaissanceError, Result};
use crate::utils::validation::validate_rate_below_hundred;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Canonical sales tax rate, in percent.
pub const DEFAULT_TAX_RATE_PCT: u32 = 8;

/// Whether catalog prices already contain tax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxMode {
    /// Tax is added on top of the item prices at checkout.
    #[default]
    Exclusive,
    /// Item prices are gross; tax is carved out of them.
    Inclusive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxPolicy {
    rate: Decimal,
    mode: TaxMode,
}

impl TaxPolicy {
    /// `rate_pct` is in percent, e.g. `8` for 8%.
    pub fn from_percent(rate_pct: Decimal, mode: TaxMode) -> Result<Self> {
        validate_rate_below_hundred("tax.rate_pct", rate_pct)?;
        Ok(Self {
            rate: rate_pct / Decimal::ONE_HUNDRED,
            mode,
        })
    }

    /// Fractional rate, e.g. `0.08`.
    pub fn rate(&self) -> Decimal {
        self.rate
    }

    pub fn rate_pct(&self) -> Decimal {
        self.rate * Decimal::ONE_HUNDRED
    }

    pub fn mode(&self) -> TaxMode {
        self.mode
    }

    pub fn apply(&self, items_total: Decimal) -> Result<TaxBreakdown> {
        match self.mode {
            TaxMode::Exclusive => add_exclusive(items_total, self.rate),
            TaxMode::Inclusive => Ok(decompose_inclusive(items_total, self.rate)),
        }
    }
}

impl Default for TaxPolicy {
    fn default() -> Self {
        Self {
            rate: Decimal::from(DEFAULT_TAX_RATE_PCT) / Decimal::ONE_HUNDRED,
            mode: TaxMode::Exclusive,
        }
    }
}

/// Split a tax-inclusive `total` at fractional rate `rate`.
///
/// Infallible: the divisor is at least one and `subtotal <= total`.
pub fn decompose_inclusive(total: Decimal, rate: Decimal) -> TaxBreakdown {
    let subtotal = total / (Decimal::ONE + rate);
    TaxBreakdown {
        subtotal,
        tax: total - subtotal,
        total,
    }
}

/// Add tax at fractional rate `rate` on top of `subtotal`.
///
/// # Errors
///
/// [`RenaissanceError::AmountOverflow`] if the tax or the total does not fit a `Decimal`.
pub fn add_exclusive(subtotal: Decimal, rate: Decimal) -> Result<TaxBreakdown> {
    let tax = subtotal
        .checked_mul(rate)
        .ok_or(RenaissanceError::AmountOverflow { operation: "tax" })?;
    let total = subtotal
        .checked_add(tax)
        .ok_or(RenaissanceError::AmountOverflow { operation: "order total" })?;
    Ok(TaxBreakdown {
        subtotal,
        tax,
        total,
    })
}
