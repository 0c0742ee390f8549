//! Commission split between the platform, an optional studio or gallery,
//! and the artist.
//!
//! All amounts are exact `Decimal` values. The artist payout is computed as
//! the remainder, so the three parts always add back up to the sale price.

use crate::core::tiers::TierPolicies;
use crate::domain::model::{SettlementResult, Tier};
use crate::utils::error::{RenaissanceError, Result};
use crate::utils::validation::{validate_percent, validate_positive_amount};
use rust_decimal::Decimal;

/// Default studio/gallery commission offered by the split simulator.
pub const DEFAULT_STUDIO_FEE_PCT: u32 = 15;

/// Split `sale_price` given the platform fee and an optional studio fee,
/// both in percent.
///
/// # Errors
///
/// - [`RenaissanceError::NonPositivePrice`] if `sale_price <= 0`
/// - [`RenaissanceError::PercentOutOfRange`] if a rate is outside `[0, 100]`
/// - [`RenaissanceError::InvalidSplit`] if the rates sum to 100 or more
pub fn compute_split(
    sale_price: Decimal,
    platform_fee_pct: Decimal,
    studio_fee_pct: Option<Decimal>,
) -> Result<SettlementResult> {
    validate_positive_amount(sale_price)?;
    validate_percent("platform_fee_pct", platform_fee_pct)?;
    if let Some(studio) = studio_fee_pct {
        validate_percent("studio_fee_pct", studio)?;
    }

    let studio_pct = studio_fee_pct.unwrap_or(Decimal::ZERO);
    let commission_pct = platform_fee_pct + studio_pct;
    if commission_pct >= Decimal::ONE_HUNDRED {
        tracing::warn!(
            platform_pct = %platform_fee_pct,
            studio_pct = %studio_pct,
            "rejected split: commission leaves no artist payout"
        );
        return Err(RenaissanceError::InvalidSplit {
            platform_pct: platform_fee_pct,
            studio_pct,
        });
    }

    let platform_fee = percent_of(sale_price, platform_fee_pct, "platform fee")?;
    let studio_fee = studio_fee_pct
        .map(|pct| percent_of(sale_price, pct, "studio fee"))
        .transpose()?;
    let artist_payout = sale_price
        .checked_sub(platform_fee)
        .and_then(|rest| rest.checked_sub(studio_fee.unwrap_or(Decimal::ZERO)))
        .ok_or(RenaissanceError::AmountOverflow {
            operation: "artist payout",
        })?;

    tracing::debug!(
        price = %sale_price,
        platform_fee = %platform_fee,
        artist_payout = %artist_payout,
        "computed split"
    );

    Ok(SettlementResult {
        gross: sale_price,
        platform_fee_pct,
        platform_fee,
        studio_fee_pct,
        studio_fee,
        artist_payout,
        artist_pct: Decimal::ONE_HUNDRED - commission_pct,
    })
}

fn percent_of(amount: Decimal, pct: Decimal, operation: &'static str) -> Result<Decimal> {
    amount
        .checked_mul(pct)
        .and_then(|v| v.checked_div(Decimal::ONE_HUNDRED))
        .ok_or(RenaissanceError::AmountOverflow { operation })
}

/// Split using the base platform fee of `tier`.
pub fn split_for_tier(
    sale_price: Decimal,
    tier: Tier,
    policies: &TierPolicies,
    studio_fee_pct: Option<Decimal>,
) -> Result<SettlementResult> {
    compute_split(sale_price, policies.fee_pct(tier), studio_fee_pct)
}
