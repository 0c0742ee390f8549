//! Display helpers for currency amounts and percentages.
//!
//! Amounts stay at full `Decimal` precision everywhere else in the crate.
//! Rounding happens here only: half away from zero, two decimal places.

use rust_decimal::{Decimal, RoundingStrategy};

pub const CURRENCY_DP: u32 = 2;

pub fn round_currency(amount: Decimal) -> Decimal {
    let mut rounded =
        amount.round_dp_with_strategy(CURRENCY_DP, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(CURRENCY_DP);
    rounded
}

/// Formats `amount` as e.g. `$12,700.00`.
pub fn format_currency(symbol: &str, amount: Decimal) -> String {
    let rounded = round_currency(amount);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    let text = format!("{:.2}", rounded.abs());
    let (whole, frac) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    format!("{}{}{}.{}", sign, symbol, group_thousands(whole), frac)
}

/// Formats a percentage with one decimal, e.g. `80.0%`.
pub fn format_percent(pct: Decimal) -> String {
    let rounded = pct.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.1}%", rounded)
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
