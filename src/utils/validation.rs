use crate::utils::error::{RenaissanceError, Result};
use rust_decimal::Decimal;
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_positive_amount(value: Decimal) -> Result<()> {
    if value <= Decimal::ZERO {
        return Err(RenaissanceError::NonPositivePrice { price: value });
    }
    Ok(())
}

/// Percentages are expressed in whole-number form, e.g. `15` for 15%.
pub fn validate_percent(field_name: &str, value: Decimal) -> Result<()> {
    if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
        return Err(RenaissanceError::PercentOutOfRange {
            field: field_name.to_string(),
            value,
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(RenaissanceError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// Fee and tax rates must leave something for the seller: `[0, 100)`.
pub fn validate_rate_below_hundred(field_name: &str, value: Decimal) -> Result<()> {
    if value < Decimal::ZERO || value >= Decimal::ONE_HUNDRED {
        return Err(RenaissanceError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Rate must be at least 0 and below 100".to_string(),
        });
    }
    Ok(())
}

pub fn validate_reference_prefix(field_name: &str, prefix: &str) -> Result<()> {
    validate_non_empty_string(field_name, prefix)?;
    if !prefix.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(RenaissanceError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: prefix.to_string(),
            reason: "Prefix may only contain ASCII letters and digits".to_string(),
        });
    }
    Ok(())
}

pub fn validate_unique_ids(ids: impl IntoIterator<Item = u32>) -> Result<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(RenaissanceError::DuplicateItemId { id });
        }
    }
    Ok(())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(RenaissanceError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(RenaissanceError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}
