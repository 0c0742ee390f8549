use crate::domain::model::LedgerRecord;
use crate::utils::error::{RenaissanceError, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

pub const DEFAULT_REFERENCE_PREFIX: &str = "TX";

/// Append-only list of settled transactions for one session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    records: Vec<LedgerRecord>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn append(&mut self, record: LedgerRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[LedgerRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn find(&self, reference: &str) -> Option<&LedgerRecord> {
        self.records.iter().find(|r| r.reference == reference)
    }

    pub fn total_settled(&self) -> Result<Decimal> {
        checked_sum(self.records.iter().map(|r| r.gross_total), "settled total")
    }

    pub fn total_tax(&self) -> Result<Decimal> {
        checked_sum(self.records.iter().map(|r| r.tax), "tax total")
    }
}

fn checked_sum(mut amounts: impl Iterator<Item = Decimal>, operation: &'static str) -> Result<Decimal> {
    amounts
        .try_fold(Decimal::ZERO, |acc, amount| acc.checked_add(amount))
        .ok_or(RenaissanceError::AmountOverflow { operation })
}

/// `{prefix}-{YYYYMMDDHHMMSS}-{12 hex}`; the random part keeps references
/// unique when several settlements land in the same second.
pub fn generate_reference(prefix: &str, now: DateTime<Utc>) -> String {
    let token = Uuid::new_v4().simple().to_string().to_uppercase();
    format!("{}-{}-{}", prefix, now.format("%Y%m%d%H%M%S"), &token[..12])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_reference_format() {
        let now = DateTime::parse_from_rfc3339("2025-03-14T09:26:53Z")
            .unwrap()
            .with_timezone(&Utc);
        let reference = generate_reference("TX", now);
        let parts: Vec<&str> = reference.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "TX");
        assert_eq!(parts[1], "20250314092653");
        assert_eq!(parts[2].len(), 12);
        assert!(parts[2].chars().all(|c| c.is_ascii_hexdigit()));
    }

    fn settled(reference: &str, subtotal: Decimal, tax: Decimal) -> LedgerRecord {
        use crate::domain::model::{LedgerStatus, PaymentMethod};

        LedgerRecord {
            reference: reference.to_string(),
            settled_at: Utc::now(),
            item_count: 1,
            items_total: subtotal,
            subtotal,
            tax,
            gross_total: subtotal + tax,
            tax_rate: Decimal::new(8, 2),
            payment_method: PaymentMethod::RenaissanceCredits,
            status: LedgerStatus::Settled,
        }
    }

    #[test]
    fn test_totals_and_lookup() {
        let mut ledger = Ledger::new();
        for (reference, subtotal) in [("TX-A", 100), ("TX-B", 250)] {
            let subtotal = Decimal::from(subtotal);
            ledger.append(settled(reference, subtotal, subtotal * Decimal::new(8, 2)));
        }

        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.total_tax().unwrap(), Decimal::from(28));
        assert_eq!(ledger.total_settled().unwrap(), Decimal::from(378));
        assert_eq!(ledger.find("TX-B").map(|r| r.subtotal), Some(Decimal::from(250)));
        assert!(ledger.find("TX-C").is_none());
    }

    #[test]
    fn test_totals_overflow_is_an_error() {
        let mut ledger = Ledger::new();
        ledger.append(settled("TX-A", Decimal::MAX - Decimal::ONE, Decimal::ZERO));
        ledger.append(settled("TX-B", Decimal::MAX - Decimal::ONE, Decimal::ZERO));

        assert!(matches!(
            ledger.total_settled(),
            Err(RenaissanceError::AmountOverflow { operation: "settled total" })
        ));
        assert_eq!(ledger.total_tax().unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_references_unique_within_same_second() {
        let now = Utc::now();
        let refs: HashSet<String> = (0..500).map(|_| generate_reference("TX", now)).collect();
        assert_eq!(refs.len(), 500);
    }
}
