use crate::domain::model::{LedgerRecord, LedgerStatus};
use crate::domain::ports::Storage;
use crate::utils::error::{RenaissanceError, Result};
use crate::utils::money::round_currency;
use rust_decimal::Decimal;
use serde::Serialize;

pub const LEDGER_CSV: &str = "ledger.csv";
pub const LEDGER_JSON: &str = "ledger.json";

#[derive(Debug, Serialize)]
struct LedgerRow<'a> {
    reference: &'a str,
    settled_at: String,
    status: &'static str,
    payment_method: &'static str,
    item_count: usize,
    items_total: Decimal,
    subtotal: Decimal,
    tax: Decimal,
    gross_total: Decimal,
    tax_rate_pct: Decimal,
}

impl<'a> From<&'a LedgerRecord> for LedgerRow<'a> {
    fn from(record: &'a LedgerRecord) -> Self {
        Self {
            reference: &record.reference,
            settled_at: record.settled_at.to_rfc3339(),
            status: match record.status {
                LedgerStatus::Settled => "Settled",
            },
            payment_method: record.payment_method.display_name(),
            item_count: record.item_count,
            items_total: round_currency(record.items_total),
            subtotal: round_currency(record.subtotal),
            tax: round_currency(record.tax),
            gross_total: round_currency(record.gross_total),
            tax_rate_pct: (record.tax_rate * Decimal::ONE_HUNDRED).normalize(),
        }
    }
}

/// Writes a session ledger out as CSV (rounded for display) and JSON
/// (full precision).
pub struct LedgerExporter<S: Storage> {
    storage: S,
}

impl<S: Storage> LedgerExporter<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub async fn export(&self, records: &[LedgerRecord]) -> Result<Vec<String>> {
        if records.is_empty() {
            return Err(RenaissanceError::EmptyLedger);
        }

        let csv_data = Self::to_csv(records)?;
        let json_data = serde_json::to_vec_pretty(records)?;

        let csv_path = self.storage.write_file(LEDGER_CSV, &csv_data).await?;
        let json_path = self.storage.write_file(LEDGER_JSON, &json_data).await?;

        tracing::info!(records = records.len(), csv = %csv_path, json = %json_path, "ledger exported");
        Ok(vec![csv_path, json_path])
    }

    fn to_csv(records: &[LedgerRecord]) -> Result<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        for record in records {
            writer.serialize(LedgerRow::from(record))?;
        }
        writer.into_inner().map_err(|e| RenaissanceError::IoError(e.into_error()))
    }
}
