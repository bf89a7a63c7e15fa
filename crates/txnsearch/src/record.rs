//! The transaction record model.

use serde::{Deserialize, Serialize};

/// One synthetic credit-card transaction.
///
/// Stored as a flat field-to-string mapping in a Redis hash keyed by
/// `txn:<txn_id>`. Records are written once and never updated in place; a
/// `txn_id` collision silently overwrites the earlier record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Account identifier, 13 digits, not unique per record.
    pub acct_id: u64,
    /// Transaction identifier, 13 digits, part of the record key.
    pub txn_id: u64,
    /// ISO-8601 date-time string, escaped for safe indexing.
    pub txn_date: String,
    /// Epoch seconds derived from `txn_date`'s calendar components.
    pub txn_timestamp: i64,
    /// Last 4 digits of a synthetic card number.
    pub card_last_4: String,
    /// Transaction amount in [1.00, 1000.00], two fractional digits.
    pub txn_amt: f64,
    /// Currency tag, always "USD".
    pub txn_currency: String,
    /// One of the fixed 10 expense categories.
    pub expense_category: String,
    /// One of the fixed 10 merchants.
    pub merchant_name: String,
    /// Synthetic street address, escaped.
    pub merchant_address: String,
}

impl TransactionRecord {
    /// Flat field-to-value pairs for an `HSET` write.
    ///
    /// The amount is rendered with exactly two fractional digits so that the
    /// stored string matches the generated precision.
    #[must_use]
    pub fn to_field_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("acct_id", self.acct_id.to_string()),
            ("txn_id", self.txn_id.to_string()),
            ("txn_date", self.txn_date.clone()),
            ("txn_timestamp", self.txn_timestamp.to_string()),
            ("card_last_4", self.card_last_4.clone()),
            ("txn_amt", format!("{:.2}", self.txn_amt)),
            ("txn_currency", self.txn_currency.clone()),
            ("expense_category", self.expense_category.clone()),
            ("merchant_name", self.merchant_name.clone()),
            ("merchant_address", self.merchant_address.clone()),
        ]
    }
}
