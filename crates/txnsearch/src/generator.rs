//! Bulk-load of synthetic transaction records.

use chrono::NaiveDateTime;
use tracing::{debug, info};

use crate::constants::{GENERATION_WINDOW_END_EPOCH, GENERATION_WINDOW_START_EPOCH, TXN_CURRENCY};
use crate::error::Result;
use crate::record::TransactionRecord;
use crate::source::TransactionDataSource;
use crate::store::TransactionStore;
use crate::utils::{epoch_seconds, escape_query_text, naive_from_epoch};

/// Configuration for a generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateConfig {
    /// Inclusive lower bound of generated transaction datetimes.
    pub window_start: NaiveDateTime,
    /// Exclusive upper bound of generated transaction datetimes.
    pub window_end: NaiveDateTime,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            window_start: naive_from_epoch(GENERATION_WINDOW_START_EPOCH),
            window_end: naive_from_epoch(GENERATION_WINDOW_END_EPOCH),
        }
    }
}

/// Fabricate one transaction record from the source.
///
/// `txn_timestamp` is the POSIX timestamp of the generated datetime's
/// calendar components; `txn_date` is the same datetime rendered as
/// ISO-8601 and escaped, as is the street address.
pub fn next_record<S: TransactionDataSource>(
    source: &mut S,
    config: &GenerateConfig,
) -> TransactionRecord {
    let dt = source.next_datetime_between(config.window_start, config.window_end);

    TransactionRecord {
        acct_id: source.next_account_number(),
        txn_id: source.next_account_number(),
        txn_date: escape_query_text(&dt.format("%Y-%m-%dT%H:%M:%S").to_string()),
        txn_timestamp: epoch_seconds(dt),
        card_last_4: source.next_card_suffix(),
        txn_amt: source.next_amount(),
        txn_currency: TXN_CURRENCY.to_string(),
        expense_category: source.next_category().to_string(),
        merchant_name: source.next_merchant().to_string(),
        merchant_address: escape_query_text(&source.next_address()),
    }
}

/// Generate exactly `count` records and persist each one.
///
/// Best-effort bulk-load: one `HSET` per record, no batching, no retries.
/// Any write failure propagates immediately. Records colliding on `txn_id`
/// silently overwrite, so the number of stored keys may be lower than
/// `count`. The first generated record is logged as a human-readable
/// sample.
pub async fn generate<S: TransactionDataSource>(
    store: &TransactionStore,
    count: usize,
    source: &mut S,
    config: &GenerateConfig,
) -> Result<usize> {
    for i in 0..count {
        let record = next_record(source, config);
        store.insert_record(&record).await?;

        if i == 0 {
            info!(
                "sample transaction record:\n{}",
                serde_json::to_string_pretty(&record)?
            );
        } else {
            debug!(txn_id = record.txn_id, "record inserted");
        }
    }

    info!(count, prefix = store.key_prefix(), "transactions inserted as hashes");
    Ok(count)
}
