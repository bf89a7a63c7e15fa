//! Utility functions for query-text escaping and epoch conversion.

use chrono::{DateTime, NaiveDateTime};

/// Escape a free-text value before it is indexed or embedded in a query.
///
/// Every character outside `[A-Za-z0-9_]` is prefixed with a backslash so
/// that dates, addresses, and other free text cannot collide with characters
/// the query mini-language treats as operators.
#[must_use]
pub fn escape_query_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() * 2);
    for ch in text.chars() {
        if !ch.is_ascii_alphanumeric() && ch != '_' {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// POSIX timestamp of a naive datetime's calendar components, interpreted
/// as UTC and truncated to whole seconds.
#[must_use]
pub fn epoch_seconds(dt: NaiveDateTime) -> i64 {
    dt.and_utc().timestamp()
}

/// Naive UTC datetime for an epoch-seconds value.
///
/// Out-of-range inputs clamp to the Unix epoch; all callers pass constants
/// that are well inside chrono's representable range.
#[must_use]
pub fn naive_from_epoch(secs: i64) -> NaiveDateTime {
    DateTime::from_timestamp(secs, 0)
        .unwrap_or(DateTime::UNIX_EPOCH)
        .naive_utc()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_escape_leaves_alphanumerics_alone() {
        assert_eq!(escape_query_text("Walmart"), "Walmart");
        assert_eq!(escape_query_text("txn_id_42"), "txn_id_42");
    }

    #[test]
    fn test_escape_dates_and_addresses() {
        assert_eq!(
            escape_query_text("2022-06-15T09:30:00"),
            "2022\\-06\\-15T09\\:30\\:00"
        );
        assert_eq!(
            escape_query_text("12 Oak St, Reno"),
            "12\\ Oak\\ St\\,\\ Reno"
        );
    }

    #[test]
    fn test_escape_empty_string() {
        assert_eq!(escape_query_text(""), "");
    }

    #[test]
    fn test_epoch_seconds_roundtrip() {
        let dt = NaiveDate::from_ymd_opt(2022, 6, 15)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        let secs = epoch_seconds(dt);
        assert_eq!(naive_from_epoch(secs), dt);
    }

    #[test]
    fn test_naive_from_epoch_clamps_out_of_range() {
        assert_eq!(naive_from_epoch(i64::MAX), naive_from_epoch(0));
    }
}
