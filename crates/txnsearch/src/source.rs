//! Synthetic transaction data sources.
//!
//! [`TransactionDataSource`] is the capability interface the generator
//! draws from; any implementation is substitutable. The built-in
//! [`SeededTransactionSource`] is deterministic: two sources constructed
//! with the same seed produce identical draw sequences.

use chrono::{Duration, NaiveDateTime};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::constants::{EXPENSE_CATEGORIES, MERCHANTS};

const STREET_NAMES: &[&str] = &[
    "Johnson", "Garcia", "Miller", "Davis", "Lopez", "Wilson", "Anderson", "Thomas", "Taylor",
    "Moore", "Jackson", "Martin", "Lee", "Thompson", "White", "Harris",
];

const STREET_SUFFIXES: &[&str] = &[
    "St", "Ave", "Blvd", "Dr", "Ln", "Rd", "Way", "Ct", "Pl", "Ter",
];

const CITIES: &[&str] = &[
    "Springfield",
    "Riverton",
    "Fairview",
    "Georgetown",
    "Clinton",
    "Salem",
    "Madison",
    "Ashland",
    "Franklin",
    "Arlington",
    "Clayton",
    "Bristol",
];

const STATES: &[&str] = &[
    "AL", "CA", "CO", "FL", "GA", "IL", "MI", "MT", "NV", "NY", "OH", "OR", "TX", "WA",
];

/// Capability interface for fabricating transaction field values.
///
/// Implementations own whatever randomness they use; the generator never
/// touches ambient global state.
pub trait TransactionDataSource {
    /// Next merchant name, drawn from the fixed 10-merchant set.
    fn next_merchant(&mut self) -> &'static str;

    /// Next expense category, drawn from the fixed 10-category set.
    fn next_category(&mut self) -> &'static str;

    /// Next 13-digit account/transaction identifier.
    fn next_account_number(&mut self) -> u64;

    /// Last 4 digits of a synthetic card number.
    fn next_card_suffix(&mut self) -> String;

    /// Next synthetic street address (unescaped).
    fn next_address(&mut self) -> String;

    /// Next datetime in `[start, end)`, whole-second granularity.
    fn next_datetime_between(&mut self, start: NaiveDateTime, end: NaiveDateTime)
        -> NaiveDateTime;

    /// Next transaction amount in [1.00, 1000.00], two fractional digits.
    fn next_amount(&mut self) -> f64;
}

/// Deterministic transaction source backed by a seeded ChaCha8 stream.
#[derive(Debug, Clone)]
pub struct SeededTransactionSource {
    rng: ChaCha8Rng,
}

impl SeededTransactionSource {
    /// Create a source whose draw sequence is fully determined by `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    fn pick<'a>(&mut self, values: &'a [&'a str]) -> &'a str {
        values[self.rng.gen_range(0..values.len())]
    }
}

impl TransactionDataSource for SeededTransactionSource {
    fn next_merchant(&mut self) -> &'static str {
        self.pick(MERCHANTS)
    }

    fn next_category(&mut self) -> &'static str {
        self.pick(EXPENSE_CATEGORIES)
    }

    fn next_account_number(&mut self) -> u64 {
        self.rng.gen_range(1_000_000_000_000..10_000_000_000_000)
    }

    fn next_card_suffix(&mut self) -> String {
        format!("{:04}", self.rng.gen_range(0..10_000))
    }

    fn next_address(&mut self) -> String {
        let number = self.rng.gen_range(1..10_000);
        let street = self.pick(STREET_NAMES);
        let suffix = self.pick(STREET_SUFFIXES);
        let city = self.pick(CITIES);
        let state = self.pick(STATES);
        let zip = self.rng.gen_range(10_000..100_000);
        format!("{number} {street} {suffix}, {city}, {state} {zip}")
    }

    fn next_datetime_between(
        &mut self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> NaiveDateTime {
        let span = (end - start).num_seconds().max(1);
        start + Duration::seconds(self.rng.gen_range(0..span))
    }

    fn next_amount(&mut self) -> f64 {
        let raw: f64 = self.rng.gen_range(1.0..1000.0);
        (raw * 100.0).round() / 100.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::utils::naive_from_epoch;

    const DRAWS: usize = 500;

    #[test]
    fn test_merchant_and_category_stay_in_fixed_sets() {
        let mut source = SeededTransactionSource::new(0);
        for _ in 0..DRAWS {
            assert!(MERCHANTS.contains(&source.next_merchant()));
            assert!(EXPENSE_CATEGORIES.contains(&source.next_category()));
        }
    }

    #[test]
    fn test_account_numbers_have_thirteen_digits() {
        let mut source = SeededTransactionSource::new(1);
        for _ in 0..DRAWS {
            let id = source.next_account_number();
            assert_eq!(id.to_string().len(), 13);
        }
    }

    #[test]
    fn test_card_suffix_is_four_digits() {
        let mut source = SeededTransactionSource::new(2);
        for _ in 0..DRAWS {
            let suffix = source.next_card_suffix();
            assert_eq!(suffix.len(), 4);
            assert!(suffix.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_amounts_stay_in_range_with_cent_precision() {
        let mut source = SeededTransactionSource::new(3);
        for _ in 0..DRAWS {
            let amt = source.next_amount();
            assert!((1.0..=1000.0).contains(&amt), "amount {amt} out of range");
            let cents = amt * 100.0;
            assert!((cents - cents.round()).abs() < 1e-9);
        }
    }

    #[test]
    fn test_datetimes_stay_inside_window() {
        let start = naive_from_epoch(1_577_836_800); // 2020-01-01
        let end = naive_from_epoch(1_672_531_200); // 2023-01-01
        let mut source = SeededTransactionSource::new(4);
        for _ in 0..DRAWS {
            let dt = source.next_datetime_between(start, end);
            assert!(dt >= start && dt < end);
        }
    }

    #[test]
    fn test_equal_seeds_give_equal_sequences() {
        let mut a = SeededTransactionSource::new(7);
        let mut b = SeededTransactionSource::new(7);
        for _ in 0..DRAWS {
            assert_eq!(a.next_merchant(), b.next_merchant());
            assert_eq!(a.next_account_number(), b.next_account_number());
            assert_eq!(a.next_address(), b.next_address());
        }
    }

    #[test]
    fn test_different_seeds_diverge() {
        let mut a = SeededTransactionSource::new(0);
        let mut b = SeededTransactionSource::new(1);
        let ids_a: Vec<u64> = (0..DRAWS).map(|_| a.next_account_number()).collect();
        let ids_b: Vec<u64> = (0..DRAWS).map(|_| b.next_account_number()).collect();
        assert_ne!(ids_a, ids_b);
    }
}
