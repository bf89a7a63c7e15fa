//! Constants for the transaction search demo.

/// Default Redis connection URL.
pub const DEFAULT_REDIS_URL: &str = "redis://localhost:6379";

/// Name of the secondary index over transaction hashes.
pub const INDEX_NAME: &str = "txnIdx";

/// Key prefix for transaction records; every record key is `txn:<txn_id>`.
pub const KEY_PREFIX: &str = "txn:";

/// Default number of synthetic transactions to load.
pub const DEFAULT_RECORD_COUNT: usize = 5000;

/// Default seed for the deterministic record source.
pub const DEFAULT_SEED: u64 = 0;

/// Currency tag attached to every generated transaction.
pub const TXN_CURRENCY: &str = "USD";

/// Fixed merchant set; `merchant_name` always comes from here.
pub const MERCHANTS: &[&str] = &[
    "Walmart",
    "Nordstrom",
    "Amazon",
    "Exxon",
    "Kroger",
    "Safeway",
    "United Airlines",
    "Office Depot",
    "Ford",
    "Taco Bell",
];

/// Fixed expense category set; `expense_category` always comes from here.
pub const EXPENSE_CATEGORIES: &[&str] = &[
    "AUTO", "FOOD", "GASS", "GIFT", "TRAV", "GROC", "HOME", "PERS", "HEAL", "MISC",
];

/// Required Redis modules with minimum versions.
///
/// Redis Stack 6.2+ or Redis with these modules installed is required.
pub const REDIS_REQUIRED_MODULES: &[(&str, u32)] = &[
    ("search", 20600),      // RediSearch 2.6.0+
    ("searchlight", 20600), // RediSearch Light 2.6.0+
];

/// Generation window start, 2020-01-01T00:00:00 UTC as epoch seconds.
///
/// The window is fixed rather than relative to the wall clock so that equal
/// seeds always yield equal record multisets.
pub const GENERATION_WINDOW_START_EPOCH: i64 = 1_577_836_800;

/// Generation window end, 2023-01-01T00:00:00 UTC as epoch seconds.
pub const GENERATION_WINDOW_END_EPOCH: i64 = 1_672_531_200;

/// Date-range scenario lower bound, 2022-06-01T00:00:00 UTC as epoch seconds.
pub const DATE_RANGE_BEGIN_EPOCH: i64 = 1_654_041_600;

/// Date-range scenario upper bound, 2022-07-31T00:00:00 UTC as epoch seconds.
pub const DATE_RANGE_END_EPOCH: i64 = 1_659_225_600;
