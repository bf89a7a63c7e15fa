//! Transaction search demo over Redis Stack (RediSearch).
//!
//! Seeds a Redis instance with synthetic credit-card transaction records
//! stored as hashes under the `txn:` key prefix, builds a secondary index
//! over them, and runs a fixed set of search and aggregation scenarios.
//!
//! The store owns all record lifetime; this crate only holds the record
//! currently being constructed. Control flow is strictly sequential:
//! [`TransactionStore::build_index`] first, then [`generator::generate`],
//! then [`scenarios::run_all`].
//!
//! ```rust,no_run
//! use txnsearch::generator::{generate, GenerateConfig};
//! use txnsearch::source::SeededTransactionSource;
//! use txnsearch::store::TransactionStore;
//!
//! # async fn demo() -> txnsearch::Result<()> {
//! let store = TransactionStore::connect("redis://localhost:6379").await?;
//! store.build_index().await?;
//!
//! let mut source = SeededTransactionSource::new(0);
//! generate(&store, 5000, &mut source, &GenerateConfig::default()).await?;
//!
//! txnsearch::scenarios::run_all(&store).await?;
//! # Ok(())
//! # }
//! ```

/// Aggregation request builder and reducers.
pub mod aggregate;
/// Fixed identifiers, enumerations, and defaults.
pub mod constants;
mod error;
/// Bulk-load of synthetic transaction records.
pub mod generator;
/// Search query builder.
pub mod query;
/// The transaction record model.
pub mod record;
/// The six canned search/aggregation scenarios.
pub mod scenarios;
/// Index field schema types.
pub mod schema;
/// Synthetic transaction data sources.
pub mod source;
/// Redis store client: index management, writes, search, aggregation.
pub mod store;
/// Query-text escaping and epoch helpers.
pub mod utils;

pub use aggregate::{AggregateRequest, Reducer};
pub use error::{Error, Result};
pub use generator::GenerateConfig;
pub use query::{SearchQuery, SortOrder};
pub use record::TransactionRecord;
pub use schema::{
    transaction_schema, NumericFieldSchema, TagFieldSchema, TextFieldSchema,
    TransactionIndexSchema,
};
pub use source::{SeededTransactionSource, TransactionDataSource};
pub use store::{AggregateRow, SearchDocument, SearchResults, TransactionStore};
