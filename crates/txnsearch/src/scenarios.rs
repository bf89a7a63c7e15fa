//! The six canned search/aggregation scenarios.
//!
//! Each scenario is an independent, stateless, single round trip to the
//! store. The builders are pure so the emitted command arguments can be
//! checked without a running engine; [`run_all`] executes them in fixed
//! order and prints every result set for human inspection.

use crate::aggregate::{AggregateRequest, Reducer};
use crate::constants::{DATE_RANGE_BEGIN_EPOCH, DATE_RANGE_END_EPOCH};
use crate::error::Result;
use crate::query::{SearchQuery, SortOrder};
use crate::store::{AggregateRow, SearchResults, TransactionStore};

/// Scenario 1: transactions between 2022-06-01 and 2022-07-31, first 3
/// matches ordered by transaction identifier.
#[must_use]
pub fn date_range_query() -> SearchQuery {
    SearchQuery::new(format!(
        "@txn_timestamp:[{DATE_RANGE_BEGIN_EPOCH} {DATE_RANGE_END_EPOCH}]"
    ))
    .sort_by("txn_id", SortOrder::Asc)
    .return_fields(&["acct_id", "txn_date", "txn_amt"])
    .paging(0, 3)
}

/// Scenario 2: 5 Kroger transactions ordered by transaction date.
///
/// The sort is ascending (oldest first), matching the demo this replays.
#[must_use]
pub fn merchant_by_date_query() -> SearchQuery {
    SearchQuery::new("@merchant_name:kroger")
        .sort_by("txn_timestamp", SortOrder::Asc)
        .return_fields(&["txn_date", "card_last_4", "txn_amt"])
        .paging(0, 5)
}

/// Scenario 3: count of transactions per expense category, largest first.
#[must_use]
pub fn category_count_request() -> AggregateRequest {
    AggregateRequest::new("*")
        .group_by(&["@expense_category"], vec![Reducer::count("count")])
        .sort_by("@count", SortOrder::Desc)
}

/// Scenario 4: transactions per year, derived from the first 4 characters
/// of the date string, newest year first.
#[must_use]
pub fn transactions_per_year_request() -> AggregateRequest {
    AggregateRequest::new("*")
        .load(&["@txn_date"])
        .apply("substr(@txn_date,0,4)", "year")
        .group_by(&["@year"], vec![Reducer::count("num_transactions")])
        .sort_by("@year", SortOrder::Desc)
}

/// Scenario 5: top 3 addresses by transaction count for merchants whose
/// name fuzzily matches `walmrt` (the misspelling exercises the engine's
/// typo-tolerant matching).
#[must_use]
pub fn fuzzy_merchant_by_address_request() -> AggregateRequest {
    AggregateRequest::new("@merchant_name:%walmrt%")
        .group_by(&["@merchant_address"], vec![Reducer::count("txn_count")])
        .sort_by("@txn_count", SortOrder::Desc)
        .limit(0, 3)
}

/// Scenario 6: total spend per category over USD transactions strictly
/// above $500 in December 2021, biggest spend first.
#[must_use]
pub fn high_value_december_request() -> AggregateRequest {
    AggregateRequest::new("(@txn_date:2021\\-12* @txn_currency:{USD} @txn_amt:[(500 inf])")
        .group_by(
            &["@expense_category"],
            vec![Reducer::sum("@txn_amt", "total_spend")],
        )
        .sort_by("@total_spend", SortOrder::Desc)
}

fn print_search_results(results: &SearchResults) {
    println!("{} total match(es)", results.total);
    for doc in &results.docs {
        let mut fields: Vec<(&String, &String)> = doc.fields.iter().collect();
        fields.sort();
        let rendered: Vec<String> = fields
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect();
        println!("  {}  {}", doc.id, rendered.join("  "));
    }
}

fn print_aggregate_rows(rows: &[AggregateRow]) {
    for row in rows {
        let mut fields: Vec<(&String, &String)> = row.iter().collect();
        fields.sort();
        let rendered: Vec<String> = fields
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect();
        println!("  {}", rendered.join("  "));
    }
}

/// Run all six scenarios in fixed order, printing each result set.
pub async fn run_all(store: &TransactionStore) -> Result<()> {
    println!("\n*** Scenario 1: transactions from 2022-06-01 to 2022-07-31, first 3 by txn_id ***");
    let results = store.search(&date_range_query()).await?;
    print_search_results(&results);

    println!("\n*** Scenario 2: 5 Kroger transactions, oldest first ***");
    let results = store.search(&merchant_by_date_query()).await?;
    print_search_results(&results);

    println!("\n*** Scenario 3: transaction count per expense category ***");
    let rows = store.aggregate(&category_count_request()).await?;
    print_aggregate_rows(&rows);

    println!("\n*** Scenario 4: transactions per year (derived from txn_date) ***");
    let rows = store.aggregate(&transactions_per_year_request()).await?;
    print_aggregate_rows(&rows);

    println!("\n*** Scenario 5: top 3 addresses by count for merchant like 'walmart' ***");
    let rows = store.aggregate(&fuzzy_merchant_by_address_request()).await?;
    print_aggregate_rows(&rows);

    println!("\n*** Scenario 6: total spend per category, USD transactions > $500 in Dec 2021 ***");
    let rows = store.aggregate(&high_value_december_request()).await?;
    print_aggregate_rows(&rows);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_range_query_args() {
        assert_eq!(
            date_range_query().to_redis_args(),
            vec![
                "@txn_timestamp:[1654041600 1659225600]",
                "RETURN",
                "3",
                "acct_id",
                "txn_date",
                "txn_amt",
                "SORTBY",
                "txn_id",
                "ASC",
                "LIMIT",
                "0",
                "3",
            ]
        );
    }

    #[test]
    fn test_merchant_by_date_query_args() {
        assert_eq!(
            merchant_by_date_query().to_redis_args(),
            vec![
                "@merchant_name:kroger",
                "RETURN",
                "3",
                "txn_date",
                "card_last_4",
                "txn_amt",
                "SORTBY",
                "txn_timestamp",
                "ASC",
                "LIMIT",
                "0",
                "5",
            ]
        );
    }

    #[test]
    fn test_category_count_request_args() {
        assert_eq!(
            category_count_request().to_redis_args(),
            vec![
                "*",
                "GROUPBY",
                "1",
                "@expense_category",
                "REDUCE",
                "COUNT",
                "0",
                "AS",
                "count",
                "SORTBY",
                "2",
                "@count",
                "DESC",
            ]
        );
    }

    #[test]
    fn test_transactions_per_year_request_args() {
        assert_eq!(
            transactions_per_year_request().to_redis_args(),
            vec![
                "*",
                "LOAD",
                "1",
                "@txn_date",
                "APPLY",
                "substr(@txn_date,0,4)",
                "AS",
                "year",
                "GROUPBY",
                "1",
                "@year",
                "REDUCE",
                "COUNT",
                "0",
                "AS",
                "num_transactions",
                "SORTBY",
                "2",
                "@year",
                "DESC",
            ]
        );
    }

    #[test]
    fn test_fuzzy_merchant_by_address_request_args() {
        assert_eq!(
            fuzzy_merchant_by_address_request().to_redis_args(),
            vec![
                "@merchant_name:%walmrt%",
                "GROUPBY",
                "1",
                "@merchant_address",
                "REDUCE",
                "COUNT",
                "0",
                "AS",
                "txn_count",
                "SORTBY",
                "2",
                "@txn_count",
                "DESC",
                "LIMIT",
                "0",
                "3",
            ]
        );
    }

    #[test]
    fn test_high_value_december_request_args() {
        assert_eq!(
            high_value_december_request().to_redis_args(),
            vec![
                "(@txn_date:2021\\-12* @txn_currency:{USD} @txn_amt:[(500 inf])",
                "GROUPBY",
                "1",
                "@expense_category",
                "REDUCE",
                "SUM",
                "1",
                "@txn_amt",
                "AS",
                "total_spend",
                "SORTBY",
                "2",
                "@total_spend",
                "DESC",
            ]
        );
    }
}
