//! Aggregation request builder.
//!
//! Builds the argument vector for an `FT.AGGREGATE` call. Pipeline steps
//! (`LOAD`, `APPLY`, `GROUPBY`, `SORTBY`, `LIMIT`) are emitted in the order
//! they were added, since the engine applies them as a pipeline.

use serde::{Deserialize, Serialize};

use crate::query::SortOrder;

/// A reducer collapsing each group into a single derived value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reducer {
    /// Count of records in the group.
    Count {
        /// Name the reduced value is reported under.
        alias: String,
    },
    /// Sum of a numeric field across the group.
    Sum {
        /// Field to sum, including the `@` prefix.
        field: String,
        /// Name the reduced value is reported under.
        alias: String,
    },
}

impl Reducer {
    /// `COUNT` reducer reported under `alias`.
    pub fn count(alias: impl Into<String>) -> Self {
        Reducer::Count {
            alias: alias.into(),
        }
    }

    /// `SUM` reducer over `field`, reported under `alias`.
    pub fn sum(field: impl Into<String>, alias: impl Into<String>) -> Self {
        Reducer::Sum {
            field: field.into(),
            alias: alias.into(),
        }
    }

    fn to_redis_args(&self) -> Vec<String> {
        match self {
            Reducer::Count { alias } => vec![
                "REDUCE".to_string(),
                "COUNT".to_string(),
                "0".to_string(),
                "AS".to_string(),
                alias.clone(),
            ],
            Reducer::Sum { field, alias } => vec![
                "REDUCE".to_string(),
                "SUM".to_string(),
                "1".to_string(),
                field.clone(),
                "AS".to_string(),
                alias.clone(),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
enum Step {
    Load(Vec<String>),
    Apply { expr: String, alias: String },
    GroupBy { fields: Vec<String>, reducers: Vec<Reducer> },
    SortBy { field: String, order: SortOrder },
    Limit { offset: usize, num: usize },
}

/// A single aggregation request against the transaction index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateRequest {
    filter: String,
    steps: Vec<Step>,
}

impl AggregateRequest {
    /// Create a request with the given filter expression (`*` for all records).
    pub fn new(filter: impl Into<String>) -> Self {
        Self {
            filter: filter.into(),
            steps: Vec::new(),
        }
    }

    /// Load stored fields into the pipeline (needed before `APPLY` on a
    /// field that is not part of a group).
    #[must_use]
    pub fn load(mut self, fields: &[&str]) -> Self {
        self.steps
            .push(Step::Load(fields.iter().map(|f| (*f).to_string()).collect()));
        self
    }

    /// Derive a new value from an expression, e.g. `substr(@txn_date,0,4)`.
    #[must_use]
    pub fn apply(mut self, expr: impl Into<String>, alias: impl Into<String>) -> Self {
        self.steps.push(Step::Apply {
            expr: expr.into(),
            alias: alias.into(),
        });
        self
    }

    /// Group by the given fields and reduce each group.
    #[must_use]
    pub fn group_by(mut self, fields: &[&str], reducers: Vec<Reducer>) -> Self {
        self.steps.push(Step::GroupBy {
            fields: fields.iter().map(|f| (*f).to_string()).collect(),
            reducers,
        });
        self
    }

    /// Sort the pipeline output by a field, including the `@` prefix.
    #[must_use]
    pub fn sort_by(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.steps.push(Step::SortBy {
            field: field.into(),
            order,
        });
        self
    }

    /// Keep at most `num` rows starting at `offset`.
    #[must_use]
    pub fn limit(mut self, offset: usize, num: usize) -> Self {
        self.steps.push(Step::Limit { offset, num });
        self
    }

    /// The filter expression.
    #[must_use]
    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Convert to `FT.AGGREGATE` arguments (everything after the index name).
    #[must_use]
    pub fn to_redis_args(&self) -> Vec<String> {
        let mut args = vec![self.filter.clone()];

        for step in &self.steps {
            match step {
                Step::Load(fields) => {
                    args.push("LOAD".to_string());
                    args.push(fields.len().to_string());
                    args.extend(fields.iter().cloned());
                }
                Step::Apply { expr, alias } => {
                    args.push("APPLY".to_string());
                    args.push(expr.clone());
                    args.push("AS".to_string());
                    args.push(alias.clone());
                }
                Step::GroupBy { fields, reducers } => {
                    args.push("GROUPBY".to_string());
                    args.push(fields.len().to_string());
                    args.extend(fields.iter().cloned());
                    for reducer in reducers {
                        args.extend(reducer.to_redis_args());
                    }
                }
                Step::SortBy { field, order } => {
                    args.push("SORTBY".to_string());
                    args.push("2".to_string());
                    args.push(field.clone());
                    args.push(order.to_string());
                }
                Step::Limit { offset, num } => {
                    args.push("LIMIT".to_string());
                    args.push(offset.to_string());
                    args.push(num.to_string());
                }
            }
        }

        args
    }
}
