//! Search query builder.
//!
//! Builds the argument vector for an `FT.SEARCH` call: a filter expression
//! in the engine's query mini-language plus optional sorting, field
//! projection, and paging.

use serde::{Deserialize, Serialize};

/// Sort direction for search results and aggregation groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SortOrder {
    /// Ascending (default)
    #[default]
    #[serde(rename = "ASC")]
    Asc,
    /// Descending
    #[serde(rename = "DESC")]
    Desc,
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortOrder::Asc => write!(f, "ASC"),
            SortOrder::Desc => write!(f, "DESC"),
        }
    }
}

/// A single search request against the transaction index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    filter: String,
    sort_by: Option<(String, SortOrder)>,
    return_fields: Vec<String>,
    paging: Option<(usize, usize)>,
}

impl SearchQuery {
    /// Create a query with the given filter expression.
    ///
    /// The filter uses the engine's mini-language: `@field:[min max]` for
    /// numeric ranges, `@field:{value}` for tag matches, `@field:term` for
    /// full-text terms.
    pub fn new(filter: impl Into<String>) -> Self {
        Self {
            filter: filter.into(),
            sort_by: None,
            return_fields: Vec::new(),
            paging: None,
        }
    }

    /// Sort matches by a sortable field.
    #[must_use]
    pub fn sort_by(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort_by = Some((field.into(), order));
        self
    }

    /// Project only the named fields into each returned document.
    #[must_use]
    pub fn return_fields(mut self, fields: &[&str]) -> Self {
        self.return_fields = fields.iter().map(|f| (*f).to_string()).collect();
        self
    }

    /// Return at most `num` matches starting at `offset`.
    #[must_use]
    pub fn paging(mut self, offset: usize, num: usize) -> Self {
        self.paging = Some((offset, num));
        self
    }

    /// The filter expression.
    #[must_use]
    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Convert to `FT.SEARCH` arguments (everything after the index name).
    #[must_use]
    pub fn to_redis_args(&self) -> Vec<String> {
        let mut args = vec![self.filter.clone()];

        if !self.return_fields.is_empty() {
            args.push("RETURN".to_string());
            args.push(self.return_fields.len().to_string());
            args.extend(self.return_fields.iter().cloned());
        }

        if let Some((field, order)) = &self.sort_by {
            args.push("SORTBY".to_string());
            args.push(field.clone());
            args.push(order.to_string());
        }

        if let Some((offset, num)) = self.paging {
            args.push("LIMIT".to_string());
            args.push(offset.to_string());
            args.push(num.to_string());
        }

        args
    }
}
