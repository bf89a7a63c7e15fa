//! Index schema types for the transaction index.
//!
//! This module defines types for configuring the RediSearch index over
//! transaction hashes:
//! - Tag fields (exact-match on identifiers, enums, currency)
//! - Text fields (full-text search on merchant, address, date strings)
//! - Numeric fields (range queries on timestamp and amount)

use serde::{Deserialize, Serialize};

/// Schema for text fields.
///
/// Text fields support full-text search with stemming and weighting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextFieldSchema {
    /// Field name
    pub name: String,
    /// Field weight for ranking (default: 1.0)
    #[serde(default = "default_weight")]
    pub weight: f64,
    /// Disable stemming (default: false)
    #[serde(default)]
    pub no_stem: bool,
    /// Enable sorting on this field (default: false)
    #[serde(default)]
    pub sortable: bool,
}

fn default_weight() -> f64 {
    1.0
}

impl TextFieldSchema {
    /// Create a new text field schema with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            weight: 1.0,
            no_stem: false,
            sortable: false,
        }
    }

    /// Set the field weight.
    #[must_use]
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Disable stemming.
    #[must_use]
    pub fn with_no_stem(mut self, no_stem: bool) -> Self {
        self.no_stem = no_stem;
        self
    }

    /// Enable sortable.
    #[must_use]
    pub fn with_sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    /// Convert to Redis command arguments.
    #[must_use]
    pub fn to_redis_args(&self) -> Vec<String> {
        let mut args = vec![self.name.clone(), "TEXT".to_string()];
        #[allow(clippy::float_cmp)]
        if self.weight != 1.0 {
            args.push("WEIGHT".to_string());
            args.push(self.weight.to_string());
        }
        if self.no_stem {
            args.push("NOSTEM".to_string());
        }
        if self.sortable {
            args.push("SORTABLE".to_string());
        }
        args
    }
}

/// Schema for tag fields.
///
/// Tag fields support exact matching on categorical data (identifiers,
/// categories, currency codes).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagFieldSchema {
    /// Field name
    pub name: String,
    /// Tag separator character (default: ",")
    #[serde(default = "default_separator")]
    pub separator: String,
    /// Case-sensitive matching (default: false)
    #[serde(default)]
    pub case_sensitive: bool,
    /// Enable sorting on this field (default: false)
    #[serde(default)]
    pub sortable: bool,
}

fn default_separator() -> String {
    ",".to_string()
}

impl TagFieldSchema {
    /// Create a new tag field schema with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            separator: ",".to_string(),
            case_sensitive: false,
            sortable: false,
        }
    }

    /// Set the tag separator.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Enable case-sensitive matching.
    #[must_use]
    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Enable sortable.
    #[must_use]
    pub fn with_sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    /// Convert to Redis command arguments.
    #[must_use]
    pub fn to_redis_args(&self) -> Vec<String> {
        let mut args = vec![self.name.clone(), "TAG".to_string()];
        if self.separator != "," {
            args.push("SEPARATOR".to_string());
            args.push(self.separator.clone());
        }
        if self.case_sensitive {
            args.push("CASESENSITIVE".to_string());
        }
        if self.sortable {
            args.push("SORTABLE".to_string());
        }
        args
    }
}

/// Schema for numeric fields.
///
/// Numeric fields support range queries (e.g., `txn_amt > 500`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumericFieldSchema {
    /// Field name
    pub name: String,
    /// Enable sorting on this field (default: false)
    #[serde(default)]
    pub sortable: bool,
}

impl NumericFieldSchema {
    /// Create a new numeric field schema with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sortable: false,
        }
    }

    /// Enable sortable.
    #[must_use]
    pub fn with_sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    /// Convert to Redis command arguments.
    #[must_use]
    pub fn to_redis_args(&self) -> Vec<String> {
        let mut args = vec![self.name.clone(), "NUMERIC".to_string()];
        if self.sortable {
            args.push("SORTABLE".to_string());
        }
        args
    }
}

/// Complete index schema over transaction hashes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TransactionIndexSchema {
    /// Tag fields (exact match)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tag: Vec<TagFieldSchema>,
    /// Text fields (full-text search)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub text: Vec<TextFieldSchema>,
    /// Numeric fields (range queries)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub numeric: Vec<NumericFieldSchema>,
}

impl TransactionIndexSchema {
    /// Create a new, empty index schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tag field.
    #[must_use]
    pub fn with_tag_field(mut self, field: TagFieldSchema) -> Self {
        self.tag.push(field);
        self
    }

    /// Add a text field.
    #[must_use]
    pub fn with_text_field(mut self, field: TextFieldSchema) -> Self {
        self.text.push(field);
        self
    }

    /// Add a numeric field.
    #[must_use]
    pub fn with_numeric_field(mut self, field: NumericFieldSchema) -> Self {
        self.numeric.push(field);
        self
    }

    /// Check if the schema is empty (no fields defined).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tag.is_empty() && self.text.is_empty() && self.numeric.is_empty()
    }

    /// Names of all declared fields, in declaration order per field type.
    #[must_use]
    pub fn field_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        for field in &self.tag {
            names.push(field.name.clone());
        }
        for field in &self.text {
            names.push(field.name.clone());
        }
        for field in &self.numeric {
            names.push(field.name.clone());
        }
        names
    }

    /// Convert to `FT.CREATE` schema arguments.
    #[must_use]
    pub fn to_redis_schema_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        for field in &self.tag {
            args.extend(field.to_redis_args());
        }
        for field in &self.text {
            args.extend(field.to_redis_args());
        }
        for field in &self.numeric {
            args.extend(field.to_redis_args());
        }
        args
    }
}

/// The canonical schema for the transaction index.
///
/// Tag fields for identifiers, enums, and currency (`txn_id` sortable so
/// matches can be ordered by identifier); text fields for merchant, address,
/// and the escaped date string; numeric fields for timestamp (sortable) and
/// amount.
#[must_use]
pub fn transaction_schema() -> TransactionIndexSchema {
    TransactionIndexSchema::new()
        .with_tag_field(TagFieldSchema::new("txn_id").with_sortable(true))
        .with_tag_field(TagFieldSchema::new("txn_currency"))
        .with_tag_field(TagFieldSchema::new("expense_category"))
        .with_text_field(TextFieldSchema::new("txn_date"))
        .with_text_field(TextFieldSchema::new("merchant_name"))
        .with_text_field(TextFieldSchema::new("merchant_address"))
        .with_numeric_field(NumericFieldSchema::new("txn_timestamp").with_sortable(true))
        .with_numeric_field(NumericFieldSchema::new("txn_amt"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_text_field_to_redis_args() {
        let field = TextFieldSchema::new("merchant_name");
        assert_eq!(field.to_redis_args(), vec!["merchant_name", "TEXT"]);

        let field = TextFieldSchema::new("merchant_name")
            .with_weight(2.0)
            .with_no_stem(true)
            .with_sortable(true);
        assert_eq!(
            field.to_redis_args(),
            vec!["merchant_name", "TEXT", "WEIGHT", "2", "NOSTEM", "SORTABLE"]
        );
    }

    #[test]
    fn test_tag_field_to_redis_args() {
        let field = TagFieldSchema::new("expense_category");
        assert_eq!(field.to_redis_args(), vec!["expense_category", "TAG"]);

        let field = TagFieldSchema::new("txn_id")
            .with_separator("|")
            .with_case_sensitive(true)
            .with_sortable(true);
        assert_eq!(
            field.to_redis_args(),
            vec!["txn_id", "TAG", "SEPARATOR", "|", "CASESENSITIVE", "SORTABLE"]
        );
    }

    #[test]
    fn test_numeric_field_to_redis_args() {
        let field = NumericFieldSchema::new("txn_amt");
        assert_eq!(field.to_redis_args(), vec!["txn_amt", "NUMERIC"]);

        let field = NumericFieldSchema::new("txn_timestamp").with_sortable(true);
        assert_eq!(
            field.to_redis_args(),
            vec!["txn_timestamp", "NUMERIC", "SORTABLE"]
        );
    }

    #[test]
    fn test_schema_is_empty() {
        let schema = TransactionIndexSchema::new();
        assert!(schema.is_empty());

        let schema = schema.with_tag_field(TagFieldSchema::new("txn_id"));
        assert!(!schema.is_empty());
    }

    #[test]
    fn test_transaction_schema_declares_all_record_fields() {
        let schema = transaction_schema();
        let names = schema.field_names();

        // acct_id and card_last_4 are stored but not indexed; the other
        // eight record fields are all declared.
        for name in [
            "txn_id",
            "txn_date",
            "txn_timestamp",
            "txn_amt",
            "txn_currency",
            "expense_category",
            "merchant_name",
            "merchant_address",
        ] {
            assert!(names.contains(&name.to_string()), "missing field {name}");
        }
        assert_eq!(names.len(), 8);
    }

    #[test]
    fn test_transaction_schema_args() {
        let args = transaction_schema().to_redis_schema_args();
        assert_eq!(
            args,
            vec![
                "txn_id",
                "TAG",
                "SORTABLE",
                "txn_currency",
                "TAG",
                "expense_category",
                "TAG",
                "txn_date",
                "TEXT",
                "merchant_name",
                "TEXT",
                "merchant_address",
                "TEXT",
                "txn_timestamp",
                "NUMERIC",
                "SORTABLE",
                "txn_amt",
                "NUMERIC",
            ]
        );
    }

    #[test]
    fn test_schema_serialization_roundtrip() {
        let schema = transaction_schema();
        let json = serde_json::to_string(&schema).unwrap();
        let deserialized: TransactionIndexSchema = serde_json::from_str(&json).unwrap();
        assert_eq!(schema, deserialized);
    }
}
