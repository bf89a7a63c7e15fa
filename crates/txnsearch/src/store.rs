//! Redis store client for transaction hashes.
//!
//! Wraps a single async connection manager shared by every phase of the
//! demo: index management, record writes, search, and aggregation. The
//! store owns all record lifetime; no dataset copy is held in-process.

use redis::aio::ConnectionManager;
use std::collections::HashMap;

use crate::aggregate::AggregateRequest;
use crate::constants::{INDEX_NAME, KEY_PREFIX, REDIS_REQUIRED_MODULES};
use crate::error::{Error, Result};
use crate::query::SearchQuery;
use crate::record::TransactionRecord;
use crate::schema::{transaction_schema, TransactionIndexSchema};

/// One document returned by a search, with its projected fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchDocument {
    /// Full record key, e.g. `txn:9876543210987`.
    pub id: String,
    /// Projected field-to-value pairs.
    pub fields: HashMap<String, String>,
}

/// An ordered search result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResults {
    /// Total matches known to the engine (may exceed `docs.len()` when paged).
    pub total: i64,
    /// Returned documents, in engine order.
    pub docs: Vec<SearchDocument>,
}

/// One aggregation group row: field/reducer aliases to rendered values.
pub type AggregateRow = HashMap<String, String>;

/// Client for the transaction keyspace and its secondary index.
pub struct TransactionStore {
    index_name: String,
    key_prefix: String,
    connection_manager: ConnectionManager,
    schema: TransactionIndexSchema,
}

impl TransactionStore {
    /// Connect to Redis and verify the search module is installed.
    ///
    /// Uses the canonical index name (`txnIdx`), key prefix (`txn:`), and
    /// transaction schema.
    pub async fn connect(redis_url: impl Into<String>) -> Result<Self> {
        Self::with_index(redis_url, INDEX_NAME, KEY_PREFIX, transaction_schema()).await
    }

    /// Connect with a custom index name, key prefix, and schema.
    pub async fn with_index(
        redis_url: impl Into<String>,
        index_name: impl Into<String>,
        key_prefix: impl Into<String>,
        schema: TransactionIndexSchema,
    ) -> Result<Self> {
        let redis_url = redis_url.into();

        let client = redis::Client::open(redis_url.clone())
            .map_err(|e| Error::config(format!("Failed to create Redis client: {e}")))?;

        let connection_manager = ConnectionManager::new(client)
            .await
            .map_err(|e| Error::network(format!("Failed to connect to {redis_url}: {e}")))?;

        Self::check_redis_modules(&connection_manager).await?;

        Ok(Self {
            index_name: index_name.into(),
            key_prefix: key_prefix.into(),
            connection_manager,
            schema,
        })
    }

    /// Check that a search module with a sufficient version is installed.
    async fn check_redis_modules(conn: &ConnectionManager) -> Result<()> {
        let mut conn = conn.clone();

        let modules: Vec<redis::Value> = redis::cmd("MODULE")
            .arg("LIST")
            .query_async(&mut conn)
            .await
            .map_err(|e| Error::network(format!("Failed to query Redis modules: {e}")))?;

        let mut installed = HashMap::new();
        for module_info in modules {
            if let redis::Value::Array(fields) = module_info {
                let mut name = String::new();
                let mut version = 0;

                for i in (0..fields.len()).step_by(2) {
                    if let (redis::Value::BulkString(key), Some(value)) =
                        (&fields[i], fields.get(i + 1))
                    {
                        let key_str = String::from_utf8_lossy(key);
                        match key_str.as_ref() {
                            "name" => {
                                if let redis::Value::BulkString(v) = value {
                                    name = String::from_utf8_lossy(v).to_string();
                                }
                            }
                            "ver" => {
                                if let redis::Value::Int(v) = value {
                                    version = *v as u32;
                                }
                            }
                            _ => {}
                        }
                    }
                }

                if !name.is_empty() {
                    installed.insert(name, version);
                }
            }
        }

        for &(name, min_version) in REDIS_REQUIRED_MODULES {
            if let Some(&installed_ver) = installed.get(name) {
                if installed_ver >= min_version {
                    return Ok(());
                }
            }
        }

        Err(Error::config(
            "Transaction search requires RediSearch >= 2.6 (Redis Stack). \
             See https://redis.io/docs/stack/search/quick_start/ for installation.",
        ))
    }

    /// Name of the secondary index.
    #[must_use]
    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    /// Key prefix the index is scoped to.
    #[must_use]
    pub fn key_prefix(&self) -> &str {
        &self.key_prefix
    }

    /// Check if the index exists.
    pub async fn index_exists(&self) -> Result<bool> {
        let mut conn = self.connection_manager.clone();

        let result: redis::RedisResult<redis::Value> = redis::cmd("FT.INFO")
            .arg(&self.index_name)
            .query_async(&mut conn)
            .await;

        match result {
            Ok(_) => Ok(true),
            Err(e) if is_unknown_index_error(&e) => Ok(false),
            Err(e) => Err(Error::query(format!(
                "Failed to check index existence: {e}"
            ))),
        }
    }

    /// Drop the index, keeping the stored hashes.
    ///
    /// Absence of the index is not an error.
    pub async fn drop_index(&self) -> Result<()> {
        let mut conn = self.connection_manager.clone();

        let result: redis::RedisResult<()> = redis::cmd("FT.DROPINDEX")
            .arg(&self.index_name)
            .query_async(&mut conn)
            .await;

        match result {
            Ok(()) => Ok(()),
            Err(e) if is_unknown_index_error(&e) => Ok(()),
            Err(e) => Err(Error::query(format!("Failed to drop index: {e}"))),
        }
    }

    /// Idempotently (re)create the index over the key prefix.
    ///
    /// Any existing index of the same name is dropped first. Stored records
    /// under the prefix are untouched; only the index metadata is recreated
    /// and the engine re-scans existing hashes in the background.
    pub async fn build_index(&self) -> Result<()> {
        self.drop_index().await?;

        let mut cmd = redis::cmd("FT.CREATE");
        cmd.arg(&self.index_name);
        cmd.arg("ON").arg("HASH");
        cmd.arg("PREFIX").arg("1").arg(&self.key_prefix);
        cmd.arg("SCHEMA");
        for arg in self.schema.to_redis_schema_args() {
            cmd.arg(arg);
        }

        let mut conn = self.connection_manager.clone();
        cmd.query_async::<()>(&mut conn)
            .await
            .map_err(|e| Error::query(format!("Failed to create index: {e}")))?;

        tracing::info!(index = %self.index_name, "index built");
        Ok(())
    }

    /// Write one record as a hash under `<prefix><txn_id>`.
    ///
    /// Overwrite semantics: a second record with the same `txn_id` silently
    /// replaces the first.
    pub async fn insert_record(&self, record: &TransactionRecord) -> Result<()> {
        let key = format!("{}{}", self.key_prefix, record.txn_id);

        let mut cmd = redis::cmd("HSET");
        cmd.arg(&key);
        for (field, value) in record.to_field_pairs() {
            cmd.arg(field).arg(value);
        }

        let mut conn = self.connection_manager.clone();
        cmd.query_async::<()>(&mut conn)
            .await
            .map_err(|e| Error::network(format!("Failed to write record {key}: {e}")))?;

        Ok(())
    }

    /// Count keys currently stored under the prefix.
    pub async fn count_keys(&self) -> Result<usize> {
        let mut conn = self.connection_manager.clone();

        let pattern = format!("{}*", self.key_prefix);
        let keys: Vec<String> = redis::cmd("KEYS")
            .arg(&pattern)
            .query_async(&mut conn)
            .await
            .map_err(|e| Error::network(format!("Failed to list keys: {e}")))?;

        Ok(keys.len())
    }

    /// Delete every key under the prefix. The index definition is untouched.
    pub async fn clear_records(&self) -> Result<usize> {
        let mut conn = self.connection_manager.clone();

        let pattern = format!("{}*", self.key_prefix);
        let keys: Vec<String> = redis::cmd("KEYS")
            .arg(&pattern)
            .query_async(&mut conn)
            .await
            .map_err(|e| Error::network(format!("Failed to list keys: {e}")))?;

        if keys.is_empty() {
            return Ok(0);
        }

        let deleted: usize = redis::cmd("DEL")
            .arg(&keys)
            .query_async(&mut conn)
            .await
            .map_err(|e| Error::network(format!("Failed to delete keys: {e}")))?;

        Ok(deleted)
    }

    /// Execute a search against the index.
    pub async fn search(&self, query: &SearchQuery) -> Result<SearchResults> {
        let mut cmd = redis::cmd("FT.SEARCH");
        cmd.arg(&self.index_name);
        for arg in query.to_redis_args() {
            cmd.arg(arg);
        }

        let mut conn = self.connection_manager.clone();
        let reply: redis::Value = cmd
            .query_async(&mut conn)
            .await
            .map_err(|e| Error::query(format!("Search failed: {e}")))?;

        parse_search_reply(reply)
    }

    /// Execute an aggregation against the index.
    pub async fn aggregate(&self, request: &AggregateRequest) -> Result<Vec<AggregateRow>> {
        let mut cmd = redis::cmd("FT.AGGREGATE");
        cmd.arg(&self.index_name);
        for arg in request.to_redis_args() {
            cmd.arg(arg);
        }

        let mut conn = self.connection_manager.clone();
        let reply: redis::Value = cmd
            .query_async(&mut conn)
            .await
            .map_err(|e| Error::query(format!("Aggregation failed: {e}")))?;

        parse_aggregate_reply(reply)
    }
}

/// Whether a Redis error reports a missing index.
///
/// Message formats differ across Redis versions, so match loosely.
fn is_unknown_index_error(err: &redis::RedisError) -> bool {
    let msg = err.to_string().to_lowercase();
    msg.contains("unknown index") || msg.contains("no such index") || msg.contains("index name")
}

fn value_to_string(value: &redis::Value) -> Option<String> {
    match value {
        redis::Value::BulkString(bytes) => Some(String::from_utf8_lossy(bytes).to_string()),
        redis::Value::SimpleString(s) => Some(s.clone()),
        redis::Value::Int(i) => Some(i.to_string()),
        redis::Value::Double(d) => Some(d.to_string()),
        _ => None,
    }
}

fn pairs_to_map(fields: &[redis::Value]) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for chunk in fields.chunks(2) {
        if chunk.len() != 2 {
            continue;
        }
        let (Some(name), Some(value)) = (value_to_string(&chunk[0]), value_to_string(&chunk[1]))
        else {
            continue;
        };
        map.insert(name, value);
    }
    map
}

/// Parse an `FT.SEARCH` reply: `[total, key1, fields1, key2, fields2, ...]`.
fn parse_search_reply(reply: redis::Value) -> Result<SearchResults> {
    let redis::Value::Array(items) = reply else {
        return Err(Error::query("Unexpected search reply shape"));
    };

    let Some(redis::Value::Int(total)) = items.first() else {
        return Err(Error::query("Search reply missing total count"));
    };
    let total = *total;

    let mut docs = Vec::new();
    for chunk in items[1..].chunks(2) {
        if chunk.len() != 2 {
            continue;
        }

        let Some(id) = value_to_string(&chunk[0]) else {
            continue;
        };

        let fields = match &chunk[1] {
            redis::Value::Array(pairs) => pairs_to_map(pairs),
            _ => HashMap::new(),
        };

        docs.push(SearchDocument { id, fields });
    }

    Ok(SearchResults { total, docs })
}

/// Parse an `FT.AGGREGATE` reply: `[total, [k, v, ...], [k, v, ...], ...]`.
fn parse_aggregate_reply(reply: redis::Value) -> Result<Vec<AggregateRow>> {
    let redis::Value::Array(items) = reply else {
        return Err(Error::query("Unexpected aggregate reply shape"));
    };

    let mut rows = Vec::new();
    for item in items.iter().skip(1) {
        if let redis::Value::Array(pairs) = item {
            rows.push(pairs_to_map(pairs));
        }
    }

    Ok(rows)
}
