//! Whole-table persistence contract
//!
//! A store persists one table as one unit. There are no partial reads or
//! writes: `load` returns the entire table and `save` replaces it.

use serde::{Deserialize, Serialize};

use super::errors::StorageResult;
use crate::schema::{Record, Schema};

/// The persisted unit: a table's schema and its records.
///
/// On disk this is `{"default": {<column>: <type>}, "data": [<record>...]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableData {
    #[serde(rename = "default")]
    pub schema: Schema,
    #[serde(rename = "data")]
    pub records: Vec<Record>,
}

/// Accepted on-disk shapes. A bare record array carries no schema.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredTable {
    Canonical(TableData),
    Legacy(Vec<Record>),
}

impl TableData {
    /// An empty table with the given schema
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            records: Vec::new(),
        }
    }

    /// Decodes either on-disk shape.
    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        let stored: StoredTable = serde_json::from_str(content)?;
        Ok(match stored {
            StoredTable::Canonical(data) => data,
            StoredTable::Legacy(records) => TableData {
                schema: Schema::new(),
                records,
            },
        })
    }

    /// Encodes the canonical shape.
    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}

/// Persistence backend for whole tables.
///
/// Implementations need not serialize concurrent saves of the same table;
/// callers that share a store across threads go through
/// [`SharedEngine`](crate::engine::SharedEngine).
pub trait TableStore: Send + Sync {
    /// Checks whether a table is persisted under `table`
    fn exists(&self, table: &str) -> bool;

    /// Loads the entire table.
    ///
    /// # Errors
    ///
    /// `NotFound` when absent, `ReadFailed`/`Corrupt` when unreadable.
    fn load(&self, table: &str) -> StorageResult<TableData>;

    /// Replaces the entire table. Returns only once the new contents are
    /// durable; a failed save leaves the previous contents intact.
    fn save(&self, table: &str, data: &TableData) -> StorageResult<()>;

    /// Names of all persisted tables, sorted
    fn list(&self) -> StorageResult<Vec<String>>;
}
