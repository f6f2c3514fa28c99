//! In-process table store

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use super::errors::{StorageError, StorageResult};
use super::store::{TableData, TableStore};

/// Keeps tables in a map. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<HashMap<String, TableData>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> MutexGuard<'_, HashMap<String, TableData>> {
        // Saves replace whole values, so a poisoned map is still consistent
        self.tables.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl TableStore for MemoryStore {
    fn exists(&self, table: &str) -> bool {
        self.tables().contains_key(table)
    }

    fn load(&self, table: &str) -> StorageResult<TableData> {
        self.tables()
            .get(table)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(table.to_string()))
    }

    fn save(&self, table: &str, data: &TableData) -> StorageResult<()> {
        self.tables().insert(table.to_string(), data.clone());
        Ok(())
    }

    fn list(&self) -> StorageResult<Vec<String>> {
        let mut names: Vec<String> = self.tables().keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}
