//! One JSON file per table
//!
//! Layout: `<data_dir>/<table>.json`.
//!
//! Saves are atomic:
//! 1. Write to `<data_dir>/.<table>.json.tmp`
//! 2. fsync the temp file
//! 3. Rename over the table file
//! 4. fsync the directory
//!
//! A crash at any point leaves either the old or the new table, never a
//! truncated one.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::errors::{StorageError, StorageResult};
use super::store::{TableData, TableStore};
use crate::observability::Logger;

const TABLE_EXTENSION: &str = "json";

/// File-backed table store.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    data_dir: PathBuf,
    pretty: bool,
}

impl JsonFileStore {
    /// Opens a store rooted at `data_dir`, creating the directory if needed.
    pub fn open(data_dir: impl Into<PathBuf>) -> StorageResult<Self> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir)
            .map_err(|e| StorageError::write_failed(data_dir.display().to_string(), e))?;

        Ok(Self {
            data_dir,
            pretty: true,
        })
    }

    /// Toggles pretty-printed table files (default on)
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of the file holding `table`
    pub fn table_path(&self, table: &str) -> PathBuf {
        self.data_dir.join(format!("{}.{}", table, TABLE_EXTENSION))
    }

    fn temp_path(&self, table: &str) -> PathBuf {
        self.data_dir
            .join(format!(".{}.{}.tmp", table, TABLE_EXTENSION))
    }

    fn write_atomic(&self, table: &str, content: &[u8]) -> io::Result<()> {
        let temp_path = self.temp_path(table);

        let result = (|| {
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)?;
            file.write_all(content)?;
            file.sync_all()?;
            fs::rename(&temp_path, self.table_path(table))
        })();

        if result.is_err() {
            let _ = fs::remove_file(&temp_path);
            return result;
        }

        // Make the rename itself durable
        if let Ok(dir) = File::open(&self.data_dir) {
            let _ = dir.sync_all();
        }

        Ok(())
    }
}

impl TableStore for JsonFileStore {
    fn exists(&self, table: &str) -> bool {
        self.table_path(table).is_file()
    }

    fn load(&self, table: &str) -> StorageResult<TableData> {
        let path = self.table_path(table);

        let content = fs::read_to_string(&path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                StorageError::NotFound(table.to_string())
            } else {
                StorageError::read_failed(table, e)
            }
        })?;

        TableData::from_json(&content).map_err(|e| {
            Logger::warn(
                "table_load_failed",
                &[("table", table), ("reason", &e.to_string())],
            );
            StorageError::corrupt(table, e.to_string())
        })
    }

    fn save(&self, table: &str, data: &TableData) -> StorageResult<()> {
        let content = data
            .to_json(self.pretty)
            .map_err(|e| StorageError::corrupt(table, format!("Failed to serialize: {}", e)))?;

        self.write_atomic(table, content.as_bytes())
            .map_err(|e| StorageError::write_failed(table, e))?;

        Logger::debug(
            "table_saved",
            &[
                ("table", table),
                ("records", &data.records.len().to_string()),
            ],
        );

        Ok(())
    }

    fn list(&self) -> StorageResult<Vec<String>> {
        let entries = fs::read_dir(&self.data_dir)
            .map_err(|e| StorageError::read_failed(self.data_dir.display().to_string(), e))?;

        let mut tables = Vec::new();
        for entry in entries {
            let entry = entry
                .map_err(|e| StorageError::read_failed(self.data_dir.display().to_string(), e))?;
            let path = entry.path();

            if path.extension().map_or(true, |ext| ext != TABLE_EXTENSION) {
                continue;
            }

            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if !stem.starts_with('.') {
                    tables.push(stem.to_string());
                }
            }
        }

        tables.sort();
        Ok(tables)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Schema;
    use crate::types::TypeDescriptor;
    use serde_json::json;
    use tempfile::TempDir;

    fn sample_table() -> TableData {
        let mut data = TableData::new(
            Schema::new()
                .with_column("id", TypeDescriptor::int(Some(10)))
                .with_column("name", TypeDescriptor::varchar(Some(255))),
        );
        data.records
            .push(json!({"id": 1, "name": "Widget"}).as_object().cloned().unwrap());
        data
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::open(temp_dir.path()).unwrap();

        assert!(!store.exists("products"));
        store.save("products", &sample_table()).unwrap();
        assert!(store.exists("products"));

        let loaded = store.load("products").unwrap();
        assert_eq!(loaded, sample_table());
    }

    #[test]
    fn test_missing_table_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::open(temp_dir.path()).unwrap();

        let err = store.load("nope").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_corrupt_file_reported() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::open(temp_dir.path()).unwrap();
        fs::write(store.table_path("broken"), "{\"default\": {").unwrap();

        let err = store.load("broken").unwrap_err();
        assert_eq!(err.code(), "FT_STORAGE_CORRUPT");
    }

    #[test]
    fn test_save_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::open(temp_dir.path()).unwrap();
        store.save("products", &sample_table()).unwrap();

        assert!(!store.temp_path("products").exists());
        assert_eq!(store.list().unwrap(), vec!["products".to_string()]);
    }

    #[test]
    fn test_list_ignores_foreign_files() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::open(temp_dir.path()).unwrap();
        store.save("b", &TableData::default()).unwrap();
        store.save("a", &TableData::default()).unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "x").unwrap();
        fs::write(temp_dir.path().join(".c.json.tmp"), "x").unwrap();

        assert_eq!(store.list().unwrap(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_compact_output() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::open(temp_dir.path()).unwrap().with_pretty(false);
        store.save("t", &TableData::default()).unwrap();

        let raw = fs::read_to_string(store.table_path("t")).unwrap();
        assert_eq!(raw, r#"{"default":{},"data":[]}"#);
    }
}
