//! Storage Durability Tests
//!
//! The file store's on-disk contract:
//! - One `<table>.json` per table, schema and records together
//! - Tables survive reopening the store
//! - Legacy bare-array files load as schemaless tables
//! - Unreadable files fail loudly and are never overwritten by reads
//! - Leftover temp files from interrupted saves are ignored

use flattable::engine::{Engine, ErrorKind};
use flattable::schema::{Record, Schema};
use flattable::storage::{JsonFileStore, StorageError, TableData, TableStore};
use flattable::types::TypeDescriptor;
use serde_json::{json, Value};
use std::fs;
use tempfile::TempDir;

// =============================================================================
// Test Utilities
// =============================================================================

fn record(value: Value) -> Record {
    value.as_object().cloned().expect("fixture must be an object")
}

fn read_json(path: &std::path::Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

// =============================================================================
// Persistence
// =============================================================================

/// A reopened store sees every committed table.
#[test]
fn test_tables_survive_reopen() {
    let temp_dir = TempDir::new().unwrap();

    {
        let engine = Engine::new(JsonFileStore::open(temp_dir.path()).unwrap());
        engine
            .create_table(
                "orders",
                Schema::new()
                    .with_column("id", TypeDescriptor::int(None))
                    .with_column("total", TypeDescriptor::decimal(10, 2)),
            )
            .unwrap();
        engine
            .create_record("orders", record(json!({"id": 1, "total": "19.99"})))
            .unwrap();
    }

    let engine = Engine::new(JsonFileStore::open(temp_dir.path()).unwrap());
    assert_eq!(engine.list_tables().unwrap(), vec!["orders".to_string()]);
    assert_eq!(
        engine.read_table("orders").unwrap(),
        vec![record(json!({"id": 1, "total": "19.99"}))]
    );
    assert_eq!(
        engine.describe_table("orders").unwrap().get("total"),
        Some(&TypeDescriptor::decimal(10, 2))
    );
}

/// Files are pretty-printed by default and compact on request.
#[test]
fn test_pretty_and_compact_files() {
    let temp_dir = TempDir::new().unwrap();
    let data = TableData::new(Schema::new().with_column("id", TypeDescriptor::int(None)));

    let pretty = JsonFileStore::open(temp_dir.path()).unwrap();
    pretty.save("a", &data).unwrap();
    assert!(fs::read_to_string(pretty.table_path("a")).unwrap().contains('\n'));

    let compact = JsonFileStore::open(temp_dir.path()).unwrap().with_pretty(false);
    compact.save("b", &data).unwrap();
    assert_eq!(
        fs::read_to_string(compact.table_path("b")).unwrap(),
        r#"{"default":{"id":"INT"},"data":[]}"#
    );
}

// =============================================================================
// Legacy Shape
// =============================================================================

/// A bare record array loads without a schema and is rewritten in the
/// canonical shape on the next save.
#[test]
fn test_legacy_array_upgraded_on_write() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("legacy.json");
    fs::write(&path, r#"[{"id": 1, "name": "old"}]"#).unwrap();

    let engine = Engine::new(JsonFileStore::open(temp_dir.path()).unwrap());
    assert!(engine.describe_table("legacy").unwrap().is_empty());
    assert_eq!(engine.read_table("legacy").unwrap().len(), 1);

    engine
        .update_record("legacy", &json!(1), record(json!({"name": "new"})))
        .unwrap();

    assert_eq!(
        read_json(&path),
        json!({"default": {}, "data": [{"id": 1, "name": "new"}]})
    );
}

// =============================================================================
// Corruption
// =============================================================================

/// Garbage on disk is an I/O failure, and the file is left for inspection.
#[test]
fn test_corrupt_table_fails_and_is_preserved() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.json");
    fs::write(&path, "{\"default\": {\"id\": \"INT\"}, \"data\": [").unwrap();

    let store = JsonFileStore::open(temp_dir.path()).unwrap();
    assert!(matches!(
        store.load("broken"),
        Err(StorageError::Corrupt { .. })
    ));

    let engine = Engine::new(store);
    let err = engine.read_table("broken").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IoFailure);
    assert_eq!(err.code(), "FT_IO_FAILURE");

    let err = engine
        .create_record("broken", record(json!({"id": 1})))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IoFailure);

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "{\"default\": {\"id\": \"INT\"}, \"data\": ["
    );
}

/// An unknown type descriptor in a stored schema is corruption.
#[test]
fn test_unknown_stored_descriptor_is_corrupt() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("odd.json"),
        r#"{"default": {"id": "UUID"}, "data": []}"#,
    )
    .unwrap();

    let store = JsonFileStore::open(temp_dir.path()).unwrap();
    assert!(matches!(store.load("odd"), Err(StorageError::Corrupt { .. })));
}

// =============================================================================
// Atomic Replace
// =============================================================================

/// A temp file left by an interrupted save is neither listed nor loaded.
#[test]
fn test_stale_temp_file_ignored() {
    let temp_dir = TempDir::new().unwrap();
    let engine = Engine::new(JsonFileStore::open(temp_dir.path()).unwrap());
    engine
        .create_record("events", record(json!({"id": 1})))
        .unwrap();

    // Simulate a crash between temp write and rename
    fs::write(temp_dir.path().join(".events.json.tmp"), "[{\"id\": 2").unwrap();

    assert_eq!(engine.list_tables().unwrap(), vec!["events".to_string()]);
    assert_eq!(
        engine.read_table("events").unwrap(),
        vec![record(json!({"id": 1}))]
    );

    // The next save replaces the stale temp file and leaves none behind
    engine
        .create_record("events", record(json!({"id": 3})))
        .unwrap();
    assert!(!temp_dir.path().join(".events.json.tmp").exists());
    assert_eq!(engine.read_table("events").unwrap().len(), 2);
}

/// A rejected insert leaves the file byte-for-byte unchanged.
#[test]
fn test_rejected_insert_does_not_touch_file() {
    let temp_dir = TempDir::new().unwrap();
    let engine = Engine::new(JsonFileStore::open(temp_dir.path()).unwrap());
    engine
        .create_table(
            "users",
            Schema::new().with_column("email", TypeDescriptor::varchar(Some(8))),
        )
        .unwrap();

    let path = engine.store().table_path("users");
    let before = fs::read(&path).unwrap();

    let err = engine
        .create_record("users", record(json!({"email": "much-too-long@example.com"})))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidType);
    assert_eq!(fs::read(&path).unwrap(), before);
}
