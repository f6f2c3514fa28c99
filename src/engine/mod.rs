//! Table engine for flattable
//!
//! Implements the five table operations on top of a `TableStore`:
//! - `create_table`: persist an empty table with a fixed schema
//! - `create_record`: validate and append a record
//! - `read_table`: return all records in insertion order
//! - `update_record`: merge a patch into the first record with a given `id`
//! - `delete_record`: remove every record with a given `id`
//!
//! `Engine` is synchronous and lock-free. `SharedEngine` adds per-table
//! serialization for concurrent callers.

mod engine;
mod errors;
mod result;
mod shared;

pub use engine::{validate_table_name, CreatePolicy, Engine, MAX_TABLE_NAME_LEN};
pub use errors::{EngineError, EngineResult, ErrorKind};
pub use result::{DeleteOutcome, InsertOutcome, TableCreated, UpdateOutcome};
pub use shared::SharedEngine;
