//! flattable - typed tables stored as flat JSON files
//!
//! A table is a named, fixed schema plus an ordered list of records,
//! persisted as one JSON document. Every mutation loads the whole table,
//! validates, mutates in memory and writes the whole table back.
//!
//! Layers, leaf first:
//! - `types`: column type descriptors
//! - `schema`: schemas and record validation
//! - `storage`: whole-table persistence
//! - `engine`: table and record operations
//! - `api`: JSON request/response surface
//! - `cli`: command-line entry points

pub mod api;
pub mod cli;
pub mod engine;
pub mod observability;
pub mod schema;
pub mod storage;
pub mod types;

pub use engine::{CreatePolicy, Engine, EngineError, EngineResult, ErrorKind, SharedEngine};
pub use schema::{Record, Schema};
pub use storage::{JsonFileStore, MemoryStore, TableStore};
pub use types::TypeDescriptor;
