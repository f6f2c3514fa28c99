//! Table persistence for flattable
//!
//! Every table is persisted as a single unit holding its schema and all of
//! its records. Reads load the whole unit; writes replace it.
//!
//! # Backends
//!
//! - `JsonFileStore`: one JSON file per table, atomic replace on save
//! - `MemoryStore`: in-process map

mod errors;
mod file;
mod memory;
mod store;

pub use errors::{StorageError, StorageResult};
pub use file::JsonFileStore;
pub use memory::MemoryStore;
pub use store::{TableData, TableStore};
