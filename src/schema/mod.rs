//! Table schemas and record validation for flattable
//!
//! A schema is fixed at table creation and persisted alongside the table's
//! records. Records are validated against it on insert; patches are
//! validated against it on update.
//!
//! # Rules
//!
//! - Every declared column is required
//! - No undeclared columns (except for tables with an empty schema)
//! - Values must satisfy their column's type family
//! - No nulls, defaults, or coercion

mod errors;
mod types;
mod validator;

pub use errors::{ValidationError, ValidationResult};
pub use types::{Column, Record, Schema, ID_COLUMN};
pub use validator::{json_type_name, validate, RecordValidator};
