//! Column type catalogue for flattable
//!
//! Supported families:
//! - INT, VARCHAR, CHAR (optional size)
//! - DECIMAL (optional precision and scale)
//! - TEXT, DATE, TIME, DATETIME, BOOLEAN, TINYINT, FLOAT, DOUBLE
//!
//! Descriptors are persisted only as their canonical rendering
//! (`INT(10)`, `VARCHAR(255)`, `DECIMAL(10,2)`), so rendering must stay
//! deterministic and parse back to the same descriptor.

mod descriptor;
mod errors;

pub use descriptor::{TypeDescriptor, TypeFamily};
pub use errors::DescriptorError;
