//! Request API for flattable
//!
//! JSON requests in, JSON responses out. One request names one operation:
//!
//! - create_table
//! - create_record
//! - read_table
//! - update_record
//! - delete_record
//! - describe_table
//! - list_tables
//!
//! Responses are `{"status":"ok","data":...}` or
//! `{"status":"error","code":...,"message":...}`. Engine error codes are
//! passed through unchanged.

mod errors;
mod handler;
mod request;
mod response;

pub use errors::{ApiError, ApiErrorCode, ApiResult};
pub use handler::ApiHandler;
pub use request::Request;
pub use response::{ErrorResponse, Response, SuccessResponse};
