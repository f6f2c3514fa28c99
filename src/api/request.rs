//! API request types
//!
//! JSON request parsing for all supported operations.

use serde::Deserialize;
use serde_json::{Map, Value};

use super::errors::{ApiError, ApiResult};
use crate::engine::EngineError;
use crate::schema::{Record, Schema};

/// Unified request envelope
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    CreateTable { table: String, schema: Schema },
    CreateRecord { table: String, record: Record },
    ReadTable { table: String },
    UpdateRecord { table: String, id: Value, patch: Record },
    DeleteRecord { table: String, id: Value },
    DescribeTable { table: String },
    ListTables,
}

/// Raw request for parsing
#[derive(Debug, Deserialize)]
struct RawRequest {
    op: String,
    #[serde(default)]
    table: Option<String>,
    #[serde(default)]
    schema: Option<Map<String, Value>>,
    #[serde(default)]
    record: Option<Value>,
    #[serde(default)]
    patch: Option<Value>,
    #[serde(default)]
    id: Option<Value>,
}

impl Request {
    /// Parse a request from a JSON string
    pub fn parse(json: &str) -> ApiResult<Self> {
        let raw: RawRequest = serde_json::from_str(json)
            .map_err(|e| ApiError::invalid_request(format!("Invalid JSON: {}", e)))?;

        match raw.op.as_str() {
            "create_table" => {
                let table = require_table(raw.table)?;
                let specs = raw
                    .schema
                    .ok_or_else(|| ApiError::invalid_request("Missing schema"))?;
                let schema = Schema::from_specs(&specs).map_err(|(column, e)| {
                    ApiError::from_engine_error(EngineError::invalid_descriptor(
                        &table, &column, e,
                    ))
                })?;
                Ok(Request::CreateTable { table, schema })
            }
            "create_record" => {
                let table = require_table(raw.table)?;
                let record = require_object("record", raw.record)?;
                Ok(Request::CreateRecord { table, record })
            }
            "read_table" => Ok(Request::ReadTable {
                table: require_table(raw.table)?,
            }),
            "update_record" => {
                let table = require_table(raw.table)?;
                let id = require_id(raw.id)?;
                let patch = require_object("patch", raw.patch)?;
                Ok(Request::UpdateRecord { table, id, patch })
            }
            "delete_record" => {
                let table = require_table(raw.table)?;
                let id = require_id(raw.id)?;
                Ok(Request::DeleteRecord { table, id })
            }
            "describe_table" => Ok(Request::DescribeTable {
                table: require_table(raw.table)?,
            }),
            "list_tables" => Ok(Request::ListTables),
            other => Err(ApiError::unknown_operation(other)),
        }
    }

    /// The operation name as it appears in `op`
    pub fn op(&self) -> &'static str {
        match self {
            Request::CreateTable { .. } => "create_table",
            Request::CreateRecord { .. } => "create_record",
            Request::ReadTable { .. } => "read_table",
            Request::UpdateRecord { .. } => "update_record",
            Request::DeleteRecord { .. } => "delete_record",
            Request::DescribeTable { .. } => "describe_table",
            Request::ListTables => "list_tables",
        }
    }

    /// The table the request targets, if any
    pub fn table(&self) -> Option<&str> {
        match self {
            Request::CreateTable { table, .. }
            | Request::CreateRecord { table, .. }
            | Request::ReadTable { table }
            | Request::UpdateRecord { table, .. }
            | Request::DeleteRecord { table, .. }
            | Request::DescribeTable { table } => Some(table),
            Request::ListTables => None,
        }
    }
}

fn require_table(table: Option<String>) -> ApiResult<String> {
    table.ok_or_else(|| ApiError::invalid_request("Missing table"))
}

fn require_id(id: Option<Value>) -> ApiResult<Value> {
    match id {
        None | Some(Value::Null) => Err(ApiError::invalid_request("Missing id")),
        Some(id) => Ok(id),
    }
}

fn require_object(field: &str, value: Option<Value>) -> ApiResult<Record> {
    match value {
        Some(Value::Object(map)) => Ok(map),
        Some(_) => Err(ApiError::invalid_request(format!(
            "Field '{}' must be an object",
            field
        ))),
        None => Err(ApiError::invalid_request(format!("Missing {}", field))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TypeDescriptor;
    use serde_json::json;

    #[test]
    fn test_parse_create_table_keeps_column_order() {
        let req = Request::parse(
            r#"{"op":"create_table","table":"products","schema":{"name":"VARCHAR(255)","id":"INT(10)"}}"#,
        )
        .unwrap();

        match req {
            Request::CreateTable { table, schema } => {
                assert_eq!(table, "products");
                let names: Vec<_> = schema.column_names().collect();
                assert_eq!(names, vec!["name", "id"]);
                assert_eq!(schema.get("id"), Some(&TypeDescriptor::int(Some(10))));
            }
            other => panic!("unexpected request: {:?}", other),
        }
    }

    #[test]
    fn test_bad_descriptor_is_invalid_type() {
        let err = Request::parse(
            r#"{"op":"create_table","table":"t","schema":{"id":"BIGSERIAL"}}"#,
        )
        .unwrap_err();
        assert_eq!(err.code(), "FT_INVALID_TYPE");
    }

    #[test]
    fn test_parse_update() {
        let req =
            Request::parse(r#"{"op":"update_record","table":"t","id":7,"patch":{"name":"x"}}"#)
                .unwrap();
        assert_eq!(
            req,
            Request::UpdateRecord {
                table: "t".into(),
                id: json!(7),
                patch: json!({"name": "x"}).as_object().cloned().unwrap(),
            }
        );
        assert_eq!(req.op(), "update_record");
        assert_eq!(req.table(), Some("t"));
    }

    #[test]
    fn test_missing_fields() {
        let err = Request::parse(r#"{"op":"read_table"}"#).unwrap_err();
        assert_eq!(err.code(), "FT_INVALID_REQUEST");

        let err = Request::parse(r#"{"op":"delete_record","table":"t"}"#).unwrap_err();
        assert!(err.message().contains("id"));

        let err = Request::parse(r#"{"op":"create_record","table":"t","record":[1]}"#)
            .unwrap_err();
        assert!(err.message().contains("object"));
    }

    #[test]
    fn test_unknown_operation() {
        let err = Request::parse(r#"{"op":"drop_table","table":"t"}"#).unwrap_err();
        assert_eq!(err.code(), "FT_UNKNOWN_OPERATION");
    }

    #[test]
    fn test_invalid_json() {
        let err = Request::parse("not json").unwrap_err();
        assert_eq!(err.code(), "FT_INVALID_REQUEST");
    }
}
