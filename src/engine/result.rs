//! Success payloads of engine operations
//!
//! Serialized with camelCase keys: `affectedRows`, `insertId`,
//! `changedRows`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Acknowledgment of `create_table`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCreated {
    pub table: String,
    pub message: String,
}

impl TableCreated {
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            message: format!("Table '{}' created.", table),
        }
    }
}

/// Acknowledgment of `create_record`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertOutcome {
    /// Always 1 on success
    pub affected_rows: u64,
    /// The record's `id` value, null when it has none
    pub insert_id: Value,
}

/// Acknowledgment of `update_record`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOutcome {
    pub affected_rows: u64,
    pub changed_rows: u64,
}

impl UpdateOutcome {
    pub fn unmatched() -> Self {
        Self {
            affected_rows: 0,
            changed_rows: 0,
        }
    }

    pub fn updated() -> Self {
        Self {
            affected_rows: 1,
            changed_rows: 1,
        }
    }
}

/// Acknowledgment of `delete_record`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOutcome {
    /// 1 if any record was removed, else 0
    pub affected_rows: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_keys() {
        let insert = InsertOutcome {
            affected_rows: 1,
            insert_id: json!(7),
        };
        assert_eq!(
            serde_json::to_value(insert).unwrap(),
            json!({"affectedRows": 1, "insertId": 7})
        );

        assert_eq!(
            serde_json::to_value(UpdateOutcome::updated()).unwrap(),
            json!({"affectedRows": 1, "changedRows": 1})
        );
    }

    #[test]
    fn test_table_created_message() {
        let ack = TableCreated::new("products");
        assert_eq!(ack.message, "Table 'products' created.");
    }
}
