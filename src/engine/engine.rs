//! CRUD engine over a whole-table store
//!
//! Every operation is a full read-modify-write cycle:
//! 1. Load the table (schema + records)
//! 2. Validate against the persisted schema
//! 3. Mutate in memory
//! 4. Save the whole table back
//!
//! The engine holds no locks. Callers issuing concurrent operations against
//! the same table must go through `SharedEngine`.

use serde_json::Value;

use super::errors::{EngineError, EngineResult};
use super::result::{DeleteOutcome, InsertOutcome, TableCreated, UpdateOutcome};
use crate::observability::{log_event, Event};
use crate::schema::{Record, RecordValidator, Schema, ID_COLUMN};
use crate::storage::{TableData, TableStore};

/// Longest accepted table name
pub const MAX_TABLE_NAME_LEN: usize = 64;

/// What `create_record` does when the table does not exist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CreatePolicy {
    /// Create the table with an empty schema, then insert
    #[default]
    CreateIfAbsent,
    /// Fail with `NotFound`
    RequireExisting,
}

/// Table and record lifecycle over a `TableStore`.
pub struct Engine<S: TableStore> {
    store: S,
    policy: CreatePolicy,
}

impl<S: TableStore> Engine<S> {
    /// Creates an engine with the default create-if-absent policy
    pub fn new(store: S) -> Self {
        Self {
            store,
            policy: CreatePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: CreatePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> CreatePolicy {
        self.policy
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Checks whether a table exists
    pub fn table_exists(&self, table: &str) -> EngineResult<bool> {
        validate_table_name(table)?;
        Ok(self.store.exists(table))
    }

    /// Names of all tables, sorted
    pub fn list_tables(&self) -> EngineResult<Vec<String>> {
        Ok(self.store.list()?)
    }

    /// Creates an empty table with the given schema.
    ///
    /// # Errors
    ///
    /// `AlreadyExists` if a table with this name is present.
    pub fn create_table(&self, table: &str, schema: Schema) -> EngineResult<TableCreated> {
        validate_table_name(table)?;

        if self.store.exists(table) {
            return Err(EngineError::AlreadyExists(table.to_string()));
        }

        let columns = schema.len().to_string();
        self.store.save(table, &TableData::new(schema))?;

        log_event(Event::TableCreated, &[("table", table), ("columns", &columns)]);
        Ok(TableCreated::new(table))
    }

    /// Inserts a record using the engine's create policy.
    pub fn create_record(&self, table: &str, record: Record) -> EngineResult<InsertOutcome> {
        self.create_record_with(table, record, self.policy)
    }

    /// Inserts a record.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the table is absent and `policy` is `RequireExisting`
    /// - `MissingColumn`, `InvalidType`, `UnknownColumn` from validation
    pub fn create_record_with(
        &self,
        table: &str,
        record: Record,
        policy: CreatePolicy,
    ) -> EngineResult<InsertOutcome> {
        validate_table_name(table)?;

        let auto_created = !self.store.exists(table);
        let mut data = if !auto_created {
            self.store.load(table)?
        } else {
            match policy {
                CreatePolicy::CreateIfAbsent => TableData::default(),
                CreatePolicy::RequireExisting => {
                    return Err(EngineError::NotFound(table.to_string()))
                }
            }
        };

        RecordValidator::new(&data.schema)
            .validate_record(&record)
            .map_err(|e| EngineError::from_validation(table, e))?;

        let insert_id = record.get(ID_COLUMN).cloned().unwrap_or(Value::Null);
        data.records.push(record);
        self.store.save(table, &data)?;

        if auto_created {
            log_event(Event::TableAutoCreated, &[("table", table)]);
        }
        log_event(
            Event::RecordInserted,
            &[("table", table), ("id", &insert_id.to_string())],
        );
        Ok(InsertOutcome {
            affected_rows: 1,
            insert_id,
        })
    }

    /// Returns the table's records in insertion order.
    pub fn read_table(&self, table: &str) -> EngineResult<Vec<Record>> {
        validate_table_name(table)?;
        Ok(self.store.load(table)?.records)
    }

    /// Returns the table's schema.
    pub fn describe_table(&self, table: &str) -> EngineResult<Schema> {
        validate_table_name(table)?;
        Ok(self.store.load(table)?.schema)
    }

    /// Merges `patch` into the first record whose `id` equals `id`.
    ///
    /// Fields named in the patch are overwritten; all others are kept. An
    /// unmatched `id` leaves the table untouched and reports zero rows.
    ///
    /// # Errors
    ///
    /// `UnknownColumn` or `InvalidType` if the patch does not fit the table.
    pub fn update_record(
        &self,
        table: &str,
        id: &Value,
        patch: Record,
    ) -> EngineResult<UpdateOutcome> {
        validate_table_name(table)?;
        let mut data = self.store.load(table)?;

        let index = match data.records.iter().position(|r| has_id(r, id)) {
            Some(index) => index,
            None => return Ok(UpdateOutcome::unmatched()),
        };

        RecordValidator::new(&data.schema)
            .validate_patch(&data.records[index], &patch)
            .map_err(|e| EngineError::from_validation(table, e))?;

        let target = &mut data.records[index];
        for (column, value) in patch {
            target.insert(column, value);
        }
        self.store.save(table, &data)?;

        log_event(
            Event::RecordUpdated,
            &[("table", table), ("id", &id.to_string())],
        );
        Ok(UpdateOutcome::updated())
    }

    /// Removes every record whose `id` equals `id`.
    ///
    /// The table is only rewritten when something was removed.
    pub fn delete_record(&self, table: &str, id: &Value) -> EngineResult<DeleteOutcome> {
        validate_table_name(table)?;
        let mut data = self.store.load(table)?;

        let before = data.records.len();
        data.records.retain(|r| !has_id(r, id));
        let removed = before - data.records.len();

        if removed == 0 {
            return Ok(DeleteOutcome { affected_rows: 0 });
        }

        self.store.save(table, &data)?;

        log_event(
            Event::RecordDeleted,
            &[
                ("table", table),
                ("id", &id.to_string()),
                ("removed", &removed.to_string()),
            ],
        );
        Ok(DeleteOutcome { affected_rows: 1 })
    }
}

fn has_id(record: &Record, id: &Value) -> bool {
    record.get(ID_COLUMN).map_or(false, |own| ids_equal(own, id))
}

/// Numbers compare by value, so `1` matches `1.0`. Other kinds compare
/// exactly.
fn ids_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_i64(), y.as_i64()) {
            (Some(x), Some(y)) => x == y,
            _ => match (x.as_u64(), y.as_u64()) {
                (Some(x), Some(y)) => x == y,
                _ => x.as_f64() == y.as_f64(),
            },
        },
        _ => a == b,
    }
}

/// Table names double as file names: ASCII letters, digits, `_` and `-`,
/// not starting with `-`.
pub fn validate_table_name(name: &str) -> EngineResult<()> {
    let invalid = |reason| {
        Err(EngineError::InvalidName {
            name: name.to_string(),
            reason,
        })
    };

    if name.is_empty() {
        return invalid("name is empty");
    }
    if name.len() > MAX_TABLE_NAME_LEN {
        return invalid("name is longer than 64 characters");
    }
    if name.starts_with('-') {
        return invalid("name starts with '-'");
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return invalid("only ASCII letters, digits, '_' and '-' are allowed");
    }

    Ok(())
}
