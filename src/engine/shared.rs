//! Concurrent access to an engine
//!
//! Operations on the same table are serialized by a per-table async mutex
//! held across the whole read-modify-write cycle. Operations on different
//! tables run in parallel. Blocking storage work runs on tokio's blocking
//! pool.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde_json::Value;
use tokio::sync::Mutex as TableLock;

use super::engine::{validate_table_name, CreatePolicy, Engine};
use super::errors::{EngineError, EngineResult};
use super::result::{DeleteOutcome, InsertOutcome, TableCreated, UpdateOutcome};
use crate::schema::{Record, Schema};
use crate::storage::TableStore;

/// Cloneable handle to an engine shared across tasks.
pub struct SharedEngine<S: TableStore + 'static> {
    engine: Arc<Engine<S>>,
    locks: Arc<Mutex<HashMap<String, Arc<TableLock<()>>>>>,
}

impl<S: TableStore + 'static> Clone for SharedEngine<S> {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
            locks: Arc::clone(&self.locks),
        }
    }
}

impl<S: TableStore + 'static> SharedEngine<S> {
    pub fn new(engine: Engine<S>) -> Self {
        Self {
            engine: Arc::new(engine),
            locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// The wrapped engine. Calls through it bypass table locking.
    pub fn engine(&self) -> &Engine<S> {
        &self.engine
    }

    fn table_lock(&self, table: &str) -> Arc<TableLock<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        Arc::clone(locks.entry(table.to_string()).or_default())
    }

    /// Drops `table`'s map entry once no other task holds or awaits it.
    fn release_lock(&self, table: &str, lock: Arc<TableLock<()>>) {
        let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        drop(lock);
        if locks.get(table).map_or(false, |l| Arc::strong_count(l) == 1) {
            locks.remove(table);
        }
    }

    /// Runs `op` on the blocking pool while holding `table`'s lock.
    ///
    /// Invalid names are rejected before any lock is created.
    async fn run<T, F>(&self, table: &str, op: F) -> EngineResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Engine<S>) -> EngineResult<T> + Send + 'static,
    {
        validate_table_name(table)?;

        let lock = self.table_lock(table);
        let result = {
            let _guard = lock.lock().await;
            self.run_unlocked(op).await
        };
        self.release_lock(table, lock);
        result
    }

    /// Runs `op` on the blocking pool without taking any table lock.
    async fn run_unlocked<T, F>(&self, op: F) -> EngineResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Engine<S>) -> EngineResult<T> + Send + 'static,
    {
        let engine = Arc::clone(&self.engine);
        match tokio::task::spawn_blocking(move || op(&engine)).await {
            Ok(result) => result,
            Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
            Err(err) => Err(EngineError::Internal(err.to_string())),
        }
    }

    pub async fn list_tables(&self) -> EngineResult<Vec<String>> {
        self.run_unlocked(|engine| engine.list_tables()).await
    }

    pub async fn table_exists(&self, table: &str) -> EngineResult<bool> {
        let name = table.to_string();
        self.run(table, move |engine| engine.table_exists(&name)).await
    }

    pub async fn create_table(&self, table: &str, schema: Schema) -> EngineResult<TableCreated> {
        let name = table.to_string();
        self.run(table, move |engine| engine.create_table(&name, schema))
            .await
    }

    pub async fn create_record(&self, table: &str, record: Record) -> EngineResult<InsertOutcome> {
        let name = table.to_string();
        self.run(table, move |engine| engine.create_record(&name, record))
            .await
    }

    pub async fn create_record_with(
        &self,
        table: &str,
        record: Record,
        policy: CreatePolicy,
    ) -> EngineResult<InsertOutcome> {
        let name = table.to_string();
        self.run(table, move |engine| {
            engine.create_record_with(&name, record, policy)
        })
        .await
    }

    pub async fn read_table(&self, table: &str) -> EngineResult<Vec<Record>> {
        let name = table.to_string();
        self.run(table, move |engine| engine.read_table(&name)).await
    }

    pub async fn describe_table(&self, table: &str) -> EngineResult<Schema> {
        let name = table.to_string();
        self.run(table, move |engine| engine.describe_table(&name))
            .await
    }

    pub async fn update_record(
        &self,
        table: &str,
        id: Value,
        patch: Record,
    ) -> EngineResult<UpdateOutcome> {
        let name = table.to_string();
        self.run(table, move |engine| engine.update_record(&name, &id, patch))
            .await
    }

    pub async fn delete_record(&self, table: &str, id: Value) -> EngineResult<DeleteOutcome> {
        let name = table.to_string();
        self.run(table, move |engine| engine.delete_record(&name, &id))
            .await
    }
}
