//! API Handler for flattable
//!
//! Parses a request, dispatches it to the shared engine and renders the
//! outcome. Per-table serialization is the engine's concern; the handler
//! holds no lock of its own.

use serde::Serialize;
use serde_json::Value;

use super::errors::{ApiError, ApiResult};
use super::request::Request;
use super::response::Response;
use crate::engine::{EngineError, SharedEngine};
use crate::observability::{log_event, Event};
use crate::storage::TableStore;

/// Request handler over a shared engine
pub struct ApiHandler<S: TableStore + 'static> {
    engine: SharedEngine<S>,
}

impl<S: TableStore + 'static> Clone for ApiHandler<S> {
    fn clone(&self) -> Self {
        Self {
            engine: self.engine.clone(),
        }
    }
}

impl<S: TableStore + 'static> ApiHandler<S> {
    pub fn new(engine: SharedEngine<S>) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &SharedEngine<S> {
        &self.engine
    }

    /// Handle a raw JSON request string
    pub async fn handle(&self, json_request: &str) -> Response {
        let request = match Request::parse(json_request) {
            Ok(r) => r,
            Err(e) => {
                log_event(
                    Event::OperationRejected,
                    &[("code", e.code()), ("reason", e.message())],
                );
                return Response::error(&e);
            }
        };

        let op = request.op();
        let table = request.table().unwrap_or("").to_string();

        match self.execute(request).await {
            Ok(data) => Response::success(data),
            Err(e) => {
                log_event(
                    Event::OperationRejected,
                    &[("code", e.code()), ("op", op), ("table", &table)],
                );
                Response::error(&e)
            }
        }
    }

    /// Execute a parsed request, returning the `data` payload
    pub async fn execute(&self, request: Request) -> ApiResult<Value> {
        match request {
            Request::CreateTable { table, schema } => {
                to_data(self.engine.create_table(&table, schema).await?)
            }
            Request::CreateRecord { table, record } => {
                to_data(self.engine.create_record(&table, record).await?)
            }
            Request::ReadTable { table } => to_data(self.engine.read_table(&table).await?),
            Request::UpdateRecord { table, id, patch } => {
                to_data(self.engine.update_record(&table, id, patch).await?)
            }
            Request::DeleteRecord { table, id } => {
                to_data(self.engine.delete_record(&table, id).await?)
            }
            Request::DescribeTable { table } => {
                to_data(self.engine.describe_table(&table).await?)
            }
            Request::ListTables => to_data(self.engine.list_tables().await?),
        }
    }
}

fn to_data<T: Serialize>(payload: T) -> ApiResult<Value> {
    serde_json::to_value(payload)
        .map_err(|e| ApiError::from_engine_error(EngineError::Internal(e.to_string())))
}
