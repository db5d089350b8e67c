//! Per-operation handlers.
//!
//! Each handler checks the request carries what the operation needs, calls
//! the gateway and returns the success status code with the response data.

use crate::{
    error::{RecordError, RecordResult},
    operation_handler::core::{RecordOperationHandler, RecordOperationRequest},
    resource::{ListFilter, Record},
    storage::{StorageError, StorageProvider},
};
use serde_json::Value;

type Outcome = (u16, Option<Value>);

fn record_json(resource_type: &str, record: &Record) -> RecordResult<Value> {
    record
        .to_json()
        .map_err(|e| StorageError::serialization(resource_type, e.to_string()).into())
}

fn require_id(request: &RecordOperationRequest, operation: &str) -> RecordResult<String> {
    request.resource_id.clone().ok_or_else(|| {
        RecordError::invalid_request(format!("Missing resource_id for {} operation", operation))
    })
}

fn require_data(request: &mut RecordOperationRequest, operation: &str) -> RecordResult<Value> {
    request.data.take().ok_or_else(|| {
        RecordError::invalid_request(format!("Missing data for {} operation", operation))
    })
}

pub(super) async fn handle_create<S: StorageProvider<Error = StorageError>>(
    handler: &RecordOperationHandler<S>,
    mut request: RecordOperationRequest,
) -> RecordResult<Outcome> {
    let data = require_data(&mut request, "create")?;
    let record = handler.gateway.create(&request.resource_type, data).await?;
    Ok((201, Some(record_json(&request.resource_type, &record)?)))
}

pub(super) async fn handle_get<S: StorageProvider<Error = StorageError>>(
    handler: &RecordOperationHandler<S>,
    request: RecordOperationRequest,
) -> RecordResult<Outcome> {
    let id = require_id(&request, "get")?;
    let record = handler.gateway.get_by_id(&request.resource_type, &id).await?;
    Ok((200, Some(record_json(&request.resource_type, &record)?)))
}

pub(super) async fn handle_update<S: StorageProvider<Error = StorageError>>(
    handler: &RecordOperationHandler<S>,
    mut request: RecordOperationRequest,
) -> RecordResult<Outcome> {
    let id = require_id(&request, "update")?;
    let data = require_data(&mut request, "update")?;
    let record = handler
        .gateway
        .update(&request.resource_type, &id, data)
        .await?;
    Ok((200, Some(record_json(&request.resource_type, &record)?)))
}

pub(super) async fn handle_delete<S: StorageProvider<Error = StorageError>>(
    handler: &RecordOperationHandler<S>,
    request: RecordOperationRequest,
) -> RecordResult<Outcome> {
    let id = require_id(&request, "delete")?;
    handler
        .gateway
        .soft_delete(&request.resource_type, &id)
        .await?;
    Ok((200, None))
}

pub(super) async fn handle_list<S: StorageProvider<Error = StorageError>>(
    handler: &RecordOperationHandler<S>,
    request: RecordOperationRequest,
) -> RecordResult<Outcome> {
    let filter = request.filter.unwrap_or_else(ListFilter::new);
    let records = handler.gateway.list(&request.resource_type, &filter).await?;
    let documents = records
        .iter()
        .map(|record| record_json(&request.resource_type, record))
        .collect::<RecordResult<Vec<_>>>()?;
    Ok((200, Some(Value::Array(documents))))
}
