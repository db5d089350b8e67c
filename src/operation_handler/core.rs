//! Core operation handler types and dispatch.

use crate::{
    error::FailureBody,
    providers::RecordGateway,
    resource::ListFilter,
    storage::{StorageError, StorageProvider},
};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Framework-agnostic operation handler for record operations.
pub struct RecordOperationHandler<S: StorageProvider> {
    pub(super) gateway: RecordGateway<S>,
}

/// Structured request for record operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordOperationRequest {
    /// The type of operation to perform
    pub operation: RecordOperationType,
    /// The collection addressed, e.g. `room`
    pub resource_type: String,
    /// Record identifier for get, update and delete
    pub resource_id: Option<String>,
    /// Payload for create and update
    pub data: Option<Value>,
    /// Exact-match criteria for list
    pub filter: Option<ListFilter>,
    /// Request ID for tracing and correlation
    pub request_id: Option<String>,
}

/// Types of record operations supported by the handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordOperationType {
    Create,
    Get,
    Update,
    Delete,
    List,
}

/// Structured response from record operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordOperationResponse {
    /// Whether the operation succeeded
    pub success: bool,
    /// Suggested HTTP status code
    pub status_code: u16,
    /// The stored record, or an array of records for list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Structured failure body when the operation failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureBody>,
    /// Request ID for tracing
    pub request_id: String,
}

impl<S> RecordOperationHandler<S>
where
    S: StorageProvider<Error = StorageError>,
{
    /// Create a new operation handler over a gateway.
    pub fn new(gateway: RecordGateway<S>) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &RecordGateway<S> {
        &self.gateway
    }

    /// Handle a structured record operation request.
    ///
    /// This is the main entry point. It never fails: every outcome, including
    /// malformed requests, is turned into a response.
    pub async fn handle_operation(
        &self,
        request: RecordOperationRequest,
    ) -> RecordOperationResponse {
        let request_id = request
            .request_id
            .clone()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        info!(
            "Record operation handler processing {:?} for {} (request: '{}')",
            request.operation, request.resource_type, request_id
        );

        let result = match request.operation {
            RecordOperationType::Create => super::handlers::handle_create(self, request).await,
            RecordOperationType::Get => super::handlers::handle_get(self, request).await,
            RecordOperationType::Update => super::handlers::handle_update(self, request).await,
            RecordOperationType::Delete => super::handlers::handle_delete(self, request).await,
            RecordOperationType::List => super::handlers::handle_list(self, request).await,
        };

        match result {
            Ok((status_code, data)) => {
                debug!(
                    "Record operation handler completed successfully (request: '{}')",
                    request_id
                );
                RecordOperationResponse {
                    success: true,
                    status_code,
                    data,
                    failure: None,
                    request_id,
                }
            }
            Err(e) => {
                warn!(
                    "Record operation handler failed: {} (request: '{}')",
                    e, request_id
                );
                super::errors::create_error_response(&e, request_id)
            }
        }
    }
}
