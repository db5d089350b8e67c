//! Request builder utilities for RecordOperationRequest.

use crate::{
    operation_handler::core::{RecordOperationRequest, RecordOperationType},
    resource::ListFilter,
};
use serde_json::Value;

impl RecordOperationRequest {
    fn new(operation: RecordOperationType, resource_type: impl Into<String>) -> Self {
        Self {
            operation,
            resource_type: resource_type.into(),
            resource_id: None,
            data: None,
            filter: None,
            request_id: None,
        }
    }

    /// Create a new create operation request.
    pub fn create(resource_type: impl Into<String>, data: Value) -> Self {
        Self {
            data: Some(data),
            ..Self::new(RecordOperationType::Create, resource_type)
        }
    }

    /// Create a new get operation request.
    pub fn get(resource_type: impl Into<String>, resource_id: impl Into<String>) -> Self {
        Self {
            resource_id: Some(resource_id.into()),
            ..Self::new(RecordOperationType::Get, resource_type)
        }
    }

    /// Create a new update operation request.
    pub fn update(
        resource_type: impl Into<String>,
        resource_id: impl Into<String>,
        data: Value,
    ) -> Self {
        Self {
            resource_id: Some(resource_id.into()),
            data: Some(data),
            ..Self::new(RecordOperationType::Update, resource_type)
        }
    }

    /// Create a new delete operation request.
    pub fn delete(resource_type: impl Into<String>, resource_id: impl Into<String>) -> Self {
        Self {
            resource_id: Some(resource_id.into()),
            ..Self::new(RecordOperationType::Delete, resource_type)
        }
    }

    /// Create a new list operation request.
    pub fn list(resource_type: impl Into<String>) -> Self {
        Self::new(RecordOperationType::List, resource_type)
    }

    /// Restrict a list request to records matching `filter`.
    pub fn with_filter(mut self, filter: ListFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Set the request ID used for tracing.
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }
}
