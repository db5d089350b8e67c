//! Error response creation for operation handlers.

use crate::{error::RecordError, operation_handler::core::RecordOperationResponse};

/// Create an error response from a RecordError.
pub fn create_error_response(error: &RecordError, request_id: String) -> RecordOperationResponse {
    RecordOperationResponse {
        success: false,
        status_code: error.status_code(),
        data: None,
        failure: Some(error.failure_body()),
        request_id,
    }
}
