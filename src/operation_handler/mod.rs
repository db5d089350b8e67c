//! Framework-agnostic record operation handler.
//!
//! This module provides structured request/response handling so that an HTTP
//! layer (or any other transport) can forward calls to the gateway and turn
//! the outcome into a response without knowing the error taxonomy.
//!
//! # Key Types
//!
//! - [`RecordOperationHandler`] - Main handler for processing record operations
//! - [`RecordOperationRequest`] - Structured request wrapper
//! - [`RecordOperationResponse`] - Response with status code and failure body
//!
//! # Examples
//!
//! ```rust
//! use hotel_records::operation_handler::{RecordOperationHandler, RecordOperationRequest};
//! use hotel_records::providers::RecordGateway;
//! use hotel_records::storage::InMemoryStorage;
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let gateway = RecordGateway::new(InMemoryStorage::new())?;
//! let handler = RecordOperationHandler::new(gateway);
//!
//! let request = RecordOperationRequest::update("room", "123", json!({"price": 500}));
//! let response = handler.handle_operation(request).await;
//! assert_eq!(response.status_code, 404);
//! # Ok(())
//! # }
//! ```

mod builders;
mod core;
mod errors;
mod handlers;

pub use core::{
    RecordOperationHandler, RecordOperationRequest, RecordOperationResponse, RecordOperationType,
};
pub use errors::create_error_response;
