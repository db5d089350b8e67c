//! Schema-validated record persistence for a hotel booking site.
//!
//! Provides the validation and persistence contract behind the site's REST
//! endpoints: declarative record schemas, accumulated field-level violations,
//! soft deletion and a typed failure set that maps onto HTTP responses.
//!
//! # Core Components
//!
//! - [`RecordGateway`] - The only writer: validates, stamps and stores records
//! - [`SchemaRegistry`] - Loads record schemas and validates candidates
//! - [`StorageProvider`](storage::StorageProvider) - Trait for storage backends
//! - [`RecordOperationHandler`] - Transport-agnostic request/response entry point
//!
//! # Quick Start
//!
//! ```rust
//! use hotel_records::{RecordGateway, storage::InMemoryStorage};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let gateway = RecordGateway::new(InMemoryStorage::new())?;
//!
//! let result = gateway.create("room", json!({"name": "Deluxe", "maxPeople": 0})).await;
//! let error = result.unwrap_err();
//! assert_eq!(error.status_code(), 400);
//! assert!(error.violations().is_some_and(|v| v.iter().any(|v| v.field == "maxPeople")));
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod operation_handler;
pub mod providers;
pub mod resource;
pub mod schema;
pub mod storage;

// Re-export commonly used types for convenience
pub use config::{GatewayBuilder, GatewayConfig, StorageBackend};
pub use error::{
    FailureBody, RecordError, RecordResult, ValidationFailure, ValidationResult, Violation,
};
pub use operation_handler::{
    RecordOperationHandler, RecordOperationRequest, RecordOperationResponse, RecordOperationType,
};
pub use providers::RecordGateway;
pub use resource::{ListFilter, Record, RecordStatus};
pub use schema::{OperationContext, Schema, SchemaRegistry};
