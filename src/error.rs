//! Error types for record validation and persistence.
//!
//! Failures at the gateway boundary are explicit values: a write is either
//! rejected with the complete list of field violations, refused because the
//! identifier is unknown, or surfaced as a storage failure.

use crate::storage::StorageError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Main error type for gateway operations.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    /// One or more field constraints were not met
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationFailure),

    /// No record with the given identifier exists in the collection
    #[error("Record not found: {resource_type} with ID {id}")]
    NotFound { resource_type: String, id: String },

    /// The storage backend failed or is unreachable
    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[from] StorageError),

    /// No schema is registered for the resource type
    #[error("Unsupported resource type: {0}")]
    UnsupportedResourceType(String),

    /// The request payload is not usable as a candidate record
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },
}

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Path of the failing field, e.g. `layoutInfo[2].name`
    pub field: String,
    /// Human-readable description of the failed constraint
    pub message: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Every violation found while validating one candidate, in schema order.
#[derive(Debug, Clone, PartialEq, Eq, Default, thiserror::Error)]
#[error("{} field(s) failed validation: {}", .violations.len(), summarize(.violations))]
pub struct ValidationFailure {
    pub violations: Vec<Violation>,
}

fn summarize(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| v.field.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

impl ValidationFailure {
    pub fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Whether any violation is reported for exactly this field path.
    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }

    /// Field paths in reporting order.
    pub fn fields(&self) -> Vec<&str> {
        self.violations.iter().map(|v| v.field.as_str()).collect()
    }
}

/// Structured failure body handed to the transport layer.
///
/// Serializes as `{"kind": "validation", "violations": [...]}`,
/// `{"kind": "not_found"}` and so on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FailureBody {
    Validation { violations: Vec<Violation> },
    NotFound,
    StoreUnavailable { message: String },
    UnsupportedResourceType { resource_type: String },
    InvalidRequest { message: String },
}

/// Errors raised while loading or checking schema definitions.
#[derive(Debug, thiserror::Error)]
pub enum SchemaLoadError {
    /// Schema file could not be read
    #[error("Failed to read schema file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Schema JSON is malformed or has an unexpected shape
    #[error("Failed to parse schema: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two schemas share a name
    #[error("Duplicate schema name: {0}")]
    DuplicateSchema(String),

    /// A list field references a schema that is not registered
    #[error("Field '{field}' of schema '{schema}' references unknown item schema '{items}'")]
    UnknownItemSchema {
        schema: String,
        field: String,
        items: String,
    },

    /// `items` declared on a field that is not a list
    #[error("Field '{field}' of schema '{schema}' declares items but is not a list")]
    ItemsOnNonList { schema: String, field: String },

    /// A declared default does not satisfy its own field's predicate
    #[error("Default of field '{field}' in schema '{schema}' is invalid: {message}")]
    InvalidDefault {
        schema: String,
        field: String,
        message: String,
    },
}

/// Errors that can occur while assembling a gateway from configuration.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaLoadError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl RecordError {
    /// Create a not found error
    pub fn not_found(resource_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type: resource_type.into(),
            id: id.into(),
        }
    }

    /// Create an invalid request error
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// The violation list when this is a validation failure.
    pub fn violations(&self) -> Option<&[Violation]> {
        match self {
            Self::Validation(failure) => Some(&failure.violations),
            _ => None,
        }
    }

    /// Suggested HTTP status code for the transport layer.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) | Self::InvalidRequest { .. } => 400,
            Self::NotFound { .. } | Self::UnsupportedResourceType(_) => 404,
            Self::StoreUnavailable(_) => 503,
        }
    }

    pub fn failure_body(&self) -> FailureBody {
        match self {
            Self::Validation(failure) => FailureBody::Validation {
                violations: failure.violations.clone(),
            },
            Self::NotFound { .. } => FailureBody::NotFound,
            Self::StoreUnavailable(e) => FailureBody::StoreUnavailable {
                message: e.to_string(),
            },
            Self::UnsupportedResourceType(resource_type) => FailureBody::UnsupportedResourceType {
                resource_type: resource_type.clone(),
            },
            Self::InvalidRequest { message } => FailureBody::InvalidRequest {
                message: message.clone(),
            },
        }
    }
}

pub type RecordResult<T> = Result<T, RecordError>;
pub type ValidationResult<T> = Result<T, ValidationFailure>;
pub type BuildResult<T> = Result<T, BuildError>;
