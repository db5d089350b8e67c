//! Storage-specific error types for pure data operations.
//!
//! These errors describe persistence failures only. They carry no knowledge of
//! record schemas or validation; the gateway surfaces them to callers as
//! [`RecordError::StoreUnavailable`](crate::RecordError::StoreUnavailable).

use std::fmt;
use std::path::PathBuf;

/// Errors that can occur during storage operations.
#[derive(Debug)]
pub enum StorageError {
    /// Reading or writing a backing file failed.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A stored collection could not be encoded or decoded.
    Serialization {
        collection: String,
        message: String,
    },

    /// Stored data does not have the expected document shape.
    DataCorruption {
        collection: String,
        id: Option<String>,
        details: String,
    },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Io { path, source } => {
                write!(f, "I/O error on {}: {}", path.display(), source)
            }
            StorageError::Serialization {
                collection,
                message,
            } => {
                write!(
                    f,
                    "Serialization error in collection '{}': {}",
                    collection, message
                )
            }
            StorageError::DataCorruption {
                collection,
                id,
                details,
            } => {
                if let Some(id) = id {
                    write!(
                        f,
                        "Data corruption detected for {}/{}: {}",
                        collection, id, details
                    )
                } else {
                    write!(
                        f,
                        "Data corruption detected in collection '{}': {}",
                        collection, details
                    )
                }
            }
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl StorageError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn serialization(collection: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Serialization {
            collection: collection.into(),
            message: message.into(),
        }
    }

    pub fn data_corruption(
        collection: impl Into<String>,
        id: Option<String>,
        details: impl Into<String>,
    ) -> Self {
        Self::DataCorruption {
            collection: collection.into(),
            id,
            details: details.into(),
        }
    }
}
