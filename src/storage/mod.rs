//! Storage abstraction layer for record collections.
//!
//! The `StorageProvider` trait defines pure document storage operations that
//! know nothing about record schemas, defaults or soft deletion. Those rules
//! live in the [`RecordGateway`](crate::providers::RecordGateway), which is the
//! only component that writes through this layer.
//!
//! # Architecture
//!
//! The storage layer is responsible for:
//! - PUT/GET of JSON documents keyed by collection and identifier
//! - Keeping each collection in insertion order
//! - Exact-match lookups on document attributes
//!
//! The storage layer is NOT responsible for:
//! - Timestamps, identifiers or status management
//! - Validation of any kind
//!
//! There is no delete operation. Records are retired by flipping their status.
//!
//! # Example Usage
//!
//! ```rust
//! use hotel_records::storage::{StorageProvider, StorageKey, InMemoryStorage};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let storage = InMemoryStorage::new();
//!
//! let key = StorageKey::new("room", "123");
//! let room = json!({"_id": "123", "name": "Deluxe"});
//! storage.put(key.clone(), room).await?;
//!
//! let retrieved = storage.get(key).await?;
//! assert!(retrieved.is_some());
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod file;
pub mod in_memory;

pub use errors::StorageError;
pub use file::JsonFileStorage;
pub use in_memory::InMemoryStorage;

use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;

/// Key identifying one document: `collection` → `id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageKey {
    collection: String,
    id: String,
}

impl StorageKey {
    pub fn new(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            id: id.into(),
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Create a prefix for listing every document in a collection.
    pub fn prefix(collection: impl Into<String>) -> StoragePrefix {
        StoragePrefix {
            collection: collection.into(),
        }
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.collection, self.id)
    }
}

/// A prefix selecting a whole collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoragePrefix {
    collection: String,
}

impl StoragePrefix {
    pub fn collection(&self) -> &str {
        &self.collection
    }
}

impl fmt::Display for StoragePrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.collection)
    }
}

/// Core trait for storage providers that handle pure document persistence.
///
/// # Design Principles
///
/// - **PUT/GET model**: create and update are both a `put`; the gateway decides
///   which one a write is.
/// - **PUT returns data**: the stored document is returned so the gateway can
///   answer without a second read.
/// - **Single-document atomicity**: one `put` is applied completely or not at
///   all. No cross-document transactions are offered.
/// - **Insertion order**: `list` returns documents in the order their keys were
///   first written. Re-putting an existing key keeps its position.
pub trait StorageProvider: Send + Sync {
    /// The error type returned by storage operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Store `data` at `key`, replacing any previous document, and return what
    /// was stored.
    fn put(
        &self,
        key: StorageKey,
        data: Value,
    ) -> impl Future<Output = Result<Value, Self::Error>> + Send;

    /// Retrieve a document by key; `None` if it was never written.
    fn get(
        &self,
        key: StorageKey,
    ) -> impl Future<Output = Result<Option<Value>, Self::Error>> + Send;

    /// List every document of a collection in insertion order.
    fn list(
        &self,
        prefix: StoragePrefix,
    ) -> impl Future<Output = Result<Vec<(StorageKey, Value)>, Self::Error>> + Send;

    /// Find documents whose attribute at `attribute` (dot notation, numeric
    /// segments index arrays) equals `value` exactly. Insertion order.
    fn find_by_attribute(
        &self,
        prefix: StoragePrefix,
        attribute: &str,
        value: &Value,
    ) -> impl Future<Output = Result<Vec<(StorageKey, Value)>, Self::Error>> + Send;

    /// Count the documents of a collection.
    fn count(
        &self,
        prefix: StoragePrefix,
    ) -> impl Future<Output = Result<usize, Self::Error>> + Send;
}

/// Resolve a dot-notation path inside a JSON document.
///
/// Numeric segments index into arrays: `layoutInfo.0.name`.
pub fn lookup_path<'a>(data: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = data;
    for part in path.split('.') {
        current = match current {
            Value::Array(items) => items.get(part.parse::<usize>().ok()?)?,
            other => other.get(part)?,
        };
    }
    Some(current)
}

/// One collection's documents, ordered by first insertion.
#[derive(Debug, Clone, Default)]
pub(crate) struct OrderedCollection {
    order: Vec<String>,
    documents: HashMap<String, Value>,
}

impl OrderedCollection {
    pub(crate) fn insert(&mut self, id: &str, data: Value) {
        if self.documents.insert(id.to_string(), data).is_none() {
            self.order.push(id.to_string());
        }
    }

    pub(crate) fn get(&self, id: &str) -> Option<&Value> {
        self.documents.get(id)
    }

    pub(crate) fn len(&self) -> usize {
        self.order.len()
    }

    /// Documents in insertion order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.order
            .iter()
            .filter_map(|id| self.documents.get(id).map(|doc| (id.as_str(), doc)))
    }

    pub(crate) fn entries(&self, collection: &str) -> Vec<(StorageKey, Value)> {
        self.iter()
            .map(|(id, doc)| (StorageKey::new(collection, id), doc.clone()))
            .collect()
    }

    pub(crate) fn matching(
        &self,
        collection: &str,
        attribute: &str,
        value: &Value,
    ) -> Vec<(StorageKey, Value)> {
        self.iter()
            .filter(|(_, doc)| lookup_path(doc, attribute) == Some(value))
            .map(|(id, doc)| (StorageKey::new(collection, id), doc.clone()))
            .collect()
    }
}
