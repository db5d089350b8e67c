//! In-memory storage implementation for record collections.
//!
//! A thread-safe implementation of [`StorageProvider`] over a map of ordered
//! collections guarded by a tokio `RwLock`. Intended for tests, development
//! and the default configuration.
//!
//! # Performance Characteristics
//!
//! * PUT/GET: O(1) average case
//! * LIST/FIND_BY_ATTRIBUTE: O(n) in the size of the collection
//!
//! # Example Usage
//!
//! ```rust
//! use hotel_records::storage::{InMemoryStorage, StorageProvider, StorageKey};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let storage = InMemoryStorage::new();
//!
//! let key = StorageKey::new("room", "r1");
//! storage.put(key.clone(), json!({"_id": "r1", "name": "Deluxe", "status": 1})).await?;
//!
//! let found = storage
//!     .find_by_attribute(StorageKey::prefix("room"), "name", &json!("Deluxe"))
//!     .await?;
//! assert_eq!(found.len(), 1);
//! # Ok(())
//! # }
//! ```

use crate::storage::{OrderedCollection, StorageError, StorageKey, StoragePrefix, StorageProvider};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Thread-safe in-memory storage.
///
/// Structure: `collection` → ordered `id` → `document`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStorage {
    data: Arc<RwLock<HashMap<String, OrderedCollection>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageProvider for InMemoryStorage {
    type Error = StorageError;

    async fn put(&self, key: StorageKey, data: Value) -> Result<Value, Self::Error> {
        let mut data_guard = self.data.write().await;
        data_guard
            .entry(key.collection().to_string())
            .or_default()
            .insert(key.id(), data.clone());
        Ok(data)
    }

    async fn get(&self, key: StorageKey) -> Result<Option<Value>, Self::Error> {
        let data_guard = self.data.read().await;
        Ok(data_guard
            .get(key.collection())
            .and_then(|collection| collection.get(key.id()))
            .cloned())
    }

    async fn list(&self, prefix: StoragePrefix) -> Result<Vec<(StorageKey, Value)>, Self::Error> {
        let data_guard = self.data.read().await;
        Ok(data_guard
            .get(prefix.collection())
            .map(|collection| collection.entries(prefix.collection()))
            .unwrap_or_default())
    }

    async fn find_by_attribute(
        &self,
        prefix: StoragePrefix,
        attribute: &str,
        value: &Value,
    ) -> Result<Vec<(StorageKey, Value)>, Self::Error> {
        let data_guard = self.data.read().await;
        Ok(data_guard
            .get(prefix.collection())
            .map(|collection| collection.matching(prefix.collection(), attribute, value))
            .unwrap_or_default())
    }

    async fn count(&self, prefix: StoragePrefix) -> Result<usize, Self::Error> {
        let data_guard = self.data.read().await;
        Ok(data_guard
            .get(prefix.collection())
            .map(|collection| collection.len())
            .unwrap_or(0))
    }
}
