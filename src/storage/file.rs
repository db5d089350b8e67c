//! JSON file storage: one file per collection.
//!
//! Each collection lives in `<data_dir>/<collection>.json` as an array of
//! `{"id": ..., "data": ...}` entries in insertion order. Every `put` rewrites
//! the collection file through a temporary file followed by a rename, so a
//! reader never observes a half-written collection. The in-memory copy is only
//! updated after the file write succeeded.
//!
//! ```rust,no_run
//! use hotel_records::storage::{JsonFileStorage, StorageKey, StorageProvider};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let storage = JsonFileStorage::open("data").await?;
//! storage.put(StorageKey::new("room", "r1"), json!({"_id": "r1"})).await?;
//! # Ok(())
//! # }
//! ```

use crate::storage::{OrderedCollection, StorageError, StorageKey, StoragePrefix, StorageProvider};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;

const COLLECTION_EXTENSION: &str = "json";

#[derive(Debug, Serialize, Deserialize)]
struct StoredEntry {
    id: String,
    data: Value,
}

/// File-backed storage with an in-memory read cache.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    data_dir: PathBuf,
    collections: Arc<RwLock<HashMap<String, OrderedCollection>>>,
}

impl JsonFileStorage {
    /// Open (creating if needed) a data directory and load every collection
    /// file found in it.
    pub async fn open(data_dir: impl AsRef<Path>) -> Result<Self, StorageError> {
        let data_dir = data_dir.as_ref().to_path_buf();
        fs::create_dir_all(&data_dir)
            .await
            .map_err(|e| StorageError::io(&data_dir, e))?;

        let mut collections = HashMap::new();
        let mut entries = fs::read_dir(&data_dir)
            .await
            .map_err(|e| StorageError::io(&data_dir, e))?;

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StorageError::io(&data_dir, e))?
        {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(COLLECTION_EXTENSION) {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            let collection = Self::load_collection(name, &path).await?;
            debug!(
                "Loaded collection '{}' with {} document(s) from {}",
                name,
                collection.len(),
                path.display()
            );
            collections.insert(name.to_string(), collection);
        }

        info!(
            "Opened file storage at {} ({} collection(s))",
            data_dir.display(),
            collections.len()
        );

        Ok(Self {
            data_dir,
            collections: Arc::new(RwLock::new(collections)),
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn collection_path(&self, collection: &str) -> PathBuf {
        self.data_dir
            .join(format!("{}.{}", collection, COLLECTION_EXTENSION))
    }

    async fn load_collection(name: &str, path: &Path) -> Result<OrderedCollection, StorageError> {
        let content = fs::read(path).await.map_err(|e| StorageError::io(path, e))?;
        let entries: Vec<StoredEntry> = serde_json::from_slice(&content)
            .map_err(|e| StorageError::data_corruption(name, None, e.to_string()))?;

        let mut collection = OrderedCollection::default();
        for entry in entries {
            collection.insert(&entry.id, entry.data);
        }
        Ok(collection)
    }

    async fn write_collection(
        &self,
        name: &str,
        collection: &OrderedCollection,
    ) -> Result<(), StorageError> {
        let entries: Vec<StoredEntry> = collection
            .iter()
            .map(|(id, data)| StoredEntry {
                id: id.to_string(),
                data: data.clone(),
            })
            .collect();
        let serialized = serde_json::to_vec_pretty(&entries)
            .map_err(|e| StorageError::serialization(name, e.to_string()))?;

        let path = self.collection_path(name);
        let temp_path = path.with_extension("tmp");

        let mut file = fs::File::create(&temp_path)
            .await
            .map_err(|e| StorageError::io(&temp_path, e))?;
        file.write_all(&serialized)
            .await
            .map_err(|e| StorageError::io(&temp_path, e))?;
        file.sync_all()
            .await
            .map_err(|e| StorageError::io(&temp_path, e))?;
        drop(file);

        fs::rename(&temp_path, &path)
            .await
            .map_err(|e| StorageError::io(&path, e))
    }
}

impl StorageProvider for JsonFileStorage {
    type Error = StorageError;

    async fn put(&self, key: StorageKey, data: Value) -> Result<Value, Self::Error> {
        let mut guard = self.collections.write().await;

        let mut updated = guard.get(key.collection()).cloned().unwrap_or_default();
        updated.insert(key.id(), data.clone());
        self.write_collection(key.collection(), &updated).await?;

        guard.insert(key.collection().to_string(), updated);
        Ok(data)
    }

    async fn get(&self, key: StorageKey) -> Result<Option<Value>, Self::Error> {
        let guard = self.collections.read().await;
        Ok(guard
            .get(key.collection())
            .and_then(|collection| collection.get(key.id()))
            .cloned())
    }

    async fn list(&self, prefix: StoragePrefix) -> Result<Vec<(StorageKey, Value)>, Self::Error> {
        let guard = self.collections.read().await;
        Ok(guard
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
        let guard = self.collections.read().await;
        Ok(guard
            .get(prefix.collection())
            .map(|collection| collection.matching(prefix.collection(), attribute, value))
            .unwrap_or_default())
    }

    async fn count(&self, prefix: StoragePrefix) -> Result<usize, Self::Error> {
        let guard = self.collections.read().await;
        Ok(guard
            .get(prefix.collection())
            .map(|collection| collection.len())
            .unwrap_or(0))
    }
}
