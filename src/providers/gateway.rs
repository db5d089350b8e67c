//! Persistence gateway for schema-validated records.
//!
//! # Example Usage
//!
//! ```rust
//! use hotel_records::providers::RecordGateway;
//! use hotel_records::resource::ListFilter;
//! use hotel_records::storage::InMemoryStorage;
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let gateway = RecordGateway::new(InMemoryStorage::new())?;
//!
//! let room = gateway.create("room", json!({
//!     "name": "Deluxe",
//!     "description": "Sea view",
//!     "areaInfo": "24 ping",
//!     "bedInfo": "1 king",
//!     "maxPeople": 2,
//!     "price": 10000
//! })).await?;
//!
//! gateway.update("room", &room.id, json!({"price": 9000})).await?;
//! gateway.soft_delete("room", &room.id).await?;
//! assert!(gateway.list("room", &ListFilter::new()).await?.is_empty());
//! # Ok(())
//! # }
//! ```

use crate::error::{RecordError, RecordResult, SchemaLoadError};
use crate::resource::{ListFilter, Record};
use crate::schema::{OperationContext, Schema, SchemaRegistry};
use crate::storage::{StorageError, StorageKey, StorageProvider};
use chrono::Utc;
use log::{debug, info, trace, warn};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

/// Schema-validated persistence over a storage backend.
///
/// Each operation performs at most one storage write, so a failed validation
/// or a missing record never leaves a partial change behind.
///
/// Writes that read the stored record first (`update`, `soft_delete`) hold the
/// collection's write lock from that read until their put completes. Clones of
/// a gateway share the locks.
#[derive(Debug, Clone)]
pub struct RecordGateway<S: StorageProvider> {
    storage: S,
    registry: Arc<SchemaRegistry>,
    write_locks: Arc<HashMap<String, Mutex<()>>>,
}

impl<S> RecordGateway<S>
where
    S: StorageProvider<Error = StorageError>,
{
    /// Create a gateway over `storage` with the embedded schemas.
    pub fn new(storage: S) -> Result<Self, SchemaLoadError> {
        Ok(Self::with_registry(storage, SchemaRegistry::new()?))
    }

    /// Create a gateway with a custom schema registry.
    pub fn with_registry(storage: S, registry: SchemaRegistry) -> Self {
        let write_locks = registry
            .resource_types()
            .into_iter()
            .map(|name| (name.to_string(), Mutex::new(())))
            .collect();
        Self {
            storage,
            registry: Arc::new(registry),
            write_locks: Arc::new(write_locks),
        }
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn record_schema(&self, resource_type: &str) -> RecordResult<&Schema> {
        self.registry
            .get_record_schema(resource_type)
            .ok_or_else(|| RecordError::UnsupportedResourceType(resource_type.to_string()))
    }

    /// Validate and store a new record.
    ///
    /// The stored record carries a fresh UUID v4 `_id`, equal `createdAt` and
    /// `updatedAt` stamps, and `status` 1 unless the candidate set it.
    pub async fn create(&self, resource_type: &str, candidate: Value) -> RecordResult<Record> {
        info!("Creating {} record", resource_type);
        trace!(
            "Create data: {}",
            serde_json::to_string(&candidate).unwrap_or_else(|_| "invalid json".to_string())
        );

        let schema = self.record_schema(resource_type)?;
        if !candidate.is_object() {
            return Err(RecordError::invalid_request(format!(
                "{} candidate must be a JSON object",
                resource_type
            )));
        }

        let fields = self
            .registry
            .validate(schema, &candidate, OperationContext::Create)
            .inspect_err(|failure| debug!("Rejected {} create: {}", resource_type, failure))?;

        let id = uuid::Uuid::new_v4().to_string();
        let record = Record::new(id, fields, Utc::now());
        let stored = self.store(resource_type, &record).await?;

        info!("Created {} record '{}'", resource_type, stored.id);
        Ok(stored)
    }

    /// Fetch a record by identifier regardless of its status.
    pub async fn get_by_id(&self, resource_type: &str, id: &str) -> RecordResult<Record> {
        debug!("Getting {} record with ID '{}'", resource_type, id);

        self.record_schema(resource_type)?;
        self.load(resource_type, id).await
    }

    /// List active records matching `filter`, in insertion order.
    ///
    /// Stored documents that no longer parse as records are skipped with a
    /// warning so one bad document does not hide the rest of the collection.
    pub async fn list(&self, resource_type: &str, filter: &ListFilter) -> RecordResult<Vec<Record>> {
        debug!(
            "Listing {} records ({} criteria)",
            resource_type,
            filter.criteria().len()
        );

        self.record_schema(resource_type)?;
        let documents = self.storage.list(StorageKey::prefix(resource_type)).await?;

        let mut records = Vec::new();
        for (key, document) in documents {
            if !filter.matches(&document) {
                continue;
            }
            match Record::from_json(document) {
                Ok(record) if record.is_active() => records.push(record),
                Ok(_) => {}
                Err(e) => warn!("Skipping unreadable {} document '{}': {}", resource_type, key.id(), e),
            }
        }

        debug!("Found {} active {} record(s)", records.len(), resource_type);
        Ok(records)
    }

    /// Active records whose field at `attribute` equals `value` exactly.
    pub async fn find_by_attribute(
        &self,
        resource_type: &str,
        attribute: &str,
        value: &Value,
    ) -> RecordResult<Vec<Record>> {
        debug!("Finding {} records where {} = {}", resource_type, attribute, value);

        self.record_schema(resource_type)?;
        let matches = self
            .storage
            .find_by_attribute(StorageKey::prefix(resource_type), attribute, value)
            .await?;

        let mut records = Vec::new();
        for (key, document) in matches {
            match Record::from_json(document) {
                Ok(record) if record.is_active() => records.push(record),
                Ok(_) => {}
                Err(e) => warn!("Skipping unreadable {} document '{}': {}", resource_type, key.id(), e),
            }
        }
        Ok(records)
    }

    /// Apply a partial change to an existing record.
    ///
    /// Only the supplied fields are validated. The merge is written in a
    /// single put, so either every supplied field changes or none does.
    /// Fields the update does not name keep their latest stored value.
    pub async fn update(&self, resource_type: &str, id: &str, partial: Value) -> RecordResult<Record> {
        info!("Updating {} record with ID '{}'", resource_type, id);
        trace!(
            "Update data: {}",
            serde_json::to_string(&partial).unwrap_or_else(|_| "invalid json".to_string())
        );

        let schema = self.record_schema(resource_type)?;
        if !partial.is_object() {
            return Err(RecordError::invalid_request(format!(
                "{} update must be a JSON object",
                resource_type
            )));
        }

        let _write = self.lock_collection(resource_type).await;
        let mut record = self.load(resource_type, id).await?;
        let fields = self
            .registry
            .validate(schema, &partial, OperationContext::Update)
            .inspect_err(|failure| {
                debug!("Rejected {} update of '{}': {}", resource_type, id, failure)
            })?;

        record.merge(fields, Utc::now());
        let stored = self.store(resource_type, &record).await?;

        info!("Updated {} record '{}'", resource_type, id);
        Ok(stored)
    }

    /// Retire a record by setting its status to deleted.
    ///
    /// The document stays in storage and remains reachable through
    /// [`get_by_id`](Self::get_by_id). Retiring an already deleted record
    /// succeeds and refreshes `updatedAt`.
    pub async fn soft_delete(&self, resource_type: &str, id: &str) -> RecordResult<()> {
        info!("Soft-deleting {} record with ID '{}'", resource_type, id);

        self.record_schema(resource_type)?;
        let _write = self.lock_collection(resource_type).await;
        let mut record = self.load(resource_type, id).await?;
        record.retire(Utc::now());
        self.store(resource_type, &record).await?;

        info!("Soft-deleted {} record '{}'", resource_type, id);
        Ok(())
    }

    async fn lock_collection(&self, resource_type: &str) -> Option<MutexGuard<'_, ()>> {
        match self.write_locks.get(resource_type) {
            Some(lock) => Some(lock.lock().await),
            None => None,
        }
    }

    async fn load(&self, resource_type: &str, id: &str) -> RecordResult<Record> {
        let key = StorageKey::new(resource_type, id);
        let Some(document) = self.storage.get(key).await? else {
            debug!("{} record '{}' not found", resource_type, id);
            return Err(RecordError::not_found(resource_type, id));
        };

        let record = Record::from_json(document).map_err(|e| {
            StorageError::data_corruption(resource_type, Some(id.to_string()), e.to_string())
        })?;
        trace!("{} record '{}' found", resource_type, id);
        Ok(record)
    }

    async fn store(&self, resource_type: &str, record: &Record) -> RecordResult<Record> {
        let document = record
            .to_json()
            .map_err(|e| StorageError::serialization(resource_type, e.to_string()))?;
        let stored = self
            .storage
            .put(StorageKey::new(resource_type, &record.id), document)
            .await?;

        Record::from_json(stored).map_err(|e| {
            StorageError::data_corruption(resource_type, Some(record.id.clone()), e.to_string())
                .into()
        })
    }
}
