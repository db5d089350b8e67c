//! Gateway configuration and assembly.
//!
//! A [`GatewayConfig`] selects the storage backend and where schemas come
//! from. [`GatewayBuilder`] turns a configuration into a ready
//! [`RecordGateway`].
//!
//! # Examples
//!
//! ```rust
//! use hotel_records::config::GatewayBuilder;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // In-memory storage with the embedded schemas
//! let gateway = GatewayBuilder::new().build().await?;
//!
//! // File storage under ./data
//! let gateway = GatewayBuilder::new().with_data_dir("./data").build().await?;
//! # Ok(())
//! # }
//! ```

use crate::error::{BuildResult, SchemaLoadError};
use crate::providers::RecordGateway;
use crate::schema::SchemaRegistry;
use crate::storage::{
    InMemoryStorage, JsonFileStorage, StorageError, StorageKey, StoragePrefix, StorageProvider,
};
use log::info;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;

/// Environment variable selecting the file backend's data directory.
pub const DATA_DIR_ENV: &str = "HOTEL_RECORDS_DATA_DIR";
/// Environment variable pointing at a directory of schema definitions.
pub const SCHEMA_DIR_ENV: &str = "HOTEL_RECORDS_SCHEMA_DIR";

/// Storage backend selection.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "snake_case")]
pub enum StorageBackend {
    /// Process-local storage, lost on exit
    #[default]
    Memory,
    /// One JSON file per collection under `data_dir`
    File { data_dir: PathBuf },
}

/// Configuration for assembling a gateway.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default)]
    pub storage: StorageBackend,
    /// Directory of `*.json` schema definitions; the embedded schemas are
    /// used when unset
    #[serde(default)]
    pub schema_dir: Option<PathBuf>,
}

impl GatewayConfig {
    /// Read the configuration from the process environment.
    ///
    /// Setting `HOTEL_RECORDS_DATA_DIR` selects the file backend. Empty
    /// values count as unset.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let storage = match non_empty(DATA_DIR_ENV) {
            Some(dir) => StorageBackend::File {
                data_dir: PathBuf::from(dir),
            },
            None => StorageBackend::Memory,
        };

        Self {
            storage,
            schema_dir: non_empty(SCHEMA_DIR_ENV).map(PathBuf::from),
        }
    }

    /// Load the schema registry this configuration points at.
    pub fn load_schemas(&self) -> Result<SchemaRegistry, SchemaLoadError> {
        match &self.schema_dir {
            Some(dir) => SchemaRegistry::from_schema_dir(dir),
            None => SchemaRegistry::with_embedded_schemas(),
        }
    }

    /// Open the configured storage backend.
    pub async fn open_storage(&self) -> Result<ConfiguredStorage, StorageError> {
        match &self.storage {
            StorageBackend::Memory => Ok(ConfiguredStorage::Memory(InMemoryStorage::new())),
            StorageBackend::File { data_dir } => {
                Ok(ConfiguredStorage::File(JsonFileStorage::open(data_dir).await?))
            }
        }
    }
}

/// Storage chosen at runtime from a [`GatewayConfig`].
#[derive(Debug, Clone)]
pub enum ConfiguredStorage {
    Memory(InMemoryStorage),
    File(JsonFileStorage),
}

impl StorageProvider for ConfiguredStorage {
    type Error = StorageError;

    async fn put(&self, key: StorageKey, data: Value) -> Result<Value, Self::Error> {
        match self {
            Self::Memory(storage) => storage.put(key, data).await,
            Self::File(storage) => storage.put(key, data).await,
        }
    }

    async fn get(&self, key: StorageKey) -> Result<Option<Value>, Self::Error> {
        match self {
            Self::Memory(storage) => storage.get(key).await,
            Self::File(storage) => storage.get(key).await,
        }
    }

    async fn list(&self, prefix: StoragePrefix) -> Result<Vec<(StorageKey, Value)>, Self::Error> {
        match self {
            Self::Memory(storage) => storage.list(prefix).await,
            Self::File(storage) => storage.list(prefix).await,
        }
    }

    async fn find_by_attribute(
        &self,
        prefix: StoragePrefix,
        attribute: &str,
        value: &Value,
    ) -> Result<Vec<(StorageKey, Value)>, Self::Error> {
        match self {
            Self::Memory(storage) => storage.find_by_attribute(prefix, attribute, value).await,
            Self::File(storage) => storage.find_by_attribute(prefix, attribute, value).await,
        }
    }

    async fn count(&self, prefix: StoragePrefix) -> Result<usize, Self::Error> {
        match self {
            Self::Memory(storage) => storage.count(prefix).await,
            Self::File(storage) => storage.count(prefix).await,
        }
    }
}

/// Builder for configuring and creating record gateways.
#[derive(Debug, Clone, Default)]
pub struct GatewayBuilder {
    config: GatewayConfig,
}

impl GatewayBuilder {
    /// Start from the default configuration: in-memory storage, embedded
    /// schemas.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from the process environment.
    pub fn from_env() -> Self {
        Self::with_config(GatewayConfig::from_env())
    }

    pub fn with_config(config: GatewayConfig) -> Self {
        Self { config }
    }

    pub fn with_storage(mut self, storage: StorageBackend) -> Self {
        self.config.storage = storage;
        self
    }

    /// Use the file backend rooted at `data_dir`.
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.config.storage = StorageBackend::File {
            data_dir: data_dir.into(),
        };
        self
    }

    /// Load schemas from a directory instead of the embedded set.
    pub fn with_schema_dir(mut self, schema_dir: impl Into<PathBuf>) -> Self {
        self.config.schema_dir = Some(schema_dir.into());
        self
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Build a gateway over the configured storage backend.
    ///
    /// # Errors
    ///
    /// Returns a `BuildError` if the schemas do not load or the storage
    /// backend cannot be opened.
    pub async fn build(self) -> BuildResult<RecordGateway<ConfiguredStorage>> {
        let registry = self.config.load_schemas()?;
        let storage = self.config.open_storage().await?;
        info!(
            "Gateway ready with {:?} storage and resource types {:?}",
            self.config.storage,
            registry.resource_types()
        );
        Ok(RecordGateway::with_registry(storage, registry))
    }

    /// Build a gateway over a caller-supplied storage backend, ignoring the
    /// configured one.
    pub fn build_with<S>(self, storage: S) -> BuildResult<RecordGateway<S>>
    where
        S: StorageProvider<Error = StorageError>,
    {
        let registry = self.config.load_schemas()?;
        Ok(RecordGateway::with_registry(storage, registry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BuildError;
    use crate::resource::ListFilter;
    use serde_json::json;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_default_config_is_in_memory_with_embedded_schemas() {
        let config = GatewayConfig::from_lookup(lookup(&[]));
        assert_eq!(config, GatewayConfig::default());
        assert_eq!(config.storage, StorageBackend::Memory);
        assert!(config.schema_dir.is_none());
    }

    #[test]
    fn test_env_selects_file_backend() {
        let config = GatewayConfig::from_lookup(lookup(&[
            (DATA_DIR_ENV, "/var/lib/hotel"),
            (SCHEMA_DIR_ENV, "/etc/hotel/schemas"),
        ]));
        assert_eq!(
            config.storage,
            StorageBackend::File {
                data_dir: PathBuf::from("/var/lib/hotel")
            }
        );
        assert_eq!(config.schema_dir, Some(PathBuf::from("/etc/hotel/schemas")));
    }

    #[test]
    fn test_empty_env_values_are_ignored() {
        let config = GatewayConfig::from_lookup(lookup(&[(DATA_DIR_ENV, "  ")]));
        assert_eq!(config.storage, StorageBackend::Memory);
    }

    #[test]
    fn test_config_deserializes() {
        let config: GatewayConfig = serde_json::from_value(json!({
            "storage": {"backend": "file", "data_dir": "data"}
        }))
        .unwrap();
        assert_eq!(
            config.storage,
            StorageBackend::File {
                data_dir: PathBuf::from("data")
            }
        );

        let config: GatewayConfig = serde_json::from_value(json!({})).unwrap();
        assert_eq!(config.storage, StorageBackend::Memory);
    }

    #[tokio::test]
    async fn test_build_file_gateway() {
        let dir = tempfile::TempDir::new().unwrap();
        let gateway = GatewayBuilder::new()
            .with_data_dir(dir.path())
            .build()
            .await
            .unwrap();
        assert!(matches!(gateway.storage(), ConfiguredStorage::File(_)));

        gateway
            .create("culinary", json!({"title": "Tea", "description": "Oolong"}))
            .await
            .unwrap();
        assert!(dir.path().join("culinary.json").exists());
        assert_eq!(
            gateway.list("culinary", &ListFilter::new()).await.unwrap().len(),
            1
        );
    }

    #[tokio::test]
    async fn test_build_fails_on_missing_schema_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = GatewayBuilder::new()
            .with_schema_dir(dir.path().join("missing"))
            .build()
            .await;
        assert!(matches!(result, Err(BuildError::Schema(SchemaLoadError::Io { .. }))));
    }

    #[test]
    fn test_build_with_custom_storage() {
        let storage = InMemoryStorage::new();
        let gateway = GatewayBuilder::new().build_with(storage).unwrap();
        assert_eq!(gateway.registry().resource_types(), vec!["culinary", "room"]);
    }
}
