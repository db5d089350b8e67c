//! Schema registry for loading, checking and looking up record schemas.
//!
//! Schemas are loaded from the embedded definitions or from a directory of
//! JSON files. After loading, every `items` reference is resolved and every
//! declared default is run through its own field predicate, so a registry that
//! was built successfully never holds a dangling or self-contradicting schema.

use super::{embedded, types::{FieldType, Schema}};
use crate::error::SchemaLoadError;

use log::debug;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Registry of record and sub-record schemas keyed by name.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    schemas: HashMap<String, Schema>,
}

impl SchemaRegistry {
    /// Create a registry with the embedded schemas.
    pub fn new() -> Result<Self, SchemaLoadError> {
        Self::with_embedded_schemas()
    }

    /// Create a registry with the embedded `room`, `culinary`, `item` and
    /// `imageItem` schemas.
    pub fn with_embedded_schemas() -> Result<Self, SchemaLoadError> {
        let schemas = embedded::all()
            .into_iter()
            .map(Self::load_schema_from_str)
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_schemas(schemas)
    }

    /// Create a registry from every `*.json` file in a directory.
    pub fn from_schema_dir<P: AsRef<Path>>(schema_dir: P) -> Result<Self, SchemaLoadError> {
        let dir = schema_dir.as_ref();
        let entries = fs::read_dir(dir).map_err(|source| SchemaLoadError::Io {
            path: dir.display().to_string(),
            source,
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| SchemaLoadError::Io {
                path: dir.display().to_string(),
                source,
            })?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) == Some("json") {
                paths.push(path);
            }
        }
        paths.sort();

        let schemas = paths
            .iter()
            .map(Self::load_schema_from_file)
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_schemas(schemas)
    }

    /// Build a registry from already-parsed schemas.
    pub fn from_schemas(schemas: Vec<Schema>) -> Result<Self, SchemaLoadError> {
        let mut by_name = HashMap::new();
        for schema in schemas {
            if by_name.contains_key(&schema.name) {
                return Err(SchemaLoadError::DuplicateSchema(schema.name));
            }
            by_name.insert(schema.name.clone(), schema);
        }

        let registry = Self { schemas: by_name };
        registry.check_references()?;
        registry.check_defaults()?;

        debug!(
            "Schema registry ready with {} schema(s)",
            registry.schemas.len()
        );
        Ok(registry)
    }

    fn load_schema_from_file<P: AsRef<Path>>(path: P) -> Result<Schema, SchemaLoadError> {
        let content = fs::read_to_string(&path).map_err(|source| SchemaLoadError::Io {
            path: path.as_ref().display().to_string(),
            source,
        })?;
        Self::load_schema_from_str(&content)
    }

    fn load_schema_from_str(content: &str) -> Result<Schema, SchemaLoadError> {
        Ok(serde_json::from_str(content)?)
    }

    fn check_references(&self) -> Result<(), SchemaLoadError> {
        for schema in self.schemas.values() {
            for field in &schema.fields {
                let Some(items) = &field.items else {
                    continue;
                };
                if field.field_type != FieldType::List {
                    return Err(SchemaLoadError::ItemsOnNonList {
                        schema: schema.name.clone(),
                        field: field.name.clone(),
                    });
                }
                if !self.schemas.contains_key(items) {
                    return Err(SchemaLoadError::UnknownItemSchema {
                        schema: schema.name.clone(),
                        field: field.name.clone(),
                        items: items.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    fn check_defaults(&self) -> Result<(), SchemaLoadError> {
        for schema in self.schemas.values() {
            for field in &schema.fields {
                let Some(default) = &field.default else {
                    continue;
                };
                let mut violations = Vec::new();
                self.validate_field_value(field, default, &field.name, &mut violations);
                if let Some(first) = violations.into_iter().next() {
                    return Err(SchemaLoadError::InvalidDefault {
                        schema: schema.name.clone(),
                        field: field.name.clone(),
                        message: first.message,
                    });
                }
            }
        }
        Ok(())
    }

    /// Get a schema by name.
    pub fn get_schema(&self, name: &str) -> Option<&Schema> {
        self.schemas.get(name)
    }

    /// Get a top-level (non-embedded) schema by name.
    pub fn get_record_schema(&self, name: &str) -> Option<&Schema> {
        self.schemas.get(name).filter(|schema| !schema.embedded)
    }

    /// All schemas, sorted by name.
    pub fn get_schemas(&self) -> Vec<&Schema> {
        let mut schemas: Vec<&Schema> = self.schemas.values().collect();
        schemas.sort_by(|a, b| a.name.cmp(&b.name));
        schemas
    }

    /// Names of the collections records can be written to, sorted.
    pub fn resource_types(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .schemas
            .values()
            .filter(|schema| !schema.embedded)
            .map(|schema| schema.name.as_str())
            .collect();
        names.sort();
        names
    }
}
