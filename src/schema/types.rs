//! Core schema type definitions for record collections.
//!
//! A [`Schema`] is a plain description object: an ordered list of
//! [`FieldDefinition`]s, each naming its kind, whether it is required, its
//! default and the parameters of its validation predicate. List fields name
//! the schema of their elements, so sub-records compose by reference.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A record or sub-record schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Schema name; for top-level schemas this is also the collection name
    pub name: String,
    /// Human-readable description
    #[serde(default)]
    pub description: String,
    /// Sub-record schemas only appear inside list fields of other schemas
    /// and cannot be written on their own.
    #[serde(default)]
    pub embedded: bool,
    /// Field definitions in validation order
    pub fields: Vec<FieldDefinition>,
}

impl Schema {
    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.fields.iter().filter(|field| field.required)
    }
}

/// Definition of one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
    /// Strip surrounding whitespace before validation and storage
    #[serde(default)]
    pub trim: bool,
    /// Lower bound for integer fields
    #[serde(default)]
    pub minimum: Option<i64>,
    /// Substituted when a new record omits the field
    #[serde(default)]
    pub default: Option<Value>,
    /// Element schema name for list fields
    #[serde(default)]
    pub items: Option<String>,
    /// Message reported when the field's predicate fails
    #[serde(default)]
    pub message: Option<String>,
}

impl Default for FieldDefinition {
    fn default() -> Self {
        Self {
            name: String::new(),
            field_type: FieldType::String,
            required: false,
            trim: false,
            minimum: None,
            default: None,
            items: None,
            message: None,
        }
    }
}

/// Field kinds, each with its own validation predicate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum FieldType {
    /// Free text
    #[default]
    String,
    /// Whole number, optionally bounded below by `minimum`
    Integer,
    /// Any JSON number
    Number,
    /// Text that, when non-empty, must be a well-formed HTTPS URL
    Url,
    /// Record lifecycle flag: `1` active, `-1` deleted
    Status,
    /// Ordered sequence, optionally of `items` sub-records
    List,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Integer => "integer",
            FieldType::Number => "number",
            FieldType::Url => "url",
            FieldType::Status => "status",
            FieldType::List => "list",
        }
    }
}
