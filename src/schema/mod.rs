//! Record schemas and candidate validation.
//!
//! This module provides the schema registry and the validation engine that
//! every write passes through before it reaches storage.
//!
//! # Key Types
//!
//! - [`Schema`] - Record schema with ordered field definitions
//! - [`SchemaRegistry`] - Registry for loading and looking up schemas
//! - [`FieldDefinition`] - One field's kind, requiredness, default and predicate
//!
//! # Examples
//!
//! ```rust
//! use hotel_records::schema::{OperationContext, SchemaRegistry};
//! use serde_json::json;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = SchemaRegistry::new()?;
//! let room = registry.get_record_schema("room").expect("room schema is embedded");
//! let result = registry.validate(room, &json!({"name": "Deluxe"}), OperationContext::Create);
//! assert!(result.is_err());
//! # Ok(())
//! # }
//! ```

pub mod embedded;
pub mod registry;
pub mod types;
pub mod validation;

#[cfg(test)]
mod tests;

pub use registry::SchemaRegistry;
pub use types::{FieldDefinition, FieldType, Schema};
pub use validation::{OperationContext, integer_value, is_https_url};
