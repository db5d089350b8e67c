//! Candidate validation against record schemas.
//!
//! Validation walks the schema's fields in declaration order and collects
//! every violation instead of stopping at the first one. List fields whose
//! elements are sub-records recurse with the element schema, prefixing paths
//! as `layoutInfo[2].name`.
//!
//! A successful validation yields the normalized document: defaults applied,
//! strings trimmed where the field asks for it, whole floats turned into
//! integers, undeclared fields dropped.

use super::registry::SchemaRegistry;
use super::types::{FieldDefinition, FieldType, Schema};
use crate::error::{ValidationFailure, ValidationResult, Violation};
use serde_json::{Map, Value, json};
use url::{Host, Url};

/// Operation context for validation.
///
/// `Create` validates a complete candidate and substitutes defaults.
/// `Update` validates only the fields present in a partial candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationContext {
    Create,
    Update,
}

impl SchemaRegistry {
    /// Validate a candidate against a schema.
    ///
    /// Returns the normalized fields on success. In `Update` context an
    /// explicit `null` on an optional field without a default is kept as
    /// `null`, marking the field for removal.
    pub fn validate(
        &self,
        schema: &Schema,
        candidate: &Value,
        context: OperationContext,
    ) -> ValidationResult<Map<String, Value>> {
        let Some(obj) = candidate.as_object() else {
            return Err(ValidationFailure::new(vec![Violation::new(
                "$root",
                "record must be a JSON object",
            )]));
        };

        let mut violations = Vec::new();
        let normalized = self.validate_object(schema, obj, context, "", &mut violations);

        if violations.is_empty() {
            Ok(normalized)
        } else {
            Err(ValidationFailure::new(violations))
        }
    }

    fn validate_object(
        &self,
        schema: &Schema,
        obj: &Map<String, Value>,
        context: OperationContext,
        prefix: &str,
        violations: &mut Vec<Violation>,
    ) -> Map<String, Value> {
        let mut normalized = Map::new();

        for field in &schema.fields {
            let path = field_path(prefix, &field.name);

            match obj.get(&field.name) {
                None => {
                    if context == OperationContext::Update {
                        continue;
                    }
                    if let Some(default) = &field.default {
                        normalized.insert(field.name.clone(), default.clone());
                    } else if field.required {
                        violations.push(required_violation(field, &path));
                    }
                }
                Some(Value::Null) => {
                    if field.required {
                        violations.push(required_violation(field, &path));
                    } else if let Some(default) = &field.default {
                        normalized.insert(field.name.clone(), default.clone());
                    } else if context == OperationContext::Update {
                        normalized.insert(field.name.clone(), Value::Null);
                    }
                }
                Some(value) => {
                    if let Some(valid) = self.validate_field_value(field, value, &path, violations) {
                        normalized.insert(field.name.clone(), valid);
                    }
                }
            }
        }

        normalized
    }

    /// Run one field's predicate over a present, non-null value.
    pub(super) fn validate_field_value(
        &self,
        field: &FieldDefinition,
        value: &Value,
        path: &str,
        violations: &mut Vec<Violation>,
    ) -> Option<Value> {
        match field.field_type {
            FieldType::String => {
                let Some(text) = value.as_str() else {
                    violations.push(Violation::new(path, format!("{} must be text", field.name)));
                    return None;
                };
                let text = if field.trim { text.trim() } else { text };
                if field.required && text.is_empty() {
                    violations.push(required_violation(field, path));
                    return None;
                }
                Some(Value::String(text.to_string()))
            }
            FieldType::Url => {
                let Some(text) = value.as_str() else {
                    violations.push(predicate_violation(field, path));
                    return None;
                };
                let text = if field.trim { text.trim() } else { text };
                if text.is_empty() {
                    if field.required {
                        violations.push(required_violation(field, path));
                        return None;
                    }
                    return Some(Value::String(String::new()));
                }
                if !is_https_url(text) {
                    violations.push(predicate_violation(field, path));
                    return None;
                }
                Some(Value::String(text.to_string()))
            }
            FieldType::Integer => match integer_value(value) {
                Some(n) if field.minimum.is_none_or(|min| n >= min) => Some(json!(n)),
                _ => {
                    violations.push(predicate_violation(field, path));
                    None
                }
            },
            FieldType::Number => {
                if value.is_number() {
                    Some(value.clone())
                } else {
                    violations.push(predicate_violation(field, path));
                    None
                }
            }
            FieldType::Status => match integer_value(value) {
                Some(flag @ (1 | -1)) => Some(json!(flag)),
                _ => {
                    violations.push(predicate_violation(field, path));
                    None
                }
            },
            FieldType::List => {
                let Some(items) = value.as_array() else {
                    violations.push(Violation::new(path, format!("{} must be a list", field.name)));
                    return None;
                };
                let Some(item_schema) = field.items.as_deref().and_then(|name| self.get_schema(name))
                else {
                    return Some(value.clone());
                };

                let before = violations.len();
                let mut normalized = Vec::with_capacity(items.len());
                for (index, item) in items.iter().enumerate() {
                    let item_path = format!("{}[{}]", path, index);
                    match item.as_object() {
                        Some(obj) => normalized.push(Value::Object(self.validate_object(
                            item_schema,
                            obj,
                            OperationContext::Create,
                            &item_path,
                            violations,
                        ))),
                        None => violations.push(Violation::new(
                            item_path,
                            format!("{} entries must be objects", field.name),
                        )),
                    }
                }

                (violations.len() == before).then(|| Value::Array(normalized))
            }
        }
    }
}

fn field_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", prefix, name)
    }
}

fn required_violation(field: &FieldDefinition, path: &str) -> Violation {
    Violation::new(path, format!("{} is required", field.name))
}

fn predicate_violation(field: &FieldDefinition, path: &str) -> Violation {
    let message = field.message.clone().unwrap_or_else(|| match field.field_type {
        FieldType::Url => format!("{} must be a well-formed HTTPS URL", field.name),
        FieldType::Integer => match field.minimum {
            Some(min) => format!(
                "{} must be an integer greater than or equal to {}",
                field.name, min
            ),
            None => format!("{} must be an integer", field.name),
        },
        FieldType::Number => format!("{} must be a number", field.name),
        FieldType::Status => format!("{} must be 1 (active) or -1 (deleted)", field.name),
        FieldType::String | FieldType::List => format!("{} is invalid", field.name),
    });
    Violation::new(path, message)
}

/// Interpret a JSON value as a whole number.
///
/// Floats count when they have no fractional part, so `2.0` is `2`.
/// Strings, booleans and out-of-range numbers are not integers.
pub fn integer_value(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    if value.is_u64() {
        return None;
    }
    let f = value.as_f64()?;
    if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

/// Whether `value` is a well-formed HTTPS URL.
///
/// The scheme must be exactly `https`, the host must be an IP address or a
/// domain with a top-level label, and no whitespace may appear anywhere.
pub fn is_https_url(value: &str) -> bool {
    if value.is_empty() || value.chars().any(char::is_whitespace) {
        return false;
    }
    let Ok(url) = Url::parse(value) else {
        return false;
    };
    if url.scheme() != "https" {
        return false;
    }
    match url.host() {
        Some(Host::Domain(domain)) => has_top_level_domain(domain),
        Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => true,
        None => false,
    }
}

fn has_top_level_domain(domain: &str) -> bool {
    let domain = domain.strip_suffix('.').unwrap_or(domain);
    let Some((rest, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !rest.is_empty()
        && !rest.split('.').any(str::is_empty)
        && (tld.starts_with("xn--")
            || (tld.chars().count() >= 2 && tld.chars().all(char::is_alphabetic)))
}
