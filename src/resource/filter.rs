//! Exact-match filters for listing records.

use crate::storage::lookup_path;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Exact-match criteria applied when listing records.
///
/// Each criterion pairs a dot-notation path (`layoutInfo.0.name`) with the
/// value the document must hold there. A record matches when every criterion
/// matches. An empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListFilter {
    criteria: Vec<(String, Value)>,
}

impl ListFilter {
    /// Create a filter that matches every record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an exact-match criterion.
    pub fn with(mut self, path: impl Into<String>, value: impl Into<Value>) -> Self {
        self.criteria.push((path.into(), value.into()));
        self
    }

    /// Build a filter from a JSON object of `path: value` pairs.
    pub fn from_object(criteria: &Map<String, Value>) -> Self {
        Self {
            criteria: criteria
                .iter()
                .map(|(path, value)| (path.clone(), value.clone()))
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    pub fn criteria(&self) -> &[(String, Value)] {
        &self.criteria
    }

    /// Whether a stored document satisfies every criterion.
    pub fn matches(&self, document: &Value) -> bool {
        self.criteria
            .iter()
            .all(|(path, expected)| lookup_path(document, path) == Some(expected))
    }
}
