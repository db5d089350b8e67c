//! Typed views of stored records.
//!
//! These mirror the embedded schemas and are produced with
//! [`Record::deserialize_into`](super::Record::deserialize_into). Writes
//! always go through the gateway as JSON so that the schema stays the single
//! source of truth for constraints.

use super::record::RecordStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A hotel room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub image_list: Vec<ImageItem>,
    pub area_info: String,
    pub bed_info: String,
    pub max_people: i64,
    pub price: f64,
    pub status: RecordStatus,
    #[serde(default)]
    pub layout_info: Vec<Item>,
    #[serde(default)]
    pub facility_info: Vec<Item>,
    #[serde(default)]
    pub amenity_info: Vec<Item>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One entry of a room's `imageList`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

/// A named room feature (layout, facility or amenity).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A culinary highlight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Culinary {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub status: RecordStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
