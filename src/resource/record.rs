//! The stored record representation.
//!
//! A record is the normalized output of schema validation plus the fields the
//! gateway manages itself: `_id`, `status`, `createdAt` and `updatedAt`. It
//! round-trips through the storage layer as a flat JSON document.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Name of the identifier field in stored documents.
pub const ID_FIELD: &str = "_id";

/// Record lifecycle flag.
///
/// Serialized as the integers `1` (active) and `-1` (deleted).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RecordStatus {
    #[default]
    Active,
    Deleted,
}

impl RecordStatus {
    pub fn as_i64(self) -> i64 {
        match self {
            RecordStatus::Active => 1,
            RecordStatus::Deleted => -1,
        }
    }

    pub fn from_i64(flag: i64) -> Option<Self> {
        match flag {
            1 => Some(RecordStatus::Active),
            -1 => Some(RecordStatus::Deleted),
            _ => None,
        }
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordStatus::Active => write!(f, "active"),
            RecordStatus::Deleted => write!(f, "deleted"),
        }
    }
}

impl Serialize for RecordStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.as_i64())
    }
}

impl<'de> Deserialize<'de> for RecordStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let flag = i64::deserialize(deserializer)?;
        RecordStatus::from_i64(flag).ok_or_else(|| {
            de::Error::invalid_value(de::Unexpected::Signed(flag), &"1 (active) or -1 (deleted)")
        })
    }
}

/// A stored record of some resource type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    #[serde(rename = "_id")]
    pub id: String,
    pub status: RecordStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Schema-declared fields other than `status`
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Record {
    /// Assemble a new record from validated fields.
    ///
    /// A `status` entry in `fields` is lifted into [`Record::status`];
    /// anything else becomes an attribute.
    pub fn new(id: impl Into<String>, mut fields: Map<String, Value>, now: DateTime<Utc>) -> Self {
        let status = take_status(&mut fields).unwrap_or_default();
        for managed in [ID_FIELD, "createdAt", "updatedAt"] {
            fields.remove(managed);
        }
        Self {
            id: id.into(),
            status,
            created_at: now,
            updated_at: now,
            attributes: fields,
        }
    }

    /// Parse a stored document.
    pub fn from_json(data: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(data)
    }

    /// Render the record as a flat JSON document.
    pub fn to_json(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// Deserialize the record into one of the typed models.
    ///
    /// ```rust
    /// use hotel_records::resource::{Record, Room};
    /// use serde_json::json;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let record = Record::from_json(json!({
    ///     "_id": "r1",
    ///     "status": 1,
    ///     "createdAt": "2024-05-01T00:00:00Z",
    ///     "updatedAt": "2024-05-01T00:00:00Z",
    ///     "name": "Deluxe",
    ///     "description": "Sea view",
    ///     "imageList": [],
    ///     "areaInfo": "24 ping",
    ///     "bedInfo": "1 king",
    ///     "maxPeople": 2,
    ///     "price": 10000,
    ///     "layoutInfo": [],
    ///     "facilityInfo": [],
    ///     "amenityInfo": []
    /// }))?;
    /// let room: Room = record.deserialize_into()?;
    /// assert_eq!(room.max_people, 2);
    /// # Ok(())
    /// # }
    /// ```
    pub fn deserialize_into<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.to_json()?)
    }

    pub fn is_active(&self) -> bool {
        self.status == RecordStatus::Active
    }

    /// Look up a field by its document name, server-managed fields included.
    pub fn get(&self, field: &str) -> Option<Value> {
        match field {
            ID_FIELD => Some(Value::String(self.id.clone())),
            "status" => Some(Value::from(self.status.as_i64())),
            "createdAt" => Some(Value::String(timestamp(&self.created_at))),
            "updatedAt" => Some(Value::String(timestamp(&self.updated_at))),
            other => self.attributes.get(other).cloned(),
        }
    }

    /// Merge validated partial fields over this record.
    ///
    /// `null` removes the attribute. `status` is applied to the lifecycle flag.
    pub fn merge(&mut self, mut fields: Map<String, Value>, now: DateTime<Utc>) {
        if let Some(status) = take_status(&mut fields) {
            self.status = status;
        }
        for (name, value) in fields {
            if value.is_null() {
                self.attributes.remove(&name);
            } else {
                self.attributes.insert(name, value);
            }
        }
        self.updated_at = now;
    }

    /// Flip the record to deleted and stamp the change.
    pub fn retire(&mut self, now: DateTime<Utc>) {
        self.status = RecordStatus::Deleted;
        self.updated_at = now;
    }
}

fn timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

fn take_status(fields: &mut Map<String, Value>) -> Option<RecordStatus> {
    fields
        .remove("status")
        .and_then(|value| value.as_i64())
        .and_then(RecordStatus::from_i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn fields(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_status_serializes_as_integer() {
        assert_eq!(serde_json::to_value(RecordStatus::Active).unwrap(), json!(1));
        assert_eq!(serde_json::to_value(RecordStatus::Deleted).unwrap(), json!(-1));
        assert_eq!(
            serde_json::from_value::<RecordStatus>(json!(-1)).unwrap(),
            RecordStatus::Deleted
        );
        assert!(serde_json::from_value::<RecordStatus>(json!(0)).is_err());
        assert!(serde_json::from_value::<RecordStatus>(json!("1")).is_err());
    }

    #[test]
    fn test_record_document_shape() {
        let record = Record::new(
            "abc",
            fields(json!({"name": "Deluxe", "status": 1, "_id": "spoofed"})),
            fixed_time(),
        );
        assert_eq!(record.id, "abc");
        assert!(record.is_active());
        assert!(!record.attributes.contains_key("status"));
        assert!(!record.attributes.contains_key("_id"));

        let doc = record.to_json().unwrap();
        assert_eq!(doc["_id"], "abc");
        assert_eq!(doc["status"], 1);
        assert_eq!(doc["name"], "Deluxe");
        assert_eq!(doc["createdAt"], "2024-05-01T12:00:00Z");
        assert_eq!(doc["updatedAt"], doc["createdAt"]);
        assert_eq!(record.get("createdAt"), Some(doc["createdAt"].clone()));

        let parsed = Record::from_json(doc).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn test_from_json_rejects_missing_managed_fields() {
        assert!(Record::from_json(json!({"name": "Deluxe"})).is_err());
        assert!(
            Record::from_json(json!({
                "_id": "a",
                "status": 7,
                "createdAt": "2024-05-01T12:00:00Z",
                "updatedAt": "2024-05-01T12:00:00Z"
            }))
            .is_err()
        );
    }

    #[test]
    fn test_merge_and_retire() {
        let created = fixed_time();
        let later = created + chrono::Duration::minutes(5);
        let mut record = Record::new(
            "abc",
            fields(json!({"name": "Deluxe", "price": 100, "alt": "x"})),
            created,
        );

        record.merge(fields(json!({"price": 500, "alt": null})), later);
        assert_eq!(record.get("price"), Some(json!(500)));
        assert_eq!(record.get("name"), Some(json!("Deluxe")));
        assert!(record.get("alt").is_none());
        assert_eq!(record.created_at, created);
        assert_eq!(record.updated_at, later);

        record.retire(later);
        assert_eq!(record.status, RecordStatus::Deleted);
        assert_eq!(record.get("status"), Some(json!(-1)));
    }
}
