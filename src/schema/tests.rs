//! Tests for schema loading and candidate validation.
//!
//! Covers the embedded room schema end to end: required fields, the
//! maxPeople bound, HTTPS image URLs, nested item paths and defaults, plus
//! partial validation for updates and the registry's load-time checks.

use super::registry::SchemaRegistry;
use super::types::{FieldDefinition, FieldType, Schema};
use super::validation::OperationContext;
use crate::error::SchemaLoadError;
use proptest::prelude::*;
use serde_json::{Value, json};

fn registry() -> SchemaRegistry {
    SchemaRegistry::new().expect("Failed to create registry")
}

fn room_schema(registry: &SchemaRegistry) -> &Schema {
    registry
        .get_record_schema("room")
        .expect("room schema should be registered")
}

fn deluxe_room() -> Value {
    json!({
        "name": "Deluxe",
        "description": "Sea view",
        "imageList": [{"url": "https://example.com/a.png"}],
        "areaInfo": "24 ping",
        "bedInfo": "1 king",
        "maxPeople": 2,
        "price": 10000,
        "layoutInfo": [{"name": "city view"}],
        "facilityInfo": [],
        "amenityInfo": []
    })
}

#[test]
fn test_schema_registry_creation() {
    let registry = registry();
    assert_eq!(registry.get_schemas().len(), 4);
    assert_eq!(registry.resource_types(), vec!["culinary", "room"]);
    assert!(registry.get_schema("item").is_some());
    assert!(registry.get_record_schema("item").is_none());
    assert!(registry.get_record_schema("imageItem").is_none());
}

#[test]
fn test_valid_room_validation() {
    let registry = registry();
    let normalized = registry
        .validate(room_schema(&registry), &deluxe_room(), OperationContext::Create)
        .expect("deluxe room should validate");

    assert_eq!(normalized["name"], "Deluxe");
    assert_eq!(normalized["maxPeople"], 2);
    assert_eq!(normalized["status"], 1);
    assert_eq!(normalized["layoutInfo"][0]["name"], "city view");
}

#[test]
fn test_missing_required_fields_are_all_reported() {
    let registry = registry();
    let failure = registry
        .validate(room_schema(&registry), &json!({}), OperationContext::Create)
        .unwrap_err();

    assert_eq!(
        failure.fields(),
        vec![
            "name",
            "description",
            "areaInfo",
            "bedInfo",
            "maxPeople",
            "price"
        ]
    );
}

#[test]
fn test_empty_and_null_required_strings_fail() {
    let registry = registry();
    let mut room = deluxe_room();
    room["name"] = json!("");
    room["bedInfo"] = Value::Null;

    let failure = registry
        .validate(room_schema(&registry), &room, OperationContext::Create)
        .unwrap_err();
    assert_eq!(failure.fields(), vec!["name", "bedInfo"]);
    assert_eq!(failure.violations[0].message, "name is required");
}

#[test]
fn test_max_people_bounds() {
    let registry = registry();
    let schema = room_schema(&registry);

    for rejected in [json!(0), json!(-1), json!(2.5), json!("2"), json!(true)] {
        let mut room = deluxe_room();
        room["maxPeople"] = rejected.clone();
        let failure = registry
            .validate(schema, &room, OperationContext::Create)
            .unwrap_err();
        assert_eq!(failure.fields(), vec!["maxPeople"], "value {}", rejected);
        assert_eq!(
            failure.violations[0].message,
            "maxPeople must be an integer greater than or equal to 1"
        );
    }

    for (accepted, stored) in [(json!(1), 1), (json!(2.0), 2), (json!(12), 12)] {
        let mut room = deluxe_room();
        room["maxPeople"] = accepted;
        let normalized = registry
            .validate(schema, &room, OperationContext::Create)
            .unwrap();
        assert_eq!(normalized["maxPeople"], json!(stored));
        assert!(normalized["maxPeople"].is_i64());
    }
}

#[test]
fn test_price_accepts_any_number() {
    let registry = registry();
    let schema = room_schema(&registry);

    for price in [json!(0), json!(-5), json!(1999.5)] {
        let mut room = deluxe_room();
        room["price"] = price.clone();
        let normalized = registry.validate(schema, &room, OperationContext::Create).unwrap();
        assert_eq!(normalized["price"], price);
    }

    let mut room = deluxe_room();
    room["price"] = json!("10000");
    let failure = registry.validate(schema, &room, OperationContext::Create).unwrap_err();
    assert_eq!(failure.fields(), vec!["price"]);
}

#[test]
fn test_image_url_must_be_https() {
    let registry = registry();
    let mut room = deluxe_room();
    room["imageList"] = json!([{"url": "http://x.com"}]);

    let failure = registry
        .validate(room_schema(&registry), &room, OperationContext::Create)
        .unwrap_err();
    assert_eq!(failure.fields(), vec!["imageList[0].url"]);
    assert_eq!(
        failure.violations[0].message,
        "imageList.url has an invalid format"
    );
}

#[test]
fn test_image_urls_are_trimmed_and_empty_is_allowed() {
    let registry = registry();
    let mut room = deluxe_room();
    room["imageList"] = json!([
        {"url": "  https://example.com/a.png  ", "mobileUrl": ""},
        {"alt": "no urls at all"}
    ]);

    let normalized = registry
        .validate(room_schema(&registry), &room, OperationContext::Create)
        .unwrap();
    assert_eq!(normalized["imageList"][0]["url"], "https://example.com/a.png");
    assert_eq!(normalized["imageList"][0]["mobileUrl"], "");
    assert_eq!(normalized["imageList"][1]["alt"], "no urls at all");
    assert!(normalized["imageList"][1].get("url").is_none());
}

#[test]
fn test_mobile_url_reports_its_own_message() {
    let registry = registry();
    let mut room = deluxe_room();
    room["imageList"] = json!([
        {"url": "https://example.com/a.png"},
        {"url": "not a url", "mobileUrl": "ftp://example.com/m.png"}
    ]);

    let failure = registry
        .validate(room_schema(&registry), &room, OperationContext::Create)
        .unwrap_err();
    assert_eq!(
        failure.fields(),
        vec!["imageList[1].url", "imageList[1].mobileUrl"]
    );
    assert_eq!(
        failure.violations[1].message,
        "imageList.mobileUrl has an invalid format"
    );
}

#[test]
fn test_nested_item_paths() {
    let registry = registry();
    let mut room = deluxe_room();
    room["layoutInfo"] = json!([
        {"name": "balcony"},
        {"name": "bathtub"},
        {"description": "missing its name"}
    ]);
    room["amenityInfo"] = json!(["towels"]);

    let failure = registry
        .validate(room_schema(&registry), &room, OperationContext::Create)
        .unwrap_err();
    assert_eq!(failure.fields(), vec!["layoutInfo[2].name", "amenityInfo[0]"]);
}

#[test]
fn test_violations_accumulate_across_top_level_and_nested_fields() {
    let registry = registry();
    let mut room = deluxe_room();
    room["maxPeople"] = json!(0);
    room["imageList"] = json!([{"url": "http://x.com"}]);
    room["description"] = json!("");

    let failure = registry
        .validate(room_schema(&registry), &room, OperationContext::Create)
        .unwrap_err();
    assert_eq!(
        failure.fields(),
        vec!["description", "imageList[0].url", "maxPeople"]
    );
}

#[test]
fn test_defaults_are_applied_on_create() {
    let registry = registry();
    let room = json!({
        "name": "Standard",
        "description": "Garden view",
        "areaInfo": "18 ping",
        "bedInfo": "2 single",
        "maxPeople": 2,
        "price": 4200
    });

    let normalized = registry
        .validate(room_schema(&registry), &room, OperationContext::Create)
        .unwrap();
    assert_eq!(normalized["status"], 1);
    assert_eq!(normalized["imageList"], json!([]));
    assert_eq!(normalized["layoutInfo"], json!([]));
    assert_eq!(normalized["facilityInfo"], json!([]));
    assert_eq!(normalized["amenityInfo"], json!([]));
}

#[test]
fn test_unknown_and_server_managed_fields_are_dropped() {
    let registry = registry();
    let mut room = deluxe_room();
    room["_id"] = json!("client-chosen");
    room["createdAt"] = json!("1999-01-01T00:00:00Z");
    room["colour"] = json!("blue");

    let normalized = registry
        .validate(room_schema(&registry), &room, OperationContext::Create)
        .unwrap();
    assert!(normalized.get("_id").is_none());
    assert!(normalized.get("createdAt").is_none());
    assert!(normalized.get("colour").is_none());
}

#[test]
fn test_status_must_be_active_or_deleted() {
    let registry = registry();
    let mut room = deluxe_room();
    room["status"] = json!(0);

    let failure = registry
        .validate(room_schema(&registry), &room, OperationContext::Create)
        .unwrap_err();
    assert_eq!(failure.fields(), vec!["status"]);

    room["status"] = json!(-1);
    let normalized = registry
        .validate(room_schema(&registry), &room, OperationContext::Create)
        .unwrap();
    assert_eq!(normalized["status"], -1);
}

#[test]
fn test_update_validates_only_supplied_fields() {
    let registry = registry();
    let schema = room_schema(&registry);

    let normalized = registry
        .validate(schema, &json!({"price": 12000}), OperationContext::Update)
        .unwrap();
    assert_eq!(normalized.len(), 1);
    assert_eq!(normalized["price"], 12000);

    let failure = registry
        .validate(
            schema,
            &json!({"maxPeople": 0, "name": ""}),
            OperationContext::Update,
        )
        .unwrap_err();
    assert_eq!(failure.fields(), vec!["name", "maxPeople"]);
}

#[test]
fn test_update_null_semantics() {
    let registry = registry();
    let schema = room_schema(&registry);

    let failure = registry
        .validate(schema, &json!({"name": null}), OperationContext::Update)
        .unwrap_err();
    assert_eq!(failure.fields(), vec!["name"]);

    let normalized = registry
        .validate(schema, &json!({"layoutInfo": null}), OperationContext::Update)
        .unwrap();
    assert_eq!(normalized["layoutInfo"], json!([]));
}

#[test]
fn test_update_list_elements_are_validated_in_full() {
    let registry = registry();
    let failure = registry
        .validate(
            room_schema(&registry),
            &json!({"facilityInfo": [{"name": "tv"}, {"description": "no name"}]}),
            OperationContext::Update,
        )
        .unwrap_err();
    assert_eq!(failure.fields(), vec!["facilityInfo[1].name"]);
}

#[test]
fn test_non_object_candidate_is_rejected() {
    let registry = registry();
    let failure = registry
        .validate(room_schema(&registry), &json!([1, 2]), OperationContext::Create)
        .unwrap_err();
    assert_eq!(failure.fields(), vec!["$root"]);
}

#[test]
fn test_culinary_schema() {
    let registry = registry();
    let schema = registry.get_record_schema("culinary").unwrap();

    let normalized = registry
        .validate(
            schema,
            &json!({"title": "Beef noodles", "description": "House special", "image": "  x.png "}),
            OperationContext::Create,
        )
        .unwrap();
    assert_eq!(normalized["image"], "x.png");
    assert_eq!(normalized["status"], 1);

    let failure = registry
        .validate(schema, &json!({"image": "x.png"}), OperationContext::Create)
        .unwrap_err();
    assert_eq!(failure.fields(), vec!["title", "description"]);
}

fn field(name: &str, field_type: FieldType) -> FieldDefinition {
    FieldDefinition {
        name: name.to_string(),
        field_type,
        ..Default::default()
    }
}

fn schema(name: &str, embedded: bool, fields: Vec<FieldDefinition>) -> Schema {
    Schema {
        name: name.to_string(),
        description: String::new(),
        embedded,
        fields,
    }
}

#[test]
fn test_duplicate_schema_is_rejected() {
    let result = SchemaRegistry::from_schemas(vec![
        schema("room", false, vec![]),
        schema("room", false, vec![]),
    ]);
    assert!(matches!(result, Err(SchemaLoadError::DuplicateSchema(name)) if name == "room"));
}

#[test]
fn test_unknown_item_schema_is_rejected() {
    let mut list = field("tags", FieldType::List);
    list.items = Some("tag".to_string());

    let result = SchemaRegistry::from_schemas(vec![schema("room", false, vec![list])]);
    assert!(matches!(
        result,
        Err(SchemaLoadError::UnknownItemSchema { items, .. }) if items == "tag"
    ));
}

#[test]
fn test_items_on_non_list_is_rejected() {
    let mut text = field("name", FieldType::String);
    text.items = Some("item".to_string());

    let result = SchemaRegistry::from_schemas(vec![
        schema("item", true, vec![]),
        schema("room", false, vec![text]),
    ]);
    assert!(matches!(result, Err(SchemaLoadError::ItemsOnNonList { .. })));
}

#[test]
fn test_invalid_default_is_rejected() {
    let mut guests = field("maxPeople", FieldType::Integer);
    guests.minimum = Some(1);
    guests.default = Some(json!(0));

    let result = SchemaRegistry::from_schemas(vec![schema("room", false, vec![guests])]);
    assert!(matches!(
        result,
        Err(SchemaLoadError::InvalidDefault { field, .. }) if field == "maxPeople"
    ));
}

#[test]
fn test_schema_dir_loading() {
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(dir.path().join("item.json"), super::embedded::item_schema()).unwrap();
    std::fs::write(
        dir.path().join("suite.json"),
        r#"{"name": "suite", "fields": [
            {"name": "name", "type": "string", "required": true},
            {"name": "features", "type": "list", "items": "item", "default": []}
        ]}"#,
    )
    .unwrap();
    std::fs::write(dir.path().join("README.txt"), "not a schema").unwrap();

    let registry = SchemaRegistry::from_schema_dir(dir.path()).unwrap();
    assert_eq!(registry.resource_types(), vec!["suite"]);

    let failure = registry
        .validate(
            registry.get_record_schema("suite").unwrap(),
            &json!({"features": [{}]}),
            OperationContext::Create,
        )
        .unwrap_err();
    assert_eq!(failure.fields(), vec!["name", "features[0].name"]);
}

#[test]
fn test_schema_dir_with_malformed_file() {
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(dir.path().join("broken.json"), "{ not json").unwrap();

    let result = SchemaRegistry::from_schema_dir(dir.path());
    assert!(matches!(result, Err(SchemaLoadError::Parse(_))));
}

proptest! {
    #[test]
    fn test_max_people_accepts_exactly_positive_integers(n in -1000i64..1000) {
        let registry = registry();
        let mut room = deluxe_room();
        room["maxPeople"] = json!(n);
        let result = registry.validate(room_schema(&registry), &room, OperationContext::Create);
        prop_assert_eq!(result.is_ok(), n >= 1);
    }

    #[test]
    fn test_http_urls_never_pass(host in "[a-z]{1,12}\\.[a-z]{2,6}", path in "[a-z0-9/]{0,20}") {
        let registry = registry();
        let mut room = deluxe_room();
        room["imageList"] = json!([{"url": format!("http://{}/{}", host, path)}]);
        let failure = registry
            .validate(room_schema(&registry), &room, OperationContext::Create)
            .unwrap_err();
        prop_assert_eq!(failure.fields(), vec!["imageList[0].url"]);
    }

    #[test]
    fn test_https_urls_pass(host in "[a-z]{1,12}\\.[a-z]{2,6}", path in "[a-z0-9/]{0,20}") {
        let registry = registry();
        let mut room = deluxe_room();
        room["imageList"] = json!([{"url": format!("https://{}/{}", host, path)}]);
        let result = registry.validate(room_schema(&registry), &room, OperationContext::Create);
        prop_assert!(result.is_ok());
    }
}
