//! Shared test utilities for gateway integration tests.
#![allow(dead_code)]

use hotel_records::providers::RecordGateway;
use hotel_records::storage::InMemoryStorage;
use serde_json::{Value, json};

/// Install `env_logger` for the test binary; repeated calls are no-ops.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Gateway over fresh in-memory storage with the embedded schemas.
pub fn create_test_gateway() -> RecordGateway<InMemoryStorage> {
    init_logging();
    RecordGateway::new(InMemoryStorage::new()).expect("embedded schemas load")
}

/// The Deluxe room used throughout the lifecycle tests.
pub fn deluxe_room() -> Value {
    json!({
        "name": "Deluxe",
        "description": "Sea view",
        "imageList": [{"url": "https://example.com/a.png"}],
        "areaInfo": "24 ping",
        "bedInfo": "1 king",
        "maxPeople": 2,
        "price": 10000,
        "layoutInfo": [],
        "facilityInfo": [],
        "amenityInfo": []
    })
}

/// A valid room distinguished by name.
pub fn create_test_room(name: &str) -> Value {
    let mut room = deluxe_room();
    room["name"] = json!(name);
    room
}

pub fn create_test_culinary(title: &str) -> Value {
    json!({
        "title": title,
        "description": "Chef's recommendation",
        "image": "https://example.com/dish.png"
    })
}

/// The candidate with the listed fields removed.
pub fn without(mut candidate: Value, fields: &[&str]) -> Value {
    if let Some(obj) = candidate.as_object_mut() {
        for field in fields {
            obj.remove(*field);
        }
    }
    candidate
}
