//! Built-in record schemas embedded as JSON documents.
//!
//! These are the schemas served when no schema directory is configured.

/// Room records (`room` collection).
pub fn room_schema() -> &'static str {
    r#"{
  "name": "room",
  "description": "Hotel room offered for booking",
  "fields": [
    { "name": "name", "type": "string", "required": true },
    { "name": "description", "type": "string", "required": true },
    { "name": "imageList", "type": "list", "items": "imageItem", "default": [] },
    { "name": "areaInfo", "type": "string", "required": true },
    { "name": "bedInfo", "type": "string", "required": true },
    {
      "name": "maxPeople",
      "type": "integer",
      "required": true,
      "minimum": 1,
      "message": "maxPeople must be an integer greater than or equal to 1"
    },
    { "name": "price", "type": "number", "required": true },
    { "name": "status", "type": "status", "default": 1 },
    { "name": "layoutInfo", "type": "list", "items": "item", "default": [] },
    { "name": "facilityInfo", "type": "list", "items": "item", "default": [] },
    { "name": "amenityInfo", "type": "list", "items": "item", "default": [] }
  ]
}"#
}

/// Image entries embedded in `imageList`.
pub fn image_item_schema() -> &'static str {
    r#"{
  "name": "imageItem",
  "description": "Image with desktop and mobile variants",
  "embedded": true,
  "fields": [
    {
      "name": "url",
      "type": "url",
      "trim": true,
      "message": "imageList.url has an invalid format"
    },
    {
      "name": "mobileUrl",
      "type": "url",
      "trim": true,
      "message": "imageList.mobileUrl has an invalid format"
    },
    { "name": "alt", "type": "string" }
  ]
}"#
}

/// Item entries embedded in the layout, facility and amenity lists.
pub fn item_schema() -> &'static str {
    r#"{
  "name": "item",
  "description": "Named room feature",
  "embedded": true,
  "fields": [
    { "name": "name", "type": "string", "required": true },
    { "name": "description", "type": "string" }
  ]
}"#
}

/// Culinary highlights shown on the home page (`culinary` collection).
pub fn culinary_schema() -> &'static str {
    r#"{
  "name": "culinary",
  "description": "Restaurant or dish featured on the home page",
  "fields": [
    { "name": "title", "type": "string", "required": true },
    { "name": "description", "type": "string", "required": true },
    { "name": "image", "type": "string", "trim": true },
    { "name": "status", "type": "status", "default": 1 }
  ]
}"#
}

/// Every embedded schema, sub-record schemas included.
pub fn all() -> [&'static str; 4] {
    [
        item_schema(),
        image_item_schema(),
        room_schema(),
        culinary_schema(),
    ]
}
