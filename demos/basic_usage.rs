//! Basic Record Gateway Usage Example
//!
//! This example walks a room through its lifecycle: create, read, a partial
//! update, a rejected update and a soft delete. It uses in-memory storage
//! unless `HOTEL_RECORDS_DATA_DIR` is set.
//!
//! Run with `RUST_LOG=debug` to see the gateway's log output.

use hotel_records::config::GatewayBuilder;
use hotel_records::operation_handler::{RecordOperationHandler, RecordOperationRequest};
use hotel_records::resource::{ListFilter, Room};
use serde_json::json;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();

    println!("🚀 Starting Record Gateway Basic Usage Example");

    let gateway = GatewayBuilder::from_env().build().await?;
    println!("✅ Gateway initialized with {:?}", gateway.storage());

    println!("\n📝 Creating a room...");
    let room = gateway
        .create(
            "room",
            json!({
                "name": "Deluxe",
                "description": "Sea view with balcony",
                "imageList": [
                    {"url": " https://fakeimg.pl/300/ ", "mobileUrl": "https://fakeimg.pl/150/"}
                ],
                "areaInfo": "24 ping",
                "bedInfo": "1 king",
                "maxPeople": 2,
                "price": 10000,
                "layoutInfo": [{"name": "balcony"}, {"name": "bathtub"}]
            }),
        )
        .await?;
    println!("✅ Created room {} (status {})", room.id, room.status);

    let typed: Room = gateway.get_by_id("room", &room.id).await?.deserialize_into()?;
    println!(
        "🔎 {} sleeps {} for {} with {} layout feature(s); first image {:?}",
        typed.name,
        typed.max_people,
        typed.price,
        typed.layout_info.len(),
        typed.image_list.first().and_then(|image| image.url.as_deref())
    );

    println!("\n✏️  Updating the price...");
    let updated = gateway
        .update("room", &room.id, json!({"price": 9000}))
        .await?;
    println!("✅ Price is now {}", updated.attributes["price"]);

    println!("\n🚫 Trying an invalid update...");
    let handler = RecordOperationHandler::new(gateway.clone());
    let response = handler
        .handle_operation(RecordOperationRequest::update(
            "room",
            &room.id,
            json!({"maxPeople": 0, "imageList": [{"url": "http://insecure.example.com/a.png"}]}),
        ))
        .await;
    println!(
        "❌ Rejected with status {}: {}",
        response.status_code,
        serde_json::to_string_pretty(&response.failure)?
    );

    println!("\n🗑️  Soft-deleting the room...");
    gateway.soft_delete("room", &room.id).await?;
    let active = gateway.list("room", &ListFilter::new()).await?;
    let retired = gateway.get_by_id("room", &room.id).await?;
    println!(
        "✅ {} active room(s); the deleted room is still stored with status {}",
        active.len(),
        retired.status
    );

    println!("\n🎉 Example completed successfully!");
    Ok(())
}
