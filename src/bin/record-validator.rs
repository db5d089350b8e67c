//! # Record Validator
//!
//! A command-line utility that checks candidate record files against the
//! record schemas before they are sent to the API.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin record-validator room rooms/deluxe.json
//! cargo run --bin record-validator room patches/price.json --update
//! ```
//!
//! The file holds one JSON object or an array of them. With `--update` each
//! object is checked as a partial change, so only the fields it carries are
//! validated. Set `HOTEL_RECORDS_SCHEMA_DIR` to validate against schema
//! definitions on disk instead of the embedded ones.
//!
//! ## Output Examples
//!
//! ```text
//! Validating room candidates in rooms/deluxe.json
//!
//! Candidate 0:
//!   ✓ Valid
//! Candidate 1:
//!   ❌ maxPeople: maxPeople must be an integer greater than or equal to 1
//!   ❌ imageList[0].url: imageList.url has an invalid format
//!
//! Validation Summary:
//!   Valid candidates: 1
//!   Invalid candidates: 1
//! ```
//!
//! The process exits with status 1 when any candidate is invalid.

use hotel_records::config::GatewayConfig;
use hotel_records::schema::{OperationContext, SchemaRegistry};
use serde_json::Value;
use std::env;
use std::fs;
use std::path::Path;
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();
    let update = args.iter().any(|arg| arg == "--update");
    let positional: Vec<&String> = args.iter().skip(1).filter(|arg| !arg.starts_with("--")).collect();

    if positional.len() != 2 {
        let program = args.first().map_or("record-validator", String::as_str);
        eprintln!("Usage: {} <resource-type> <file> [--update]", program);
        eprintln!();
        eprintln!("Examples:");
        eprintln!("  {} room rooms/deluxe.json", program);
        eprintln!("  {} culinary patches/title.json --update", program);
        process::exit(1);
    }

    let registry = match GatewayConfig::from_env().load_schemas() {
        Ok(registry) => registry,
        Err(e) => {
            eprintln!("❌ Failed to load schemas: {}", e);
            process::exit(1);
        }
    };

    let context = if update {
        OperationContext::Update
    } else {
        OperationContext::Create
    };

    match validate_file(&registry, positional[0], Path::new(positional[1]), context) {
        Ok(0) => {}
        Ok(_) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

/// Validate every candidate in the file and return how many were invalid.
fn validate_file(
    registry: &SchemaRegistry,
    resource_type: &str,
    file_path: &Path,
    context: OperationContext,
) -> Result<usize, Box<dyn std::error::Error>> {
    let schema = registry.get_record_schema(resource_type).ok_or_else(|| {
        format!(
            "unknown resource type '{}' (known: {})",
            resource_type,
            registry.resource_types().join(", ")
        )
    })?;

    let content = fs::read_to_string(file_path)?;
    let candidates = match serde_json::from_str::<Value>(&content)? {
        Value::Array(items) => items,
        single => vec![single],
    };

    println!(
        "Validating {} candidates in {}",
        resource_type,
        file_path.display()
    );

    let mut invalid = 0;
    for (index, candidate) in candidates.iter().enumerate() {
        println!("\nCandidate {}:", index);
        match registry.validate(schema, candidate, context) {
            Ok(_) => println!("  ✓ Valid"),
            Err(failure) => {
                invalid += 1;
                for violation in &failure.violations {
                    println!("  ❌ {}", violation);
                }
            }
        }
    }

    println!("\nValidation Summary:");
    println!("  Valid candidates: {}", candidates.len() - invalid);
    println!("  Invalid candidates: {}", invalid);

    Ok(invalid)
}
