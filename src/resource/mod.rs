//! Stored record model and typed views.
//!
//! # Key Components
//!
//! * [`Record`] - A validated, stored document with its server-managed fields
//! * [`RecordStatus`] - Lifecycle flag serialized as `1` / `-1`
//! * [`ListFilter`] - Exact-match criteria for listing active records
//! * [`models`] - Typed serde views (`Room`, `Culinary`, ...) of stored records

pub mod filter;
pub mod models;
pub mod record;

pub use filter::ListFilter;
pub use models::{Culinary, ImageItem, Item, Room};
pub use record::{Record, RecordStatus};
