//! Record gateway with pluggable storage.
//!
//! The gateway is the only component that writes to storage. It owns the
//! lifecycle rules: identifiers and timestamps are assigned here, every write
//! is validated against the registered schema first, and deletion is a
//! status flip.
//!
//! # Available Providers
//!
//! * [`RecordGateway`] - Schema-validated persistence over any
//!   [`StorageProvider`](crate::storage::StorageProvider)

pub mod gateway;

pub use gateway::RecordGateway;
