//! Record Storage Module
//!
//! Persists interview records and answers the four-field lookup used by search.
//!
//! ## Core Concepts
//! - **Contract**: `RecordStore` is what the handlers see. Every backend validates a record
//!   against the schema before writing it, so an invalid record is never partially stored.
//! - **Matching**: `RecordFilter` holds the trimmed search criteria and defines the
//!   case-insensitive full-string match.
//! - **Backends**: `MemoryStore` keeps records in a concurrent map (used by tests and as the
//!   fallback when no connection string is configured); `MongoStore` writes to the
//!   `interviews` collection of a MongoDB deployment.

pub mod memory;
pub mod mongo;
pub mod store;

pub use memory::MemoryStore;
pub use mongo::MongoStore;
pub use store::{RecordFilter, RecordStore, StoreError};
