//! Store Module
//!
//! In-memory string storage with TTL expiration and atomic increments.

mod entry;
mod keyspace;
mod stats;
mod string_store;


// Re-export public types
pub use entry::Entry;
pub use keyspace::Keyspace;
pub use stats::StoreStats;
pub use string_store::StringStore;
