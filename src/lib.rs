//! String Store - a concurrent in-memory string store
//!
//! Provides Redis-like string operations with TTL expiration, a background
//! expiration sweeper, and atomic integer increments.

pub mod config;
pub mod error;
pub mod store;
pub mod tasks;

pub use config::Config;
pub use error::{Result, StoreError};
pub use store::{StoreStats, StringStore};
