//! Background Tasks Module
//!
//! Contains background tasks that run for the lifetime of a store.
//!
//! # Tasks
//! - Expiration sweep: removes expired entries at the configured interval

mod sweeper;

pub use sweeper::spawn_sweeper_task;
