//! Keyspace Module
//!
//! The unlocked string map behind a `StringStore`. Every method here assumes
//! the caller already holds the appropriate side of the store's lock.

use std::collections::HashMap;
use std::time::Duration;

use chrono::Utc;

use crate::error::{Result, StoreError};
use crate::store::{Entry, StoreStats};

// == Keyspace ==
/// String storage with lazy expiration and sweep bookkeeping.
#[derive(Debug, Default)]
pub struct Keyspace {
    /// Key-value storage
    entries: HashMap<String, Entry>,
    /// Sweep counters
    stats: StoreStats,
}

impl Keyspace {
    // == Constructor ==
    /// Creates an empty keyspace.
    pub fn new() -> Self {
        Self::default()
    }

    // == Set ==
    /// Stores a key-value pair, replacing any previous entry including its
    /// creation time.
    ///
    /// # Arguments
    /// * `key` - The key to store
    /// * `value` - The value to store
    /// * `ttl` - Time to live, or None for an entry that never expires
    pub fn set(&mut self, key: String, value: String, ttl: Option<Duration>) {
        self.entries.insert(key, Entry::new(value, ttl));
    }

    // == Get ==
    /// Returns the value for `key` if it exists and has not expired.
    ///
    /// Expired entries are left in place for the sweeper.
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries
            .get(key)
            .filter(|entry| !entry.is_expired())
            .map(|entry| entry.value.clone())
    }

    /// Returns the full entry for `key`, expired or not.
    pub fn entry(&self, key: &str) -> Option<&Entry> {
        self.entries.get(key)
    }

    // == Delete ==
    /// Removes an entry by key, returning whether one was present.
    pub fn delete(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    // == Increment ==
    /// Adds `delta` to the integer stored at `key` and returns the result.
    ///
    /// A missing or expired key starts from zero and never expires. An
    /// existing live entry keeps its creation time and deadline. On error the
    /// entry is left untouched.
    pub fn increment(&mut self, key: &str, delta: i64) -> Result<i64> {
        let live = self
            .entries
            .get_mut(key)
            .filter(|entry| !entry.is_expired());

        if let Some(entry) = live {
            let current: i64 = entry
                .value
                .parse()
                .map_err(|_| StoreError::NonNumericValue(key.to_string()))?;
            let next = current
                .checked_add(delta)
                .ok_or_else(|| StoreError::Overflow(key.to_string()))?;

            entry.value = next.to_string();
            return Ok(next);
        }

        self.entries
            .insert(key.to_string(), Entry::persistent(delta.to_string()));
        Ok(delta)
    }

    // == Keys ==
    /// Returns every stored key, including expired keys not yet swept.
    pub fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    // == Sweep Expired ==
    /// Removes all expired entries and returns how many were removed.
    pub fn sweep_expired(&mut self) -> usize {
        let now = Utc::now();
        let before = self.entries.len();

        self.entries.retain(|_, entry| !entry.is_expired_at(now));

        let removed = before - self.entries.len();
        self.stats.record_sweep(removed);
        removed
    }

    // == Stats ==
    /// Returns current key counts and sweep counters.
    pub fn stats(&self) -> StoreStats {
        let now = Utc::now();
        let mut stats = self.stats.clone();
        stats.total_keys = self.entries.len();
        stats.expired_keys = self
            .entries
            .values()
            .filter(|entry| entry.is_expired_at(now))
            .count();
        stats
    }

    // == Length ==
    /// Returns the number of stored entries, expired or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
