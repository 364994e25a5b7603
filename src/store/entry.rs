//! Store Entry Module
//!
//! Defines the structure for individual string entries with TTL support.

use std::time::Duration;

use chrono::{DateTime, Utc};

// == Entry ==
/// A stored string value with its lifecycle metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// The stored value
    pub value: String,
    /// Creation time, kept across increments
    pub created_at: DateTime<Utc>,
    /// Absolute expiration deadline, None = never expires
    pub expires_at: Option<DateTime<Utc>>,
}

impl Entry {
    // == Constructor ==
    /// Creates a new entry with an optional TTL.
    ///
    /// A TTL too large to represent as a timestamp is treated as no expiration.
    ///
    /// # Arguments
    /// * `value` - The value to store
    /// * `ttl` - Time to live, or None for an entry that never expires
    pub fn new(value: String, ttl: Option<Duration>) -> Self {
        let now = Utc::now();
        let expires_at = ttl.and_then(|ttl| deadline_after(now, ttl));

        Self {
            value,
            created_at: now,
            expires_at,
        }
    }

    /// Creates an entry that never expires.
    pub fn persistent(value: String) -> Self {
        Self::new(value, None)
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Checks whether the entry is expired as of `now`.
    ///
    /// Boundary condition: an entry is still live at exactly its deadline and
    /// expires once `now` moves past it.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            Some(expires) => now > expires,
            None => false,
        }
    }
}

/// Adds a std duration to a timestamp, returning None when it does not fit.
fn deadline_after(now: DateTime<Utc>, ttl: Duration) -> Option<DateTime<Utc>> {
    chrono::Duration::from_std(ttl)
        .ok()
        .and_then(|ttl| now.checked_add_signed(ttl))
}
