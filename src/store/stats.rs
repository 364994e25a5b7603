//! Store Statistics Module
//!
//! Tracks key counts and background sweeper activity.

use serde::Serialize;

// == Store Stats ==
/// Point-in-time snapshot of the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    /// Keys physically present, including expired ones not yet swept
    pub total_keys: usize,
    /// Keys present but logically expired, waiting for the next sweep
    pub expired_keys: usize,
    /// Number of sweep passes that have run
    pub sweeps: u64,
    /// Total number of entries removed by sweeps
    pub swept_entries: u64,
}

impl StoreStats {
    // == Constructor ==
    /// Creates a new StoreStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys that `get` would currently find.
    pub fn live_keys(&self) -> usize {
        self.total_keys.saturating_sub(self.expired_keys)
    }

    // == Record Sweep ==
    /// Records one sweep pass that removed `removed` entries.
    pub fn record_sweep(&mut self, removed: usize) {
        self.sweeps += 1;
        self.swept_entries += removed as u64;
    }
}
