//! Configuration Module
//!
//! Handles loading and managing store configuration from environment variables.

use std::env;
use std::time::Duration;

/// Default interval between background sweeps, in milliseconds.
pub const DEFAULT_SWEEP_INTERVAL_MS: u64 = 60_000;

/// Store configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Background sweep interval in milliseconds
    pub sweep_interval_ms: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SWEEP_INTERVAL_MS` - Sweep frequency in milliseconds (default: 60000).
    ///   Zero or unparsable values fall back to the default.
    pub fn from_env() -> Self {
        Self {
            sweep_interval_ms: env::var("SWEEP_INTERVAL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|ms| *ms > 0)
                .unwrap_or(DEFAULT_SWEEP_INTERVAL_MS),
        }
    }

    /// Sets the sweep interval.
    ///
    /// ```
    /// use std::time::Duration;
    /// use string_store::Config;
    ///
    /// let config = Config::default().with_sweep_interval(Duration::from_secs(5));
    /// assert_eq!(config.sweep_interval(), Duration::from_secs(5));
    /// ```
    pub fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval_ms = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Returns the sweep interval, never shorter than one millisecond.
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_millis(self.sweep_interval_ms.max(1))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sweep_interval_ms: DEFAULT_SWEEP_INTERVAL_MS,
        }
    }
}
