//! String Store Module
//!
//! The concurrent handle: one reader/writer lock around a `Keyspace` plus
//! the background sweeper tied to the handle's lifetime.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::config::Config;
use crate::error::Result;
use crate::store::{Keyspace, StoreStats};
use crate::tasks::spawn_sweeper_task;

// == String Store ==
/// Concurrency-safe string store with TTL expiration and atomic increments.
///
/// Expiration works two ways. Reads check the deadline on every call, so an
/// expired entry is never returned. A background sweeper physically removes
/// expired entries once per sweep interval. [`StringStore::keys`] and
/// [`StringStore::stats`] report the physical state and may still list
/// expired keys until the next sweep.
///
/// The sweeper stops when [`StringStore::shutdown`] is called or the store is
/// dropped. Share a store between tasks with `Arc<StringStore>`.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use string_store::StringStore;
///
/// # #[tokio::main]
/// # async fn main() {
/// let store = StringStore::new();
///
/// store.set("greeting", "hello", Some(Duration::from_secs(30))).await;
/// assert_eq!(store.get("greeting").await.as_deref(), Some("hello"));
///
/// assert_eq!(store.increment("hits", 1).await, Ok(1));
/// # }
/// ```
#[derive(Debug)]
pub struct StringStore {
    /// Shared keyspace, also held by the sweeper
    keyspace: Arc<RwLock<Keyspace>>,
    /// Stops the sweeper when set to true or dropped
    shutdown_tx: watch::Sender<bool>,
    sweeper: JoinHandle<()>,
}

impl StringStore {
    // == Constructors ==
    /// Creates a store with the default one minute sweep interval.
    ///
    /// # Panics
    /// Panics if called outside a Tokio runtime, since the sweeper is
    /// spawned onto the current runtime.
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    /// Creates a store using the given configuration.
    ///
    /// # Panics
    /// Panics if called outside a Tokio runtime.
    pub fn with_config(config: &Config) -> Self {
        let keyspace = Arc::new(RwLock::new(Keyspace::new()));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let sweeper = spawn_sweeper_task(keyspace.clone(), config.sweep_interval(), shutdown_rx);

        Self {
            keyspace,
            shutdown_tx,
            sweeper,
        }
    }

    // == Set ==
    /// Stores `value` under `key`, replacing any previous entry.
    ///
    /// `ttl` of `None` stores an entry that never expires. `Some(Duration::ZERO)`
    /// expires immediately.
    pub async fn set(&self, key: impl Into<String>, value: impl Into<String>, ttl: Option<Duration>) {
        let mut keyspace = self.keyspace.write().await;
        keyspace.set(key.into(), value.into(), ttl);
    }

    // == Get ==
    /// Returns the value for `key`, or None if it is missing or expired.
    pub async fn get(&self, key: &str) -> Option<String> {
        self.keyspace.read().await.get(key)
    }

    // == Delete ==
    /// Removes `key`, returning whether an entry was present.
    ///
    /// An expired entry that has not been swept yet still counts as present.
    pub async fn delete(&self, key: &str) -> bool {
        self.keyspace.write().await.delete(key)
    }

    // == Increment ==
    /// Atomically adds `delta` to the integer stored at `key`.
    ///
    /// A missing or expired key is created with value `delta` and no
    /// expiration. An existing entry keeps its creation time and deadline.
    ///
    /// # Errors
    /// - [`StoreError::NonNumericValue`](crate::StoreError::NonNumericValue)
    ///   if the stored value is not a base-10 `i64`
    /// - [`StoreError::Overflow`](crate::StoreError::Overflow) if the result
    ///   does not fit in an `i64`
    ///
    /// The stored value is unchanged on error.
    pub async fn increment(&self, key: &str, delta: i64) -> Result<i64> {
        self.keyspace.write().await.increment(key, delta)
    }

    // == Keys ==
    /// Returns every stored key in no particular order.
    ///
    /// This is the physical view: keys whose entries have expired but have
    /// not been swept yet are included, even though `get` reports them as
    /// missing.
    pub async fn keys(&self) -> Vec<String> {
        self.keyspace.read().await.keys()
    }

    // == Stats ==
    /// Returns key counts and sweeper counters.
    pub async fn stats(&self) -> StoreStats {
        self.keyspace.read().await.stats()
    }

    // == Sweep Expired ==
    /// Runs one sweep pass now and returns the number of entries removed.
    pub async fn sweep_expired(&self) -> usize {
        self.keyspace.write().await.sweep_expired()
    }

    // == Shutdown ==
    /// Stops the background sweeper. Safe to call more than once.
    ///
    /// All operations keep working afterwards. Expired entries stay hidden
    /// from `get` but are only removed by `delete` or `sweep_expired`.
    pub fn shutdown(&self) {
        if !self.shutdown_tx.send_replace(true) {
            debug!("Shutdown requested for string store sweeper");
        }
    }

    /// Returns true once the sweeper task has exited.
    pub fn is_sweeper_finished(&self) -> bool {
        self.sweeper.is_finished()
    }
}

impl Default for StringStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for StringStore {
    fn drop(&mut self) {
        self.shutdown();
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;

    fn fast_sweep_config() -> Config {
        Config::default().with_sweep_interval(Duration::from_millis(50))
    }

    #[tokio::test]
    async fn test_set_and_get() {
        let store = StringStore::new();

        store.set("key1", "value1", Some(Duration::from_secs(60))).await;

        assert_eq!(store.get("key1").await, Some("value1".to_string()));
    }

    #[tokio::test]
    async fn test_get_expired_returns_none() {
        let store = StringStore::new();

        store.set("key1", "value1", Some(Duration::from_millis(20))).await;
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert_eq!(store.get("key1").await, None);
    }

    #[tokio::test]
    async fn test_delete() {
        let store = StringStore::new();

        store.set("key1", "value1", None).await;

        assert!(store.delete("key1").await);
        assert!(!store.delete("key1").await);
        assert_eq!(store.get("key1").await, None);
    }

    #[tokio::test]
    async fn test_increment() {
        let store = StringStore::new();

        store.set("n", "10", None).await;

        assert_eq!(store.increment("n", 5).await, Ok(15));
        assert_eq!(store.increment("n", -20).await, Ok(-5));
    }

    #[tokio::test]
    async fn test_increment_non_numeric() {
        let store = StringStore::new();

        store.set("s", "abc", None).await;

        assert_eq!(
            store.increment("s", 1).await,
            Err(StoreError::NonNumericValue("s".to_string()))
        );
        assert_eq!(store.get("s").await, Some("abc".to_string()));
    }

    #[tokio::test]
    async fn test_keys_include_unswept_expired_entries() {
        let store = StringStore::new();

        store.set("live", "v", None).await;
        store.set("stale", "v", Some(Duration::ZERO)).await;
        tokio::time::sleep(Duration::from_millis(5)).await;

        let mut keys = store.keys().await;
        keys.sort();
        assert_eq!(keys, vec!["live".to_string(), "stale".to_string()]);
        assert_eq!(store.get("stale").await, None);

        assert_eq!(store.sweep_expired().await, 1);
        assert_eq!(store.keys().await, vec!["live".to_string()]);
    }

    #[tokio::test]
    async fn test_background_sweep_updates_stats() {
        let store = StringStore::with_config(&fast_sweep_config());

        store.set("gone", "v", Some(Duration::from_millis(10))).await;
        tokio::time::sleep(Duration::from_millis(200)).await;

        let stats = store.stats().await;
        assert_eq!(stats.total_keys, 0);
        assert!(stats.sweeps >= 1);
        assert_eq!(stats.swept_entries, 1);
    }

    #[tokio::test]
    async fn test_shutdown_stops_sweeper() {
        let store = StringStore::with_config(&fast_sweep_config());
        assert!(!store.is_sweeper_finished());

        store.shutdown();
        store.shutdown();
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert!(store.is_sweeper_finished());
    }

    #[tokio::test]
    async fn test_operations_work_after_shutdown() {
        let store = StringStore::with_config(&fast_sweep_config());
        store.shutdown();

        store.set("stale", "v", Some(Duration::ZERO)).await;
        assert_eq!(store.increment("n", 2).await, Ok(2));
        tokio::time::sleep(Duration::from_millis(150)).await;

        // No sweeper, so the expired key stays until swept by hand
        assert_eq!(store.get("stale").await, None);
        assert_eq!(store.keys().await.len(), 2);
        assert_eq!(store.sweep_expired().await, 1);
    }

    #[tokio::test]
    async fn test_independent_stores_do_not_share_state() {
        let first = StringStore::new();
        let second = StringStore::new();

        first.set("key", "first", None).await;

        assert_eq!(second.get("key").await, None);
        assert!(second.keys().await.is_empty());
    }
}
