//! Expiration Sweeper Task
//!
//! Background task that periodically purges expired entries from a keyspace.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::store::Keyspace;

/// Spawns a background task that periodically removes expired entries.
///
/// Each pass takes the write lock once and drops every entry whose deadline
/// has passed. The task exits when `true` is sent on the shutdown channel or
/// when its sender is dropped.
///
/// # Arguments
/// * `keyspace` - Shared keyspace, the same lock every store operation uses
/// * `interval` - Time between sweep passes
/// * `shutdown` - Receiver side of the store's shutdown signal
///
/// # Example
/// ```ignore
/// let keyspace = Arc::new(RwLock::new(Keyspace::new()));
/// let (shutdown_tx, shutdown_rx) = watch::channel(false);
/// let handle = spawn_sweeper_task(keyspace.clone(), Duration::from_secs(60), shutdown_rx);
/// // Later:
/// shutdown_tx.send(true).ok();
/// ```
pub fn spawn_sweeper_task(
    keyspace: Arc<RwLock<Keyspace>>,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let interval_ms = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX);
        info!(interval_ms, "Starting expiration sweeper");

        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // First tick completes immediately
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let removed = {
                        let mut keyspace = keyspace.write().await;
                        keyspace.sweep_expired()
                    };

                    if removed > 0 {
                        info!("Expiration sweep: removed {} expired entries", removed);
                    } else {
                        debug!("Expiration sweep: no expired entries found");
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        info!("Expiration sweeper stopped");
    })
}
