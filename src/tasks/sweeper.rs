//! Expiry Sweeper Task
//!
//! Background task that periodically removes entries older than the store's
//! TTL.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::cache::EntryStore;
use crate::error::CacheError;

// == Expiry Sweeper ==
/// A sweeper that has been configured but not started.
///
/// [`start`](ExpirySweeper::start) consumes it and returns the handle of the
/// running task; a stopped sweeper cannot be restarted, build a new one
/// instead.
#[derive(Debug)]
pub struct ExpirySweeper<V> {
    store: Arc<Mutex<EntryStore<V>>>,
    eviction_interval: Duration,
}

impl<V> ExpirySweeper<V>
where
    V: Clone + Send + 'static,
{
    /// Creates an idle sweeper over `store`, waking every `eviction_interval`.
    ///
    /// Fails with [`CacheError::ZeroInterval`] if `eviction_interval` is zero.
    pub fn new(
        store: Arc<Mutex<EntryStore<V>>>,
        eviction_interval: Duration,
    ) -> Result<Self, CacheError> {
        if eviction_interval.is_zero() {
            return Err(CacheError::ZeroInterval);
        }
        Ok(Self {
            store,
            eviction_interval,
        })
    }

    /// Returns the fixed wake period.
    pub fn eviction_interval(&self) -> Duration {
        self.eviction_interval
    }

    // == Start ==
    /// Spawns the sweep loop on the current tokio runtime.
    ///
    /// The first sweep runs one full interval after start. Each wake performs
    /// at most one sweep, which holds the store lock for its whole scan, so
    /// sweeps never overlap.
    pub fn start(self) -> SweeperHandle {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let Self {
            store,
            eviction_interval,
        } = self;

        let task = tokio::spawn(async move {
            info!(
                "Starting cache expiry sweeper with interval of {:?}",
                eviction_interval
            );

            let mut ticker = interval_at(Instant::now() + eviction_interval, eviction_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    biased;

                    // Also fires when the handle is dropped without stop()
                    _ = shutdown_rx.changed() => break,

                    _ = ticker.tick() => {
                        let removed = store.lock().await.sweep(Instant::now());
                        if removed > 0 {
                            info!("Cache sweep: removed {} expired entries", removed);
                        } else {
                            debug!("Cache sweep: no expired entries found");
                        }
                    }
                }
            }

            info!("Cache expiry sweeper stopped");
        });

        SweeperHandle { shutdown_tx, task }
    }
}

// == Sweeper Handle ==
/// Handle to a running sweeper.
///
/// Dropping the handle without calling [`stop`](SweeperHandle::stop) also ends
/// the task, without waiting for it.
#[derive(Debug)]
pub struct SweeperHandle {
    shutdown_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SweeperHandle {
    // == Stop ==
    /// Signals the sweeper and waits for the task to exit.
    ///
    /// A sweep already in progress completes first; no further wait or sweep
    /// starts after the signal is observed.
    pub async fn stop(self) {
        // Err only if the task already exited and dropped its receiver
        let _ = self.shutdown_tx.send(true);

        if let Err(e) = self.task.await {
            warn!("Cache expiry sweeper ended abnormally: {}", e);
        }
    }

    /// Returns whether the task has exited.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}
