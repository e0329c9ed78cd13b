//! The application state store.
//!
//! This module owns every domain collection behind a single `RwLock`,
//! exposes synchronous mutators and simulated-latency asynchronous actions,
//! and after every mutation stamps `last_updated`, persists the snapshot
//! whitelist through the injected [`SnapshotStore`], and broadcasts a
//! [`StoreUpdate`] to subscribers.
//!
//! Concurrency model: single shared state, last-writer-wins, no
//! transactional grouping. Asynchronous actions may run concurrently with
//! themselves for different ids; delayed effects (signal override reverts,
//! simulation progress tickers) are spawned tasks that re-acquire the lock
//! and tolerate their target having been deleted in the meantime. There is
//! no cancellation path once a delayed effect is scheduled.

mod emergency;
mod error;
mod journeys;
mod reports;
mod routes;
mod simulations;
pub mod state;

pub use error::StoreError;
pub use simulations::generate_recommendations;

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{broadcast, RwLock, RwLockReadGuard};
use tracing::warn;

use crate::config::{Config, LatencyConfig, PersistenceConfig};
use crate::persistence::{Snapshot, SnapshotStore};
use state::TrafficState;

/// Update notification emitted after every store mutation
#[derive(Debug, Clone)]
pub struct StoreUpdate {
    /// Timestamp when this update was generated
    pub timestamp: String,
    /// Whether this is the initial rehydration notification or an
    /// incremental update
    pub is_initial: bool,
}

/// Sender for store update notifications
pub type StoreUpdateSender = broadcast::Sender<StoreUpdate>;

/// Milliseconds since the epoch, kept strictly increasing so that ids minted
/// within the same millisecond stay unique.
pub(crate) fn now_millis() -> i64 {
    static LAST: AtomicI64 = AtomicI64::new(0);
    let now = Utc::now().timestamp_millis();
    let mut prev = LAST.load(Ordering::Relaxed);
    loop {
        let next = prev.max(now - 1) + 1;
        match LAST.compare_exchange_weak(prev, next, Ordering::Relaxed, Ordering::Relaxed) {
            Ok(_) => return next,
            Err(actual) => prev = actual,
        }
    }
}

/// The state store. Cheap to clone; all clones share the same state.
#[derive(Clone)]
pub struct TrafficStore {
    state: Arc<RwLock<TrafficState>>,
    snapshots: Arc<dyn SnapshotStore>,
    latency: LatencyConfig,
    retention: PersistenceConfig,
    updates_tx: StoreUpdateSender,
}

impl TrafficStore {
    /// Build the store: generate fresh seed state, then merge any persisted
    /// snapshot over the whitelisted slices.
    pub fn new(config: &Config, snapshots: Arc<dyn SnapshotStore>) -> Self {
        let mut state = TrafficState::seeded();
        match snapshots.load() {
            Ok(Some(snapshot)) => snapshot.apply(&mut state),
            Ok(None) => {}
            Err(e) => warn!(error = %e, "Failed to load snapshot, starting from seed state"),
        }

        let (updates_tx, _) = broadcast::channel(64);
        let store = Self {
            state: Arc::new(RwLock::new(state)),
            snapshots,
            latency: config.latency.clone(),
            retention: config.persistence.clone(),
            updates_tx,
        };
        store.notify(true);
        store
    }

    /// Read access to the current state.
    ///
    /// A read taken while an asynchronous action is mid-delay sees the
    /// pre-completion state; there is no read-your-pending-writes.
    pub async fn read(&self) -> RwLockReadGuard<'_, TrafficState> {
        self.state.read().await
    }

    /// Subscribe to mutation notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreUpdate> {
        self.updates_tx.subscribe()
    }

    /// Sleep for the configured simulated latency of an action.
    pub(crate) async fn pause(&self, nominal_ms: u64) {
        let delay = self.latency.delay_ms(nominal_ms);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    pub(crate) fn latency(&self) -> &LatencyConfig {
        &self.latency
    }

    /// Apply a mutation under the write lock, stamp `last_updated`, persist
    /// the snapshot and notify subscribers.
    pub(crate) async fn mutate<R>(&self, f: impl FnOnce(&mut TrafficState) -> R) -> R {
        let result = {
            let mut state = self.state.write().await;
            let result = f(&mut state);
            state.last_updated = Some(Utc::now());
            self.persist(&state);
            result
        };
        self.notify(false);
        result
    }

    /// Mutate an activity flag or selection only: no `last_updated` stamp
    /// and no snapshot write, since flags are never persisted.
    pub(crate) async fn set_flag(&self, f: impl FnOnce(&mut TrafficState)) {
        {
            let mut state = self.state.write().await;
            f(&mut state);
        }
        self.notify(false);
    }

    fn persist(&self, state: &TrafficState) {
        let snapshot = Snapshot::capture(state, &self.retention);
        if let Err(e) = self.snapshots.save(&snapshot) {
            // Persistence is best-effort; the in-memory mutation stands.
            warn!(error = %e, "Failed to persist store snapshot");
        }
    }

    fn notify(&self, is_initial: bool) {
        let update = StoreUpdate {
            timestamp: Utc::now().to_rfc3339(),
            is_initial,
        };
        // Ignore send errors - they just mean no one is listening
        let _ = self.updates_tx.send(update);
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::persistence::MemorySnapshotStore;

    /// A store with latency disabled and in-memory persistence.
    pub fn store() -> TrafficStore {
        store_with(Arc::new(MemorySnapshotStore::new()))
    }

    pub fn store_with(snapshots: Arc<dyn SnapshotStore>) -> TrafficStore {
        let config = Config {
            latency: LatencyConfig::none(),
            ..Config::default()
        };
        TrafficStore::new(&config, snapshots)
    }

    /// A store with latency scaled down to `scale` for timing-sensitive
    /// tests of delayed effects.
    pub fn store_with_latency(scale: f64) -> TrafficStore {
        let config = Config {
            latency: LatencyConfig {
                enabled: true,
                scale,
            },
            ..Config::default()
        };
        TrafficStore::new(&config, Arc::new(MemorySnapshotStore::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemorySnapshotStore;

    #[tokio::test]
    async fn rehydration_restores_whitelisted_slices_only() {
        let snapshots: Arc<MemorySnapshotStore> = Arc::new(MemorySnapshotStore::new());

        let store = testing::store_with(snapshots.clone());
        store
            .update_metrics(|m| m.total_vehicles = 99_999)
            .await;
        let signal_count = store.read().await.traffic_signals.len();

        // A second store over the same snapshot store picks up the persisted
        // metrics but regenerates every live collection.
        let restored = testing::store_with(snapshots);
        let state = restored.read().await;
        assert_eq!(state.metrics.total_vehicles, 99_999);
        assert_eq!(state.traffic_signals.len(), signal_count);
        assert!(state.selected_route.is_none());
        assert!(!state.is_loading);
    }

    #[tokio::test]
    async fn mutations_notify_subscribers() {
        let store = testing::store();
        let mut updates = store.subscribe();

        store.set_loading(true).await;
        let update = updates.recv().await.unwrap();
        assert!(!update.is_initial);
    }

    #[tokio::test]
    async fn mutations_stamp_last_updated() {
        let store = testing::store();
        let before = store.read().await.last_updated;

        store.update_metrics(|m| m.avg_speed_kmh = 10.0).await;
        let after = store.read().await.last_updated;
        assert!(after >= before);
        assert_eq!(store.read().await.metrics.avg_speed_kmh, 10.0);
    }

    #[tokio::test]
    async fn flag_changes_do_not_touch_the_snapshot() {
        let snapshots: Arc<MemorySnapshotStore> = Arc::new(MemorySnapshotStore::new());
        let store = testing::store_with(snapshots.clone());

        store.update_metrics(|m| m.total_routes = 7).await;
        let persisted_before = snapshots.load().unwrap().unwrap().metrics.total_routes;

        store.set_loading(true).await;
        let persisted_after = snapshots.load().unwrap().unwrap().metrics.total_routes;
        assert_eq!(persisted_before, persisted_after);
    }
}
