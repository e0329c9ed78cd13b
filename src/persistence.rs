//! Snapshot persistence for the store.
//!
//! A fixed whitelist of state slices is serialized to a single JSON blob
//! after every mutation and merged back over freshly generated seed state at
//! startup. Everything outside the whitelist (routes, emergency vehicles,
//! corridors, signals, selections, activity flags) is live data and is always
//! regenerated, never persisted.

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::PersistenceConfig;
use crate::model::journey::{MultiModalJourney, UserPreferences};
use crate::model::report::{GeneratedReport, ReportSchedule, ReportTemplate};
use crate::model::route::TrafficMetrics;
use crate::model::simulation::{AnalyticsInsight, TrafficSimulation};
use crate::store::state::TrafficState;

/// Bumped whenever the snapshot shape changes; snapshots with a different
/// version are discarded and the store starts from fresh seed state.
pub const SNAPSHOT_VERSION: u32 = 1;

/// The persisted subset of [`TrafficState`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub metrics: TrafficMetrics,
    pub user_preferences: UserPreferences,
    pub multi_modal_journeys: Vec<MultiModalJourney>,
    pub traffic_simulations: Vec<TrafficSimulation>,
    pub total_simulations_run: u32,
    /// Only unacknowledged insights survive a restart.
    pub analytics_insights: Vec<AnalyticsInsight>,
    pub report_templates: Vec<ReportTemplate>,
    pub generated_reports: Vec<GeneratedReport>,
    pub report_schedules: Vec<ReportSchedule>,
}

fn tail<T: Clone>(items: &[T], keep: usize) -> Vec<T> {
    let skip = items.len().saturating_sub(keep);
    items[skip..].to_vec()
}

impl Snapshot {
    /// Capture the whitelisted slices of the current state, trimming the
    /// history collections to the configured retention.
    pub fn capture(state: &TrafficState, retention: &PersistenceConfig) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            metrics: state.metrics.clone(),
            user_preferences: state.user_preferences.clone(),
            multi_modal_journeys: tail(&state.multi_modal_journeys, retention.max_journeys),
            traffic_simulations: tail(&state.traffic_simulations, retention.max_simulations),
            total_simulations_run: state.total_simulations_run,
            analytics_insights: state
                .analytics_insights
                .iter()
                .filter(|insight| !insight.acknowledged)
                .cloned()
                .collect(),
            report_templates: state.report_templates.clone(),
            generated_reports: tail(&state.generated_reports, retention.max_reports),
            report_schedules: state.report_schedules.clone(),
        }
    }

    /// Merge the snapshot over freshly seeded state.
    pub fn apply(self, state: &mut TrafficState) {
        state.metrics = self.metrics;
        state.user_preferences = self.user_preferences;
        state.multi_modal_journeys = self.multi_modal_journeys;
        state.traffic_simulations = self.traffic_simulations;
        state.total_simulations_run = self.total_simulations_run;
        state.analytics_insights = self.analytics_insights;
        state.report_templates = self.report_templates;
        state.generated_reports = self.generated_reports;
        state.report_schedules = self.report_schedules;
    }
}

/// Persistence port for the store; implementations decide where the snapshot
/// blob lives.
pub trait SnapshotStore: Send + Sync {
    fn save(&self, snapshot: &Snapshot) -> Result<(), PersistenceError>;
    fn load(&self) -> Result<Option<Snapshot>, PersistenceError>;
}

/// File-backed snapshot store writing one JSON document.
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn save(&self, snapshot: &Snapshot) -> Result<(), PersistenceError> {
        let json = serde_json::to_vec(snapshot)?;
        fs::write(&self.path, json).map_err(|e| PersistenceError::Io(e.to_string()))?;
        Ok(())
    }

    fn load(&self) -> Result<Option<Snapshot>, PersistenceError> {
        let content = match fs::read(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(PersistenceError::Io(e.to_string())),
        };

        let snapshot: Snapshot = match serde_json::from_slice(&content) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                // A corrupt snapshot is not fatal; the store regenerates.
                warn!(path = %self.path.display(), error = %e, "Discarding unreadable snapshot");
                return Ok(None);
            }
        };

        if snapshot.version != SNAPSHOT_VERSION {
            warn!(
                found = snapshot.version,
                expected = SNAPSHOT_VERSION,
                "Discarding snapshot with incompatible version"
            );
            return Ok(None);
        }

        info!(path = %self.path.display(), "Loaded persisted snapshot");
        Ok(Some(snapshot))
    }
}

/// In-memory snapshot store used by tests.
#[derive(Default)]
pub struct MemorySnapshotStore {
    snapshot: Mutex<Option<Snapshot>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn save(&self, snapshot: &Snapshot) -> Result<(), PersistenceError> {
        *self.snapshot.lock().expect("snapshot lock poisoned") = Some(snapshot.clone());
        Ok(())
    }

    fn load(&self) -> Result<Option<Snapshot>, PersistenceError> {
        Ok(self.snapshot.lock().expect("snapshot lock poisoned").clone())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("Snapshot I/O error: {0}")]
    Io(String),
    #[error("Snapshot serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn retention() -> PersistenceConfig {
        PersistenceConfig::default()
    }

    #[test]
    fn capture_keeps_whitelisted_slices() {
        let state = TrafficState::seeded();
        let snapshot = Snapshot::capture(&state, &retention());

        assert_eq!(snapshot.version, SNAPSHOT_VERSION);
        assert_eq!(snapshot.metrics, state.metrics);
        assert_eq!(snapshot.user_preferences, state.user_preferences);
        assert_eq!(snapshot.total_simulations_run, state.total_simulations_run);
        // Acknowledged insights are dropped from the snapshot.
        assert!(snapshot.analytics_insights.iter().all(|i| !i.acknowledged));
        assert!(
            snapshot.analytics_insights.len() < state.analytics_insights.len(),
            "seed state contains an acknowledged insight that must be dropped"
        );
    }

    #[test]
    fn capture_trims_history_collections() {
        let mut state = TrafficState::seeded();
        let template = state.generated_reports[0].clone();
        for i in 0..60 {
            let mut report = template.clone();
            report.id = format!("report-extra-{i}");
            state.generated_reports.push(report);
        }

        let snapshot = Snapshot::capture(&state, &retention());
        assert_eq!(snapshot.generated_reports.len(), 50);
        // The newest entries survive.
        assert_eq!(snapshot.generated_reports.last().unwrap().id, "report-extra-59");
    }

    #[test]
    fn round_trip_restores_whitelisted_state() {
        let state = TrafficState::seeded();
        let snapshot = Snapshot::capture(&state, &retention());

        let store = MemorySnapshotStore::new();
        store.save(&snapshot).unwrap();
        let loaded = store.load().unwrap().expect("snapshot present");

        let mut restored = TrafficState::seeded();
        loaded.apply(&mut restored);

        assert_eq!(restored.metrics, state.metrics);
        assert_eq!(restored.user_preferences, state.user_preferences);
        assert_eq!(restored.total_simulations_run, state.total_simulations_run);
    }

    #[test]
    fn json_round_trip_preserves_dates() {
        let state = TrafficState::seeded();
        let snapshot = Snapshot::capture(&state, &retention());

        let json = serde_json::to_string(&snapshot).unwrap();
        let decoded: Snapshot = serde_json::from_str(&json).unwrap();

        assert_eq!(
            decoded.report_templates[0].created_at,
            snapshot.report_templates[0].created_at
        );
        assert_eq!(
            decoded.traffic_simulations[0].completed_at,
            snapshot.traffic_simulations[0].completed_at
        );
    }

    #[test]
    fn version_mismatch_discards_snapshot() {
        let dir = std::env::temp_dir().join("trafficflow-version-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("snapshot.json");

        let state = TrafficState::seeded();
        let mut snapshot = Snapshot::capture(&state, &retention());
        snapshot.version = SNAPSHOT_VERSION + 1;

        let store = FileSnapshotStore::new(&path);
        store.save(&snapshot).unwrap();
        assert!(store.load().unwrap().is_none());

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn missing_file_loads_as_fresh_state() {
        let store = FileSnapshotStore::new("/nonexistent/trafficflow-snapshot.json");
        assert!(store.load().unwrap().is_none());
    }
}
