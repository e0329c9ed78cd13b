use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use trafficflow_core::config::Config;
use trafficflow_core::persistence::FileSnapshotStore;
use trafficflow_core::store::TrafficStore;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // Load config; the store runs fine on defaults.
    let config = Config::load("config.yaml").unwrap_or_else(|e| {
        tracing::warn!(error = %e, "No usable config.yaml, falling back to defaults");
        Config::default()
    });

    let snapshots = Arc::new(FileSnapshotStore::new(config.persistence.path.clone()));
    let store = TrafficStore::new(&config, snapshots);

    {
        let state = store.read().await;
        tracing::info!(
            routes = state.routes.len(),
            signals = state.traffic_signals.len(),
            simulations = state.traffic_simulations.len(),
            reports = state.generated_reports.len(),
            "Store initialized"
        );
    }

    // Periodic refresh of the traffic-facing collections, mirroring the
    // dashboard's auto-refresh.
    if config.refresh_interval_secs > 0 {
        let refresh_store = store.clone();
        let interval_secs = config.refresh_interval_secs;
        tokio::spawn(async move {
            let mut interval =
                tokio::time::interval(tokio::time::Duration::from_secs(interval_secs));
            // Skip the first tick which fires immediately.
            interval.tick().await;
            loop {
                interval.tick().await;
                refresh_store.refresh_data().await;
            }
        });
        tracing::info!(interval_secs, "Started periodic refresh loop");
    }

    // Log update notifications until shut down.
    let mut updates = store.subscribe();
    loop {
        match updates.recv().await {
            Ok(update) => tracing::debug!(timestamp = %update.timestamp, "Store updated"),
            Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::debug!(skipped, "Missed store updates");
            }
            Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
        }
    }
}
