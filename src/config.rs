use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Snapshot persistence configuration
    #[serde(default)]
    pub persistence: PersistenceConfig,
    /// Simulated-latency configuration
    #[serde(default)]
    pub latency: LatencyConfig,
    /// Interval in seconds between automatic data refreshes (0 disables)
    #[serde(default)]
    pub refresh_interval_secs: u64,
}

/// Configuration for the snapshot persistence adapter
#[derive(Debug, Clone, Deserialize)]
pub struct PersistenceConfig {
    /// Path of the JSON snapshot file (default: "trafficflow-store.json")
    #[serde(default = "PersistenceConfig::default_path")]
    pub path: PathBuf,
    /// Number of most recent journeys kept in the snapshot (default: 10)
    #[serde(default = "PersistenceConfig::default_max_journeys")]
    pub max_journeys: usize,
    /// Number of most recent simulations kept in the snapshot (default: 20)
    #[serde(default = "PersistenceConfig::default_max_simulations")]
    pub max_simulations: usize,
    /// Number of most recent reports kept in the snapshot (default: 50)
    #[serde(default = "PersistenceConfig::default_max_reports")]
    pub max_reports: usize,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            path: Self::default_path(),
            max_journeys: Self::default_max_journeys(),
            max_simulations: Self::default_max_simulations(),
            max_reports: Self::default_max_reports(),
        }
    }
}

impl PersistenceConfig {
    fn default_path() -> PathBuf {
        PathBuf::from("trafficflow-store.json")
    }
    fn default_max_journeys() -> usize {
        10
    }
    fn default_max_simulations() -> usize {
        20
    }
    fn default_max_reports() -> usize {
        50
    }
}

/// Configuration for the simulated latency of asynchronous actions.
///
/// Delays stand in for backend calls; tests disable them so actions resolve
/// without waiting.
#[derive(Debug, Clone, Deserialize)]
pub struct LatencyConfig {
    /// Whether simulated delays are applied at all (default: true)
    #[serde(default = "LatencyConfig::default_enabled")]
    pub enabled: bool,
    /// Multiplier applied to every delay (default: 1.0)
    #[serde(default = "LatencyConfig::default_scale")]
    pub scale: f64,
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            enabled: Self::default_enabled(),
            scale: Self::default_scale(),
        }
    }
}

impl LatencyConfig {
    fn default_enabled() -> bool {
        true
    }
    fn default_scale() -> f64 {
        1.0
    }

    /// Latency profile for tests: no delays at all.
    pub fn none() -> Self {
        Self {
            enabled: false,
            scale: 0.0,
        }
    }

    /// Scale a nominal delay in milliseconds to the configured duration.
    pub fn delay_ms(&self, ms: u64) -> Duration {
        if !self.enabled {
            return Duration::ZERO;
        }
        Duration::from_millis((ms as f64 * self.scale).round() as u64)
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::ReadError(e.to_string()))?;

        serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),
    #[error("Failed to parse config: {0}")]
    ParseError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_to_empty_config() {
        let config: Config = serde_yaml::from_str("{}").unwrap();
        assert!(config.latency.enabled);
        assert_eq!(config.persistence.max_journeys, 10);
        assert_eq!(config.persistence.max_simulations, 20);
        assert_eq!(config.persistence.max_reports, 50);
    }

    #[test]
    fn disabled_latency_yields_zero_delays() {
        let latency = LatencyConfig::none();
        assert_eq!(latency.delay_ms(5000), Duration::ZERO);
    }

    #[test]
    fn scale_applies_to_delays() {
        let latency = LatencyConfig {
            enabled: true,
            scale: 0.5,
        };
        assert_eq!(latency.delay_ms(2000), Duration::from_millis(1000));
    }
}
