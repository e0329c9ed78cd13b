//! Route dashboard entities: monitored routes, optimization records and
//! congestion predictions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::LatLng;

/// Congestion bucket a route is currently in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteStatus {
    Light,
    Moderate,
    Heavy,
}

/// Short-term congestion trend for a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

/// Start/end coordinates of a monitored route.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteCoordinates {
    pub start: LatLng,
    pub end: LatLng,
}

/// A monitored route on the dashboard.
///
/// Routes are created by the seed generator at store init (or `refresh_data`)
/// and mutated in place by the optimization actions; they are never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficRoute {
    pub id: u32,
    pub name: String,
    pub status: RouteStatus,
    pub avg_speed_kmh: f64,
    /// 0-100.
    pub congestion_level: u8,
    pub vehicles: u32,
    pub trend: Trend,
    pub last_updated: DateTime<Utc>,
    pub coordinates: RouteCoordinates,
    pub distance_km: f64,
    pub estimated_time_min: f64,
    pub alternative_routes: Option<Vec<AlternativeRoute>>,
    /// Optimization quality score, 0-100.
    pub ai_score: f64,
    /// Predicted congestion over the next hour, 0-100.
    pub predicted_congestion: u8,
}

/// Recommendation strength for an alternative route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AiRecommendation {
    HighlyRecommended,
    Recommended,
    Acceptable,
    NotRecommended,
}

/// An alternative to a monitored route, attached by the optimizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternativeRoute {
    pub id: u32,
    pub name: String,
    /// Minutes saved versus the main route; negative means slower.
    pub time_saving_min: f64,
    /// Distance difference in km versus the main route.
    pub distance_diff_km: f64,
    pub congestion_level: u8,
    pub recommendation: AiRecommendation,
    pub reason: String,
}

/// Route optimization strategy selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimizationAlgorithm {
    Dijkstra,
    AStar,
    TrafficAware,
}

/// Result record of the most recent optimization of a route.
///
/// At most one record exists per route id; a newer optimization replaces the
/// older record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteOptimization {
    pub route_id: u32,
    pub algorithm: OptimizationAlgorithm,
    pub optimization_score: f64,
    pub time_saved_min: f64,
    pub fuel_saved_l: f64,
    pub alternative_count: u32,
    pub last_optimized: DateTime<Utc>,
}

/// Predicted congestion for a route in a given time slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficPrediction {
    pub route_id: u32,
    /// e.g. "14:00-15:00".
    pub time_slot: String,
    pub predicted_congestion: u8,
    /// 0.0-1.0.
    pub confidence: f64,
    pub factors: Vec<String>,
}

/// Per-vehicle-type count shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleCount {
    pub vehicle_type: String,
    pub count: u32,
    pub icon: String,
    pub percentage: u8,
}

/// City-wide aggregate metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficMetrics {
    pub total_routes: u32,
    pub total_vehicles: u32,
    pub avg_speed_kmh: f64,
    pub emergency_active: u32,
    pub signal_efficiency: f64,
    pub route_optimization: f64,
    pub emergency_response: f64,
    pub prediction_accuracy: f64,
}
