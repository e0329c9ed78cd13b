//! Multi-modal journey planning entities: transport modes, planned journeys,
//! user preferences, last-mile options and transit hubs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{LatLng, Level, NamedPoint};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportModeKind {
    Car,
    Bike,
    Metro,
    Bus,
    Walk,
    Scooter,
    Rickshaw,
}

/// When a transport mode can be boarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    Always,
    Scheduled,
    OnDemand,
}

/// Reference data for one way of getting around the city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportMode {
    pub id: String,
    pub name: String,
    pub kind: TransportModeKind,
    pub icon: String,
    pub color: String,
    pub avg_speed_kmh: f64,
    pub cost_per_km: f64,
    /// Grams of CO2 per km.
    pub carbon_g_per_km: f64,
    pub accessibility: Level,
    /// 0-100.
    pub reliability: f64,
    /// 0-100.
    pub comfort: f64,
    pub availability: Availability,
}

/// One leg of a multi-modal journey.
///
/// Carries a value copy of the transport mode (not an id reference), so a
/// journey stays self-describing even if the mode table is regenerated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JourneySegment {
    pub id: String,
    pub mode: TransportMode,
    pub start_point: NamedPoint,
    pub end_point: NamedPoint,
    pub distance_km: f64,
    pub duration_min: f64,
    pub cost: f64,
    /// Kilograms of CO2 for the leg.
    pub carbon_kg: f64,
    pub walking_distance_km: Option<f64>,
    pub wait_time_min: Option<f64>,
    pub transfer_time_min: Option<f64>,
}

/// A planned door-to-door journey across several transport modes.
///
/// Aggregate metrics are computed once at creation (sums and means over the
/// segments) and are only changed again by the preference optimizer -- they
/// are never recomputed automatically when segments change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiModalJourney {
    pub id: String,
    pub start_location: NamedPoint,
    pub end_location: NamedPoint,
    pub segments: Vec<JourneySegment>,
    pub total_distance_km: f64,
    pub total_duration_min: f64,
    pub total_cost: f64,
    pub total_carbon_kg: f64,
    pub total_walking_km: f64,
    pub transfer_count: u32,
    /// 0-100.
    pub comfort_score: f64,
    /// 0-100.
    pub reliability_score: f64,
    /// 0-100.
    pub sustainability_score: f64,
    pub created_at: DateTime<Utc>,
    pub user_preferences_applied: bool,
}

/// Relative importance the user assigns to each planning dimension (0-100).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriorityWeights {
    pub time: f64,
    pub cost: f64,
    pub comfort: f64,
    pub sustainability: f64,
}

/// Journey planning preferences; persisted across sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPreferences {
    /// Transport mode ids.
    pub preferred_modes: Vec<String>,
    pub max_walking_km: f64,
    pub max_transfers: u32,
    pub priority_weights: PriorityWeights,
    pub accessibility_needs: Vec<String>,
    /// Maximum cost per journey, if constrained.
    pub budget_constraint: Option<f64>,
    /// Transport mode ids to avoid.
    #[serde(default)]
    pub avoid_modes: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LastMileKind {
    BikeShare,
    ScooterShare,
    AutoRickshaw,
    Shuttle,
    Walking,
}

/// A nearby pickup station for a last-mile service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbyStation {
    pub name: String,
    pub distance_km: f64,
    pub available: u32,
}

/// A first/last-mile connection option around a transit hub.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LastMileOption {
    pub id: String,
    pub name: String,
    pub kind: LastMileKind,
    pub nearby_stations: Vec<NearbyStation>,
    pub cost_per_minute: f64,
    pub max_distance_km: f64,
    pub availability: Level,
    pub icon: String,
    pub color: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HubKind {
    MetroStation,
    BusStop,
    IntegratedHub,
    Parking,
}

/// An interchange point connecting several transport modes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitHub {
    pub id: String,
    pub name: String,
    pub kind: HubKind,
    pub coordinates: LatLng,
    /// Transport mode ids reachable at this hub.
    pub connected_modes: Vec<String>,
    pub last_mile_options: Vec<LastMileOption>,
    pub facilities: Vec<String>,
    pub accessibility: bool,
    pub peak_hour_crowding: Level,
    pub average_wait_min: f64,
}
