//! Emergency priority system entities: registered emergency vehicles,
//! priority corridors and the traffic signals they control.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::LatLng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmergencyVehicleKind {
    Ambulance,
    Fire,
    Police,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmergencyPriority {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmergencyStatus {
    Active,
    Completed,
    Cancelled,
}

/// An emergency vehicle registered with the priority system.
///
/// Ids are millisecond timestamps assigned at registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergencyVehicle {
    pub id: i64,
    pub kind: EmergencyVehicleKind,
    /// Human-readable route description, e.g. "General Hospital → Downtown".
    pub route: String,
    pub eta: String,
    pub priority: EmergencyPriority,
    pub coordinates: Option<LatLng>,
    pub status: EmergencyStatus,
    pub registration_number: String,
    pub call_sign: String,
    pub destination: String,
    /// Weak reference to the priority corridor serving this vehicle, if any.
    pub corridor_id: Option<String>,
    pub signal_overrides: u32,
    pub response_time_min: f64,
    pub registered_at: DateTime<Utc>,
}

/// Registration payload for a new emergency vehicle; the store assigns the id
/// and registration timestamp.
#[derive(Debug, Clone)]
pub struct EmergencyRegistration {
    pub kind: EmergencyVehicleKind,
    pub route: String,
    pub eta: String,
    pub priority: EmergencyPriority,
    pub coordinates: Option<LatLng>,
    pub status: EmergencyStatus,
    pub registration_number: String,
    pub call_sign: String,
    pub destination: String,
    pub corridor_id: Option<String>,
    pub signal_overrides: u32,
    pub response_time_min: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorridorStatus {
    Active,
    Clearing,
    Inactive,
}

/// Where the emergency vehicle currently is relative to a corridor segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehiclePosition {
    Approaching,
    InIntersection,
    Passed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalPhase {
    Green,
    Yellow,
    Red,
}

/// One controlled intersection along a priority corridor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorridorSegment {
    pub id: String,
    pub intersection_id: String,
    pub signal_id: String,
    pub current_phase: SignalPhase,
    pub time_remaining_secs: u32,
    pub is_overridden: bool,
    pub original_timing_secs: u32,
    pub emergency_timing_secs: u32,
    pub vehicle_position: VehiclePosition,
}

/// A green-wave corridor activated for a single emergency vehicle.
///
/// References the vehicle by id only (relation, not ownership). Cleared
/// corridors are removed from the active set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityCorridor {
    pub id: String,
    pub name: String,
    pub segments: Vec<CorridorSegment>,
    pub emergency_vehicle_id: i64,
    pub status: CorridorStatus,
    pub activated_at: DateTime<Utc>,
    pub estimated_clear_time: DateTime<Utc>,
    pub signals_controlled: u32,
    pub average_delay_secs: f64,
}

/// A city traffic signal that can be put under emergency override.
///
/// Overrides are time-bounded: after the override duration elapses only the
/// `is_emergency_override` flag is cleared; the phase keeps its override
/// value until the next timing update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficSignal {
    pub id: String,
    pub intersection_name: String,
    pub coordinates: LatLng,
    pub current_phase: SignalPhase,
    pub time_remaining_secs: u32,
    pub is_emergency_override: bool,
    pub normal_cycle_secs: u32,
    pub emergency_cycle_secs: u32,
    pub last_override: Option<DateTime<Utc>>,
    pub override_count: u32,
}
