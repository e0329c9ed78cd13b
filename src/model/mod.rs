//! Domain entities for the traffic management core.
//!
//! These are plain serde records; all behavior lives in `crate::store`.
//! Entities reference each other by id copy only -- the store owns every
//! collection exclusively.

pub mod emergency;
pub mod journey;
pub mod report;
pub mod route;
pub mod simulation;

use serde::{Deserialize, Serialize};

/// Geographic coordinate (WGS84).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// A coordinate with a display name attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedPoint {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

impl NamedPoint {
    pub fn new(name: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            name: name.into(),
            lat,
            lng,
        }
    }
}

/// Three-step qualitative level used for accessibility, availability and
/// crowding ratings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    High,
    Medium,
    Low,
}
