//! Emergency priority system actions: vehicle registration, priority
//! corridors and signal overrides.

use chrono::{Duration, Utc};
use rand::Rng;

use crate::model::emergency::{
    CorridorSegment, CorridorStatus, EmergencyRegistration, EmergencyVehicle, PriorityCorridor,
    SignalPhase, VehiclePosition,
};

use super::{now_millis, StoreError, TrafficStore};

impl TrafficStore {
    /// Append a pre-built emergency vehicle, assigning it a fresh id.
    pub async fn add_emergency_vehicle(&self, mut vehicle: EmergencyVehicle) {
        vehicle.id = now_millis();
        self.mutate(|state| state.emergency_vehicles.push(vehicle))
            .await;
    }

    /// Patch a single emergency vehicle; unknown ids are a silent no-op.
    pub async fn update_emergency_vehicle(
        &self,
        id: i64,
        patch: impl FnOnce(&mut EmergencyVehicle),
    ) {
        self.mutate(|state| {
            if let Some(vehicle) = state.emergency_vehicles.iter_mut().find(|v| v.id == id) {
                patch(vehicle);
            }
        })
        .await;
    }

    pub async fn remove_emergency_vehicle(&self, id: i64) {
        self.mutate(|state| state.emergency_vehicles.retain(|v| v.id != id))
            .await;
    }

    /// Register a new emergency vehicle with the priority system.
    ///
    /// Assigns a fresh time-based id and the registration timestamp, and
    /// counts the vehicle as an active response.
    pub async fn register_emergency_vehicle(
        &self,
        registration: EmergencyRegistration,
    ) -> EmergencyVehicle {
        let vehicle = EmergencyVehicle {
            id: now_millis(),
            kind: registration.kind,
            route: registration.route,
            eta: registration.eta,
            priority: registration.priority,
            coordinates: registration.coordinates,
            status: registration.status,
            registration_number: registration.registration_number,
            call_sign: registration.call_sign,
            destination: registration.destination,
            corridor_id: registration.corridor_id,
            signal_overrides: registration.signal_overrides,
            response_time_min: registration.response_time_min,
            registered_at: Utc::now(),
        };

        self.mutate(|state| {
            state.emergency_vehicles.push(vehicle.clone());
            state.active_emergency_responses += 1;
        })
        .await;

        vehicle
    }

    /// Activate a green-wave corridor for an emergency vehicle over the given
    /// route segments.
    pub async fn activate_priority_corridor(
        &self,
        emergency_vehicle_id: i64,
        route_segments: &[String],
    ) -> PriorityCorridor {
        let corridor_id = format!("corridor-{}", now_millis());
        let now = Utc::now();

        let corridor = {
            let mut rng = rand::rng();
            PriorityCorridor {
                name: format!("Emergency Corridor {}", &corridor_id[corridor_id.len() - 3..]),
                id: corridor_id.clone(),
                emergency_vehicle_id,
                status: CorridorStatus::Active,
                activated_at: now,
                estimated_clear_time: now + Duration::minutes(10),
                signals_controlled: route_segments.len() as u32,
                average_delay_secs: rng.random_range(5.0..25.0),
                segments: route_segments
                    .iter()
                    .enumerate()
                    .map(|(index, segment_id)| CorridorSegment {
                        id: format!("seg-{corridor_id}-{index}"),
                        intersection_id: format!("int-{segment_id}"),
                        signal_id: format!("sig-{segment_id}"),
                        current_phase: if rng.random_bool(0.5) {
                            SignalPhase::Green
                        } else {
                            SignalPhase::Red
                        },
                        time_remaining_secs: rng.random_range(15..75),
                        is_overridden: rng.random_bool(0.7),
                        original_timing_secs: 60,
                        emergency_timing_secs: 90,
                        vehicle_position: VehiclePosition::Approaching,
                    })
                    .collect(),
            }
        };

        let overrides = route_segments.len() as u32;
        self.mutate(|state| {
            state.priority_corridors.push(corridor.clone());
            state.total_signal_overrides += overrides;
        })
        .await;

        corridor
    }

    /// Move a corridor through its lifecycle; unknown ids are a silent no-op.
    pub async fn update_corridor_status(&self, corridor_id: &str, status: CorridorStatus) {
        self.mutate(|state| {
            if let Some(corridor) = state
                .priority_corridors
                .iter_mut()
                .find(|c| c.id == corridor_id)
            {
                corridor.status = status;
            }
        })
        .await;
    }

    /// Remove a cleared corridor from the active set.
    pub async fn clear_priority_corridor(&self, corridor_id: &str) {
        self.mutate(|state| state.priority_corridors.retain(|c| c.id != corridor_id))
            .await;
    }

    /// Force a signal to green under emergency override for `duration_secs`.
    ///
    /// A revert task is scheduled for when the duration elapses; it clears
    /// `is_emergency_override` but leaves the phase at its override value
    /// (the phase is only restored by the next `update_signal_timing`).
    pub async fn override_traffic_signal(
        &self,
        signal_id: &str,
        duration_secs: u32,
    ) -> Result<(), StoreError> {
        let overridden = self
            .mutate(|state| {
                let Some(signal) = state
                    .traffic_signals
                    .iter_mut()
                    .find(|s| s.id == signal_id)
                else {
                    return false;
                };
                signal.is_emergency_override = true;
                signal.current_phase = SignalPhase::Green;
                signal.time_remaining_secs = duration_secs;
                signal.last_override = Some(Utc::now());
                signal.override_count += 1;
                state.total_signal_overrides += 1;
                true
            })
            .await;

        if !overridden {
            return Err(StoreError::SignalNotFound(signal_id.to_string()));
        }

        let store = self.clone();
        let signal_id = signal_id.to_string();
        let delay = self.latency().delay_ms(u64::from(duration_secs) * 1000);
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            store
                .mutate(|state| {
                    if let Some(signal) = state
                        .traffic_signals
                        .iter_mut()
                        .find(|s| s.id == signal_id)
                    {
                        signal.is_emergency_override = false;
                    }
                })
                .await;
        });

        Ok(())
    }

    /// Look up an emergency vehicle by id.
    pub async fn get_emergency_response(&self, vehicle_id: i64) -> Option<EmergencyVehicle> {
        self.read()
            .await
            .emergency_vehicles
            .iter()
            .find(|v| v.id == vehicle_id)
            .cloned()
    }

    /// Set a signal's phase and countdown directly; unknown ids are a silent
    /// no-op.
    pub async fn update_signal_timing(
        &self,
        signal_id: &str,
        phase: SignalPhase,
        duration_secs: u32,
    ) {
        self.mutate(|state| {
            if let Some(signal) = state
                .traffic_signals
                .iter_mut()
                .find(|s| s.id == signal_id)
            {
                signal.current_phase = phase;
                signal.time_remaining_secs = duration_secs;
            }
        })
        .await;
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::emergency::{
        EmergencyPriority, EmergencyStatus, EmergencyVehicleKind, TrafficSignal,
    };
    use crate::store::testing;

    async fn signal(store: &TrafficStore, signal_id: &str) -> Option<TrafficSignal> {
        store
            .read()
            .await
            .traffic_signals
            .iter()
            .find(|s| s.id == signal_id)
            .cloned()
    }

    fn critical_registration() -> EmergencyRegistration {
        EmergencyRegistration {
            kind: EmergencyVehicleKind::Ambulance,
            route: "General Hospital → Stadium".into(),
            eta: "6 min".into(),
            priority: EmergencyPriority::Critical,
            coordinates: None,
            status: EmergencyStatus::Active,
            registration_number: "AMB-3301".into(),
            call_sign: "Rescue-12".into(),
            destination: "Stadium Medical Tent".into(),
            corridor_id: None,
            signal_overrides: 0,
            response_time_min: 0.0,
        }
    }

    #[tokio::test]
    async fn registration_increments_active_responses() {
        let store = testing::store();
        let before = store.read().await.active_emergency_responses;

        let vehicle = store
            .register_emergency_vehicle(critical_registration())
            .await;

        let state = store.read().await;
        assert_eq!(state.active_emergency_responses, before + 1);
        assert!(state.emergency_vehicles.iter().any(|v| v.id == vehicle.id));
        assert_eq!(vehicle.priority, EmergencyPriority::Critical);
        let age = Utc::now() - vehicle.registered_at;
        assert!(age < Duration::seconds(5));
    }

    #[tokio::test]
    async fn corridor_activation_counts_signal_overrides() {
        let store = testing::store();
        let before = store.read().await.total_signal_overrides;

        let segments = vec!["main-01".to_string(), "main-02".to_string()];
        let corridor = store.activate_priority_corridor(1, &segments).await;

        assert_eq!(corridor.segments.len(), 2);
        assert_eq!(corridor.status, CorridorStatus::Active);
        assert_eq!(corridor.segments[0].signal_id, "sig-main-01");

        let state = store.read().await;
        assert_eq!(state.total_signal_overrides, before + 2);
        assert!(state.priority_corridors.iter().any(|c| c.id == corridor.id));
    }

    #[tokio::test]
    async fn clearing_removes_the_corridor() {
        let store = testing::store();
        let corridor = store
            .activate_priority_corridor(2, &["ind-01".to_string()])
            .await;

        store
            .update_corridor_status(&corridor.id, CorridorStatus::Clearing)
            .await;
        store.clear_priority_corridor(&corridor.id).await;

        let state = store.read().await;
        assert!(!state.priority_corridors.iter().any(|c| c.id == corridor.id));
    }

    #[tokio::test]
    async fn override_sets_green_and_revert_leaves_phase_stale() {
        // Scaled latency keeps the 60s override window at ~30ms, long enough
        // to observe the overridden state before the revert fires.
        let store = testing::store_with_latency(0.0005);
        let before = signal(&store, "sig-002").await.unwrap();
        assert_eq!(before.current_phase, SignalPhase::Red);

        store.override_traffic_signal("sig-002", 60).await.unwrap();

        let signal_now = signal(&store, "sig-002").await.unwrap();
        assert!(signal_now.is_emergency_override);
        assert_eq!(signal_now.current_phase, SignalPhase::Green);
        assert_eq!(signal_now.time_remaining_secs, 60);
        assert_eq!(signal_now.override_count, before.override_count + 1);

        tokio::time::sleep(std::time::Duration::from_millis(120)).await;

        let signal_after = signal(&store, "sig-002").await.unwrap();
        assert!(!signal_after.is_emergency_override);
        // The phase is NOT restored after the override ends.
        assert_eq!(signal_after.current_phase, SignalPhase::Green);
    }

    #[tokio::test]
    async fn override_of_unknown_signal_is_an_error() {
        let store = testing::store();
        let err = store
            .override_traffic_signal("sig-999", 30)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::SignalNotFound(_)));
    }

    #[tokio::test]
    async fn updating_a_removed_vehicle_does_not_resurrect_it() {
        let store = testing::store();
        let vehicle = store
            .register_emergency_vehicle(critical_registration())
            .await;

        store.remove_emergency_vehicle(vehicle.id).await;
        store
            .update_emergency_vehicle(vehicle.id, |v| {
                v.status = EmergencyStatus::Completed;
            })
            .await;

        let state = store.read().await;
        assert!(!state.emergency_vehicles.iter().any(|v| v.id == vehicle.id));
    }

    #[tokio::test]
    async fn get_emergency_response_returns_none_for_unknown_id() {
        let store = testing::store();
        assert!(store.get_emergency_response(123456).await.is_none());
    }
}
