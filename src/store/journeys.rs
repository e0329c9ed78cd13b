//! Multi-modal journey planning actions.

use chrono::Utc;
use rand::Rng;

use crate::model::journey::{
    Availability, JourneySegment, LastMileOption, MultiModalJourney, TransitHub, UserPreferences,
};
use crate::model::{LatLng, NamedPoint};

use super::{now_millis, StoreError, TrafficStore};

/// Rough conversion of meters to WGS84 degrees at city latitudes.
const METERS_PER_DEGREE: f64 = 111_000.0;

impl TrafficStore {
    /// Plan three multi-modal journey options between two points.
    ///
    /// Each option chains the first 2-4 transport modes with independently
    /// drawn per-segment distances, durations, costs and emissions. The
    /// aggregate scores are plain sums/means over the segments; the
    /// sustainability score is a linear carbon penalty floored at zero.
    pub async fn plan_multi_modal_journey(
        &self,
        start: LatLng,
        end: LatLng,
    ) -> Vec<MultiModalJourney> {
        self.set_flag(|state| state.journey_planning_active = true)
            .await;
        self.pause(2000).await;

        let journeys = self
            .mutate(|state| {
                let mut rng = rand::rng();
                let batch = now_millis();
                let mut journeys = Vec::with_capacity(3);

                for i in 0..3 {
                    let mode_count = rng.random_range(2..=4usize).min(state.transport_modes.len());
                    let modes = &state.transport_modes[..mode_count];

                    let segments: Vec<JourneySegment> = modes
                        .iter()
                        .enumerate()
                        .map(|(index, mode)| {
                            let start_point = if index == 0 {
                                NamedPoint::new("Starting Point", start.lat, start.lng)
                            } else {
                                NamedPoint::new(
                                    format!("Transfer {index}"),
                                    start.lat + (rng.random::<f64>() - 0.5) * 0.01,
                                    start.lng + (rng.random::<f64>() - 0.5) * 0.01,
                                )
                            };
                            let end_point = if index == modes.len() - 1 {
                                NamedPoint::new("Destination", end.lat, end.lng)
                            } else {
                                NamedPoint::new(
                                    format!("Transfer {}", index + 1),
                                    end.lat + (rng.random::<f64>() - 0.5) * 0.01,
                                    end.lng + (rng.random::<f64>() - 0.5) * 0.01,
                                )
                            };

                            JourneySegment {
                                id: format!("seg-{i}-{index}"),
                                mode: mode.clone(),
                                start_point,
                                end_point,
                                distance_km: rng.random_range(2.0..12.0),
                                duration_min: rng.random_range(10.0..40.0),
                                cost: rng.random_range(1.0..6.0),
                                carbon_kg: mode.carbon_g_per_km * rng.random_range(2.0..12.0)
                                    / 1000.0,
                                walking_distance_km: Some(rng.random_range(0.0..0.5)),
                                wait_time_min: Some(
                                    if mode.availability == Availability::Scheduled {
                                        rng.random_range(2.0..12.0)
                                    } else {
                                        0.0
                                    },
                                ),
                                transfer_time_min: Some(if index > 0 {
                                    rng.random_range(2.0..7.0)
                                } else {
                                    0.0
                                }),
                            }
                        })
                        .collect();

                    let total_distance_km: f64 = segments.iter().map(|s| s.distance_km).sum();
                    let total_duration_min: f64 = segments
                        .iter()
                        .map(|s| {
                            s.duration_min
                                + s.wait_time_min.unwrap_or(0.0)
                                + s.transfer_time_min.unwrap_or(0.0)
                        })
                        .sum();
                    let total_cost: f64 = segments.iter().map(|s| s.cost).sum();
                    let total_carbon_kg: f64 = segments.iter().map(|s| s.carbon_kg).sum();
                    let total_walking_km: f64 = segments
                        .iter()
                        .map(|s| s.walking_distance_km.unwrap_or(0.0))
                        .sum();
                    let count = segments.len() as f64;

                    journeys.push(MultiModalJourney {
                        id: format!("journey-{batch}-{}", i + 1),
                        start_location: NamedPoint::new("Starting Point", start.lat, start.lng),
                        end_location: NamedPoint::new("Destination", end.lat, end.lng),
                        transfer_count: segments.len() as u32 - 1,
                        comfort_score: segments.iter().map(|s| s.mode.comfort).sum::<f64>() / count,
                        reliability_score: segments.iter().map(|s| s.mode.reliability).sum::<f64>()
                            / count,
                        sustainability_score: (100.0 - total_carbon_kg * 100.0).max(0.0),
                        segments,
                        total_distance_km,
                        total_duration_min,
                        total_cost,
                        total_carbon_kg,
                        total_walking_km,
                        created_at: Utc::now(),
                        user_preferences_applied: true,
                    });
                }

                state.multi_modal_journeys.extend(journeys.iter().cloned());
                state.journey_planning_active = false;
                journeys
            })
            .await;

        journeys
    }

    pub async fn select_journey(&self, journey: Option<MultiModalJourney>) {
        self.mutate(|state| state.selected_journey = journey).await;
    }

    /// Patch the journey planning preferences.
    pub async fn update_user_preferences(&self, patch: impl FnOnce(&mut UserPreferences)) {
        self.mutate(|state| patch(&mut state.user_preferences))
            .await;
    }

    pub async fn set_journey_planning_active(&self, active: bool) {
        self.set_flag(|state| state.journey_planning_active = active)
            .await;
    }

    /// Upsert a journey into the history by id.
    pub async fn save_journey_history(&self, journey: MultiModalJourney) {
        self.mutate(|state| {
            state.multi_modal_journeys.retain(|j| j.id != journey.id);
            state.multi_modal_journeys.push(journey);
        })
        .await;
    }

    /// Last-mile options available around a location.
    ///
    /// Availability is simulated: each option is present with 70%
    /// probability regardless of the queried location.
    pub async fn find_last_mile_options(&self, _location: LatLng) -> Vec<LastMileOption> {
        let options = self.read().await.last_mile_options.clone();
        let mut rng = rand::rng();
        options
            .into_iter()
            .filter(|_| rng.random::<f64>() > 0.3)
            .collect()
    }

    /// Transit hubs within `radius_m` meters of a location, by flat-earth
    /// degree distance.
    pub async fn get_nearby_transit_hubs(
        &self,
        location: LatLng,
        radius_m: f64,
    ) -> Vec<TransitHub> {
        let radius_deg = radius_m / METERS_PER_DEGREE;
        self.read()
            .await
            .transit_hubs
            .iter()
            .filter(|hub| {
                let d_lat = hub.coordinates.lat - location.lat;
                let d_lng = hub.coordinates.lng - location.lng;
                (d_lat * d_lat + d_lng * d_lng).sqrt() <= radius_deg
            })
            .cloned()
            .collect()
    }

    /// Re-score a planned journey according to the stored preference
    /// weights.
    pub async fn optimize_journey_for_preferences(
        &self,
        journey_id: &str,
    ) -> Result<MultiModalJourney, StoreError> {
        if !self
            .read()
            .await
            .multi_modal_journeys
            .iter()
            .any(|j| j.id == journey_id)
        {
            return Err(StoreError::JourneyNotFound(journey_id.to_string()));
        }

        self.pause(1500).await;

        let optimized = self
            .mutate(|state| {
                let weights = state.user_preferences.priority_weights;
                let journey = state
                    .multi_modal_journeys
                    .iter_mut()
                    .find(|j| j.id == journey_id)?;

                journey.comfort_score = (journey.comfort_score + weights.comfort / 10.0).min(100.0);
                journey.reliability_score = (journey.reliability_score + 5.0).min(100.0);
                journey.sustainability_score =
                    (journey.sustainability_score + weights.sustainability / 10.0).min(100.0);
                journey.user_preferences_applied = true;
                let optimized = journey.clone();

                if let Some(selected) = state.selected_journey.as_mut() {
                    if selected.id == journey_id {
                        *selected = optimized.clone();
                    }
                }
                Some(optimized)
            })
            .await;

        optimized.ok_or_else(|| StoreError::JourneyNotFound(journey_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::testing;

    fn downtown() -> LatLng {
        LatLng {
            lat: 43.6532,
            lng: -79.3832,
        }
    }

    fn university() -> LatLng {
        LatLng {
            lat: 43.6629,
            lng: -79.3957,
        }
    }

    #[tokio::test]
    async fn planning_yields_three_consistent_journeys() {
        let store = testing::store();
        let journeys = store
            .plan_multi_modal_journey(downtown(), university())
            .await;

        assert_eq!(journeys.len(), 3);
        for journey in &journeys {
            assert!(journey.segments.len() >= 2);
            assert!(journey.segments.len() <= 4);
            assert_eq!(journey.transfer_count as usize, journey.segments.len() - 1);

            let expected_duration: f64 = journey
                .segments
                .iter()
                .map(|s| {
                    s.duration_min
                        + s.wait_time_min.unwrap_or(0.0)
                        + s.transfer_time_min.unwrap_or(0.0)
                })
                .sum();
            assert!((journey.total_duration_min - expected_duration).abs() < 1e-9);
            assert!(journey.sustainability_score >= 0.0);
            assert_eq!(journey.start_location.name, "Starting Point");
            assert_eq!(journey.end_location.name, "Destination");
        }

        let state = store.read().await;
        assert!(!state.journey_planning_active);
        assert_eq!(state.multi_modal_journeys.len(), 3);
    }

    #[tokio::test]
    async fn planned_journeys_have_unique_ids() {
        let store = testing::store();
        let first = store
            .plan_multi_modal_journey(downtown(), university())
            .await;
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let second = store
            .plan_multi_modal_journey(downtown(), university())
            .await;

        for journey in &first {
            assert!(second.iter().all(|j| j.id != journey.id));
        }
    }

    #[tokio::test]
    async fn preference_optimization_bumps_scores_capped() {
        let store = testing::store();
        let journeys = store
            .plan_multi_modal_journey(downtown(), university())
            .await;
        let target = journeys[0].clone();
        store.select_journey(Some(target.clone())).await;

        let optimized = store
            .optimize_journey_for_preferences(&target.id)
            .await
            .unwrap();

        assert!(optimized.comfort_score >= target.comfort_score);
        assert!(optimized.comfort_score <= 100.0);
        assert!(optimized.reliability_score <= 100.0);

        let state = store.read().await;
        assert_eq!(
            state.selected_journey.as_ref().unwrap().comfort_score,
            optimized.comfort_score
        );
    }

    #[tokio::test]
    async fn optimizing_unknown_journey_is_an_error() {
        let store = testing::store();
        let err = store
            .optimize_journey_for_preferences("journey-nope")
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::JourneyNotFound(_)));
    }

    #[tokio::test]
    async fn nearby_hubs_respect_the_radius() {
        let store = testing::store();

        // All three seeded hubs sit within a few km of downtown Toronto.
        let all = store.get_nearby_transit_hubs(downtown(), 10_000.0).await;
        assert_eq!(all.len(), 3);

        let close = store.get_nearby_transit_hubs(downtown(), 100.0).await;
        assert!(close.iter().any(|hub| hub.id == "hub-001"));
        assert!(close.len() < all.len());

        let none = store
            .get_nearby_transit_hubs(LatLng { lat: 0.0, lng: 0.0 }, 1_000.0)
            .await;
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn save_journey_history_upserts_by_id() {
        let store = testing::store();
        let journeys = store
            .plan_multi_modal_journey(downtown(), university())
            .await;
        let mut journey = journeys[0].clone();
        journey.total_cost = 1234.5;

        store.save_journey_history(journey.clone()).await;

        let state = store.read().await;
        assert_eq!(state.multi_modal_journeys.len(), 3);
        let stored = state
            .multi_modal_journeys
            .iter()
            .find(|j| j.id == journey.id)
            .unwrap();
        assert_eq!(stored.total_cost, 1234.5);
    }
}
