//! Simulation and analytics actions.

use chrono::Utc;
use rand::Rng;
use serde_json::json;

use crate::export::{self, ExportBlob};
use crate::model::route::RouteStatus;
use crate::model::simulation::{
    AnalyticsInsight, EmergencyResponseMetrics, InfrastructureImpact, InsightKind,
    InsightSeverity, ModelPrediction, PredictiveModel, PredictiveModelKind, Recommendation,
    RecommendationKind, RecommendationPriority, SimulationRequest, SimulationResults,
    SimulationStatus, Timeframe, TrafficFlowMetrics, TrafficSimulation, VisualizationData,
};

use super::{now_millis, StoreError, TrafficStore};

/// Build a randomized results object. Every metric is an independent draw
/// over its own range; nothing ties ROI to cost/benefit or speed to
/// congestion.
fn draw_results() -> SimulationResults {
    let mut rng = rand::rng();
    SimulationResults {
        overall_score: rng.random_range(75.0..95.0),
        traffic_flow_metrics: TrafficFlowMetrics {
            average_speed_kmh: rng.random_range(45.0..65.0),
            congestion_reduction: rng.random_range(0.0..40.0),
            travel_time_reduction: rng.random_range(0.0..35.0),
            fuel_savings: rng.random_range(0.0..25.0),
            emission_reduction: rng.random_range(0.0..30.0),
        },
        emergency_response_metrics: EmergencyResponseMetrics {
            average_response_time_min: rng.random_range(6.0..10.0),
            response_time_improvement: rng.random_range(0.0..25.0),
            successful_corridors: rng.random_range(30..50),
            signal_override_efficiency: rng.random_range(75.0..95.0),
        },
        infrastructure_impact: InfrastructureImpact {
            cost_benefit_ratio: rng.random_range(1.5..3.5),
            roi_projection: rng.random_range(100.0..200.0),
            payback_period_years: rng.random_range(5.0..15.0),
            sustainability_score: rng.random_range(60.0..90.0),
            bus_system_efficiency: rng.random_range(70.0..95.0),
            vehicle_capacity_utilization: rng.random_range(60.0..90.0),
            road_network_improvement: rng.random_range(50.0..90.0),
            signal_system_optimization: rng.random_range(65.0..95.0),
            emergency_response_improvement: rng.random_range(40.0..75.0),
            air_quality_improvement: rng.random_range(15.0..40.0),
            noise_reduction: rng.random_range(10.0..30.0),
            construction_impact: rng.random_range(20.0..50.0),
            public_transport_adoption: rng.random_range(15.0..40.0),
        },
        recommendations: vec![Recommendation {
            id: format!("rec-{}", now_millis()),
            kind: RecommendationKind::Infrastructure,
            priority: RecommendationPriority::High,
            title: "Optimize Signal Timing".into(),
            description: "Implement adaptive signal control system".into(),
            expected_benefit: "Reduce congestion by 15-20%".into(),
            implementation_cost: 2.5,
            timeframe: Timeframe::ShortTerm,
            impact_areas: vec!["traffic_flow".into(), "emergency_response".into()],
        }],
        visualization_data: VisualizationData::default(),
    }
}

/// Derive follow-up recommendations from a finished run. Pure; nothing is
/// written to the store.
pub fn generate_recommendations(results: &SimulationResults) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();
    let stamp = now_millis();

    if results.traffic_flow_metrics.congestion_reduction < 20.0 {
        recommendations.push(Recommendation {
            id: format!("rec-{stamp}-1"),
            kind: RecommendationKind::Infrastructure,
            priority: RecommendationPriority::High,
            title: "Additional Traffic Management Needed".into(),
            description: "Consider implementing dynamic routing or additional infrastructure"
                .into(),
            expected_benefit: "Potential 25% congestion reduction".into(),
            implementation_cost: 5.2,
            timeframe: Timeframe::MediumTerm,
            impact_areas: vec!["traffic_flow".into()],
        });
    }

    if results.emergency_response_metrics.response_time_improvement < 15.0 {
        recommendations.push(Recommendation {
            id: format!("rec-{stamp}-2"),
            kind: RecommendationKind::Technology,
            priority: RecommendationPriority::Medium,
            title: "Enhanced Emergency Corridor System".into(),
            description: "Upgrade to predictive emergency routing with AI".into(),
            expected_benefit: "Reduce emergency response times by 30%".into(),
            implementation_cost: 3.8,
            timeframe: Timeframe::ShortTerm,
            impact_areas: vec!["emergency_response".into()],
        });
    }

    recommendations
}

impl TrafficStore {
    /// Queue a new simulation.
    pub async fn create_simulation(&self, request: SimulationRequest) -> TrafficSimulation {
        self.pause(500).await;

        let simulation = TrafficSimulation {
            id: format!("sim-{}", now_millis()),
            name: request.name,
            description: request.description,
            simulation_type: request.simulation_type,
            status: SimulationStatus::Queued,
            parameters: request.parameters,
            results: None,
            created_at: Utc::now(),
            completed_at: None,
            duration_min: request.duration_min,
            progress: 0.0,
        };

        self.mutate(|state| state.traffic_simulations.push(simulation.clone()))
            .await;

        simulation
    }

    /// Run a queued simulation to completion.
    ///
    /// The status goes to `Running` immediately; a progress ticker advances
    /// `progress` up to 90 while the run is in flight, and after the full
    /// simulated duration the run finalizes atomically: status `Completed`,
    /// progress 100, results populated. Deleting the simulation mid-flight
    /// stops the ticker at its next tick and makes finalization a no-op
    /// against the collection (the run counters still settle).
    pub async fn run_simulation(
        &self,
        simulation_id: &str,
    ) -> Result<SimulationResults, StoreError> {
        let started = self
            .mutate(|state| {
                let Some(simulation) = state
                    .traffic_simulations
                    .iter_mut()
                    .find(|s| s.id == simulation_id)
                else {
                    return false;
                };
                simulation.status = SimulationStatus::Running;
                simulation.progress = 0.0;
                state.active_simulations += 1;
                state.is_simulating = true;
                true
            })
            .await;

        if !started {
            return Err(StoreError::SimulationNotFound(simulation_id.to_string()));
        }

        let tick = self.latency().delay_ms(1000);
        if !tick.is_zero() {
            let store = self.clone();
            let id = simulation_id.to_string();
            tokio::spawn(async move {
                let mut interval = tokio::time::interval(tick);
                // Skip the first tick which fires immediately.
                interval.tick().await;
                loop {
                    interval.tick().await;
                    let still_running = store
                        .mutate(|state| {
                            match state
                                .traffic_simulations
                                .iter_mut()
                                .find(|s| s.id == id)
                            {
                                Some(simulation)
                                    if simulation.status == SimulationStatus::Running =>
                                {
                                    if simulation.progress < 90.0 {
                                        let step = rand::rng().random_range(0.0..20.0);
                                        simulation.progress =
                                            (simulation.progress + step).min(90.0);
                                    }
                                    true
                                }
                                _ => false,
                            }
                        })
                        .await;
                    if !still_running {
                        break;
                    }
                }
            });
        }

        self.pause(5000).await;

        let results = draw_results();
        self.mutate(|state| {
            let now = Utc::now();
            if let Some(simulation) = state
                .traffic_simulations
                .iter_mut()
                .find(|s| s.id == simulation_id)
            {
                simulation.status = SimulationStatus::Completed;
                simulation.progress = 100.0;
                simulation.results = Some(results.clone());
                simulation.completed_at = Some(now);
            }

            state.simulation_results = Some(results.clone());
            let previously_active = state.active_simulations;
            state.active_simulations = previously_active.saturating_sub(1);
            state.total_simulations_run += 1;
            state.is_simulating = previously_active > 1;
        })
        .await;

        Ok(results)
    }

    /// Select a simulation and mirror its results for the dashboard.
    pub async fn select_simulation(&self, simulation: Option<TrafficSimulation>) {
        self.set_flag(|state| {
            state.simulation_results = simulation.as_ref().and_then(|s| s.results.clone());
            state.selected_simulation = simulation;
        })
        .await;
    }

    /// Remove a simulation; clears the selection if it pointed at it.
    pub async fn delete_simulation(&self, simulation_id: &str) {
        self.mutate(|state| {
            state.traffic_simulations.retain(|s| s.id != simulation_id);
            if state
                .selected_simulation
                .as_ref()
                .is_some_and(|s| s.id == simulation_id)
            {
                state.selected_simulation = None;
            }
        })
        .await;
    }

    /// Set a simulation's progress directly; unknown ids are a silent no-op.
    pub async fn update_simulation_progress(&self, simulation_id: &str, progress: f64) {
        self.set_flag(|state| {
            if let Some(simulation) = state
                .traffic_simulations
                .iter_mut()
                .find(|s| s.id == simulation_id)
            {
                simulation.progress = progress;
            }
        })
        .await;
    }

    /// Look up the predictive model of a given kind.
    pub async fn get_predictive_model(
        &self,
        kind: PredictiveModelKind,
    ) -> Option<PredictiveModel> {
        self.read()
            .await
            .predictive_models
            .iter()
            .find(|model| model.kind == kind)
            .cloned()
    }

    /// Replace a model's prediction set; unknown ids are a silent no-op.
    pub async fn update_model_predictions(
        &self,
        model_id: &str,
        predictions: Vec<ModelPrediction>,
    ) {
        self.mutate(|state| {
            if let Some(model) = state
                .predictive_models
                .iter_mut()
                .find(|m| m.id == model_id)
            {
                model.predictions = predictions;
            }
        })
        .await;
    }

    /// Derive insights from the current traffic picture without storing
    /// them.
    pub async fn generate_analytics_insights(&self) -> Vec<AnalyticsInsight> {
        let state = self.read().await;
        let mut insights = Vec::new();

        let heavy_routes = state
            .routes
            .iter()
            .filter(|r| r.status == RouteStatus::Heavy)
            .count();
        if heavy_routes > 2 {
            insights.push(AnalyticsInsight {
                id: format!("insight-{}", now_millis()),
                kind: InsightKind::Risk,
                severity: InsightSeverity::High,
                title: "Multiple High-Congestion Routes Detected".into(),
                description: format!(
                    "{heavy_routes} routes showing heavy congestion simultaneously"
                ),
                data: json!({ "affected_routes": heavy_routes }),
                action_required: true,
                related_recommendations: Vec::new(),
                detected_at: Utc::now(),
                acknowledged: false,
            });
        }

        insights
    }

    /// Mark an insight as acknowledged; unknown ids are a silent no-op.
    pub async fn acknowledge_insight(&self, insight_id: &str) {
        self.mutate(|state| {
            if let Some(insight) = state
                .analytics_insights
                .iter_mut()
                .find(|i| i.id == insight_id)
            {
                insight.acknowledged = true;
            }
        })
        .await;
    }

    /// Export a simulation (parameters and results) as a JSON blob.
    pub async fn export_simulation_data(
        &self,
        simulation_id: &str,
    ) -> Result<ExportBlob, StoreError> {
        self.pause(1000).await;

        let simulation = self
            .read()
            .await
            .traffic_simulations
            .iter()
            .find(|s| s.id == simulation_id)
            .cloned()
            .ok_or_else(|| StoreError::SimulationNotFound(simulation_id.to_string()))?;

        Ok(export::simulation_to_json(&simulation)?)
    }

    pub async fn set_simulating(&self, simulating: bool) {
        self.set_flag(|state| state.is_simulating = simulating).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::simulation::{SimulationKind, SimulationParameters, TrafficPatterns,
        VehicleDensity, WeatherConditions};
    use crate::store::testing;

    fn request() -> SimulationRequest {
        SimulationRequest {
            name: "Bridge Closure Study".into(),
            description: "Impact of closing the river bridge for repairs".into(),
            simulation_type: SimulationKind::TrafficFlow,
            parameters: SimulationParameters {
                time_horizon_hours: 12,
                vehicle_density: VehicleDensity::High,
                weather_conditions: WeatherConditions::Rain,
                incident_probability: 0.2,
                infrastructure_changes: vec!["road_closure: River Bridge".into()],
                emergency_scenarios: Vec::new(),
                traffic_patterns: TrafficPatterns::RushHour,
                bus_count: None,
                car_count: None,
                budget_limit: None,
                implementation_time_months: None,
                new_roads: None,
                new_bridges: None,
                new_flyovers: None,
                signal_optimization: None,
                emergency_lanes: None,
                smart_traffic_lights: None,
            },
            duration_min: 30.0,
        }
    }

    #[tokio::test]
    async fn created_simulations_start_queued() {
        let store = testing::store();
        let simulation = store.create_simulation(request()).await;

        assert_eq!(simulation.status, SimulationStatus::Queued);
        assert_eq!(simulation.progress, 0.0);
        assert!(simulation.results.is_none());
        assert!(simulation.completed_at.is_none());
    }

    #[tokio::test]
    async fn run_completes_with_results_and_counters() {
        let store = testing::store();
        let simulation = store.create_simulation(request()).await;
        let runs_before = store.read().await.total_simulations_run;
        let active_before = store.read().await.active_simulations;

        let results = store.run_simulation(&simulation.id).await.unwrap();

        let state = store.read().await;
        let finished = state
            .traffic_simulations
            .iter()
            .find(|s| s.id == simulation.id)
            .unwrap();
        assert_eq!(finished.status, SimulationStatus::Completed);
        assert_eq!(finished.progress, 100.0);
        assert!(finished.completed_at.is_some());
        assert_eq!(finished.results.as_ref().unwrap(), &results);
        assert_eq!(state.total_simulations_run, runs_before + 1);
        assert_eq!(state.active_simulations, active_before);
        assert_eq!(state.simulation_results.as_ref().unwrap(), &results);
    }

    #[tokio::test]
    async fn results_exist_exactly_for_completed_simulations() {
        let store = testing::store();
        let simulation = store.create_simulation(request()).await;
        store.run_simulation(&simulation.id).await.unwrap();

        let state = store.read().await;
        for simulation in &state.traffic_simulations {
            assert_eq!(
                simulation.results.is_some(),
                simulation.status == SimulationStatus::Completed,
                "simulation {} violates the results/status invariant",
                simulation.id
            );
        }
    }

    #[tokio::test]
    async fn running_an_unknown_simulation_is_an_error() {
        let store = testing::store();
        let err = store.run_simulation("sim-nope").await.unwrap_err();
        assert!(matches!(err, StoreError::SimulationNotFound(_)));
    }

    #[tokio::test]
    async fn delete_clears_a_matching_selection() {
        let store = testing::store();
        let simulation = store.create_simulation(request()).await;
        store.select_simulation(Some(simulation.clone())).await;

        store.delete_simulation(&simulation.id).await;

        let state = store.read().await;
        assert!(state.selected_simulation.is_none());
        assert!(!state
            .traffic_simulations
            .iter()
            .any(|s| s.id == simulation.id));
    }

    #[tokio::test]
    async fn delete_keeps_an_unrelated_selection() {
        let store = testing::store();
        let keep = store.create_simulation(request()).await;
        let drop = store.create_simulation(request()).await;
        store.select_simulation(Some(keep.clone())).await;

        store.delete_simulation(&drop.id).await;
        let state = store.read().await;
        assert_eq!(state.selected_simulation.as_ref().unwrap().id, keep.id);
    }

    #[tokio::test]
    async fn progress_is_monotonic_and_capped_while_running() {
        // Scaled-down real latency so the ticker actually fires.
        let store = testing::store_with_latency(0.02);
        let simulation = store.create_simulation(request()).await;

        let runner = {
            let store = store.clone();
            let id = simulation.id.clone();
            tokio::spawn(async move { store.run_simulation(&id).await })
        };

        let mut last = 0.0f64;
        loop {
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
            let state = store.read().await;
            let current = state
                .traffic_simulations
                .iter()
                .find(|s| s.id == simulation.id)
                .unwrap();
            if current.status == SimulationStatus::Completed {
                assert_eq!(current.progress, 100.0);
                break;
            }
            assert!(current.progress >= last, "progress went backwards");
            assert!(current.progress <= 90.0, "progress exceeded 90 while running");
            last = current.progress;
        }

        runner.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn deleting_mid_flight_does_not_resurrect_the_simulation() {
        let store = testing::store_with_latency(0.01);
        let simulation = store.create_simulation(request()).await;
        let runs_before = store.read().await.total_simulations_run;

        let runner = {
            let store = store.clone();
            let id = simulation.id.clone();
            tokio::spawn(async move { store.run_simulation(&id).await })
        };

        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        store.delete_simulation(&simulation.id).await;

        // The delayed completion still resolves and settles the counters,
        // but must not recreate the deleted entry.
        runner.await.unwrap().unwrap();
        let state = store.read().await;
        assert!(!state
            .traffic_simulations
            .iter()
            .any(|s| s.id == simulation.id));
        assert_eq!(state.total_simulations_run, runs_before + 1);
    }

    #[tokio::test]
    async fn recommendations_follow_threshold_rules() {
        let mut results = draw_results();
        results.traffic_flow_metrics.congestion_reduction = 5.0;
        results.emergency_response_metrics.response_time_improvement = 5.0;
        assert_eq!(generate_recommendations(&results).len(), 2);

        results.traffic_flow_metrics.congestion_reduction = 30.0;
        results.emergency_response_metrics.response_time_improvement = 20.0;
        assert!(generate_recommendations(&results).is_empty());
    }

    #[tokio::test]
    async fn insights_trigger_on_widespread_heavy_congestion() {
        let store = testing::store();
        // Seed state has exactly two heavy routes, below the threshold.
        assert!(store.generate_analytics_insights().await.is_empty());

        store
            .update_route(2, |route| route.status = RouteStatus::Heavy)
            .await;
        let insights = store.generate_analytics_insights().await;
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].kind, InsightKind::Risk);
        // Derived insights are returned, not stored.
        let stored = store.read().await.analytics_insights.clone();
        assert!(stored.iter().all(|i| i.id != insights[0].id));
    }

    #[tokio::test]
    async fn acknowledged_insights_are_marked() {
        let store = testing::store();
        store.acknowledge_insight("insight-001").await;
        let state = store.read().await;
        let insight = state
            .analytics_insights
            .iter()
            .find(|i| i.id == "insight-001")
            .unwrap();
        assert!(insight.acknowledged);
    }

    #[tokio::test]
    async fn exported_simulation_data_round_trips() {
        let store = testing::store();
        let blob = store.export_simulation_data("sim-001").await.unwrap();
        let decoded: TrafficSimulation = serde_json::from_slice(&blob.bytes).unwrap();
        assert_eq!(decoded.id, "sim-001");
        assert!(decoded.results.is_some());
    }

    #[tokio::test]
    async fn predictive_models_are_looked_up_by_kind() {
        let store = testing::store();
        let model = store
            .get_predictive_model(PredictiveModelKind::CongestionForecast)
            .await
            .unwrap();
        assert_eq!(model.id, "model-001");
        assert!(store
            .get_predictive_model(PredictiveModelKind::EmissionForecast)
            .await
            .is_none());
    }
}
