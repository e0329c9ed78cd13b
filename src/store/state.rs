//! The full in-memory state owned by the store.

use chrono::{DateTime, Utc};

use crate::model::emergency::{EmergencyVehicle, PriorityCorridor, TrafficSignal};
use crate::model::journey::{
    LastMileOption, MultiModalJourney, TransitHub, TransportMode, UserPreferences,
};
use crate::model::report::{GeneratedReport, ReportSchedule, ReportTemplate};
use crate::model::route::{
    RouteOptimization, TrafficMetrics, TrafficPrediction, TrafficRoute, VehicleCount,
};
use crate::model::simulation::{
    AnalyticsInsight, PredictiveModel, SimulationResults, TrafficSimulation,
};
use crate::seed;

/// Single source of truth for every domain collection plus the activity
/// flags the dashboard renders.
///
/// The store owns all of it exclusively; views only ever see clones.
#[derive(Debug, Clone)]
pub struct TrafficState {
    // Route dashboard
    pub routes: Vec<TrafficRoute>,
    pub emergency_vehicles: Vec<EmergencyVehicle>,
    pub vehicle_counts: Vec<VehicleCount>,
    pub metrics: TrafficMetrics,

    // Route optimization
    pub route_optimizations: Vec<RouteOptimization>,
    pub traffic_predictions: Vec<TrafficPrediction>,
    pub selected_route: Option<TrafficRoute>,

    // Emergency priority system
    pub priority_corridors: Vec<PriorityCorridor>,
    pub traffic_signals: Vec<TrafficSignal>,
    pub active_emergency_responses: u32,
    pub total_signal_overrides: u32,
    pub average_response_time_min: f64,

    // Multi-modal journey planning
    pub transport_modes: Vec<TransportMode>,
    pub multi_modal_journeys: Vec<MultiModalJourney>,
    pub user_preferences: UserPreferences,
    pub last_mile_options: Vec<LastMileOption>,
    pub transit_hubs: Vec<TransitHub>,
    pub selected_journey: Option<MultiModalJourney>,
    pub journey_planning_active: bool,

    // Simulation and analytics
    pub traffic_simulations: Vec<TrafficSimulation>,
    pub predictive_models: Vec<PredictiveModel>,
    pub analytics_insights: Vec<AnalyticsInsight>,
    pub selected_simulation: Option<TrafficSimulation>,
    pub simulation_results: Option<SimulationResults>,
    pub active_simulations: u32,
    pub total_simulations_run: u32,

    // Report generation
    pub report_templates: Vec<ReportTemplate>,
    pub generated_reports: Vec<GeneratedReport>,
    pub report_schedules: Vec<ReportSchedule>,
    pub selected_report: Option<GeneratedReport>,
    pub is_generating_report: bool,

    // Activity flags
    pub is_loading: bool,
    pub is_optimizing: bool,
    pub is_simulating: bool,
    pub last_updated: Option<DateTime<Utc>>,
}

impl TrafficState {
    /// Fresh state populated from the seed generators.
    pub fn seeded() -> Self {
        Self {
            routes: seed::routes(),
            emergency_vehicles: seed::emergency_vehicles(),
            vehicle_counts: seed::vehicle_counts(),
            metrics: seed::metrics(),
            route_optimizations: seed::route_optimizations(),
            traffic_predictions: seed::traffic_predictions(),
            selected_route: None,
            priority_corridors: seed::priority_corridors(),
            traffic_signals: seed::traffic_signals(),
            active_emergency_responses: 3,
            total_signal_overrides: 23,
            average_response_time_min: 5.8,
            transport_modes: seed::transport_modes(),
            multi_modal_journeys: Vec::new(),
            user_preferences: seed::user_preferences(),
            last_mile_options: seed::last_mile_options(),
            transit_hubs: seed::transit_hubs(),
            selected_journey: None,
            journey_planning_active: false,
            traffic_simulations: seed::simulations(),
            predictive_models: seed::predictive_models(),
            analytics_insights: seed::analytics_insights(),
            selected_simulation: None,
            simulation_results: None,
            active_simulations: 1,
            total_simulations_run: 7,
            report_templates: seed::report_templates(),
            generated_reports: seed::generated_reports(),
            report_schedules: seed::report_schedules(),
            selected_report: None,
            is_generating_report: false,
            is_loading: false,
            is_optimizing: false,
            is_simulating: false,
            last_updated: Some(Utc::now()),
        }
    }
}
