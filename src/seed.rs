//! Seed data generators.
//!
//! Pure functions producing the initial population for every store
//! collection. No inputs, no side effects beyond returning a fresh
//! collection; invoked once at store construction and again by
//! `refresh_data` for the traffic-facing collections.

use chrono::{Duration, Utc};
use serde_json::json;

use crate::model::emergency::{
    CorridorSegment, CorridorStatus, EmergencyPriority, EmergencyStatus, EmergencyVehicle,
    EmergencyVehicleKind, PriorityCorridor, SignalPhase, TrafficSignal, VehiclePosition,
};
use crate::model::journey::{
    Availability, HubKind, LastMileKind, LastMileOption, NearbyStation, PriorityWeights,
    TransitHub, TransportMode, TransportModeKind, UserPreferences,
};
use crate::model::report::{
    ExportFormat, GeneratedReport, ReportData, ReportExportFormat, ReportFrequency, ReportKind,
    ReportMetadata, ReportSchedule, ReportSection, ReportSectionConfig, ReportStatus,
    ReportSummary, ReportTemplate, SectionKind, TimeRange,
};
use crate::model::route::{
    OptimizationAlgorithm, RouteCoordinates, RouteOptimization, RouteStatus, TrafficMetrics,
    TrafficPrediction, TrafficRoute, Trend, VehicleCount,
};
use crate::model::simulation::{
    AnalyticsInsight, EmergencyResponseMetrics, InfrastructureImpact, InsightKind,
    InsightSeverity, ModelPrediction, ModelStatus, PredictionFactor, PredictiveModel,
    PredictiveModelKind, Recommendation, RecommendationKind, RecommendationPriority,
    SimulationKind, SimulationParameters, SimulationResults, SimulationStatus, TrafficFlowMetrics,
    TrafficPatterns, TrafficSimulation, Timeframe, VehicleDensity, VisualizationData,
    WeatherConditions,
};
use crate::model::{LatLng, Level};

pub fn routes() -> Vec<TrafficRoute> {
    let now = Utc::now();
    vec![
        TrafficRoute {
            id: 1,
            name: "Main Street Corridor".into(),
            status: RouteStatus::Heavy,
            avg_speed_kmh: 15.0,
            congestion_level: 85,
            vehicles: 342,
            trend: Trend::Up,
            last_updated: now,
            coordinates: RouteCoordinates {
                start: LatLng { lat: 43.6532, lng: -79.3832 },
                end: LatLng { lat: 43.6612, lng: -79.3776 },
            },
            distance_km: 2.4,
            estimated_time_min: 18.0,
            alternative_routes: None,
            ai_score: 34.0,
            predicted_congestion: 78,
        },
        TrafficRoute {
            id: 2,
            name: "Highway 401 East".into(),
            status: RouteStatus::Moderate,
            avg_speed_kmh: 45.0,
            congestion_level: 60,
            vehicles: 567,
            trend: Trend::Down,
            last_updated: now,
            coordinates: RouteCoordinates {
                start: LatLng { lat: 43.6426, lng: -79.3871 },
                end: LatLng { lat: 43.6501, lng: -79.3470 },
            },
            distance_km: 8.7,
            estimated_time_min: 12.0,
            alternative_routes: None,
            ai_score: 72.0,
            predicted_congestion: 45,
        },
        TrafficRoute {
            id: 3,
            name: "Downtown Core".into(),
            status: RouteStatus::Light,
            avg_speed_kmh: 35.0,
            congestion_level: 25,
            vehicles: 123,
            trend: Trend::Stable,
            last_updated: now,
            coordinates: RouteCoordinates {
                start: LatLng { lat: 43.6481, lng: -79.3762 },
                end: LatLng { lat: 43.6534, lng: -79.3839 },
            },
            distance_km: 1.8,
            estimated_time_min: 6.0,
            alternative_routes: None,
            ai_score: 91.0,
            predicted_congestion: 28,
        },
        TrafficRoute {
            id: 4,
            name: "University Ave".into(),
            status: RouteStatus::Heavy,
            avg_speed_kmh: 12.0,
            congestion_level: 90,
            vehicles: 445,
            trend: Trend::Up,
            last_updated: now,
            coordinates: RouteCoordinates {
                start: LatLng { lat: 43.6629, lng: -79.3957 },
                end: LatLng { lat: 43.6476, lng: -79.3900 },
            },
            distance_km: 3.2,
            estimated_time_min: 22.0,
            alternative_routes: None,
            ai_score: 28.0,
            predicted_congestion: 85,
        },
    ]
}

pub fn emergency_vehicles() -> Vec<EmergencyVehicle> {
    let now = Utc::now();
    vec![
        EmergencyVehicle {
            id: 1,
            kind: EmergencyVehicleKind::Ambulance,
            route: "General Hospital → Downtown".into(),
            eta: "4 min".into(),
            priority: EmergencyPriority::High,
            coordinates: Some(LatLng { lat: 43.6547, lng: -79.3623 }),
            status: EmergencyStatus::Active,
            registration_number: "AMB-2047".into(),
            call_sign: "Rescue-07".into(),
            destination: "Downtown Emergency Center".into(),
            corridor_id: Some("corridor-001".into()),
            signal_overrides: 8,
            response_time_min: 3.2,
            registered_at: now - Duration::minutes(4),
        },
        EmergencyVehicle {
            id: 2,
            kind: EmergencyVehicleKind::Fire,
            route: "Station 12 → Industrial District".into(),
            eta: "7 min".into(),
            priority: EmergencyPriority::Critical,
            coordinates: Some(LatLng { lat: 43.6482, lng: -79.3401 }),
            status: EmergencyStatus::Active,
            registration_number: "FIRE-1204".into(),
            call_sign: "Engine-12".into(),
            destination: "Industrial Complex Building 7".into(),
            corridor_id: Some("corridor-002".into()),
            signal_overrides: 12,
            response_time_min: 5.8,
            registered_at: now - Duration::minutes(7),
        },
        EmergencyVehicle {
            id: 3,
            kind: EmergencyVehicleKind::Police,
            route: "HQ → University Campus".into(),
            eta: "12 min".into(),
            priority: EmergencyPriority::Medium,
            coordinates: Some(LatLng { lat: 43.6629, lng: -79.3957 }),
            status: EmergencyStatus::Active,
            registration_number: "POL-5589".into(),
            call_sign: "Unit-42".into(),
            destination: "University Campus Main Gate".into(),
            corridor_id: None,
            signal_overrides: 3,
            response_time_min: 8.5,
            registered_at: now - Duration::minutes(12),
        },
    ]
}

pub fn vehicle_counts() -> Vec<VehicleCount> {
    vec![
        VehicleCount { vehicle_type: "Cars".into(), count: 8534, icon: "Car".into(), percentage: 68 },
        VehicleCount { vehicle_type: "Trucks".into(), count: 1247, icon: "Truck".into(), percentage: 10 },
        VehicleCount { vehicle_type: "Buses".into(), count: 892, icon: "Bus".into(), percentage: 7 },
        VehicleCount { vehicle_type: "Bikes".into(), count: 1867, icon: "Bike".into(), percentage: 15 },
    ]
}

pub fn metrics() -> TrafficMetrics {
    TrafficMetrics {
        total_routes: 147,
        total_vehicles: 12540,
        avg_speed_kmh: 32.0,
        emergency_active: 3,
        signal_efficiency: 94.2,
        route_optimization: 87.5,
        emergency_response: 98.7,
        prediction_accuracy: 84.7,
    }
}

pub fn priority_corridors() -> Vec<PriorityCorridor> {
    let now = Utc::now();
    vec![
        PriorityCorridor {
            id: "corridor-001".into(),
            name: "Main Street Emergency Corridor".into(),
            emergency_vehicle_id: 1,
            status: CorridorStatus::Active,
            activated_at: now - Duration::minutes(4),
            estimated_clear_time: now + Duration::minutes(3),
            signals_controlled: 8,
            average_delay_secs: 15.2,
            segments: vec![
                CorridorSegment {
                    id: "seg-001".into(),
                    intersection_id: "int-main-01".into(),
                    signal_id: "sig-001".into(),
                    current_phase: SignalPhase::Green,
                    time_remaining_secs: 45,
                    is_overridden: true,
                    original_timing_secs: 60,
                    emergency_timing_secs: 90,
                    vehicle_position: VehiclePosition::Approaching,
                },
                CorridorSegment {
                    id: "seg-002".into(),
                    intersection_id: "int-main-02".into(),
                    signal_id: "sig-002".into(),
                    current_phase: SignalPhase::Red,
                    time_remaining_secs: 30,
                    is_overridden: false,
                    original_timing_secs: 30,
                    emergency_timing_secs: 15,
                    vehicle_position: VehiclePosition::Approaching,
                },
            ],
        },
        PriorityCorridor {
            id: "corridor-002".into(),
            name: "Industrial District Priority Route".into(),
            emergency_vehicle_id: 2,
            status: CorridorStatus::Active,
            activated_at: now - Duration::minutes(7),
            estimated_clear_time: now + Duration::minutes(2),
            signals_controlled: 12,
            average_delay_secs: 8.7,
            segments: vec![CorridorSegment {
                id: "seg-003".into(),
                intersection_id: "int-ind-01".into(),
                signal_id: "sig-003".into(),
                current_phase: SignalPhase::Green,
                time_remaining_secs: 60,
                is_overridden: true,
                original_timing_secs: 45,
                emergency_timing_secs: 75,
                vehicle_position: VehiclePosition::InIntersection,
            }],
        },
    ]
}

pub fn traffic_signals() -> Vec<TrafficSignal> {
    let now = Utc::now();
    vec![
        TrafficSignal {
            id: "sig-001".into(),
            intersection_name: "Main St & 1st Ave".into(),
            coordinates: LatLng { lat: 43.6532, lng: -79.3832 },
            current_phase: SignalPhase::Green,
            time_remaining_secs: 45,
            is_emergency_override: true,
            normal_cycle_secs: 120,
            emergency_cycle_secs: 180,
            last_override: Some(now - Duration::minutes(2)),
            override_count: 3,
        },
        TrafficSignal {
            id: "sig-002".into(),
            intersection_name: "Main St & 2nd Ave".into(),
            coordinates: LatLng { lat: 43.6542, lng: -79.3822 },
            current_phase: SignalPhase::Red,
            time_remaining_secs: 30,
            is_emergency_override: false,
            normal_cycle_secs: 90,
            emergency_cycle_secs: 120,
            last_override: Some(now - Duration::minutes(15)),
            override_count: 1,
        },
        TrafficSignal {
            id: "sig-003".into(),
            intersection_name: "Industrial Blvd & Factory St".into(),
            coordinates: LatLng { lat: 43.6482, lng: -79.3401 },
            current_phase: SignalPhase::Green,
            time_remaining_secs: 60,
            is_emergency_override: true,
            normal_cycle_secs: 100,
            emergency_cycle_secs: 150,
            last_override: Some(now - Duration::minutes(1)),
            override_count: 5,
        },
        TrafficSignal {
            id: "sig-004".into(),
            intersection_name: "University Ave & College St".into(),
            coordinates: LatLng { lat: 43.6629, lng: -79.3957 },
            current_phase: SignalPhase::Yellow,
            time_remaining_secs: 5,
            is_emergency_override: false,
            normal_cycle_secs: 110,
            emergency_cycle_secs: 110,
            last_override: None,
            override_count: 0,
        },
    ]
}

pub fn route_optimizations() -> Vec<RouteOptimization> {
    let now = Utc::now();
    vec![
        RouteOptimization {
            route_id: 1,
            algorithm: OptimizationAlgorithm::TrafficAware,
            optimization_score: 78.0,
            time_saved_min: 8.5,
            fuel_saved_l: 1.2,
            alternative_count: 3,
            last_optimized: now,
        },
        RouteOptimization {
            route_id: 2,
            algorithm: OptimizationAlgorithm::Dijkstra,
            optimization_score: 85.0,
            time_saved_min: 4.2,
            fuel_saved_l: 0.8,
            alternative_count: 2,
            last_optimized: now,
        },
    ]
}

pub fn traffic_predictions() -> Vec<TrafficPrediction> {
    vec![
        TrafficPrediction {
            route_id: 1,
            time_slot: "15:00-16:00".into(),
            predicted_congestion: 78,
            confidence: 0.89,
            factors: vec!["historical".into(), "events".into(), "weather".into()],
        },
        TrafficPrediction {
            route_id: 2,
            time_slot: "15:00-16:00".into(),
            predicted_congestion: 45,
            confidence: 0.92,
            factors: vec!["historical".into(), "traffic_patterns".into()],
        },
    ]
}

pub fn transport_modes() -> Vec<TransportMode> {
    vec![
        TransportMode {
            id: "car".into(),
            name: "Private Car".into(),
            kind: TransportModeKind::Car,
            icon: "Car".into(),
            color: "#3b82f6".into(),
            avg_speed_kmh: 35.0,
            cost_per_km: 0.50,
            carbon_g_per_km: 180.0,
            accessibility: Level::High,
            reliability: 85.0,
            comfort: 90.0,
            availability: Availability::Always,
        },
        TransportMode {
            id: "metro".into(),
            name: "Metro/Subway".into(),
            kind: TransportModeKind::Metro,
            icon: "Train".into(),
            color: "#10b981".into(),
            avg_speed_kmh: 45.0,
            cost_per_km: 0.15,
            carbon_g_per_km: 45.0,
            accessibility: Level::Medium,
            reliability: 95.0,
            comfort: 75.0,
            availability: Availability::Scheduled,
        },
        TransportMode {
            id: "bus".into(),
            name: "City Bus".into(),
            kind: TransportModeKind::Bus,
            icon: "Bus".into(),
            color: "#f59e0b".into(),
            avg_speed_kmh: 25.0,
            cost_per_km: 0.10,
            carbon_g_per_km: 60.0,
            accessibility: Level::High,
            reliability: 78.0,
            comfort: 60.0,
            availability: Availability::Scheduled,
        },
        TransportMode {
            id: "bike".into(),
            name: "Bicycle".into(),
            kind: TransportModeKind::Bike,
            icon: "Bike".into(),
            color: "#84cc16".into(),
            avg_speed_kmh: 18.0,
            cost_per_km: 0.02,
            carbon_g_per_km: 0.0,
            accessibility: Level::Medium,
            reliability: 90.0,
            comfort: 50.0,
            availability: Availability::Always,
        },
        TransportMode {
            id: "walk".into(),
            name: "Walking".into(),
            kind: TransportModeKind::Walk,
            icon: "PersonStanding".into(),
            color: "#8b5cf6".into(),
            avg_speed_kmh: 5.0,
            cost_per_km: 0.0,
            carbon_g_per_km: 0.0,
            accessibility: Level::High,
            reliability: 100.0,
            comfort: 40.0,
            availability: Availability::Always,
        },
        TransportMode {
            id: "scooter".into(),
            name: "E-Scooter".into(),
            kind: TransportModeKind::Scooter,
            icon: "Zap".into(),
            color: "#ec4899".into(),
            avg_speed_kmh: 20.0,
            cost_per_km: 0.25,
            carbon_g_per_km: 15.0,
            accessibility: Level::Medium,
            reliability: 82.0,
            comfort: 65.0,
            availability: Availability::OnDemand,
        },
        TransportMode {
            id: "rickshaw".into(),
            name: "Auto Rickshaw".into(),
            kind: TransportModeKind::Rickshaw,
            icon: "Car".into(),
            color: "#f97316".into(),
            avg_speed_kmh: 28.0,
            cost_per_km: 0.35,
            carbon_g_per_km: 95.0,
            accessibility: Level::High,
            reliability: 75.0,
            comfort: 55.0,
            availability: Availability::OnDemand,
        },
    ]
}

pub fn last_mile_options() -> Vec<LastMileOption> {
    vec![
        LastMileOption {
            id: "bike_share".into(),
            name: "Bike Share".into(),
            kind: LastMileKind::BikeShare,
            nearby_stations: vec![
                NearbyStation { name: "Central Station Hub".into(), distance_km: 0.2, available: 15 },
                NearbyStation { name: "University Plaza".into(), distance_km: 0.4, available: 8 },
                NearbyStation { name: "City Park North".into(), distance_km: 0.6, available: 12 },
            ],
            cost_per_minute: 0.15,
            max_distance_km: 5.0,
            availability: Level::High,
            icon: "Bike".into(),
            color: "#84cc16".into(),
        },
        LastMileOption {
            id: "scooter_share".into(),
            name: "E-Scooter Share".into(),
            kind: LastMileKind::ScooterShare,
            nearby_stations: vec![
                NearbyStation { name: "Metro Exit A".into(), distance_km: 0.1, available: 6 },
                NearbyStation { name: "Shopping District".into(), distance_km: 0.3, available: 4 },
                NearbyStation { name: "Business Tower".into(), distance_km: 0.5, available: 9 },
            ],
            cost_per_minute: 0.25,
            max_distance_km: 8.0,
            availability: Level::Medium,
            icon: "Zap".into(),
            color: "#ec4899".into(),
        },
        LastMileOption {
            id: "auto_rickshaw".into(),
            name: "Auto Rickshaw".into(),
            kind: LastMileKind::AutoRickshaw,
            nearby_stations: vec![
                NearbyStation { name: "Main Terminal".into(), distance_km: 0.15, available: 3 },
                NearbyStation { name: "Market Square".into(), distance_km: 0.35, available: 5 },
            ],
            cost_per_minute: 0.40,
            max_distance_km: 12.0,
            availability: Level::High,
            icon: "Car".into(),
            color: "#f97316".into(),
        },
        LastMileOption {
            id: "shuttle".into(),
            name: "Shuttle Service".into(),
            kind: LastMileKind::Shuttle,
            nearby_stations: vec![
                NearbyStation { name: "Transit Hub A".into(), distance_km: 0.1, available: 2 },
                NearbyStation { name: "Corporate Campus".into(), distance_km: 0.8, available: 1 },
            ],
            cost_per_minute: 0.20,
            max_distance_km: 15.0,
            availability: Level::Low,
            icon: "Bus".into(),
            color: "#6366f1".into(),
        },
    ]
}

pub fn transit_hubs() -> Vec<TransitHub> {
    let options = last_mile_options();
    vec![
        TransitHub {
            id: "hub-001".into(),
            name: "Central Transit Hub".into(),
            kind: HubKind::IntegratedHub,
            coordinates: LatLng { lat: 43.6532, lng: -79.3832 },
            connected_modes: vec!["metro".into(), "bus".into(), "bike".into(), "rickshaw".into()],
            last_mile_options: options.clone(),
            facilities: vec![
                "parking".into(),
                "restroom".into(),
                "food".into(),
                "wifi".into(),
                "accessibility".into(),
            ],
            accessibility: true,
            peak_hour_crowding: Level::High,
            average_wait_min: 8.0,
        },
        TransitHub {
            id: "hub-002".into(),
            name: "University Metro Station".into(),
            kind: HubKind::MetroStation,
            coordinates: LatLng { lat: 43.6629, lng: -79.3957 },
            connected_modes: vec!["metro".into(), "bus".into(), "bike".into()],
            last_mile_options: options[..2].to_vec(),
            facilities: vec!["restroom".into(), "wifi".into(), "accessibility".into()],
            accessibility: true,
            peak_hour_crowding: Level::Medium,
            average_wait_min: 5.0,
        },
        TransitHub {
            id: "hub-003".into(),
            name: "Industrial District Terminal".into(),
            kind: HubKind::BusStop,
            coordinates: LatLng { lat: 43.6482, lng: -79.3401 },
            connected_modes: vec!["bus".into(), "rickshaw".into()],
            last_mile_options: options[2..].to_vec(),
            facilities: vec!["restroom".into()],
            accessibility: false,
            peak_hour_crowding: Level::Low,
            average_wait_min: 12.0,
        },
    ]
}

pub fn user_preferences() -> UserPreferences {
    UserPreferences {
        preferred_modes: vec!["metro".into(), "bus".into(), "bike".into()],
        max_walking_km: 1.0,
        max_transfers: 2,
        priority_weights: PriorityWeights { time: 40.0, cost: 25.0, comfort: 20.0, sustainability: 15.0 },
        accessibility_needs: vec!["wheelchair_accessible".into(), "audio_announcements".into()],
        budget_constraint: Some(5.00),
        avoid_modes: vec!["rickshaw".into()],
    }
}

fn default_parameters() -> SimulationParameters {
    SimulationParameters {
        time_horizon_hours: 24,
        vehicle_density: VehicleDensity::High,
        weather_conditions: WeatherConditions::Clear,
        incident_probability: 0.15,
        infrastructure_changes: Vec::new(),
        emergency_scenarios: Vec::new(),
        traffic_patterns: TrafficPatterns::Normal,
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
    }
}

pub fn simulations() -> Vec<TrafficSimulation> {
    let now = Utc::now();
    vec![
        TrafficSimulation {
            id: "sim-001".into(),
            name: "Highway 401 Lane Expansion Impact".into(),
            description: "Analyzing the impact of adding two lanes to Highway 401 between Yonge and DVP".into(),
            simulation_type: SimulationKind::InfrastructureImpact,
            status: SimulationStatus::Completed,
            parameters: SimulationParameters {
                infrastructure_changes: vec![
                    "lane_expansion: Add 2 additional lanes in each direction on Highway 401".into(),
                ],
                ..default_parameters()
            },
            results: Some(SimulationResults {
                overall_score: 78.0,
                traffic_flow_metrics: TrafficFlowMetrics {
                    average_speed_kmh: 65.0,
                    congestion_reduction: 35.0,
                    travel_time_reduction: 28.0,
                    fuel_savings: 18.0,
                    emission_reduction: 22.0,
                },
                emergency_response_metrics: EmergencyResponseMetrics {
                    average_response_time_min: 8.5,
                    response_time_improvement: 15.0,
                    successful_corridors: 45,
                    signal_override_efficiency: 87.0,
                },
                infrastructure_impact: InfrastructureImpact {
                    cost_benefit_ratio: 2.3,
                    roi_projection: 130.0,
                    payback_period_years: 8.5,
                    sustainability_score: 72.0,
                    bus_system_efficiency: 85.0,
                    vehicle_capacity_utilization: 78.0,
                    road_network_improvement: 65.0,
                    signal_system_optimization: 72.0,
                    emergency_response_improvement: 45.0,
                    air_quality_improvement: 28.0,
                    noise_reduction: 15.0,
                    construction_impact: 35.0,
                    public_transport_adoption: 22.0,
                },
                recommendations: vec![Recommendation {
                    id: "rec-001".into(),
                    kind: RecommendationKind::Infrastructure,
                    priority: RecommendationPriority::High,
                    title: "Implement Smart Traffic Signals".into(),
                    description: "Deploy AI-powered traffic signals to optimize flow during construction".into(),
                    expected_benefit: "15% additional congestion reduction".into(),
                    implementation_cost: 8.5,
                    timeframe: Timeframe::ShortTerm,
                    impact_areas: vec!["traffic_flow".into(), "emergency_response".into()],
                }],
                visualization_data: VisualizationData::default(),
            }),
            created_at: now - Duration::days(2),
            completed_at: Some(now - Duration::days(1)),
            duration_min: 45.0,
            progress: 100.0,
        },
        TrafficSimulation {
            id: "sim-002".into(),
            name: "Multi-Modal Integration Study".into(),
            description: "Evaluating the impact of integrated transit hubs on overall traffic flow".into(),
            simulation_type: SimulationKind::MultimodalIntegration,
            status: SimulationStatus::Running,
            parameters: SimulationParameters {
                time_horizon_hours: 48,
                vehicle_density: VehicleDensity::Medium,
                incident_probability: 0.10,
                ..default_parameters()
            },
            results: None,
            created_at: now,
            completed_at: None,
            duration_min: 0.0,
            progress: 65.0,
        },
    ]
}

pub fn predictive_models() -> Vec<PredictiveModel> {
    let now = Utc::now();
    vec![
        PredictiveModel {
            id: "model-001".into(),
            name: "Rush Hour Congestion Predictor".into(),
            kind: PredictiveModelKind::CongestionForecast,
            accuracy: 87.0,
            last_training_date: now - Duration::days(5),
            predictions: vec![ModelPrediction {
                id: "pred-001".into(),
                timeframe: "next_hour".into(),
                confidence: 0.89,
                predicted_value: 75.0,
                actual_value: None,
                variance: 8.5,
                factors: vec![
                    PredictionFactor {
                        name: "Historical Pattern".into(),
                        influence: 45.0,
                        description: "Based on 6-month traffic data".into(),
                    },
                    PredictionFactor {
                        name: "Weather Conditions".into(),
                        influence: 25.0,
                        description: "Clear weather expected".into(),
                    },
                    PredictionFactor {
                        name: "Event Schedule".into(),
                        influence: 20.0,
                        description: "No major events scheduled".into(),
                    },
                    PredictionFactor {
                        name: "Construction Activity".into(),
                        influence: 10.0,
                        description: "Minor lane restrictions".into(),
                    },
                ],
                generated_at: now,
            }],
            status: ModelStatus::Active,
        },
        PredictiveModel {
            id: "model-002".into(),
            name: "Emergency Response Optimizer".into(),
            kind: PredictiveModelKind::IncidentPrediction,
            accuracy: 92.0,
            last_training_date: now - Duration::days(7),
            predictions: vec![ModelPrediction {
                id: "pred-002".into(),
                timeframe: "next_day".into(),
                confidence: 0.93,
                predicted_value: 3.0,
                actual_value: None,
                variance: 1.2,
                factors: vec![
                    PredictionFactor {
                        name: "Traffic Volume".into(),
                        influence: 35.0,
                        description: "High volume increases incident probability".into(),
                    },
                    PredictionFactor {
                        name: "Weather Forecast".into(),
                        influence: 30.0,
                        description: "Rain expected in afternoon".into(),
                    },
                    PredictionFactor {
                        name: "Day of Week".into(),
                        influence: 20.0,
                        description: "Friday has higher incident rates".into(),
                    },
                    PredictionFactor {
                        name: "Road Conditions".into(),
                        influence: 15.0,
                        description: "Construction zones present".into(),
                    },
                ],
                generated_at: now,
            }],
            status: ModelStatus::Active,
        },
    ]
}

pub fn analytics_insights() -> Vec<AnalyticsInsight> {
    let now = Utc::now();
    vec![
        AnalyticsInsight {
            id: "insight-001".into(),
            kind: InsightKind::Opportunity,
            severity: InsightSeverity::High,
            title: "Signal Timing Optimization Opportunity".into(),
            description: "Main Street Corridor could benefit from 23% reduction in wait times through optimized signal timing".into(),
            data: json!({ "affected_routes": [1], "potential_time_saving": 5.2, "implementation_cost": 15000 }),
            action_required: true,
            related_recommendations: vec!["rec-001".into()],
            detected_at: now,
            acknowledged: false,
        },
        AnalyticsInsight {
            id: "insight-002".into(),
            kind: InsightKind::Trend,
            severity: InsightSeverity::Medium,
            title: "Increasing Multi-Modal Usage".into(),
            description: "Metro + bike combinations increased by 34% over the past month, indicating successful integration".into(),
            data: json!({ "growth_rate": 0.34, "popular_combinations": ["metro+bike", "bus+scooter"] }),
            action_required: false,
            related_recommendations: Vec::new(),
            detected_at: now - Duration::days(1),
            acknowledged: true,
        },
        AnalyticsInsight {
            id: "insight-003".into(),
            kind: InsightKind::Anomaly,
            severity: InsightSeverity::Critical,
            title: "Unusual Emergency Response Times".into(),
            description: "Response times in downtown core increased by 40% in the last 48 hours".into(),
            data: json!({
                "average_increase": 0.40,
                "affected_area": "downtown_core",
                "possible_causes": ["construction", "signal_malfunction"]
            }),
            action_required: true,
            related_recommendations: vec!["rec-002".into()],
            detected_at: now - Duration::hours(2),
            acknowledged: false,
        },
    ]
}

pub fn report_templates() -> Vec<ReportTemplate> {
    let now = Utc::now();
    vec![
        ReportTemplate {
            id: "template-1".into(),
            name: "Daily Traffic Summary".into(),
            description: "Comprehensive daily overview of traffic conditions, incidents, and key metrics".into(),
            kind: ReportKind::TrafficSummary,
            sections: vec![
                ReportSection {
                    id: "section-1".into(),
                    name: "Executive Summary".into(),
                    kind: SectionKind::Metrics,
                    config: ReportSectionConfig {
                        title: "Key Performance Indicators".into(),
                        include_metrics: vec![
                            "total_vehicles".into(),
                            "avg_speed".into(),
                            "congestion_level".into(),
                            "incidents".into(),
                        ],
                        include_time_range: true,
                        ..Default::default()
                    },
                    order: 1,
                    enabled: true,
                },
                ReportSection {
                    id: "section-2".into(),
                    name: "Traffic Flow Analysis".into(),
                    kind: SectionKind::Charts,
                    config: ReportSectionConfig {
                        title: "Traffic Flow Trends".into(),
                        include_charts: vec![
                            "hourly_traffic".into(),
                            "route_utilization".into(),
                            "speed_analysis".into(),
                        ],
                        chart_types: vec!["line".into(), "bar".into(), "area".into()],
                        ..Default::default()
                    },
                    order: 2,
                    enabled: true,
                },
                ReportSection {
                    id: "section-3".into(),
                    name: "Route Performance".into(),
                    kind: SectionKind::Tables,
                    config: ReportSectionConfig {
                        title: "Route Performance Metrics".into(),
                        include_metrics: vec![
                            "route_speeds".into(),
                            "congestion_levels".into(),
                            "vehicle_counts".into(),
                        ],
                        ..Default::default()
                    },
                    order: 3,
                    enabled: true,
                },
            ],
            is_default: true,
            created_at: now - Duration::days(30),
            last_used: Some(now - Duration::days(1)),
        },
        ReportTemplate {
            id: "template-2".into(),
            name: "Emergency Response Analysis".into(),
            description: "Detailed analysis of emergency vehicle responses and priority corridor effectiveness".into(),
            kind: ReportKind::EmergencyResponse,
            sections: vec![
                ReportSection {
                    id: "section-1".into(),
                    name: "Response Times".into(),
                    kind: SectionKind::Metrics,
                    config: ReportSectionConfig {
                        title: "Emergency Response Metrics".into(),
                        include_metrics: vec![
                            "avg_response_time".into(),
                            "total_responses".into(),
                            "priority_activations".into(),
                        ],
                        include_time_range: true,
                        ..Default::default()
                    },
                    order: 1,
                    enabled: true,
                },
                ReportSection {
                    id: "section-2".into(),
                    name: "Corridor Performance".into(),
                    kind: SectionKind::Charts,
                    config: ReportSectionConfig {
                        title: "Priority Corridor Analysis".into(),
                        include_charts: vec![
                            "response_times".into(),
                            "corridor_usage".into(),
                            "signal_overrides".into(),
                        ],
                        chart_types: vec!["line".into(), "bar".into()],
                        ..Default::default()
                    },
                    order: 2,
                    enabled: true,
                },
            ],
            is_default: false,
            created_at: now - Duration::days(15),
            last_used: None,
        },
        ReportTemplate {
            id: "template-3".into(),
            name: "Simulation Results Report".into(),
            description: "Comprehensive analysis of traffic simulation results and infrastructure impact".into(),
            kind: ReportKind::SimulationResults,
            sections: vec![ReportSection {
                id: "section-1".into(),
                name: "Simulation Overview".into(),
                kind: SectionKind::SimulationResults,
                config: ReportSectionConfig {
                    title: "Simulation Parameters and Results".into(),
                    include_metrics: vec![
                        "scenario_comparison".into(),
                        "impact_analysis".into(),
                        "cost_benefit".into(),
                    ],
                    ..Default::default()
                },
                order: 1,
                enabled: true,
            }],
            is_default: false,
            created_at: now - Duration::days(7),
            last_used: None,
        },
    ]
}

pub fn generated_reports() -> Vec<GeneratedReport> {
    let now = Utc::now();
    vec![
        GeneratedReport {
            id: "report-1".into(),
            template_id: "template-1".into(),
            name: "Daily Traffic Summary - Latest".into(),
            kind: ReportKind::TrafficSummary,
            generated_at: now - Duration::hours(1),
            time_range: TimeRange { start: now - Duration::days(1), end: now },
            data: ReportData {
                summary: ReportSummary {
                    total_routes: 15,
                    avg_traffic_flow: 312.0,
                    emergency_responses: 8,
                    simulations_run: 3,
                    key_metrics: [
                        ("peak_congestion".to_string(), 78.0),
                        ("avg_speed".to_string(), 35.0),
                        ("total_vehicles".to_string(), 15420.0),
                        ("incidents".to_string(), 12.0),
                    ]
                    .into(),
                    periodic_comparison: [
                        ("traffic_change".to_string(), 12.5),
                        ("speed_change".to_string(), -8.2),
                        ("incidents_change".to_string(), -15.3),
                    ]
                    .into(),
                },
                sections: Vec::new(),
                charts: Vec::new(),
                tables: Vec::new(),
                insights: Vec::new(),
                recommendations: Vec::new(),
            },
            metadata: ReportMetadata {
                generated_by: "TrafficFlow Pro System".into(),
                version: "1.0.0".into(),
                total_pages: 8,
                data_points: 2840,
                processing_time_secs: 3.2,
                file_size_mb: Some(1.8),
            },
            status: ReportStatus::Completed,
            export_formats: vec![
                ReportExportFormat {
                    format: ExportFormat::Pdf,
                    available: true,
                    url: None,
                    download_count: 3,
                    last_downloaded: Some(now - Duration::minutes(30)),
                },
                ReportExportFormat {
                    format: ExportFormat::Excel,
                    available: true,
                    url: None,
                    download_count: 1,
                    last_downloaded: None,
                },
            ],
        },
        GeneratedReport {
            id: "report-2".into(),
            template_id: "template-2".into(),
            name: "Emergency Response Analysis - Last Week".into(),
            kind: ReportKind::EmergencyResponse,
            generated_at: now - Duration::days(2),
            time_range: TimeRange { start: now - Duration::days(7), end: now - Duration::days(1) },
            data: ReportData {
                summary: ReportSummary {
                    total_routes: 0,
                    avg_traffic_flow: 0.0,
                    emergency_responses: 45,
                    simulations_run: 0,
                    key_metrics: [
                        ("avg_response_time".to_string(), 4.8),
                        ("corridors_activated".to_string(), 23.0),
                        ("signal_overrides".to_string(), 156.0),
                        ("success_rate".to_string(), 94.2),
                    ]
                    .into(),
                    periodic_comparison: [
                        ("response_time_change".to_string(), -12.8),
                        ("corridors_change".to_string(), 18.5),
                    ]
                    .into(),
                },
                sections: Vec::new(),
                charts: Vec::new(),
                tables: Vec::new(),
                insights: Vec::new(),
                recommendations: Vec::new(),
            },
            metadata: ReportMetadata {
                generated_by: "TrafficFlow Pro System".into(),
                version: "1.0.0".into(),
                total_pages: 6,
                data_points: 1250,
                processing_time_secs: 2.1,
                file_size_mb: Some(1.2),
            },
            status: ReportStatus::Completed,
            export_formats: vec![ReportExportFormat {
                format: ExportFormat::Pdf,
                available: true,
                url: None,
                download_count: 2,
                last_downloaded: None,
            }],
        },
    ]
}

pub fn report_schedules() -> Vec<ReportSchedule> {
    let now = Utc::now();
    vec![
        ReportSchedule {
            id: "schedule-1".into(),
            template_id: "template-1".into(),
            name: "Daily Traffic Summary - Auto Generated".into(),
            frequency: ReportFrequency::Daily,
            day_of_week: None,
            day_of_month: None,
            time: "06:00".into(),
            recipients: vec![
                "traffic.manager@city.gov".into(),
                "operations@trafficflow.pro".into(),
            ],
            is_active: true,
            next_run_date: now + Duration::days(1),
            last_run_date: Some(now - Duration::hours(1)),
            created_at: now - Duration::days(30),
        },
        ReportSchedule {
            id: "schedule-2".into(),
            template_id: "template-2".into(),
            name: "Weekly Emergency Response Report".into(),
            frequency: ReportFrequency::Weekly,
            day_of_week: Some(1),
            day_of_month: None,
            time: "08:00".into(),
            recipients: vec!["emergency.coordinator@city.gov".into()],
            is_active: true,
            next_run_date: now + Duration::days(2),
            last_run_date: Some(now - Duration::days(5)),
            created_at: now - Duration::days(60),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_simulation_results_match_status() {
        for sim in simulations() {
            assert_eq!(
                sim.results.is_some(),
                sim.status == SimulationStatus::Completed,
                "simulation {} violates the results/status invariant",
                sim.id
            );
        }
    }

    #[test]
    fn seeded_corridors_reference_seeded_vehicles() {
        let vehicles = emergency_vehicles();
        for corridor in priority_corridors() {
            assert!(
                vehicles.iter().any(|v| v.id == corridor.emergency_vehicle_id),
                "corridor {} references unknown vehicle",
                corridor.id
            );
        }
    }

    #[test]
    fn transit_hubs_connect_known_modes() {
        let modes = transport_modes();
        for hub in transit_hubs() {
            for mode_id in &hub.connected_modes {
                assert!(modes.iter().any(|m| &m.id == mode_id));
            }
        }
    }
}
