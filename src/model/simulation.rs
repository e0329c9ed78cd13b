//! Infrastructure simulation and analytics entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::NamedPoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimulationKind {
    InfrastructureImpact,
    TrafficFlow,
    EmergencyResponse,
    MultimodalIntegration,
}

/// Simulation lifecycle.
///
/// Transitions are `Queued -> Running -> Completed`; there is no cancellation
/// once running. `Failed` exists for API completeness but no store path
/// currently produces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimulationStatus {
    Queued,
    Running,
    Completed,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleDensity {
    Low,
    Medium,
    High,
    Peak,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherConditions {
    Clear,
    Rain,
    Snow,
    Fog,
    Storm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrafficPatterns {
    Normal,
    Holiday,
    Event,
    Construction,
    RushHour,
    Weekend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmergencyScenarioKind {
    Accident,
    Medical,
    Fire,
    NaturalDisaster,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioSeverity {
    Minor,
    Major,
    Critical,
}

/// An emergency event injected into a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergencyScenario {
    pub id: String,
    pub kind: EmergencyScenarioKind,
    pub severity: ScenarioSeverity,
    pub location: NamedPoint,
    pub duration_min: f64,
    pub affected_radius_km: f64,
    pub vehicles_needed: u32,
}

/// Input configuration for a simulation run.
///
/// The enhanced infrastructure fields are optional knobs surfaced by the
/// infrastructure-impact scenario builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    /// Simulated duration in hours.
    pub time_horizon_hours: u32,
    pub vehicle_density: VehicleDensity,
    pub weather_conditions: WeatherConditions,
    /// 0.0-1.0.
    pub incident_probability: f64,
    pub infrastructure_changes: Vec<String>,
    pub emergency_scenarios: Vec<EmergencyScenario>,
    pub traffic_patterns: TrafficPatterns,
    #[serde(default)]
    pub bus_count: Option<u32>,
    #[serde(default)]
    pub car_count: Option<u32>,
    #[serde(default)]
    pub budget_limit: Option<f64>,
    #[serde(default)]
    pub implementation_time_months: Option<u32>,
    #[serde(default)]
    pub new_roads: Option<u32>,
    #[serde(default)]
    pub new_bridges: Option<u32>,
    #[serde(default)]
    pub new_flyovers: Option<u32>,
    #[serde(default)]
    pub signal_optimization: Option<bool>,
    #[serde(default)]
    pub emergency_lanes: Option<bool>,
    #[serde(default)]
    pub smart_traffic_lights: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficFlowMetrics {
    pub average_speed_kmh: f64,
    /// All of the following are percentages.
    pub congestion_reduction: f64,
    pub travel_time_reduction: f64,
    pub fuel_savings: f64,
    pub emission_reduction: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergencyResponseMetrics {
    pub average_response_time_min: f64,
    pub response_time_improvement: f64,
    pub successful_corridors: u32,
    pub signal_override_efficiency: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfrastructureImpact {
    pub cost_benefit_ratio: f64,
    pub roi_projection: f64,
    pub payback_period_years: f64,
    pub sustainability_score: f64,
    pub bus_system_efficiency: f64,
    pub vehicle_capacity_utilization: f64,
    pub road_network_improvement: f64,
    pub signal_system_optimization: f64,
    pub emergency_response_improvement: f64,
    pub air_quality_improvement: f64,
    pub noise_reduction: f64,
    /// Negative impact during the construction phase, 0-100.
    pub construction_impact: f64,
    pub public_transport_adoption: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationKind {
    Infrastructure,
    Policy,
    Technology,
    Operational,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationPriority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Timeframe {
    Immediate,
    ShortTerm,
    MediumTerm,
    LongTerm,
}

/// An actionable recommendation derived from simulation results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: String,
    pub kind: RecommendationKind,
    pub priority: RecommendationPriority,
    pub title: String,
    pub description: String,
    pub expected_benefit: String,
    /// Millions.
    pub implementation_cost: f64,
    pub timeframe: Timeframe,
    pub impact_areas: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub timestamp: DateTime<Utc>,
    pub metric: String,
    pub value: f64,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapPoint {
    pub lat: f64,
    pub lng: f64,
    pub intensity: f64,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteFlowPoint {
    pub route_id: u32,
    pub flow: f64,
    pub capacity: f64,
    pub utilization_rate: f64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBenefitPoint {
    pub year: u32,
    pub cost: f64,
    pub benefit: f64,
    pub cumulative_benefit: f64,
    pub roi: f64,
}

/// Chart-ready series attached to simulation results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VisualizationData {
    pub time_series_data: Vec<TimeSeriesPoint>,
    pub heatmap_data: Vec<HeatmapPoint>,
    pub route_flow_data: Vec<RouteFlowPoint>,
    pub cost_benefit_chart: Vec<CostBenefitPoint>,
}

/// Outcome of a completed simulation.
///
/// Every metric is an independent uniform draw; no cross-metric consistency
/// is enforced (ROI and payback period are unrelated draws).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResults {
    pub overall_score: f64,
    pub traffic_flow_metrics: TrafficFlowMetrics,
    pub emergency_response_metrics: EmergencyResponseMetrics,
    pub infrastructure_impact: InfrastructureImpact,
    pub recommendations: Vec<Recommendation>,
    pub visualization_data: VisualizationData,
}

/// A what-if simulation run.
///
/// `results` is populated exactly when `status` is `Completed`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficSimulation {
    pub id: String,
    pub name: String,
    pub description: String,
    pub simulation_type: SimulationKind,
    pub status: SimulationStatus,
    pub parameters: SimulationParameters,
    pub results: Option<SimulationResults>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    /// Wall-clock minutes the simulation has been given.
    pub duration_min: f64,
    /// 0-100; monotonically non-decreasing while running, capped at 90 until
    /// completion.
    pub progress: f64,
}

/// Creation payload for a simulation; the store assigns id, status, progress
/// and timestamps.
#[derive(Debug, Clone)]
pub struct SimulationRequest {
    pub name: String,
    pub description: String,
    pub simulation_type: SimulationKind,
    pub parameters: SimulationParameters,
    pub duration_min: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictiveModelKind {
    TrafficDemand,
    CongestionForecast,
    IncidentPrediction,
    EmissionForecast,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelStatus {
    Active,
    Training,
    Deprecated,
}

/// One input factor behind a model prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionFactor {
    pub name: String,
    /// -100 to 100.
    pub influence: f64,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelPrediction {
    pub id: String,
    /// e.g. "next_hour", "next_day".
    pub timeframe: String,
    /// 0.0-1.0.
    pub confidence: f64,
    pub predicted_value: f64,
    pub actual_value: Option<f64>,
    pub variance: f64,
    pub factors: Vec<PredictionFactor>,
    pub generated_at: DateTime<Utc>,
}

/// A trained forecasting model and its current predictions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictiveModel {
    pub id: String,
    pub name: String,
    pub kind: PredictiveModelKind,
    /// 0-100.
    pub accuracy: f64,
    pub last_training_date: DateTime<Utc>,
    pub predictions: Vec<ModelPrediction>,
    pub status: ModelStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Trend,
    Anomaly,
    Opportunity,
    Risk,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightSeverity {
    Low,
    Medium,
    High,
    Critical,
}

/// A detected pattern or anomaly surfaced to operators.
///
/// Only unacknowledged insights are persisted across restarts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsInsight {
    pub id: String,
    pub kind: InsightKind,
    pub severity: InsightSeverity,
    pub title: String,
    pub description: String,
    pub data: serde_json::Value,
    pub action_required: bool,
    pub related_recommendations: Vec<String>,
    pub detected_at: DateTime<Utc>,
    pub acknowledged: bool,
}
