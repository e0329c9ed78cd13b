//! Report generation entities: templates, generated reports, export formats
//! and schedules.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::simulation::{AnalyticsInsight, Recommendation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    TrafficSummary,
    EmergencyResponse,
    RouteOptimization,
    SimulationResults,
    Comprehensive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Charts,
    Tables,
    Metrics,
    Text,
    SimulationResults,
}

/// Per-section rendering configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportSectionConfig {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub include_charts: Vec<String>,
    #[serde(default)]
    pub include_metrics: Vec<String>,
    #[serde(default)]
    pub include_time_range: bool,
    #[serde(default)]
    pub custom_content: Option<String>,
    #[serde(default)]
    pub chart_types: Vec<String>,
    #[serde(default)]
    pub data_filters: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSection {
    pub id: String,
    pub name: String,
    pub kind: SectionKind,
    pub config: ReportSectionConfig,
    pub order: u32,
    pub enabled: bool,
}

/// A reusable report layout.
///
/// At most one template per kind is intended to carry `is_default`, though
/// nothing enforces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportTemplate {
    pub id: String,
    pub name: String,
    pub description: String,
    pub kind: ReportKind,
    pub sections: Vec<ReportSection>,
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
    pub last_used: Option<DateTime<Utc>>,
}

/// Creation payload for a template; the store assigns id and creation time.
#[derive(Debug, Clone)]
pub struct TemplateRequest {
    pub name: String,
    pub description: String,
    pub kind: ReportKind,
    pub sections: Vec<ReportSection>,
    pub is_default: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Generating,
    Completed,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Headline numbers of a generated report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_routes: u32,
    pub avg_traffic_flow: f64,
    pub emergency_responses: u32,
    pub simulations_run: u32,
    pub key_metrics: HashMap<String, f64>,
    pub periodic_comparison: HashMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSectionData {
    pub section_id: String,
    pub title: String,
    pub content: serde_json::Value,
    pub charts: Vec<ChartData>,
    pub tables: Vec<TableData>,
    pub insights: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
    Pie,
    Area,
    Scatter,
    Heatmap,
}

/// Chart payload; `data` points are format-free JSON objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub id: String,
    pub kind: ChartKind,
    pub title: String,
    pub data: Vec<serde_json::Value>,
    pub config: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableData {
    pub id: String,
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    #[serde(default)]
    pub summary: Option<HashMap<String, serde_json::Value>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportData {
    pub summary: ReportSummary,
    pub sections: Vec<ReportSectionData>,
    pub charts: Vec<ChartData>,
    pub tables: Vec<TableData>,
    pub insights: Vec<AnalyticsInsight>,
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_by: String,
    pub version: String,
    pub total_pages: u32,
    pub data_points: u32,
    pub processing_time_secs: f64,
    pub file_size_mb: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Pdf,
    Excel,
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Excel => "excel",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// Availability and download bookkeeping for one export format of a report.
///
/// `download_count` only increases, once per successful export call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportExportFormat {
    pub format: ExportFormat,
    pub available: bool,
    #[serde(default)]
    pub url: Option<String>,
    pub download_count: u32,
    #[serde(default)]
    pub last_downloaded: Option<DateTime<Utc>>,
}

impl ReportExportFormat {
    pub fn new(format: ExportFormat) -> Self {
        Self {
            format,
            available: true,
            url: None,
            download_count: 0,
            last_downloaded: None,
        }
    }
}

/// A finished report produced from a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedReport {
    pub id: String,
    pub template_id: String,
    pub name: String,
    pub kind: ReportKind,
    pub generated_at: DateTime<Utc>,
    pub time_range: TimeRange,
    pub data: ReportData,
    pub metadata: ReportMetadata,
    pub status: ReportStatus,
    pub export_formats: Vec<ReportExportFormat>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFrequency {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
}

/// A recurring report generation schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSchedule {
    pub id: String,
    pub template_id: String,
    pub name: String,
    pub frequency: ReportFrequency,
    /// 0 = Sunday; only meaningful for weekly schedules.
    #[serde(default)]
    pub day_of_week: Option<u8>,
    /// Only meaningful for monthly/quarterly schedules.
    #[serde(default)]
    pub day_of_month: Option<u8>,
    /// Local wall-clock time, "HH:MM".
    pub time: String,
    pub recipients: Vec<String>,
    pub is_active: bool,
    pub next_run_date: DateTime<Utc>,
    #[serde(default)]
    pub last_run_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Creation payload for a schedule; the store assigns id and creation time.
#[derive(Debug, Clone)]
pub struct ScheduleRequest {
    pub template_id: String,
    pub name: String,
    pub frequency: ReportFrequency,
    pub day_of_week: Option<u8>,
    pub day_of_month: Option<u8>,
    pub time: String,
    pub recipients: Vec<String>,
    pub is_active: bool,
    pub next_run_date: DateTime<Utc>,
}
