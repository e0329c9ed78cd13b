//! Report generation actions: templates, report builds, exports and
//! schedules.

use chrono::{Duration, Utc};
use rand::Rng;
use serde_json::json;

use crate::export::{self, ExportBlob, ExportError};
use crate::model::emergency::EmergencyStatus;
use crate::model::report::{
    ChartData, ChartKind, ExportFormat, GeneratedReport, ReportData, ReportExportFormat,
    ReportMetadata, ReportSchedule, ReportSectionData, ReportStatus, ReportSummary,
    ReportTemplate, ScheduleRequest, TableData, TemplateRequest, TimeRange,
};
use crate::store::state::TrafficState;

use super::{now_millis, StoreError, TrafficStore};

/// Build the report payload from the live state. Runs inside the write lock,
/// so it sees a consistent picture.
fn build_report_data(state: &TrafficState) -> ReportData {
    let mut rng = rand::rng();
    let route_count = state.routes.len().max(1) as f64;

    let summary = ReportSummary {
        total_routes: state.routes.len() as u32,
        avg_traffic_flow: (state.routes.iter().map(|r| f64::from(r.vehicles)).sum::<f64>()
            / route_count)
            .round(),
        emergency_responses: state
            .emergency_vehicles
            .iter()
            .filter(|v| v.status == EmergencyStatus::Active)
            .count() as u32,
        simulations_run: state.total_simulations_run,
        key_metrics: [
            (
                "peak_congestion".to_string(),
                state
                    .routes
                    .iter()
                    .map(|r| f64::from(r.congestion_level))
                    .fold(0.0, f64::max),
            ),
            (
                "avg_speed".to_string(),
                (state.routes.iter().map(|r| r.avg_speed_kmh).sum::<f64>() / route_count).round(),
            ),
            (
                "total_vehicles".to_string(),
                state.routes.iter().map(|r| f64::from(r.vehicles)).sum(),
            ),
            ("incidents".to_string(), rng.random_range(0..20) as f64),
        ]
        .into(),
        periodic_comparison: [
            ("traffic_change".to_string(), (rng.random::<f64>() - 0.5) * 30.0),
            ("speed_change".to_string(), (rng.random::<f64>() - 0.5) * 20.0),
            ("incidents_change".to_string(), (rng.random::<f64>() - 0.5) * 40.0),
        ]
        .into(),
    };

    let hourly_traffic: Vec<serde_json::Value> = (0..24)
        .map(|hour| {
            json!({
                "hour": hour,
                "vehicles": 200.0 + rng.random::<f64>() * 400.0,
                "speed": 25.0 + rng.random::<f64>() * 30.0,
            })
        })
        .collect();

    ReportData {
        summary,
        sections: Vec::new(),
        charts: vec![ChartData {
            id: "chart-1".into(),
            kind: ChartKind::Line,
            title: "Hourly Traffic Flow".into(),
            data: hourly_traffic,
            config: json!({}),
        }],
        tables: vec![TableData {
            id: "table-1".into(),
            title: "Route Performance Summary".into(),
            headers: vec![
                "Route".into(),
                "Avg Speed".into(),
                "Congestion".into(),
                "Vehicles".into(),
            ],
            rows: state
                .routes
                .iter()
                .map(|route| {
                    vec![
                        route.name.clone(),
                        format!("{} km/h", route.avg_speed_kmh),
                        format!("{}%", route.congestion_level),
                        route.vehicles.to_string(),
                    ]
                })
                .collect(),
            summary: None,
        }],
        insights: state.analytics_insights.iter().take(5).cloned().collect(),
        recommendations: Vec::new(),
    }
}

impl TrafficStore {
    /// Create a reusable report template.
    pub async fn create_report_template(&self, request: TemplateRequest) -> ReportTemplate {
        self.pause(500).await;

        let template = ReportTemplate {
            id: format!("template-{}", now_millis()),
            name: request.name,
            description: request.description,
            kind: request.kind,
            sections: request.sections,
            is_default: request.is_default,
            created_at: Utc::now(),
            last_used: None,
        };

        self.mutate(|state| state.report_templates.push(template.clone()))
            .await;

        template
    }

    /// Patch a template; also refreshes its `last_used` stamp. Unknown ids
    /// are a silent no-op.
    pub async fn update_report_template(
        &self,
        template_id: &str,
        patch: impl FnOnce(&mut ReportTemplate),
    ) {
        self.mutate(|state| {
            if let Some(template) = state
                .report_templates
                .iter_mut()
                .find(|t| t.id == template_id)
            {
                patch(template);
                template.last_used = Some(Utc::now());
            }
        })
        .await;
    }

    pub async fn delete_report_template(&self, template_id: &str) {
        self.mutate(|state| state.report_templates.retain(|t| t.id != template_id))
            .await;
    }

    /// Generate a report from a template over a time range (defaults to the
    /// last 24 hours).
    ///
    /// The report content is assembled from the live collections at
    /// generation time; the finished report is prepended to the report list
    /// and the template's `last_used` is stamped.
    pub async fn generate_report(
        &self,
        template_id: &str,
        time_range: Option<TimeRange>,
    ) -> Result<GeneratedReport, StoreError> {
        if !self
            .read()
            .await
            .report_templates
            .iter()
            .any(|t| t.id == template_id)
        {
            return Err(StoreError::TemplateNotFound(template_id.to_string()));
        }

        self.set_flag(|state| state.is_generating_report = true)
            .await;
        self.pause(3000).await;

        let report = self
            .mutate(|state| {
                let now = Utc::now();
                // The template may have been deleted while we were waiting.
                let Some(template) = state
                    .report_templates
                    .iter()
                    .find(|t| t.id == template_id)
                    .cloned()
                else {
                    state.is_generating_report = false;
                    return None;
                };

                let mut data = build_report_data(state);
                data.sections = template
                    .sections
                    .iter()
                    .map(|section| ReportSectionData {
                        section_id: section.id.clone(),
                        title: section.config.title.clone(),
                        content: json!({}),
                        charts: Vec::new(),
                        tables: Vec::new(),
                        insights: Vec::new(),
                    })
                    .collect();

                let mut rng = rand::rng();
                let report = GeneratedReport {
                    id: format!("report-{}", now_millis()),
                    template_id: template.id.clone(),
                    name: format!("{} - {}", template.name, now.format("%B %e, %Y")),
                    kind: template.kind,
                    generated_at: now,
                    time_range: time_range.unwrap_or(TimeRange {
                        start: now - Duration::days(1),
                        end: now,
                    }),
                    data,
                    metadata: ReportMetadata {
                        generated_by: "TrafficFlow Pro System".into(),
                        version: "1.0.0".into(),
                        total_pages: template.sections.len() as u32 * 2,
                        data_points: state.routes.len() as u32 * 24,
                        processing_time_secs: rng.random_range(1.0..6.0),
                        file_size_mb: Some(rng.random_range(0.5..3.5)),
                    },
                    status: ReportStatus::Completed,
                    export_formats: vec![
                        ReportExportFormat::new(ExportFormat::Pdf),
                        ReportExportFormat::new(ExportFormat::Excel),
                        ReportExportFormat::new(ExportFormat::Csv),
                    ],
                };

                state.generated_reports.insert(0, report.clone());
                if let Some(template) = state
                    .report_templates
                    .iter_mut()
                    .find(|t| t.id == template_id)
                {
                    template.last_used = Some(now);
                }
                state.is_generating_report = false;
                Some(report)
            })
            .await;

        report.ok_or_else(|| StoreError::TemplateNotFound(template_id.to_string()))
    }

    pub async fn export_report_to_pdf(&self, report_id: &str) -> Result<ExportBlob, StoreError> {
        self.export_report(report_id, ExportFormat::Pdf, 2000, export::report_to_pdf)
            .await
    }

    pub async fn export_report_to_excel(&self, report_id: &str) -> Result<ExportBlob, StoreError> {
        self.export_report(report_id, ExportFormat::Excel, 1500, export::report_to_excel)
            .await
    }

    pub async fn export_report_to_csv(&self, report_id: &str) -> Result<ExportBlob, StoreError> {
        self.export_report(report_id, ExportFormat::Csv, 1000, export::report_to_csv)
            .await
    }

    /// Render a report with the given renderer and bump that format's
    /// download counter.
    async fn export_report(
        &self,
        report_id: &str,
        format: ExportFormat,
        delay_ms: u64,
        render: fn(&GeneratedReport) -> Result<ExportBlob, ExportError>,
    ) -> Result<ExportBlob, StoreError> {
        self.pause(delay_ms).await;

        let report = self
            .read()
            .await
            .generated_reports
            .iter()
            .find(|r| r.id == report_id)
            .cloned()
            .ok_or_else(|| StoreError::ReportNotFound(report_id.to_string()))?;

        let blob = render(&report)?;

        self.mutate(|state| {
            if let Some(report) = state
                .generated_reports
                .iter_mut()
                .find(|r| r.id == report_id)
            {
                if let Some(entry) = report
                    .export_formats
                    .iter_mut()
                    .find(|f| f.format == format)
                {
                    entry.download_count += 1;
                    entry.last_downloaded = Some(Utc::now());
                }
            }
        })
        .await;

        Ok(blob)
    }

    pub async fn select_report(&self, report: Option<GeneratedReport>) {
        self.set_flag(|state| state.selected_report = report).await;
    }

    /// Remove a report; clears the selection if it pointed at it.
    pub async fn delete_report(&self, report_id: &str) {
        self.mutate(|state| {
            state.generated_reports.retain(|r| r.id != report_id);
            if state
                .selected_report
                .as_ref()
                .is_some_and(|r| r.id == report_id)
            {
                state.selected_report = None;
            }
        })
        .await;
    }

    /// Register a recurring report schedule.
    pub async fn schedule_report(&self, request: ScheduleRequest) -> ReportSchedule {
        self.pause(500).await;

        let schedule = ReportSchedule {
            id: format!("schedule-{}", now_millis()),
            template_id: request.template_id,
            name: request.name,
            frequency: request.frequency,
            day_of_week: request.day_of_week,
            day_of_month: request.day_of_month,
            time: request.time,
            recipients: request.recipients,
            is_active: request.is_active,
            next_run_date: request.next_run_date,
            last_run_date: None,
            created_at: Utc::now(),
        };

        self.mutate(|state| state.report_schedules.push(schedule.clone()))
            .await;

        schedule
    }

    /// Patch a schedule; unknown ids are a silent no-op.
    pub async fn update_report_schedule(
        &self,
        schedule_id: &str,
        patch: impl FnOnce(&mut ReportSchedule),
    ) {
        self.mutate(|state| {
            if let Some(schedule) = state
                .report_schedules
                .iter_mut()
                .find(|s| s.id == schedule_id)
            {
                patch(schedule);
            }
        })
        .await;
    }

    pub async fn delete_report_schedule(&self, schedule_id: &str) {
        self.mutate(|state| state.report_schedules.retain(|s| s.id != schedule_id))
            .await;
    }

    pub async fn set_generating_report(&self, generating: bool) {
        self.set_flag(|state| state.is_generating_report = generating)
            .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::report::{ReportFrequency, ReportKind};
    use crate::store::testing;

    #[tokio::test]
    async fn generated_reports_are_prepended_with_fresh_formats() {
        let store = testing::store();
        let before = store.read().await.generated_reports.len();

        let report = store.generate_report("template-1", None).await.unwrap();

        let state = store.read().await;
        assert_eq!(state.generated_reports.len(), before + 1);
        assert_eq!(state.generated_reports[0].id, report.id);
        assert_eq!(report.status, ReportStatus::Completed);
        assert_eq!(report.export_formats.len(), 3);
        assert!(report.export_formats.iter().all(|f| f.download_count == 0));
        assert_eq!(report.data.tables[0].rows.len(), state.routes.len());
        assert!(!state.is_generating_report);

        let template = state
            .report_templates
            .iter()
            .find(|t| t.id == "template-1")
            .unwrap();
        let age = Utc::now() - template.last_used.unwrap();
        assert!(age < Duration::seconds(5));
    }

    #[tokio::test]
    async fn generating_from_an_unknown_template_is_an_error() {
        let store = testing::store();
        let err = store
            .generate_report("template-nope", None)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::TemplateNotFound(_)));
        assert!(!store.read().await.is_generating_report);
    }

    #[tokio::test]
    async fn export_bumps_only_the_requested_format_counter() {
        let store = testing::store();
        let report = store.generate_report("template-1", None).await.unwrap();

        store.export_report_to_csv(&report.id).await.unwrap();
        store.export_report_to_csv(&report.id).await.unwrap();
        store.export_report_to_pdf(&report.id).await.unwrap();

        let state = store.read().await;
        let stored = state
            .generated_reports
            .iter()
            .find(|r| r.id == report.id)
            .unwrap();
        let count_for = |format: ExportFormat| {
            stored
                .export_formats
                .iter()
                .find(|f| f.format == format)
                .unwrap()
                .download_count
        };
        assert_eq!(count_for(ExportFormat::Csv), 2);
        assert_eq!(count_for(ExportFormat::Pdf), 1);
        assert_eq!(count_for(ExportFormat::Excel), 0);
        assert!(stored
            .export_formats
            .iter()
            .find(|f| f.format == ExportFormat::Csv)
            .unwrap()
            .last_downloaded
            .is_some());
    }

    #[tokio::test]
    async fn exporting_an_unknown_report_is_an_error() {
        let store = testing::store();
        let err = store.export_report_to_pdf("report-nope").await.unwrap_err();
        assert!(matches!(err, StoreError::ReportNotFound(_)));
    }

    #[tokio::test]
    async fn delete_report_clears_matching_selection() {
        let store = testing::store();
        let report = store.generate_report("template-2", None).await.unwrap();
        store.select_report(Some(report.clone())).await;

        store.delete_report(&report.id).await;

        let state = store.read().await;
        assert!(state.selected_report.is_none());
        assert!(!state.generated_reports.iter().any(|r| r.id == report.id));
    }

    #[tokio::test]
    async fn created_templates_and_schedules_get_ids() {
        let store = testing::store();
        let template = store
            .create_report_template(TemplateRequest {
                name: "Night Shift Overview".into(),
                description: "Traffic picture between midnight and 6am".into(),
                kind: ReportKind::TrafficSummary,
                sections: Vec::new(),
                is_default: false,
            })
            .await;
        assert!(template.id.starts_with("template-"));

        let schedule = store
            .schedule_report(ScheduleRequest {
                template_id: template.id.clone(),
                name: "Nightly".into(),
                frequency: ReportFrequency::Daily,
                day_of_week: None,
                day_of_month: None,
                time: "06:30".into(),
                recipients: vec!["ops@trafficflow.pro".into()],
                is_active: true,
                next_run_date: Utc::now() + Duration::days(1),
            })
            .await;

        let state = store.read().await;
        assert!(state.report_templates.iter().any(|t| t.id == template.id));
        assert!(state.report_schedules.iter().any(|s| s.id == schedule.id));
    }

    #[tokio::test]
    async fn updating_a_template_stamps_last_used() {
        let store = testing::store();
        store
            .update_report_template("template-2", |t| t.is_default = true)
            .await;

        let state = store.read().await;
        let template = state
            .report_templates
            .iter()
            .find(|t| t.id == "template-2")
            .unwrap();
        assert!(template.is_default);
        assert!(template.last_used.is_some());
    }

    #[tokio::test]
    async fn schedule_updates_and_deletes_apply() {
        let store = testing::store();
        store
            .update_report_schedule("schedule-1", |s| s.is_active = false)
            .await;
        let state = store.read().await;
        let schedule = state
            .report_schedules
            .iter()
            .find(|s| s.id == "schedule-1")
            .unwrap();
        assert!(!schedule.is_active);
        drop(state);

        store.delete_report_schedule("schedule-1").await;
        assert!(!store
            .read()
            .await
            .report_schedules
            .iter()
            .any(|s| s.id == "schedule-1"));
    }
}
