use crate::export::ExportError;

/// Errors surfaced by the asynchronous store actions.
///
/// Synchronous mutators never fail: operating on an unknown id is a silent
/// no-op. The async actions that target a specific entity signal a typed
/// not-found instead.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Route {0} not found")]
    RouteNotFound(u32),
    #[error("Traffic signal {0} not found")]
    SignalNotFound(String),
    #[error("Journey {0} not found")]
    JourneyNotFound(String),
    #[error("Simulation {0} not found")]
    SimulationNotFound(String),
    #[error("Report template {0} not found")]
    TemplateNotFound(String),
    #[error("Report {0} not found")]
    ReportNotFound(String),
    #[error(transparent)]
    Export(#[from] ExportError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_route_not_found() {
        let err = StoreError::RouteNotFound(42);
        assert_eq!(err.to_string(), "Route 42 not found");
    }

    #[test]
    fn error_display_template_not_found() {
        let err = StoreError::TemplateNotFound("template-9".into());
        assert_eq!(err.to_string(), "Report template template-9 not found");
    }
}
