use std::sync::Arc;

use axum::{
    routing::{get, patch},
    Router,
};

use crate::features::reports::handlers;
use crate::features::reports::services::ReportService;

/// Routes for the reports feature, rooted at `/reportes`.
///
/// `/reportes/export` must be registered alongside `/reportes/{id}`; the
/// static segment takes priority over the path parameter.
pub fn routes(service: Arc<ReportService>) -> Router {
    Router::new()
        .route(
            "/reportes",
            get(handlers::list_reports).post(handlers::create_report),
        )
        .route("/reportes/export", get(handlers::export_reports))
        .route("/reportes/{id}", patch(handlers::update_report_status))
        .with_state(service)
}
