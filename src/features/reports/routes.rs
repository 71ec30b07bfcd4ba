use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post},
    Router,
};

use crate::features::reports::handlers::{self, ReportState};
use crate::features::reports::services::{LocationService, ReportService};

/// Headroom for multipart boundaries and text fields around the photo
const FORM_OVERHEAD_BYTES: usize = 1024 * 1024;

/// Create routes for the reports feature
///
/// All routes require authentication (auth middleware is applied by caller)
pub fn routes(
    report_service: Arc<ReportService>,
    location_service: Arc<LocationService>,
    max_photo_size: usize,
) -> Router {
    let state = ReportState {
        report_service,
        location_service,
    };

    Router::new()
        .route(
            "/api/reports",
            get(handlers::list_reports)
                .post(handlers::submit_report)
                .delete(handlers::reset_reports),
        )
        .route("/api/reports/{id}", get(handlers::get_report))
        .route("/api/reports/{id}/photo", get(handlers::get_report_photo))
        .route(
            "/api/reports/{id}/status",
            patch(handlers::update_report_status),
        )
        .route("/api/locations/resolve", post(handlers::resolve_location))
        .layer(DefaultBodyLimit::max(max_photo_size + FORM_OVERHEAD_BYTES))
        .with_state(state)
}
