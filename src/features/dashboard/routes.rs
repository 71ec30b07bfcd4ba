use axum::{routing::get, Router};
use std::sync::Arc;

use crate::features::dashboard::handlers;
use crate::features::dashboard::services::DashboardService;

/// Create public dashboard routes
pub fn routes(dashboard_service: Arc<DashboardService>) -> Router {
    Router::new()
        .route("/api/dashboard/statistics", get(handlers::get_statistics))
        .route("/api/dashboard/map", get(handlers::get_map))
        .with_state(dashboard_service)
}
