use axum::{extract::State, Json};
use std::sync::Arc;

use crate::core::error::AppError;
use crate::features::dashboard::dtos::*;
use crate::features::dashboard::services::DashboardService;
use crate::features::reports::models::ReportStatistics;
use crate::shared::types::ApiResponse;

/// Get report statistics (totals, per status, per type, last seven days)
#[utoipa::path(
    get,
    path = "/api/dashboard/statistics",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Report statistics", body = ApiResponse<ReportStatistics>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_statistics(
    State(service): State<Arc<DashboardService>>,
) -> Result<Json<ApiResponse<ReportStatistics>>, AppError> {
    let stats = service.get_statistics().await?;
    Ok(Json(ApiResponse::success(Some(stats), None, None)))
}

/// Get map markers for every report
#[utoipa::path(
    get,
    path = "/api/dashboard/map",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Map markers with status counts", body = ApiResponse<DashboardMapDto>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_map(
    State(service): State<Arc<DashboardService>>,
) -> Result<Json<ApiResponse<DashboardMapDto>>, AppError> {
    let map = service.get_map_data().await?;
    Ok(Json(ApiResponse::success(Some(map), None, None)))
}
