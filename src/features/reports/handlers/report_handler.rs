use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartError, Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use tracing::debug;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::reports::dtos::{
    ListReportsQuery, ReportResponseDto, SubmitReportForm, UpdateReportStatusDto,
};
use crate::features::reports::models::{
    format_file_size, LocationInput, Photo, ReportLocation, ReportSeverity, ResolvedLocation,
};
use crate::features::reports::services::{LocationService, ReportService, SubmitReport};
use crate::shared::constants::LOCATION_CAPTURED_LABEL;
use crate::shared::types::{ApiResponse, Meta};

/// State for report handlers
#[derive(Clone)]
pub struct ReportState {
    pub report_service: Arc<ReportService>,
    pub location_service: Arc<LocationService>,
}

fn parse_coordinate(name: &str, text: &str) -> Result<f64> {
    text.trim()
        .parse::<f64>()
        .map_err(|_| AppError::BadRequest(format!("{} must be a number", name)))
}

/// The body limit trips mid-stream when the photo is far above the size cap
fn multipart_error(err: MultipartError, max_photo_size: usize) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::Validation(format!(
            "Photo is too large. Maximum size is {}.",
            format_file_size(max_photo_size)
        ));
    }
    debug!("Failed to read multipart data: {}", err);
    AppError::BadRequest(format!("Failed to read multipart data: {}", err.body_text()))
}

/// Submit a new civic report
///
/// Accepts multipart/form-data with:
/// - `photo`: the captured or uploaded image (required)
/// - `issue_type`, `description` (required)
/// - `severity`: low, medium or high (optional, defaults to medium)
/// - `latitude`, `longitude` (required), `address` (optional)
#[utoipa::path(
    post,
    path = "/api/reports",
    request_body(
        content = SubmitReportForm,
        content_type = "multipart/form-data",
        description = "Report form with photo, issue details and resolved location",
    ),
    responses(
        (status = 201, description = "Report submitted", body = ApiResponse<ReportResponseDto>),
        (status = 400, description = "Missing description, location or photo, or photo too large"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn submit_report(
    State(state): State<ReportState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<ReportResponseDto>>)> {
    let mut submission = SubmitReport::default();
    let mut latitude: Option<f64> = None;
    let mut longitude: Option<f64> = None;
    let mut address: Option<String> = None;
    let max_photo_size = state.report_service.max_photo_size();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, max_photo_size))?
    {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "photo" => {
                let content_type = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "application/octet-stream".to_string());
                let file_name = field
                    .file_name()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "photo".to_string());
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| multipart_error(e, max_photo_size))?;
                submission.photo = Some(Photo::new(file_name, content_type, data.to_vec()));
            }
            name @ ("issue_type" | "description" | "severity" | "latitude" | "longitude"
            | "address") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| multipart_error(e, max_photo_size))?;
                match name {
                    "issue_type" => submission.issue_type = Some(text),
                    "description" => submission.description = Some(text),
                    "severity" if !text.trim().is_empty() => {
                        submission.severity =
                            Some(text.parse::<ReportSeverity>().map_err(AppError::BadRequest)?);
                    }
                    "latitude" if !text.trim().is_empty() => {
                        latitude = Some(parse_coordinate("latitude", &text)?)
                    }
                    "longitude" if !text.trim().is_empty() => {
                        longitude = Some(parse_coordinate("longitude", &text)?)
                    }
                    "address" => address = Some(text.trim().to_string()),
                    _ => {}
                }
            }
            _ => {
                debug!("Ignoring unknown field: {}", field_name);
            }
        }
    }

    if let (Some(latitude), Some(longitude)) = (latitude, longitude) {
        submission.location = Some(ReportLocation {
            latitude,
            longitude,
            address: address
                .filter(|a| !a.is_empty())
                .unwrap_or_else(|| LOCATION_CAPTURED_LABEL.to_string()),
        });
    }

    let report = state.report_service.submit(submission).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(report.into()),
            Some("Report submitted successfully".to_string()),
            None,
        )),
    ))
}

/// List reports, newest first
#[utoipa::path(
    get,
    path = "/api/reports",
    params(ListReportsQuery),
    responses(
        (status = 200, description = "List of reports", body = ApiResponse<Vec<ReportResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn list_reports(
    State(state): State<ReportState>,
    Query(query): Query<ListReportsQuery>,
) -> Result<Json<ApiResponse<Vec<ReportResponseDto>>>> {
    let reports = state.report_service.list(&query.into()).await?;
    let total = reports.len() as i64;
    let dtos: Vec<ReportResponseDto> = reports.into_iter().map(|r| r.into()).collect();
    Ok(Json(ApiResponse::success(
        Some(dtos),
        None,
        Some(Meta { total }),
    )))
}

/// Get report by ID
#[utoipa::path(
    get,
    path = "/api/reports/{id}",
    params(
        ("id" = String, Path, description = "Report ID, e.g. CR0001")
    ),
    responses(
        (status = 200, description = "Report found", body = ApiResponse<ReportResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Report not found")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn get_report(
    State(state): State<ReportState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ReportResponseDto>>> {
    let report = state.report_service.get(&id).await?;
    Ok(Json(ApiResponse::success(Some(report.into()), None, None)))
}

/// Download the photo attached to a report
#[utoipa::path(
    get,
    path = "/api/reports/{id}/photo",
    params(
        ("id" = String, Path, description = "Report ID")
    ),
    responses(
        (status = 200, description = "Photo bytes served with the stored content type"),
        (status = 404, description = "Report not found")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn get_report_photo(
    State(state): State<ReportState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let report = state.report_service.get(&id).await?;
    let photo = report.photo;
    let disposition = format!("inline; filename=\"{}\"", photo.file_name.replace('"', ""));

    Ok((
        [
            (header::CONTENT_TYPE, photo.content_type.clone()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        photo.data.as_ref().clone(),
    ))
}

/// Advance report status along reported → in-progress → resolved
#[utoipa::path(
    patch,
    path = "/api/reports/{id}/status",
    params(
        ("id" = String, Path, description = "Report ID")
    ),
    request_body = UpdateReportStatusDto,
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<ReportResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Report not found"),
        (status = 409, description = "Illegal status transition")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn update_report_status(
    State(state): State<ReportState>,
    Path(id): Path<String>,
    AppJson(dto): AppJson<UpdateReportStatusDto>,
) -> Result<Json<ApiResponse<ReportResponseDto>>> {
    let report = state.report_service.advance_status(&id, dto.status).await?;
    Ok(Json(ApiResponse::success(Some(report.into()), None, None)))
}

/// Clear every report (demo reset)
#[utoipa::path(
    delete,
    path = "/api/reports",
    responses(
        (status = 200, description = "Store cleared"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn reset_reports(State(state): State<ReportState>) -> Result<Json<ApiResponse<()>>> {
    state.report_service.reset().await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("All reports cleared".to_string()),
        None,
    )))
}

/// Resolve the client's location attempt into a reportable location
#[utoipa::path(
    post,
    path = "/api/locations/resolve",
    request_body = LocationInput,
    responses(
        (status = 200, description = "Resolved location with provenance", body = ApiResponse<ResolvedLocation>),
        (status = 400, description = "Invalid coordinates or empty manual address"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "locations"
)]
pub async fn resolve_location(
    State(state): State<ReportState>,
    AppJson(input): AppJson<LocationInput>,
) -> Result<Json<ApiResponse<ResolvedLocation>>> {
    let resolved = state.location_service.resolve(input).await?;
    let message = resolved.warning.clone();
    Ok(Json(ApiResponse::success(Some(resolved), message, None)))
}
