use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::features::reports::models::{
    format_file_size, CivicReport, Photo, ReportLocation, ReportSeverity, ReportStatus,
};
use crate::features::reports::services::ReportFilter;

/// Photo metadata; the bytes are served from the photo endpoint
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PhotoResponseDto {
    pub file_name: String,
    pub content_type: String,
    pub size: usize,
    /// Human-readable size, e.g. "1.5 MB"
    pub size_label: String,
    pub url: String,
}

impl PhotoResponseDto {
    fn from_photo(report_id: &str, photo: &Photo) -> Self {
        Self {
            file_name: photo.file_name.clone(),
            content_type: photo.content_type.clone(),
            size: photo.size(),
            size_label: format_file_size(photo.size()),
            url: format!("/api/reports/{}/photo", report_id),
        }
    }
}

/// Response DTO for report
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReportResponseDto {
    pub id: String,
    pub issue_type: String,
    pub description: String,
    pub photo: PhotoResponseDto,
    pub location: ReportLocation,
    pub status: ReportStatus,
    pub severity: ReportSeverity,
    /// 25 / 75 / 100 for reported / in-progress / resolved
    pub progress_percent: u8,
    pub submitted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CivicReport> for ReportResponseDto {
    fn from(r: CivicReport) -> Self {
        Self {
            photo: PhotoResponseDto::from_photo(&r.id, &r.photo),
            progress_percent: r.status.progress_percent(),
            id: r.id,
            issue_type: r.issue_type,
            description: r.description,
            location: r.location,
            status: r.status,
            severity: r.severity,
            submitted_at: r.submitted_at,
            updated_at: r.updated_at,
        }
    }
}

/// Request DTO for updating report status
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateReportStatusDto {
    pub status: ReportStatus,
}

/// Query parameters for listing reports
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ListReportsQuery {
    /// Exact status filter
    pub status: Option<ReportStatus>,
    /// Case-insensitive issue type filter
    pub issue_type: Option<String>,
}

impl From<ListReportsQuery> for ReportFilter {
    fn from(q: ListReportsQuery) -> Self {
        Self {
            status: q.status,
            issue_type: q.issue_type.filter(|t| !t.trim().is_empty()),
        }
    }
}

/// Multipart form accepted by the submission endpoint (documentation only)
#[allow(dead_code)]
#[derive(ToSchema)]
pub struct SubmitReportForm {
    /// Captured or uploaded image
    #[schema(value_type = String, format = Binary)]
    pub photo: Vec<u8>,
    pub issue_type: String,
    pub description: String,
    /// low, medium or high (default medium)
    pub severity: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub address: Option<String>,
}
