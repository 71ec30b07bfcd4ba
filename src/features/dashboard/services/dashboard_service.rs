use std::sync::Arc;

use crate::core::error::Result;
use crate::features::dashboard::dtos::{DashboardMapDto, MapReportMarker, MapStatusCounts};
use crate::features::reports::models::{CivicReport, ReportStatistics, ReportStatus};
use crate::features::reports::services::{ReportFilter, ReportService};

/// Marker colour for each report status
pub fn marker_color(status: ReportStatus) -> &'static str {
    match status {
        ReportStatus::Resolved => "#059669",
        ReportStatus::InProgress => "#D97706",
        ReportStatus::Reported => "#DC2626",
    }
}

/// Read-only views over the report store for the public dashboard
pub struct DashboardService {
    report_service: Arc<ReportService>,
}

impl DashboardService {
    pub fn new(report_service: Arc<ReportService>) -> Self {
        Self { report_service }
    }

    pub async fn get_statistics(&self) -> Result<ReportStatistics> {
        self.report_service.statistics().await
    }

    // ========================================================================
    // Map View
    // ========================================================================

    /// Get one map marker per report, newest first
    pub async fn get_map_data(&self) -> Result<DashboardMapDto> {
        let reports = self.report_service.list(&ReportFilter::default()).await?;

        let mut counts = MapStatusCounts::default();
        for report in &reports {
            match report.status {
                ReportStatus::Reported => counts.reported += 1,
                ReportStatus::InProgress => counts.in_progress += 1,
                ReportStatus::Resolved => counts.resolved += 1,
            }
        }

        let markers: Vec<MapReportMarker> = reports.into_iter().map(to_marker).collect();
        let total_count = markers.len() as i64;

        // Calculate bounds if we have markers
        let bounds = if !markers.is_empty() {
            let min_lat = markers.iter().map(|m| m.lat).fold(f64::INFINITY, f64::min);
            let min_lon = markers.iter().map(|m| m.lon).fold(f64::INFINITY, f64::min);
            let max_lat = markers
                .iter()
                .map(|m| m.lat)
                .fold(f64::NEG_INFINITY, f64::max);
            let max_lon = markers
                .iter()
                .map(|m| m.lon)
                .fold(f64::NEG_INFINITY, f64::max);
            Some([min_lat, min_lon, max_lat, max_lon])
        } else {
            None
        };

        Ok(DashboardMapDto {
            markers,
            counts,
            total_count,
            bounds,
        })
    }
}

fn to_marker(report: CivicReport) -> MapReportMarker {
    MapReportMarker {
        color: marker_color(report.status).to_string(),
        id: report.id,
        issue_type: report.issue_type,
        description: report.description,
        address: report.location.address,
        lat: report.location.latitude,
        lon: report.location.longitude,
        status: report.status,
        severity: report.severity,
        submitted_at: report.submitted_at,
    }
}
