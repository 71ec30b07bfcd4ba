use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::reports::models::{ReportSeverity, ReportStatus};

// ============================================================================
// Map View
// ============================================================================

/// Report marker for map
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MapReportMarker {
    pub id: String,
    pub issue_type: String,
    pub description: String,
    pub address: String,
    pub lat: f64,
    pub lon: f64,
    pub status: ReportStatus,
    pub severity: ReportSeverity,
    /// Hex colour for the marker pin
    pub color: String,
    pub submitted_at: DateTime<Utc>,
}

/// Marker counts shown in the map legend
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MapStatusCounts {
    pub reported: usize,
    pub in_progress: usize,
    pub resolved: usize,
}

/// Map data response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardMapDto {
    pub markers: Vec<MapReportMarker>,
    pub counts: MapStatusCounts,
    pub total_count: i64,
    /// Bounding box [min_lat, min_lon, max_lat, max_lon]
    pub bounds: Option<[f64; 4]>,
}
