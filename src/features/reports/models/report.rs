use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

/// Lifecycle stage of a civic report
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum ReportStatus {
    Reported,
    InProgress,
    Resolved,
}

impl ReportStatus {
    pub const ALL: [ReportStatus; 3] = [
        ReportStatus::Reported,
        ReportStatus::InProgress,
        ReportStatus::Resolved,
    ];

    fn stage(self) -> u8 {
        match self {
            ReportStatus::Reported => 0,
            ReportStatus::InProgress => 1,
            ReportStatus::Resolved => 2,
        }
    }

    /// Forward-only lifecycle: a report may skip ahead but never move back
    pub fn can_transition_to(self, next: ReportStatus) -> bool {
        next.stage() > self.stage()
    }

    /// Completion percentage shown on the "my reports" progress bar
    pub fn progress_percent(self) -> u8 {
        match self {
            ReportStatus::Reported => 25,
            ReportStatus::InProgress => 75,
            ReportStatus::Resolved => 100,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ReportStatus::Reported => "reported",
            ReportStatus::InProgress => "in-progress",
            ReportStatus::Resolved => "resolved",
        }
    }
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Triage priority chosen by the submitter
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ReportSeverity {
    Low,
    #[default]
    Medium,
    High,
}

impl std::fmt::Display for ReportSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportSeverity::Low => write!(f, "low"),
            ReportSeverity::Medium => write!(f, "medium"),
            ReportSeverity::High => write!(f, "high"),
        }
    }
}

impl std::str::FromStr for ReportSeverity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(ReportSeverity::Low),
            "medium" => Ok(ReportSeverity::Medium),
            "high" => Ok(ReportSeverity::High),
            other => Err(format!(
                "Unknown severity '{}', expected low, medium or high",
                other
            )),
        }
    }
}

/// Resolved coordinates and human-readable address of a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReportLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
}

/// Image attached to a report. Lives only as long as the report does.
#[derive(Clone, PartialEq)]
pub struct Photo {
    pub file_name: String,
    pub content_type: String,
    pub data: Arc<Vec<u8>>,
}

impl Photo {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        data: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            data: Arc::new(data),
        }
    }

    /// Empty JPEG stand-in used by demo reports
    pub fn placeholder(file_name: impl Into<String>) -> Self {
        Self::new(file_name, "image/jpeg", Vec::new())
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }
}

impl std::fmt::Debug for Photo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Photo")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("size", &self.size())
            .finish()
    }
}

/// Human-readable byte count ("0 Bytes", "1.5 KB", "2 MB")
pub fn format_file_size(bytes: usize) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = format!("{:.2}", value);
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, UNITS[unit])
}

/// A stored civic report
#[derive(Debug, Clone, PartialEq)]
pub struct CivicReport {
    pub id: String,
    pub issue_type: String,
    pub description: String,
    pub photo: Photo,
    pub location: ReportLocation,
    pub status: ReportStatus,
    pub severity: ReportSeverity,
    pub submitted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for creating a new report; the store assigns id and timestamps
#[derive(Debug, Clone)]
pub struct NewCivicReport {
    pub issue_type: String,
    pub description: String,
    pub photo: Photo,
    pub location: ReportLocation,
    pub status: ReportStatus,
    pub severity: ReportSeverity,
}

impl NewCivicReport {
    pub fn into_report(self, id: String, now: DateTime<Utc>) -> CivicReport {
        CivicReport {
            id,
            issue_type: self.issue_type,
            description: self.description,
            photo: self.photo,
            location: self.location,
            status: self.status,
            severity: self.severity,
            submitted_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_transitions_are_forward_only() {
        assert!(ReportStatus::Reported.can_transition_to(ReportStatus::InProgress));
        assert!(ReportStatus::InProgress.can_transition_to(ReportStatus::Resolved));
        assert!(ReportStatus::Reported.can_transition_to(ReportStatus::Resolved));

        assert!(!ReportStatus::Resolved.can_transition_to(ReportStatus::Reported));
        assert!(!ReportStatus::InProgress.can_transition_to(ReportStatus::Reported));
        assert!(!ReportStatus::Reported.can_transition_to(ReportStatus::Reported));
    }

    #[test]
    fn test_status_serializes_kebab_case() {
        let json = serde_json::to_string(&ReportStatus::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");
        let parsed: ReportStatus = serde_json::from_str("\"resolved\"").unwrap();
        assert_eq!(parsed, ReportStatus::Resolved);
    }

    #[test]
    fn test_severity_from_str() {
        assert_eq!("HIGH".parse::<ReportSeverity>(), Ok(ReportSeverity::High));
        assert_eq!(" low ".parse::<ReportSeverity>(), Ok(ReportSeverity::Low));
        assert!("urgent".parse::<ReportSeverity>().is_err());
        assert_eq!(ReportSeverity::default(), ReportSeverity::Medium);
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(500), "500 Bytes");
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(5 * 1024 * 1024), "5 MB");
    }

    #[test]
    fn test_photo_is_image() {
        assert!(Photo::new("a.png", "image/png", vec![1, 2]).is_image());
        assert!(!Photo::new("a.pdf", "application/pdf", vec![1]).is_image());
        assert_eq!(Photo::placeholder("demo.jpg").size(), 0);
    }
}
