use std::sync::Arc;

use tokio::sync::Mutex;

use crate::core::error::{AppError, Result};
use crate::features::reports::models::{
    format_file_size, CivicReport, NewCivicReport, Photo, ReportLocation, ReportSeverity,
    ReportStatistics, ReportStatus,
};
use crate::features::reports::repository::ReportRepository;
use crate::features::reports::services::location_service::validate_coordinates;

/// Everything a citizen may hand in with a report; presence is checked by `submit`
#[derive(Debug, Default)]
pub struct SubmitReport {
    pub issue_type: Option<String>,
    pub description: Option<String>,
    pub severity: Option<ReportSeverity>,
    pub location: Option<ReportLocation>,
    pub photo: Option<Photo>,
}

/// Optional filters for listing reports
#[derive(Debug, Default, Clone)]
pub struct ReportFilter {
    pub status: Option<ReportStatus>,
    pub issue_type: Option<String>,
}

/// Service for report operations
pub struct ReportService {
    repository: Arc<dyn ReportRepository>,
    max_photo_size: usize,
    /// Held across the read-check-write of a status change
    transition_lock: Mutex<()>,
}

impl ReportService {
    pub fn new(repository: Arc<dyn ReportRepository>, max_photo_size: usize) -> Self {
        Self {
            repository,
            max_photo_size,
            transition_lock: Mutex::new(()),
        }
    }

    /// Largest accepted photo in bytes
    pub fn max_photo_size(&self) -> usize {
        self.max_photo_size
    }

    /// Validate a submission locally and store it as a new `reported` report
    pub async fn submit(&self, submission: SubmitReport) -> Result<CivicReport> {
        let new_report = self.validate_submission(submission)?;
        let id = self.repository.create(new_report).await?;

        tracing::info!("Civic report {} submitted", id);

        self.get(&id).await
    }

    fn validate_submission(&self, submission: SubmitReport) -> Result<NewCivicReport> {
        let description = submission
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty())
            .ok_or_else(|| {
                AppError::Validation("Please provide a description of the issue.".to_string())
            })?;

        let location = submission.location.ok_or_else(|| {
            AppError::Validation(
                "Please allow location access or provide a manual location.".to_string(),
            )
        })?;
        validate_coordinates(location.latitude, location.longitude)?;

        let photo = submission.photo.ok_or_else(|| {
            AppError::Validation("Please capture or upload a photo of the issue.".to_string())
        })?;
        if !photo.is_image() {
            return Err(AppError::Validation(
                "Please select a valid image file.".to_string(),
            ));
        }
        if photo.size() > self.max_photo_size {
            return Err(AppError::Validation(format!(
                "Photo is too large ({}). Maximum size is {}.",
                format_file_size(photo.size()),
                format_file_size(self.max_photo_size)
            )));
        }

        let issue_type = submission
            .issue_type
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::Validation("Please select an issue type.".to_string()))?;

        Ok(NewCivicReport {
            issue_type,
            description,
            photo,
            location,
            status: ReportStatus::Reported,
            severity: submission.severity.unwrap_or_default(),
        })
    }

    pub async fn get(&self, id: &str) -> Result<CivicReport> {
        self.repository
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Report {} not found", id)))
    }

    pub async fn list(&self, filter: &ReportFilter) -> Result<Vec<CivicReport>> {
        match (filter.status, filter.issue_type.as_deref()) {
            (None, None) => self.repository.list().await,
            (Some(status), None) => self.repository.list_by_status(status).await,
            (None, Some(issue_type)) => self.repository.list_by_type(issue_type).await,
            (Some(status), Some(issue_type)) => {
                let wanted = issue_type.to_lowercase();
                let reports = self.repository.list_by_status(status).await?;
                Ok(reports
                    .into_iter()
                    .filter(|r| r.issue_type.to_lowercase() == wanted)
                    .collect())
            }
        }
    }

    /// Move a report forward in its lifecycle; backward or repeated moves are rejected
    pub async fn advance_status(&self, id: &str, next: ReportStatus) -> Result<CivicReport> {
        let _guard = self.transition_lock.lock().await;
        let current = self.get(id).await?;

        if !current.status.can_transition_to(next) {
            return Err(AppError::Conflict(format!(
                "Report {} cannot move from {} to {}",
                id, current.status, next
            )));
        }

        if !self.repository.update_status(id, next).await? {
            return Err(AppError::NotFound(format!("Report {} not found", id)));
        }

        tracing::info!("Report {} advanced from {} to {}", id, current.status, next);

        self.get(id).await
    }

    pub async fn statistics(&self) -> Result<ReportStatistics> {
        self.repository.statistics().await
    }

    /// Demo reset: drop every report and restart the id sequence
    pub async fn reset(&self) -> Result<()> {
        self.repository.clear().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::reports::repository::{InMemoryReportStore, StoreLatency};

    fn service() -> ReportService {
        ReportService::new(
            Arc::new(InMemoryReportStore::new(StoreLatency::none())),
            1024,
        )
    }

    fn valid_submission() -> SubmitReport {
        SubmitReport {
            issue_type: Some(" Pothole ".to_string()),
            description: Some("  Deep pothole near the bus stop ".to_string()),
            severity: Some(ReportSeverity::High),
            location: Some(ReportLocation {
                latitude: 22.3072,
                longitude: 73.1812,
                address: "RC Dutt Road, Vadodara".to_string(),
            }),
            photo: Some(Photo::new("pothole.jpg", "image/jpeg", vec![1, 2, 3])),
        }
    }

    fn validation_message(err: AppError) -> String {
        match err {
            AppError::Validation(msg) => msg,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_submit_stores_trimmed_report() {
        let service = service();
        let report = service.submit(valid_submission()).await.unwrap();

        assert_eq!(report.id, "CR0001");
        assert_eq!(report.issue_type, "Pothole");
        assert_eq!(report.description, "Deep pothole near the bus stop");
        assert_eq!(report.status, ReportStatus::Reported);
        assert_eq!(report.severity, ReportSeverity::High);
    }

    #[tokio::test]
    async fn test_submit_defaults_severity_to_medium() {
        let service = service();
        let report = service
            .submit(SubmitReport {
                severity: None,
                ..valid_submission()
            })
            .await
            .unwrap();
        assert_eq!(report.severity, ReportSeverity::Medium);
    }

    #[tokio::test]
    async fn test_description_checked_before_location() {
        let service = service();
        let err = service
            .submit(SubmitReport {
                description: Some("   ".to_string()),
                location: None,
                ..valid_submission()
            })
            .await
            .unwrap_err();
        assert_eq!(
            validation_message(err),
            "Please provide a description of the issue."
        );
    }

    #[tokio::test]
    async fn test_missing_location_blocks_submission() {
        let service = service();
        let err = service
            .submit(SubmitReport {
                location: None,
                ..valid_submission()
            })
            .await
            .unwrap_err();
        assert_eq!(
            validation_message(err),
            "Please allow location access or provide a manual location."
        );
        assert!(service.list(&ReportFilter::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_photo_must_be_small_image() {
        let service = service();

        let err = service
            .submit(SubmitReport {
                photo: Some(Photo::new("notes.txt", "text/plain", vec![1])),
                ..valid_submission()
            })
            .await
            .unwrap_err();
        assert_eq!(validation_message(err), "Please select a valid image file.");

        let err = service
            .submit(SubmitReport {
                photo: Some(Photo::new("big.jpg", "image/jpeg", vec![0; 2048])),
                ..valid_submission()
            })
            .await
            .unwrap_err();
        assert!(validation_message(err).starts_with("Photo is too large (2 KB)"));
    }

    #[tokio::test]
    async fn test_advance_status_follows_lifecycle() {
        let service = service();
        let report = service.submit(valid_submission()).await.unwrap();

        let moved = service
            .advance_status(&report.id, ReportStatus::InProgress)
            .await
            .unwrap();
        assert_eq!(moved.status, ReportStatus::InProgress);
        assert!(moved.updated_at >= moved.submitted_at);

        let err = service
            .advance_status(&report.id, ReportStatus::Reported)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        let err = service
            .advance_status(&report.id, ReportStatus::InProgress)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        let resolved = service
            .advance_status(&report.id, ReportStatus::Resolved)
            .await
            .unwrap();
        assert_eq!(resolved.status, ReportStatus::Resolved);
    }

    #[tokio::test]
    async fn test_concurrent_transitions_never_move_backward() {
        let latency = StoreLatency {
            get: std::time::Duration::from_millis(50),
            ..StoreLatency::none()
        };
        let service = ReportService::new(Arc::new(InMemoryReportStore::new(latency)), 1024);
        let report = service.submit(valid_submission()).await.unwrap();

        let (to_progress, to_resolved) = tokio::join!(
            service.advance_status(&report.id, ReportStatus::InProgress),
            service.advance_status(&report.id, ReportStatus::Resolved),
        );

        assert!(to_resolved.is_ok());
        if let Err(err) = to_progress {
            assert!(matches!(err, AppError::Conflict(_)));
        }
        let stored = service.get(&report.id).await.unwrap();
        assert_eq!(stored.status, ReportStatus::Resolved);
    }

    #[tokio::test]
    async fn test_advance_unknown_report_is_not_found() {
        let err = service()
            .advance_status("CR9999", ReportStatus::Resolved)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list_combines_status_and_type_filters() {
        let service = service();
        let pothole = service.submit(valid_submission()).await.unwrap();
        service
            .submit(SubmitReport {
                issue_type: Some("Garbage".to_string()),
                ..valid_submission()
            })
            .await
            .unwrap();
        service
            .advance_status(&pothole.id, ReportStatus::InProgress)
            .await
            .unwrap();

        let filter = ReportFilter {
            status: Some(ReportStatus::InProgress),
            issue_type: Some("POTHOLE".to_string()),
        };
        let reports = service.list(&filter).await.unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].id, pothole.id);

        let garbage_only = ReportFilter {
            issue_type: Some("garbage".to_string()),
            ..Default::default()
        };
        assert_eq!(service.list(&garbage_only).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_reset_restarts_ids() {
        let service = service();
        service.submit(valid_submission()).await.unwrap();
        service.submit(valid_submission()).await.unwrap();

        service.reset().await.unwrap();
        assert_eq!(service.statistics().await.unwrap().total, 0);
        assert_eq!(service.submit(valid_submission()).await.unwrap().id, "CR0001");
    }
}
