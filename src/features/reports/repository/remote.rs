use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use chrono::{DateTime, Utc};
use reqwest::{RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use super::ReportRepository;
use crate::core::error::{AppError, Result};
use crate::features::reports::models::{
    CivicReport, NewCivicReport, Photo, ReportLocation, ReportSeverity, ReportStatistics,
    ReportStatus,
};
use crate::shared::types::ApiResponse;

/// Photo as carried over the wire, bytes base64-encoded
#[derive(Debug, Serialize, Deserialize)]
struct WirePhoto {
    file_name: String,
    content_type: String,
    data: String,
}

impl From<&Photo> for WirePhoto {
    fn from(photo: &Photo) -> Self {
        Self {
            file_name: photo.file_name.clone(),
            content_type: photo.content_type.clone(),
            data: BASE64.encode(photo.data.as_slice()),
        }
    }
}

impl WirePhoto {
    fn into_photo(self) -> Result<Photo> {
        let data = BASE64.decode(self.data.as_bytes()).map_err(|e| {
            AppError::ReportService(format!("Report service sent invalid photo data: {}", e))
        })?;
        Ok(Photo::new(self.file_name, self.content_type, data))
    }
}

#[derive(Debug, Serialize)]
struct WireNewReport {
    issue_type: String,
    description: String,
    photo: WirePhoto,
    location: ReportLocation,
    status: ReportStatus,
    severity: ReportSeverity,
}

#[derive(Debug, Deserialize)]
struct WireReport {
    id: String,
    issue_type: String,
    description: String,
    photo: WirePhoto,
    location: ReportLocation,
    status: ReportStatus,
    severity: ReportSeverity,
    submitted_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl WireReport {
    fn into_report(self) -> Result<CivicReport> {
        Ok(CivicReport {
            id: self.id,
            issue_type: self.issue_type,
            description: self.description,
            photo: self.photo.into_photo()?,
            location: self.location,
            status: self.status,
            severity: self.severity,
            submitted_at: self.submitted_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(Debug, Deserialize)]
struct CreatedId {
    id: String,
}

#[derive(Debug, Deserialize)]
struct CountBody {
    count: usize,
}

#[derive(Debug, Serialize)]
struct StatusBody {
    status: ReportStatus,
}

/// `ReportRepository` backed by an upstream report service over HTTP
pub struct RemoteReportRepository {
    client: reqwest::Client,
    base_url: String,
}

impl RemoteReportRepository {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Option<reqwest::Response>> {
        let response = request.send().await.map_err(|e| {
            tracing::error!("Report service request failed: {:?}", e);
            AppError::ReportService(format!("Report service request failed: {}", e))
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            tracing::warn!("Report service returned status: {}", status);
            return Err(AppError::ReportService(format!(
                "Report service returned HTTP {}",
                status
            )));
        }

        Ok(Some(response))
    }

    /// Execute a request and unwrap the `ApiResponse` envelope; 404 yields `None`
    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<Option<T>> {
        let Some(response) = self.send(request).await? else {
            return Ok(None);
        };

        let envelope: ApiResponse<T> = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse report service response: {:?}", e);
            AppError::ReportService(format!(
                "Failed to parse report service response: {}",
                e
            ))
        })?;

        envelope.data.map(Some).ok_or_else(|| {
            AppError::ReportService("Report service response carried no data".to_string())
        })
    }

    async fn fetch_required<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        self.fetch(request).await?.ok_or_else(|| {
            AppError::ReportService("Report service endpoint not found".to_string())
        })
    }

    async fn fetch_reports(&self, request: RequestBuilder) -> Result<Vec<CivicReport>> {
        let wire: Vec<WireReport> = self.fetch_required(request).await?;
        wire.into_iter().map(WireReport::into_report).collect()
    }
}

#[async_trait]
impl ReportRepository for RemoteReportRepository {
    async fn create(&self, report: NewCivicReport) -> Result<String> {
        let body = WireNewReport {
            photo: WirePhoto::from(&report.photo),
            issue_type: report.issue_type,
            description: report.description,
            location: report.location,
            status: report.status,
            severity: report.severity,
        };

        let created: CreatedId = self
            .fetch_required(self.client.post(self.url("/reports")).json(&body))
            .await?;
        tracing::debug!("Upstream created report {}", created.id);
        Ok(created.id)
    }

    async fn get(&self, id: &str) -> Result<Option<CivicReport>> {
        let path = format!("/reports/{}", urlencoding::encode(id));
        let wire: Option<WireReport> = self.fetch(self.client.get(self.url(&path))).await?;
        wire.map(WireReport::into_report).transpose()
    }

    async fn list(&self) -> Result<Vec<CivicReport>> {
        self.fetch_reports(self.client.get(self.url("/reports")))
            .await
    }

    async fn update_status(&self, id: &str, status: ReportStatus) -> Result<bool> {
        let path = format!("/reports/{}/status", urlencoding::encode(id));
        let request = self
            .client
            .patch(self.url(&path))
            .json(&StatusBody { status });
        Ok(self.send(request).await?.is_some())
    }

    async fn list_by_status(&self, status: ReportStatus) -> Result<Vec<CivicReport>> {
        let request = self
            .client
            .get(self.url("/reports"))
            .query(&[("status", status.as_str())]);
        self.fetch_reports(request).await
    }

    async fn list_by_type(&self, issue_type: &str) -> Result<Vec<CivicReport>> {
        let request = self
            .client
            .get(self.url("/reports"))
            .query(&[("issue_type", issue_type)]);
        self.fetch_reports(request).await
    }

    async fn statistics(&self) -> Result<ReportStatistics> {
        self.fetch_required(self.client.get(self.url("/reports/statistics")))
            .await
    }

    async fn clear(&self) -> Result<()> {
        self.send(self.client.delete(self.url("/reports"))).await?;
        Ok(())
    }

    async fn count(&self) -> Result<usize> {
        let body: CountBody = self
            .fetch_required(self.client.get(self.url("/reports/count")))
            .await?;
        Ok(body.count)
    }
}
