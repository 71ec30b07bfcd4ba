use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::shared::types::ApiResponse;

#[derive(Debug, Error)]
pub enum AppError {
    /// Unknown report id or route resource
    #[error("Not found: {0}")]
    NotFound(String),

    /// A citizen-facing message; sent back verbatim
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Illegal report status transition
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The hosted report data service failed or answered garbage
    #[error("Report service error: {0}")]
    ReportService(String),

    /// Reverse geocoding lookup failed
    #[error("Geocoding error: {0}")]
    Geocoding(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, errors) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone(), Some(vec![msg])),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg, None),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg, None),
            AppError::ReportService(msg) => {
                tracing::error!("Report service error: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    "Report service is unavailable. Please try again later.".to_string(),
                    Some(vec![msg]),
                )
            }
            AppError::Geocoding(msg) => {
                tracing::warn!("Geocoding error: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    "Could not look up an address for this location.".to_string(),
                    Some(vec![msg]),
                )
            }
        };

        let body = Json(ApiResponse::<()>::error(Some(message), errors));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn render(err: AppError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_validation_message_is_returned_verbatim() {
        let (status, body) = render(AppError::Validation(
            "Please select an issue type.".to_string(),
        ))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Please select an issue type.");
        assert_eq!(body["errors"][0], "Please select an issue type.");
    }

    #[tokio::test]
    async fn test_upstream_failures_are_bad_gateway() {
        let (status, body) =
            render(AppError::ReportService("connection refused".to_string())).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(
            body["message"],
            "Report service is unavailable. Please try again later."
        );

        let (status, _) = render(AppError::Geocoding("timeout".to_string())).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }
}
