use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::dtos::{AuthResponseDto, AuthUserDto, SignInRequestDto};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::auth::services::AuthService;
use crate::shared::types::ApiResponse;
use axum::{extract::State, Json};
use std::sync::Arc;
use validator::Validate;

/// Sign in with the demo credentials
#[utoipa::path(
    post,
    path = "/api/auth/sign-in",
    request_body = SignInRequestDto,
    responses(
        (status = 200, description = "Signed in successfully", body = ApiResponse<AuthResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "auth"
)]
pub async fn sign_in(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<SignInRequestDto>,
) -> Result<Json<ApiResponse<AuthResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let auth_response = service.sign_in(dto).await?;
    Ok(Json(ApiResponse::success(Some(auth_response), None, None)))
}

/// Sign out (tokens are stateless; the client drops its copy)
#[utoipa::path(
    post,
    path = "/api/auth/sign-out",
    responses(
        (status = 200, description = "Signed out"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "auth",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn sign_out(user: AuthenticatedUser) -> Result<Json<ApiResponse<()>>> {
    tracing::info!("User {} signed out", user.username);
    Ok(Json(ApiResponse::success(
        None,
        Some("Signed out successfully".to_string()),
        None,
    )))
}

/// Get current authenticated user info
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user retrieved successfully", body = ApiResponse<AuthUserDto>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "auth",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_me(
    user: AuthenticatedUser,
    State(service): State<Arc<AuthService>>,
) -> Result<Json<ApiResponse<AuthUserDto>>> {
    let user_data = service.get_current_user(user);
    Ok(Json(ApiResponse::success(Some(user_data), None, None)))
}
