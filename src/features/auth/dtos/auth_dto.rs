use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::auth::model::AuthenticatedUser;

/// Request DTO for sign-in
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct SignInRequestDto {
    /// Checked against the configured credentials only
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Response DTO for sign-in
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponseDto {
    /// Signed HS256 access token
    pub access_token: String,
    /// Token type (always "Bearer")
    pub token_type: String,
    /// Token expiry time in seconds
    pub expires_in: i64,
    pub user: AuthUserDto,
}

/// User info included in auth responses
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthUserDto {
    pub username: String,
    pub display_name: String,
}

impl From<AuthenticatedUser> for AuthUserDto {
    fn from(user: AuthenticatedUser) -> Self {
        Self {
            username: user.username,
            display_name: user.display_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(username: &str, password: &str) -> SignInRequestDto {
        SignInRequestDto {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_blank_fields_fail_validation() {
        assert!(dto("admin", "1234").validate().is_ok());
        assert!(dto("", "1234").validate().is_err());
        assert!(dto("admin", "").validate().is_err());
    }

    #[test]
    fn test_username_shape_is_not_validated() {
        assert!(dto("citizen@nagar.in", "1234").validate().is_ok());
        assert!(dto("user-name", "1234").validate().is_ok());
    }
}
