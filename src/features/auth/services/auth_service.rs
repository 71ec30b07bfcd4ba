use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::auth::clients::AuthClient;
use crate::features::auth::dtos::{AuthResponseDto, AuthUserDto, SignInRequestDto};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::auth::services::token_service::TokenService;

/// Service for authentication operations (sign-in, current user)
pub struct AuthService {
    client: Arc<dyn AuthClient>,
    token_service: Arc<TokenService>,
}

impl AuthService {
    pub fn new(client: Arc<dyn AuthClient>, token_service: Arc<TokenService>) -> Self {
        Self {
            client,
            token_service,
        }
    }

    /// Sign in with username and password
    pub async fn sign_in(&self, dto: SignInRequestDto) -> Result<AuthResponseDto> {
        let user = self
            .client
            .authenticate(&dto.username, &dto.password)
            .await?
            .ok_or_else(|| {
                AppError::Unauthorized("Invalid username or password. Please try again.".to_string())
            })?;

        let access_token = self.token_service.issue(&user)?;

        tracing::info!("User {} signed in", user.username);

        Ok(AuthResponseDto {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.token_service.ttl().as_secs() as i64,
            user: user.into(),
        })
    }

    /// Get current user info (for /me endpoint)
    pub fn get_current_user(&self, user: AuthenticatedUser) -> AuthUserDto {
        user.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::clients::DemoAuthClient;
    use std::time::Duration;

    fn service() -> (AuthService, Arc<TokenService>) {
        let tokens = Arc::new(TokenService::new("test-secret", Duration::from_secs(600)));
        let client = Arc::new(DemoAuthClient::new("admin", "1234", Duration::ZERO));
        (AuthService::new(client, tokens.clone()), tokens)
    }

    fn request(username: &str, password: &str) -> SignInRequestDto {
        SignInRequestDto {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_sign_in_issues_bearer_token() {
        let (service, tokens) = service();
        let response = service.sign_in(request("admin", "1234")).await.unwrap();

        assert_eq!(response.token_type, "Bearer");
        assert_eq!(response.expires_in, 600);
        assert_eq!(response.user.username, "admin");
        assert_eq!(
            tokens.validate(&response.access_token).unwrap().username,
            "admin"
        );
    }

    #[tokio::test]
    async fn test_email_style_demo_username_signs_in() {
        let tokens = Arc::new(TokenService::new("test-secret", Duration::from_secs(600)));
        let client = Arc::new(DemoAuthClient::new(
            "citizen@nagar.in",
            "1234",
            Duration::ZERO,
        ));
        let service = AuthService::new(client, tokens);

        let response = service
            .sign_in(request("citizen@nagar.in", "1234"))
            .await
            .unwrap();
        assert_eq!(response.user.username, "citizen@nagar.in");
    }

    #[tokio::test]
    async fn test_wrong_password_is_unauthorized() {
        let (service, _) = service();
        match service.sign_in(request("admin", "0000")).await {
            Err(AppError::Unauthorized(msg)) => {
                assert_eq!(msg, "Invalid username or password. Please try again.")
            }
            other => panic!("expected unauthorized, got {:?}", other.map(|r| r.user)),
        }
    }
}
