use async_trait::async_trait;
use std::time::Duration;

use crate::core::config::AuthConfig;
use crate::core::error::Result;
use crate::features::auth::model::AuthenticatedUser;

/// Checks credentials against an identity provider
#[async_trait]
pub trait AuthClient: Send + Sync {
    /// `Ok(None)` means the credentials were rejected
    async fn authenticate(&self, username: &str, password: &str)
        -> Result<Option<AuthenticatedUser>>;
}

/// Accepts exactly one configured username/password pair
pub struct DemoAuthClient {
    username: String,
    password: String,
    delay: Duration,
}

impl DemoAuthClient {
    pub fn new(username: impl Into<String>, password: impl Into<String>, delay: Duration) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            delay,
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(
            config.demo_username.clone(),
            config.demo_password.clone(),
            config.sign_in_delay,
        )
    }
}

#[async_trait]
impl AuthClient for DemoAuthClient {
    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<AuthenticatedUser>> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        if username != self.username || password != self.password {
            tracing::debug!("Rejected sign-in attempt for {}", username);
            return Ok(None);
        }

        Ok(Some(AuthenticatedUser {
            username: self.username.clone(),
            display_name: self.username.clone(),
        }))
    }
}
