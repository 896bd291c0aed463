use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::client_config::ClientConfig;
use super::error::AuthError;
use super::grant::request_token;
use super::token::Credential;

/// Mints a new access token from a credential's refresh token.
#[async_trait]
pub trait TokenRefresher: Send + Sync {
    async fn refresh(&self, credential: &Credential) -> Result<Credential, AuthError>;
}

/// Refreshes against the token endpoint of a [`ClientConfig`].
#[derive(Clone)]
pub struct OAuthRefresher {
    http: reqwest::Client,
    config: Arc<ClientConfig>,
}

impl OAuthRefresher {
    pub fn new(http: reqwest::Client, config: Arc<ClientConfig>) -> Self {
        Self { http, config }
    }
}

#[async_trait]
impl TokenRefresher for OAuthRefresher {
    async fn refresh(&self, credential: &Credential) -> Result<Credential, AuthError> {
        if credential.refresh_token.is_empty() {
            return Err(AuthError::MissingRefreshToken);
        }

        let mut refreshed = request_token(
            &self.http,
            self.config.token_uri(),
            &[
                ("grant_type", "refresh_token"),
                ("refresh_token", credential.refresh_token.as_str()),
                ("client_id", self.config.client_id()),
                ("client_secret", self.config.client_secret()),
            ],
        )
        .await?;

        // Google usually omits the refresh token on refresh; keep the one we have.
        if refreshed.refresh_token.is_empty() {
            refreshed.refresh_token = credential.refresh_token.clone();
        }
        debug!(expiry = ?refreshed.expiry, "access token refreshed");
        Ok(refreshed)
    }
}
