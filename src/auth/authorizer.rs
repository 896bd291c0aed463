use std::sync::Arc;

use reqwest::Url;
use tracing::{debug, info};

use super::client_config::ClientConfig;
use super::error::AuthError;
use super::grant::request_token;
use super::prompt::ConsentPrompt;
use super::token::Credential;
use crate::error::{GmailAuthError, Result};

/// Opaque state value sent with the authorization request.
pub const AUTH_STATE: &str = "state-token";

/// Drives the one-time consent exchange.
///
/// Builds the authorization URL, hands it to a [`ConsentPrompt`] and exchanges
/// the returned code at the token endpoint.
///
/// # Example
/// ```no_run
/// use std::sync::Arc;
/// use gmail_auth::auth::{ClientConfig, ConsolePrompt, InteractiveAuthorizer};
///
/// # async fn example(config: ClientConfig) -> gmail_auth::error::Result<()> {
/// let authorizer = InteractiveAuthorizer::new(Arc::new(ConsolePrompt::new()));
/// let credential = authorizer.prompt_and_exchange(&config).await?;
/// println!("token type: {}", credential.auth_scheme());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct InteractiveAuthorizer {
    http: reqwest::Client,
    prompt: Arc<dyn ConsentPrompt>,
}

impl InteractiveAuthorizer {
    pub fn new(prompt: Arc<dyn ConsentPrompt>) -> Self {
        Self {
            http: reqwest::Client::new(),
            prompt,
        }
    }

    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    /// Authorization endpoint URL requesting offline access, so the provider
    /// issues a refresh token alongside the access token.
    pub fn authorization_url(&self, config: &ClientConfig) -> Url {
        let mut url = config.auth_uri().clone();
        url.query_pairs_mut()
            .append_pair("access_type", "offline")
            .append_pair("client_id", config.client_id())
            .append_pair("redirect_uri", config.redirect_uri())
            .append_pair("response_type", "code")
            .append_pair("scope", &config.scopes().join(" "))
            .append_pair("state", AUTH_STATE);
        url
    }

    /// Show the authorization URL, wait for the user to paste the code and
    /// exchange it for a credential.
    pub async fn prompt_and_exchange(&self, config: &ClientConfig) -> Result<Credential> {
        let url = self.authorization_url(config);
        info!(scopes = ?config.scopes(), "requesting user consent");

        let code = self
            .prompt
            .request_code(&url)
            .await
            .map_err(|err| GmailAuthError::InteractiveInput(err.to_string()))?;
        let code = code.trim();
        if code.is_empty() {
            return Err(GmailAuthError::InteractiveInput(
                "empty authorization code".to_string(),
            ));
        }

        self.exchange_code(config, code)
            .await
            .map_err(GmailAuthError::Exchange)
    }

    /// Exchange an authorization code at the token endpoint.
    pub async fn exchange_code(
        &self,
        config: &ClientConfig,
        code: &str,
    ) -> std::result::Result<Credential, AuthError> {
        let credential = request_token(
            &self.http,
            config.token_uri(),
            &[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", config.redirect_uri()),
                ("client_id", config.client_id()),
                ("client_secret", config.client_secret()),
            ],
        )
        .await?;
        debug!(
            has_refresh_token = !credential.refresh_token.is_empty(),
            "authorization code exchanged"
        );
        Ok(credential)
    }
}
