use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};

use super::authorizer::InteractiveAuthorizer;
use super::client_config::ClientConfig;
use super::error::TokenLoadError;
use super::prompt::ConsentPrompt;
use super::refresh::OAuthRefresher;
use super::store::{TokenLocation, TokenStore};
use super::token::Credential;
use super::transport::AuthorizedClient;
use crate::error::{GmailAuthError, Result};

/// Loads or obtains a credential and wraps it into a refreshing transport.
///
/// User interaction goes through the [`ConsentPrompt`]; the session itself
/// never touches the console.
///
/// # Example
/// ```no_run
/// use std::path::Path;
/// use std::sync::Arc;
/// use gmail_auth::auth::{AuthSession, ClientConfig, ConsolePrompt, FileTokenStore};
/// use gmail_auth::scopes::Scope;
///
/// # async fn example() -> gmail_auth::error::Result<()> {
/// let config = ClientConfig::from_file(Path::new("client_secret.json"), [Scope::Send.as_str()])?;
/// let session = AuthSession::new(Arc::new(FileTokenStore::new()), Arc::new(ConsolePrompt::new()));
/// let client = session.acquire(&config, Path::new("gmail-token.json")).await?;
/// # Ok(())
/// # }
/// ```
pub struct AuthSession {
    store: Arc<dyn TokenStore>,
    authorizer: InteractiveAuthorizer,
    http: reqwest::Client,
    persist_refreshed: bool,
}

impl AuthSession {
    pub fn new(store: Arc<dyn TokenStore>, prompt: Arc<dyn ConsentPrompt>) -> Self {
        let http = reqwest::Client::new();
        Self {
            store,
            authorizer: InteractiveAuthorizer::new(prompt).with_http_client(http.clone()),
            http,
            persist_refreshed: false,
        }
    }

    /// HTTP client used for the token endpoint and handed to the transport.
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.authorizer = self.authorizer.with_http_client(http.clone());
        self.http = http;
        self
    }

    /// Write refreshed credentials back to the cache file. Off by default.
    pub fn with_refresh_persistence(mut self, enabled: bool) -> Self {
        self.persist_refreshed = enabled;
        self
    }

    pub fn authorizer(&self) -> &InteractiveAuthorizer {
        &self.authorizer
    }

    /// Load the cached credential at `token_path`, or run the consent flow and
    /// cache its result, then return an authenticated client.
    ///
    /// A cached credential is used as-is, even if expired; the returned client
    /// refreshes it on first use.
    pub async fn acquire(
        &self,
        config: &ClientConfig,
        token_path: &Path,
    ) -> Result<AuthorizedClient> {
        let credential = match self.store.load(token_path) {
            Ok(credential) => {
                info!(path = %token_path.display(), "using cached oauth token");
                credential
            }
            Err(err) => {
                log_cache_miss(&err);
                self.authorize(config, token_path).await?
            }
        };
        Ok(self.wrap(config, credential, token_path))
    }

    /// [`acquire`](Self::acquire) at a resolved [`TokenLocation`].
    pub async fn acquire_at(
        &self,
        config: &ClientConfig,
        location: &TokenLocation,
    ) -> Result<AuthorizedClient> {
        self.acquire(config, &location.path()).await
    }

    /// The cached credential at `token_path`, if any.
    pub fn status(&self, token_path: &Path) -> Result<Option<Credential>> {
        match self.store.load(token_path) {
            Ok(credential) => Ok(Some(credential)),
            Err(TokenLoadError::NotFound { .. }) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Remove the cached credential at `token_path`.
    pub fn logout(&self, token_path: &Path) -> Result<()> {
        self.store
            .clear(token_path)
            .map_err(|source| GmailAuthError::TokenSave {
                path: token_path.to_path_buf(),
                source,
            })
    }

    async fn authorize(&self, config: &ClientConfig, token_path: &Path) -> Result<Credential> {
        let credential = self.authorizer.prompt_and_exchange(config).await?;
        self.store
            .save(token_path, &credential)
            .map_err(|source| GmailAuthError::TokenSave {
                path: token_path.to_path_buf(),
                source,
            })?;
        info!(path = %token_path.display(), "cached new oauth token");
        Ok(credential)
    }

    fn wrap(
        &self,
        config: &ClientConfig,
        credential: Credential,
        token_path: &Path,
    ) -> AuthorizedClient {
        let refresher = OAuthRefresher::new(self.http.clone(), Arc::new(config.clone()));
        let client = AuthorizedClient::new(self.http.clone(), credential, Arc::new(refresher));
        if self.persist_refreshed {
            client.with_write_back(self.store.clone(), token_path.to_path_buf())
        } else {
            client
        }
    }
}

fn log_cache_miss(err: &TokenLoadError) {
    match err {
        TokenLoadError::NotFound { path } => {
            info!(path = %path.display(), "no cached oauth token, starting consent flow");
        }
        other => {
            warn!(error = %other, "ignoring unusable cached oauth token, starting consent flow");
        }
    }
}
