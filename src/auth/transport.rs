use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use reqwest::header::AUTHORIZATION;
use reqwest::{IntoUrl, Method, RequestBuilder};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::error::AuthError;
use super::refresh::TokenRefresher;
use super::store::TokenStore;
use super::token::Credential;
use crate::error::{GmailAuthError, Result};

/// HTTP client that attaches the OAuth credential to every request and
/// refreshes it when it is missing or about to expire.
///
/// Cloning is cheap; clones share the credential, so a refresh done through
/// one clone is seen by all of them. Concurrent requests that find the
/// credential stale wait on the same lock and only the first one refreshes.
#[derive(Clone)]
pub struct AuthorizedClient {
    http: reqwest::Client,
    credential: Arc<Mutex<Credential>>,
    refresher: Arc<dyn TokenRefresher>,
    write_back: Option<WriteBack>,
}

#[derive(Clone)]
struct WriteBack {
    store: Arc<dyn TokenStore>,
    path: PathBuf,
}

impl WriteBack {
    /// Save on the blocking pool; failures are logged, never returned.
    async fn persist(&self, credential: &Credential) {
        let store = self.store.clone();
        let path = self.path.clone();
        let credential = credential.clone();
        let result = tokio::task::spawn_blocking(move || store.save(&path, &credential))
            .await
            .map_err(|err| AuthError::Io(format!("write-back task failed: {err}")))
            .and_then(|saved| saved);
        if let Err(err) = result {
            warn!(
                path = %self.path.display(),
                error = %err,
                "failed to persist refreshed token"
            );
        }
    }
}

impl fmt::Debug for AuthorizedClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthorizedClient")
            .field("credential", &"..")
            .field(
                "write_back",
                &self.write_back.as_ref().map(|w| w.path.display().to_string()),
            )
            .finish()
    }
}

impl AuthorizedClient {
    pub fn new(
        http: reqwest::Client,
        credential: Credential,
        refresher: Arc<dyn TokenRefresher>,
    ) -> Self {
        Self {
            http,
            credential: Arc::new(Mutex::new(credential)),
            refresher,
            write_back: None,
        }
    }

    /// Persist refreshed credentials to `path` through `store`.
    pub fn with_write_back(mut self, store: Arc<dyn TokenStore>, path: PathBuf) -> Self {
        self.write_back = Some(WriteBack { store, path });
        self
    }

    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Current credential, without refreshing.
    pub async fn snapshot(&self) -> Credential {
        self.credential.lock().await.clone()
    }

    /// A credential valid for at least the expiry delta, refreshing if needed.
    pub async fn credential(&self) -> Result<Credential> {
        let mut current = self.credential.lock().await;
        if current.is_valid() {
            return Ok(current.clone());
        }

        debug!(
            empty_access_token = current.access_token.is_empty(),
            expiry = ?current.expiry,
            "access token stale, refreshing"
        );
        let refreshed = self
            .refresher
            .refresh(&current)
            .await
            .map_err(GmailAuthError::Refresh)?;

        if let Some(write_back) = &self.write_back {
            write_back.persist(&refreshed).await;
        }

        *current = refreshed.clone();
        Ok(refreshed)
    }

    /// Start a request with the `Authorization` header set.
    pub async fn request<U: IntoUrl>(&self, method: Method, url: U) -> Result<RequestBuilder> {
        let credential = self.credential().await?;
        Ok(self
            .http
            .request(method, url)
            .header(AUTHORIZATION, credential.authorization_header()))
    }

    pub async fn get<U: IntoUrl>(&self, url: U) -> Result<RequestBuilder> {
        self.request(Method::GET, url).await
    }
}
