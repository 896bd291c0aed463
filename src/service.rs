//! Gmail API client handle built on an [`AuthorizedClient`].

use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::auth::AuthorizedClient;
use crate::error::{GmailAuthError, Result};

pub const DEFAULT_BASE_URL: &str = "https://gmail.googleapis.com/gmail/v1/";
pub const DEFAULT_USER_ID: &str = "me";

/// Ready-to-use Gmail API handle.
///
/// Paths passed to [`request`](Self::request) are relative to the base URL,
/// e.g. `users/me/labels`.
#[derive(Debug, Clone)]
pub struct GmailService {
    client: AuthorizedClient,
    base_url: Url,
    user_id: String,
}

impl GmailService {
    pub fn new(client: AuthorizedClient) -> Result<Self> {
        Self::with_base_url(client, DEFAULT_BASE_URL)
    }

    /// Build against a non-default API root (a proxy or a test server).
    pub fn with_base_url(client: AuthorizedClient, base_url: &str) -> Result<Self> {
        let base_url = parse_base_url(base_url)?;
        Ok(Self {
            client,
            base_url,
            user_id: DEFAULT_USER_ID.to_string(),
        })
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn client(&self) -> &AuthorizedClient {
        &self.client
    }

    pub fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|err| {
                GmailAuthError::ServiceConstruction(format!("invalid path `{path}`: {err}"))
            })
    }

    /// `users/{user_id}/{path}`
    pub fn user_endpoint(&self, path: &str) -> Result<Url> {
        self.endpoint(&format!(
            "users/{}/{}",
            self.user_id,
            path.trim_start_matches('/')
        ))
    }

    pub async fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.endpoint(path)?;
        self.client.request(method, url).await
    }

    /// GET `path` and decode the JSON body.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let resp = self.request(Method::GET, path).await?.send().await?;
        let status = resp.status();
        debug!(path, status = status.as_u16(), "gmail api response");
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(GmailAuthError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(resp.json().await?)
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw).map_err(|err| {
        GmailAuthError::ServiceConstruction(format!("invalid base url `{raw}`: {err}"))
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(GmailAuthError::ServiceConstruction(format!(
            "unsupported base url scheme `{}`",
            url.scheme()
        )));
    }
    if url.cannot_be_a_base() {
        return Err(GmailAuthError::ServiceConstruction(format!(
            "base url `{raw}` cannot be a base"
        )));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
