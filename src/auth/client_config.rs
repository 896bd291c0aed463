use std::fmt;
use std::path::Path;

use reqwest::Url;
use serde::Deserialize;

use crate::error::{GmailAuthError, Result};

const DEFAULT_AUTH_URI: &str = "https://accounts.google.com/o/oauth2/auth";
const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// OAuth client configuration parsed from a Google client-secret document,
/// bound to the scopes requested for this run.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    client_id: String,
    client_secret: String,
    auth_uri: Url,
    token_uri: Url,
    redirect_uri: String,
    scopes: Vec<String>,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"..")
            .field("auth_uri", &self.auth_uri.as_str())
            .field("token_uri", &self.token_uri.as_str())
            .field("redirect_uri", &self.redirect_uri)
            .field("scopes", &self.scopes)
            .finish()
    }
}

impl ClientConfig {
    /// Parse the client-secret document (`{"installed": {...}}` or
    /// `{"web": {...}}`) and attach the requested scopes.
    pub fn from_json<I, S>(raw: &[u8], scopes: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let file: ClientSecretFile = serde_json::from_slice(raw)
            .map_err(|err| GmailAuthError::ConfigParse(err.to_string()))?;
        let secret = file.web.or(file.installed).ok_or_else(|| {
            GmailAuthError::ConfigParse(
                "no `installed` or `web` credentials found".to_string(),
            )
        })?;

        if secret.client_id.trim().is_empty() {
            return Err(GmailAuthError::ConfigParse("missing client_id".to_string()));
        }
        let redirect_uri = secret.redirect_uris.into_iter().next().ok_or_else(|| {
            GmailAuthError::ConfigParse("missing redirect URL in client secret".to_string())
        })?;
        let auth_uri = parse_endpoint("auth_uri", secret.auth_uri.as_deref(), DEFAULT_AUTH_URI)?;
        let token_uri =
            parse_endpoint("token_uri", secret.token_uri.as_deref(), DEFAULT_TOKEN_URI)?;

        Ok(Self {
            client_id: secret.client_id,
            client_secret: secret.client_secret,
            auth_uri,
            token_uri,
            redirect_uri,
            scopes: scopes.into_iter().map(Into::into).collect(),
        })
    }

    /// Read and parse a client-secret file.
    pub fn from_file<I, S>(path: &Path, scopes: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let raw = std::fs::read(path).map_err(|source| GmailAuthError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw, scopes)
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    pub fn auth_uri(&self) -> &Url {
        &self.auth_uri
    }

    pub fn token_uri(&self) -> &Url {
        &self.token_uri
    }

    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }

    pub fn scopes(&self) -> &[String] {
        &self.scopes
    }
}

#[derive(Debug, Deserialize)]
struct ClientSecretFile {
    installed: Option<ClientSecret>,
    web: Option<ClientSecret>,
}

#[derive(Debug, Deserialize)]
struct ClientSecret {
    #[serde(default)]
    client_id: String,
    #[serde(default)]
    client_secret: String,
    auth_uri: Option<String>,
    token_uri: Option<String>,
    #[serde(default)]
    redirect_uris: Vec<String>,
}

fn parse_endpoint(field: &str, value: Option<&str>, default: &str) -> Result<Url> {
    let raw = match value.map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => default,
    };
    Url::parse(raw)
        .map_err(|err| GmailAuthError::ConfigParse(format!("invalid {field} `{raw}`: {err}")))
}
