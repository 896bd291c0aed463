//! Configuration (layered: code > env > defaults).

use std::path::PathBuf;
use std::time::Duration;

use crate::auth::{TokenCacheKey, TokenLocation};
use crate::error::Result;
use crate::service::DEFAULT_BASE_URL;

pub const ENV_CLIENT_SECRET_FILE: &str = "GMAIL_CLIENT_SECRET_FILE";
pub const ENV_TOKEN_PATH: &str = "GMAIL_TOKEN_PATH";
pub const ENV_TOKEN_DIR: &str = "GMAIL_TOKEN_DIR";
pub const ENV_USER: &str = "GMAIL_USER";
pub const ENV_API_BASE_URL: &str = "GMAIL_API_BASE_URL";
pub const ENV_PERSIST_REFRESHED_TOKENS: &str = "GMAIL_PERSIST_REFRESHED_TOKENS";

const DEFAULT_CLIENT_SECRET_FILE: &str = "client_secret.json";
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(120);

/// Settings for the authentication flow.
///
/// `token_path` pins the cache to one file for every scope set. When it is
/// unset the cache file is derived from `user` and the requested scopes and
/// lives under `token_dir`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GmailAuthConfig {
    pub client_secret_file: PathBuf,
    pub token_path: Option<PathBuf>,
    pub token_dir: PathBuf,
    pub user: String,
    pub api_base_url: String,
    pub persist_refreshed_tokens: bool,
    pub http_timeout: Duration,
}

impl Default for GmailAuthConfig {
    fn default() -> Self {
        Self {
            client_secret_file: PathBuf::from(DEFAULT_CLIENT_SECRET_FILE),
            token_path: None,
            token_dir: default_token_dir(),
            user: "default".to_string(),
            api_base_url: DEFAULT_BASE_URL.to_string(),
            persist_refreshed_tokens: false,
            http_timeout: DEFAULT_HTTP_TIMEOUT,
        }
    }
}

impl GmailAuthConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by `GMAIL_*` environment variables (a `.env` file
    /// is loaded first if present).
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) with an explicit variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let mut config = Self::default();

        if let Some(path) = get(ENV_CLIENT_SECRET_FILE) {
            config.client_secret_file = PathBuf::from(path);
        }
        if let Some(path) = get(ENV_TOKEN_PATH) {
            config.token_path = Some(PathBuf::from(path));
        }
        if let Some(dir) = get(ENV_TOKEN_DIR) {
            config.token_dir = PathBuf::from(dir);
        }
        if let Some(user) = get(ENV_USER) {
            config.user = user;
        }
        if let Some(url) = get(ENV_API_BASE_URL) {
            config.api_base_url = url;
        }
        if let Some(flag) = get(ENV_PERSIST_REFRESHED_TOKENS) {
            config.persist_refreshed_tokens = parse_flag(&flag);
        }
        config
    }

    pub fn with_client_secret_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.client_secret_file = path.into();
        self
    }

    pub fn with_token_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.token_path = Some(path.into());
        self
    }

    pub fn with_token_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.token_dir = dir.into();
        self
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = user.into();
        self
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn with_refresh_persistence(mut self, enabled: bool) -> Self {
        self.persist_refreshed_tokens = enabled;
        self
    }

    pub fn with_http_timeout(mut self, timeout: Duration) -> Self {
        self.http_timeout = timeout;
        self
    }

    /// Where the credential for `scopes` is cached.
    pub fn token_location(&self, scopes: &[String]) -> TokenLocation {
        match &self.token_path {
            Some(path) => TokenLocation::Fixed(path.clone()),
            None => TokenLocation::Keyed {
                dir: self.token_dir.clone(),
                key: TokenCacheKey::new(&self.user, scopes.iter().cloned()),
            },
        }
    }

    /// HTTP client for the token endpoint and the Gmail API.
    pub fn http_client(&self) -> Result<reqwest::Client> {
        Ok(reqwest::Client::builder()
            .timeout(self.http_timeout)
            .build()?)
    }
}

fn default_token_dir() -> PathBuf {
    directories::UserDirs::new()
        .map(|dirs| dirs.home_dir().join(".gmail-auth"))
        .unwrap_or_else(|| PathBuf::from(".gmail-auth"))
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_env() {
        let config = GmailAuthConfig::from_lookup(|_| None);
        assert_eq!(config, GmailAuthConfig::default());
        assert_eq!(config.client_secret_file, PathBuf::from("client_secret.json"));
        assert!(config.token_path.is_none());
        assert!(!config.persist_refreshed_tokens);
    }

    #[test]
    fn env_overrides_defaults() {
        let config = GmailAuthConfig::from_lookup(lookup(&[
            (ENV_CLIENT_SECRET_FILE, "/etc/gmail/secret.json"),
            (ENV_TOKEN_PATH, "gmail-token.json"),
            (ENV_TOKEN_DIR, "/var/lib/gmail"),
            (ENV_USER, "work"),
            (ENV_API_BASE_URL, "http://localhost:9000/gmail/v1/"),
            (ENV_PERSIST_REFRESHED_TOKENS, "TRUE"),
        ]));
        assert_eq!(config.client_secret_file, PathBuf::from("/etc/gmail/secret.json"));
        assert_eq!(config.token_path, Some(PathBuf::from("gmail-token.json")));
        assert_eq!(config.token_dir, PathBuf::from("/var/lib/gmail"));
        assert_eq!(config.user, "work");
        assert_eq!(config.api_base_url, "http://localhost:9000/gmail/v1/");
        assert!(config.persist_refreshed_tokens);
    }

    #[test]
    fn blank_env_values_are_ignored() {
        let config = GmailAuthConfig::from_lookup(lookup(&[(ENV_USER, "   ")]));
        assert_eq!(config.user, "default");
    }

    #[test]
    fn explicit_token_path_is_fixed_location() {
        let config = GmailAuthConfig::new().with_token_path("gmail-token.json");
        assert_eq!(
            config.token_location(&["a".to_string()]),
            TokenLocation::Fixed(PathBuf::from("gmail-token.json"))
        );
    }

    #[test]
    fn default_location_is_keyed_by_user_and_scopes() {
        let config = GmailAuthConfig::new().with_token_dir("/tokens").with_user("me");
        let send = config.token_location(&["send".to_string()]).path();
        let read = config.token_location(&["readonly".to_string()]).path();
        assert!(send.starts_with("/tokens"));
        assert_ne!(send, read);
    }
}
