#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use gmail_auth::auth::{AuthError, ConsentPrompt, Credential, TokenLoadError, TokenStore};
use reqwest::Url;

#[derive(Default)]
pub struct InMemoryTokenStore {
    tokens: Mutex<HashMap<PathBuf, Credential>>,
    saves: AtomicUsize,
    loads: AtomicUsize,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, path: &Path, credential: Credential) {
        self.tokens
            .lock()
            .expect("store lock poisoned")
            .insert(path.to_path_buf(), credential);
    }

    pub fn get(&self, path: &Path) -> Option<Credential> {
        self.tokens
            .lock()
            .expect("store lock poisoned")
            .get(path)
            .cloned()
    }

    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

impl TokenStore for InMemoryTokenStore {
    fn load(&self, path: &Path) -> Result<Credential, TokenLoadError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        self.get(path).ok_or_else(|| TokenLoadError::NotFound {
            path: path.to_path_buf(),
        })
    }

    fn save(&self, path: &Path, credential: &Credential) -> Result<(), AuthError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.seed(path, credential.clone());
        Ok(())
    }

    fn clear(&self, path: &Path) -> Result<(), AuthError> {
        self.tokens
            .lock()
            .expect("store lock poisoned")
            .remove(path);
        Ok(())
    }
}

/// Store whose cache is always empty and whose writes always fail.
#[derive(Default)]
pub struct FailingSaveStore;

impl TokenStore for FailingSaveStore {
    fn load(&self, path: &Path) -> Result<Credential, TokenLoadError> {
        Err(TokenLoadError::NotFound {
            path: path.to_path_buf(),
        })
    }

    fn save(&self, _path: &Path, _credential: &Credential) -> Result<(), AuthError> {
        Err(AuthError::Io("read-only file system".to_string()))
    }

    fn clear(&self, _path: &Path) -> Result<(), AuthError> {
        Ok(())
    }
}

/// Consent prompt returning a fixed answer and recording the URLs it was shown.
pub struct ScriptedPrompt {
    answer: Result<String, String>,
    urls: Mutex<Vec<Url>>,
}

impl ScriptedPrompt {
    pub fn code(code: &str) -> Self {
        Self {
            answer: Ok(code.to_string()),
            urls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            answer: Err(message.to_string()),
            urls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.urls.lock().expect("prompt lock poisoned").len()
    }

    pub fn last_url(&self) -> Option<Url> {
        self.urls.lock().expect("prompt lock poisoned").last().cloned()
    }
}

#[async_trait]
impl ConsentPrompt for ScriptedPrompt {
    async fn request_code(&self, authorization_url: &Url) -> Result<String, AuthError> {
        self.urls
            .lock()
            .expect("prompt lock poisoned")
            .push(authorization_url.clone());
        self.answer.clone().map_err(AuthError::Io)
    }
}

pub fn credential(access_token: &str, refresh_token: &str) -> Credential {
    Credential {
        access_token: access_token.to_string(),
        token_type: "Bearer".to_string(),
        refresh_token: refresh_token.to_string(),
        expiry: None,
    }
}

pub fn expiring_credential(
    access_token: &str,
    refresh_token: &str,
    expiry: DateTime<Utc>,
) -> Credential {
    Credential {
        expiry: Some(expiry),
        ..credential(access_token, refresh_token)
    }
}

/// Write an `installed` client secret pointing at `token_uri` and return its path.
pub fn write_client_secret(dir: &Path, token_uri: &str) -> PathBuf {
    let path = dir.join("client_secret.json");
    let body = serde_json::json!({
        "installed": {
            "client_id": "client-123.apps.googleusercontent.com",
            "client_secret": "secret-xyz",
            "auth_uri": "https://accounts.google.com/o/oauth2/auth",
            "token_uri": token_uri,
            "redirect_uris": ["urn:ietf:wg:oauth:2.0:oob", "http://localhost"]
        }
    });
    fs::write(&path, body.to_string()).expect("write client secret");
    path
}
