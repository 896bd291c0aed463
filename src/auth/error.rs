use std::path::PathBuf;

use thiserror::Error;

/// Low-level errors from token storage and the OAuth token endpoint.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Access denied")]
    AccessDenied,
    #[error("Expired or invalid grant")]
    ExpiredOrInvalidGrant,
    #[error("Token expired and refresh token is not set")]
    MissingRefreshToken,
    #[error("Token endpoint rejected request (status {status}): {error} {description}")]
    Rejected {
        status: u16,
        error: String,
        description: String,
    },
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<reqwest::Error> for AuthError {
    fn from(error: reqwest::Error) -> Self {
        Self::Network(error.to_string())
    }
}

impl From<std::io::Error> for AuthError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error.to_string())
    }
}

impl From<serde_json::Error> for AuthError {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization(error.to_string())
    }
}

/// Why a cached credential could not be loaded.
///
/// Every variant means "no usable cached credential": the session falls back
/// to interactive authorization instead of failing.
#[derive(Debug, Error)]
pub enum TokenLoadError {
    #[error("no cached token at {}", path.display())]
    NotFound { path: PathBuf },
    #[error("cached token at {} is malformed: {message}", path.display())]
    Parse { path: PathBuf, message: String },
    #[error("failed to read cached token at {}: {message}", path.display())]
    Io { path: PathBuf, message: String },
}

impl TokenLoadError {
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::NotFound { path } | Self::Parse { path, .. } | Self::Io { path, .. } => path,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
