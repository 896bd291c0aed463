//! Error types for gmail-auth.

use std::path::PathBuf;

use strum::Display;
use thiserror::Error;

use crate::auth::{AuthError, TokenLoadError};

/// Primary error type returned by the authentication flow.
#[derive(Error, Debug)]
pub enum GmailAuthError {
    #[error("unable to read client secret file {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to parse client secret file: {0}")]
    ConfigParse(String),

    #[error("unable to load cached token: {0}")]
    TokenLoad(#[from] TokenLoadError),

    #[error("unable to save oauth token to {}: {source}", path.display())]
    TokenSave {
        path: PathBuf,
        #[source]
        source: AuthError,
    },

    #[error("unable to read authorization code: {0}")]
    InteractiveInput(String),

    #[error("unable to retrieve token from web: {0}")]
    Exchange(#[source] AuthError),

    #[error("unable to refresh access token: {0}")]
    Refresh(#[source] AuthError),

    #[error("unable to create gmail service: {0}")]
    ServiceConstruction(String),

    #[error("Gmail API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Phase of the flow an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum AuthPhase {
    Configuration,
    TokenCache,
    Consent,
    Exchange,
    Refresh,
    Service,
}

impl GmailAuthError {
    /// Classify this error by the phase that produced it.
    pub fn phase(&self) -> AuthPhase {
        match self {
            Self::ConfigRead { .. } | Self::ConfigParse(_) => AuthPhase::Configuration,
            Self::TokenLoad(_) | Self::TokenSave { .. } => AuthPhase::TokenCache,
            Self::InteractiveInput(_) => AuthPhase::Consent,
            Self::Exchange(_) => AuthPhase::Exchange,
            Self::Refresh(_) => AuthPhase::Refresh,
            Self::ServiceConstruction(_) | Self::Api { .. } | Self::Network(_) => {
                AuthPhase::Service
            }
        }
    }

    /// Whether running the consent flow again could fix this error.
    pub fn needs_reauthorization(&self) -> bool {
        match self {
            Self::Refresh(AuthError::ExpiredOrInvalidGrant)
            | Self::Refresh(AuthError::MissingRefreshToken)
            | Self::Refresh(AuthError::AccessDenied) => true,
            Self::Api { status, .. } => *status == 401,
            _ => false,
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, GmailAuthError>;
