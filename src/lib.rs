//! gmail-auth: OAuth2 for the Gmail API with a local token cache.
//!
//! The first run for a user and scope set walks through Google's consent page
//! (the URL is printed, the code is pasted back). The resulting credential is
//! cached on disk and reused afterwards; the access token is refreshed
//! transparently by the returned client.
//!
//! # Quick Start
//!
//! ```no_run
//! use gmail_auth::scopes::Scope;
//!
//! # async fn example() -> gmail_auth::error::Result<()> {
//! let gmail = gmail_auth::authenticate("client_secret.json", Scope::Readonly).await?;
//! let labels: serde_json::Value = gmail.get_json("users/me/labels").await?;
//! println!("{labels}");
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod scopes;
pub mod service;

#[cfg(feature = "cli")]
pub mod cli;

pub use client::{authenticate, authenticate_with};
pub use error::{GmailAuthError, Result};
pub use scopes::Scope;
pub use service::GmailService;
