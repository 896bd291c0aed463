//! OAuth authorization-code flow, token caching and refreshing transport.

pub mod authorizer;
pub mod client_config;
pub mod error;
mod grant;
pub mod prompt;
pub mod refresh;
pub mod session;
pub mod store;
pub mod token;
pub mod transport;

pub use authorizer::{InteractiveAuthorizer, AUTH_STATE};
pub use client_config::ClientConfig;
pub use error::{AuthError, TokenLoadError};
pub use prompt::{ConsentPrompt, ConsolePrompt};
pub use refresh::{OAuthRefresher, TokenRefresher};
pub use session::AuthSession;
pub use store::{FileTokenStore, TokenCacheKey, TokenLocation, TokenStore, DEFAULT_TOKEN_FILE};
pub use token::{Credential, EXPIRY_DELTA_SECS};
pub use transport::AuthorizedClient;
