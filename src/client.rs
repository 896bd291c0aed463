//! One-call entry point: client secret + scopes in, Gmail handle out.

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::auth::{AuthSession, ClientConfig, ConsentPrompt, ConsolePrompt, FileTokenStore};
use crate::config::GmailAuthConfig;
use crate::error::Result;
use crate::scopes::Scope;
use crate::service::GmailService;

/// Authenticate the local user for `scope` and return a Gmail handle.
///
/// Settings come from the environment (see [`GmailAuthConfig::from_env`]).
/// On the first run for a given user and scope set this prints an
/// authorization URL and waits for the code on stdin.
///
/// # Example
/// ```no_run
/// use gmail_auth::scopes::Scope;
///
/// # async fn example() -> gmail_auth::error::Result<()> {
/// let gmail = gmail_auth::authenticate("client_secret.json", Scope::Send).await?;
/// println!("{}", gmail.base_url());
/// # Ok(())
/// # }
/// ```
pub async fn authenticate(client_secret: impl AsRef<Path>, scope: Scope) -> Result<GmailService> {
    authenticate_with(
        &GmailAuthConfig::from_env(),
        client_secret.as_ref(),
        &[scope],
        Arc::new(ConsolePrompt::new()),
    )
    .await
}

/// [`authenticate`] with explicit settings, several scopes and a custom
/// consent prompt.
pub async fn authenticate_with(
    settings: &GmailAuthConfig,
    client_secret: &Path,
    scopes: &[Scope],
    prompt: Arc<dyn ConsentPrompt>,
) -> Result<GmailService> {
    let config = ClientConfig::from_file(client_secret, scopes.iter().map(Scope::as_str))?;
    let location = settings.token_location(config.scopes());
    info!(
        client_secret = %client_secret.display(),
        token_path = %location.path().display(),
        "authenticating gmail user"
    );

    let session = AuthSession::new(Arc::new(FileTokenStore::new()), prompt)
        .with_http_client(settings.http_client()?)
        .with_refresh_persistence(settings.persist_refreshed_tokens);
    let client = session.acquire_at(&config, &location).await?;

    GmailService::with_base_url(client, &settings.api_base_url)
}
