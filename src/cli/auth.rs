//! CLI handlers for login, status, and logout.

use std::sync::Arc;

use serde::Deserialize;

use super::{LoginArgs, TokenArgs};
use crate::auth::{AuthSession, ConsolePrompt, FileTokenStore};
use crate::client::authenticate_with;
use crate::error::Result;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Profile {
    email_address: String,
    #[serde(default)]
    messages_total: Option<u64>,
}

/// Handle `gmail-auth login`.
pub async fn handle_login(args: &LoginArgs) -> Result<()> {
    let settings = args.token.settings();
    let location = settings.token_location(&args.token.scope_urls());

    let gmail = authenticate_with(
        &settings,
        &settings.client_secret_file,
        &args.token.scopes,
        Arc::new(ConsolePrompt::new()),
    )
    .await?;
    println!("✅ Token cached at {}", location.path().display());

    if args.verify {
        let profile: Profile = gmail.get_json("users/me/profile").await?;
        match profile.messages_total {
            Some(total) => println!("📬 {} ({total} messages)", profile.email_address),
            None => println!("📬 {}", profile.email_address),
        }
    }
    Ok(())
}

/// Handle `gmail-auth status`.
pub async fn handle_status(args: &TokenArgs) -> Result<()> {
    let settings = args.settings();
    let path = settings.token_location(&args.scope_urls()).path();
    let session = local_session();

    match session.status(&path)? {
        Some(credential) => {
            let state = match credential.expiry {
                _ if !credential.is_valid() => {
                    "⚠️  Access token expired (will refresh on next use)".to_string()
                }
                Some(expiry) => format!(
                    "✅ Logged in (access token expires {})",
                    expiry.format("%Y-%m-%d %H:%M")
                ),
                None => "✅ Logged in".to_string(),
            };
            println!("{}: {state}", path.display());
            if credential.refresh_token.is_empty() {
                println!(
                    "   ⚠️  No refresh token cached; login will be needed once the access token expires"
                );
            }
        }
        None => println!("{}: ❌ Not logged in", path.display()),
    }
    Ok(())
}

/// Handle `gmail-auth logout`.
pub async fn handle_logout(args: &TokenArgs) -> Result<()> {
    let settings = args.settings();
    let path = settings.token_location(&args.scope_urls()).path();
    local_session().logout(&path)?;
    println!("✅ Removed {}", path.display());
    Ok(())
}

fn local_session() -> AuthSession {
    AuthSession::new(Arc::new(FileTokenStore::new()), Arc::new(ConsolePrompt::new()))
}
