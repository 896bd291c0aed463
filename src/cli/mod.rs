//! CLI entry point for gmail-auth.

pub mod auth;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::GmailAuthConfig;
use crate::error::{AuthPhase, GmailAuthError};
use crate::scopes::Scope;

/// Gmail OAuth helper
#[derive(Parser, Debug)]
#[command(name = "gmail-auth", version, about = "Authorize and manage cached Gmail OAuth tokens")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the consent flow (if needed) and cache the token
    Login(LoginArgs),
    /// Show the cached token for a scope set
    Status(TokenArgs),
    /// Delete the cached token for a scope set
    Logout(TokenArgs),
}

/// Options shared by every command.
#[derive(Args, Debug, Clone)]
pub struct TokenArgs {
    /// Client secret file downloaded from the Google Cloud console
    #[arg(long, value_name = "PATH")]
    pub client_secret: Option<PathBuf>,

    /// Scope to request (short name or URL); repeatable. Optional with --token-path
    #[arg(
        short,
        long = "scope",
        value_name = "SCOPE",
        required_unless_present = "token_path"
    )]
    pub scopes: Vec<Scope>,

    /// Cache the token at this exact path instead of the per-scope file
    #[arg(long, value_name = "PATH")]
    pub token_path: Option<PathBuf>,

    /// User label the cache file is keyed on
    #[arg(long)]
    pub user: Option<String>,
}

/// Arguments for `gmail-auth login`.
#[derive(Args, Debug)]
pub struct LoginArgs {
    #[command(flatten)]
    pub token: TokenArgs,

    /// Fetch the mailbox profile after login to confirm the token works
    #[arg(long)]
    pub verify: bool,
}

impl TokenArgs {
    /// Environment settings overridden by command-line flags.
    pub fn settings(&self) -> GmailAuthConfig {
        let mut settings = GmailAuthConfig::from_env();
        if let Some(path) = &self.client_secret {
            settings = settings.with_client_secret_file(path.clone());
        }
        if let Some(path) = &self.token_path {
            settings = settings.with_token_path(path.clone());
        }
        if let Some(user) = &self.user {
            settings = settings.with_user(user.clone());
        }
        settings
    }

    pub fn scope_urls(&self) -> Vec<String> {
        self.scopes.iter().map(|s| s.as_str().to_string()).collect()
    }
}

/// Map a [`GmailAuthError`] to a user-facing help string.
pub fn format_error_help(err: &GmailAuthError) -> String {
    match err.phase() {
        AuthPhase::Configuration => format!(
            "{err}. Download the OAuth client secret (Desktop app) from the Google Cloud console and pass it with --client-secret"
        ),
        AuthPhase::Exchange => {
            format!("{err}. The code may have expired or been used already; run: gmail-auth login again")
        }
        _ if err.needs_reauthorization() => {
            format!("{err}. Run: gmail-auth logout, then gmail-auth login")
        }
        _ => err.to_string(),
    }
}
