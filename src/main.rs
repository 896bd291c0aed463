//! gmail-auth CLI binary entry point.

use clap::Parser;
use gmail_auth::cli::{format_error_help, Cli, Commands};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Login(args) => gmail_auth::cli::auth::handle_login(args).await,
        Commands::Status(args) => gmail_auth::cli::auth::handle_status(args).await,
        Commands::Logout(args) => gmail_auth::cli::auth::handle_logout(args).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", format_error_help(&e));
        std::process::exit(1);
    }
}
