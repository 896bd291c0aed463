use std::io::{BufRead, Write};

use async_trait::async_trait;
use reqwest::Url;

use super::error::AuthError;

/// Interaction port for the one-time consent step.
///
/// Implementations show `authorization_url` to the user and return the
/// authorization code the provider's consent page produced. There is no
/// timeout: the call waits as long as the implementation does.
#[async_trait]
pub trait ConsentPrompt: Send + Sync {
    async fn request_code(&self, authorization_url: &Url) -> Result<String, AuthError>;
}

/// Prompts on stdout and reads the code from stdin.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsolePrompt;

impl ConsolePrompt {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ConsentPrompt for ConsolePrompt {
    async fn request_code(&self, authorization_url: &Url) -> Result<String, AuthError> {
        let url = authorization_url.to_string();
        tokio::task::spawn_blocking(move || {
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            read_code(&url, &mut stdin.lock(), &mut stdout.lock())
        })
        .await
        .map_err(|err| AuthError::Io(format!("prompt task failed: {err}")))?
    }
}

/// Write the instructions to `output` and read the first whitespace-separated
/// token from `input`.
pub(crate) fn read_code<R: BufRead, W: Write>(
    url: &str,
    input: &mut R,
    output: &mut W,
) -> Result<String, AuthError> {
    writeln!(
        output,
        "Go to the following link in your browser then type authorization code: \n{url}"
    )?;
    output.flush()?;

    let mut line = String::new();
    loop {
        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Err(AuthError::Io("no authorization code entered".to_string()));
        }
        if let Some(code) = line.split_whitespace().next() {
            return Ok(code.to_string());
        }
    }
}
