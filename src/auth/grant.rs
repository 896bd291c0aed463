//! Form posts to the OAuth token endpoint.

use chrono::{DateTime, Duration, Utc};
use reqwest::Url;
use serde::Deserialize;
use tracing::debug;

use super::error::AuthError;
use super::token::Credential;

/// Successful token endpoint payload.
#[derive(Debug, Deserialize)]
struct TokenEndpointResponse {
    #[serde(default)]
    access_token: String,
    #[serde(default)]
    token_type: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
}

/// Error payload (RFC 6749 §5.2).
#[derive(Debug, Deserialize)]
struct TokenEndpointError {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

/// Post `form` to `token_uri` and turn the response into a credential.
///
/// The returned credential carries an empty refresh token when the endpoint
/// did not issue one.
pub(crate) async fn request_token(
    http: &reqwest::Client,
    token_uri: &Url,
    form: &[(&str, &str)],
) -> Result<Credential, AuthError> {
    let grant_type = form
        .iter()
        .find_map(|(k, v)| (*k == "grant_type").then_some(*v))
        .unwrap_or("unknown");
    debug!(endpoint = %token_uri, grant_type, "requesting oauth token");

    let resp = http
        .post(token_uri.clone())
        .header("Accept", "application/json")
        .form(form)
        .send()
        .await?;

    let status = resp.status();
    let body = resp.text().await?;
    if !status.is_success() {
        return Err(endpoint_error(status.as_u16(), &body));
    }

    let payload: TokenEndpointResponse = serde_json::from_str(&body)
        .map_err(|err| AuthError::InvalidResponse(format!("token response: {err}")))?;
    if payload.access_token.is_empty() {
        return Err(AuthError::InvalidResponse(
            "token response missing access_token".to_string(),
        ));
    }

    let expiry = expiry_after(Utc::now(), payload.expires_in);
    Ok(Credential {
        access_token: payload.access_token,
        token_type: payload.token_type,
        refresh_token: payload.refresh_token.unwrap_or_default(),
        expiry,
    })
}

/// Absolute expiry for an `expires_in` lifetime. Non-positive lifetimes and
/// ones past chrono's range are treated as "no expiry".
fn expiry_after(now: DateTime<Utc>, expires_in: Option<i64>) -> Option<DateTime<Utc>> {
    let secs = expires_in.filter(|secs| *secs > 0)?;
    let expiry =
        Duration::try_seconds(secs).and_then(|lifetime| now.checked_add_signed(lifetime));
    if expiry.is_none() {
        debug!(expires_in = secs, "token lifetime out of range, treating as no expiry");
    }
    expiry
}

fn endpoint_error(status: u16, body: &str) -> AuthError {
    let Ok(payload) = serde_json::from_str::<TokenEndpointError>(body) else {
        return AuthError::InvalidResponse(format!(
            "token endpoint returned status {status}: {}",
            body.trim()
        ));
    };
    match payload.error.as_str() {
        "invalid_grant" => AuthError::ExpiredOrInvalidGrant,
        "access_denied" => AuthError::AccessDenied,
        _ => AuthError::Rejected {
            status,
            error: payload.error,
            description: payload.error_description.unwrap_or_default(),
        },
    }
}
