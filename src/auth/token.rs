use chrono::{DateTime, Datelike, Duration, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Credentials are treated as expired this long before their actual expiry,
/// so a request never leaves with a token that dies in flight.
pub const EXPIRY_DELTA_SECS: i64 = 10;

/// OAuth credential persisted in the token cache.
///
/// # Example
/// ```
/// use gmail_auth::auth::Credential;
///
/// let credential = Credential {
///     access_token: "access".to_string(),
///     refresh_token: "refresh".to_string(),
///     token_type: "Bearer".to_string(),
///     expiry: None,
/// };
/// assert!(credential.is_valid());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    #[serde(default)]
    pub refresh_token: String,
    #[serde(
        default,
        deserialize_with = "deserialize_expiry",
        skip_serializing_if = "Option::is_none"
    )]
    pub expiry: Option<DateTime<Utc>>,
}

impl Credential {
    /// True when the access token is expired or within [`EXPIRY_DELTA_SECS`]
    /// of expiring. A credential without an expiry never expires.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.expiry {
            Some(expiry) => now + Duration::seconds(EXPIRY_DELTA_SECS) >= expiry,
            None => false,
        }
    }

    /// A credential is usable as-is when it has an access token that has not
    /// expired.
    pub fn is_valid(&self) -> bool {
        !self.access_token.is_empty() && !self.is_expired()
    }

    /// Token type for the `Authorization` header. Defaults to `Bearer`.
    pub fn auth_scheme(&self) -> String {
        let kind = self.token_type.trim();
        if kind.eq_ignore_ascii_case("bearer") || kind.is_empty() {
            "Bearer".to_string()
        } else if kind.eq_ignore_ascii_case("mac") {
            "MAC".to_string()
        } else if kind.eq_ignore_ascii_case("basic") {
            "Basic".to_string()
        } else {
            kind.to_string()
        }
    }

    /// Full `Authorization` header value.
    pub fn authorization_header(&self) -> String {
        format!("{} {}", self.auth_scheme(), self.access_token)
    }
}

// Other OAuth tooling writes the zero time (year 1) for "no expiry".
fn deserialize_expiry<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<DateTime<Utc>>::deserialize(deserializer)?;
    Ok(value.filter(|expiry| expiry.year() > 1))
}
