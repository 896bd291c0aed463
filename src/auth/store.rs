use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tracing::debug;

use super::error::{AuthError, TokenLoadError};
use super::token::Credential;

/// File name used by [`TokenLocation::Fixed`] in the reference layout.
pub const DEFAULT_TOKEN_FILE: &str = "gmail-token.json";

/// Storage abstraction for the cached OAuth credential.
pub trait TokenStore: Send + Sync {
    fn load(&self, path: &Path) -> Result<Credential, TokenLoadError>;
    fn save(&self, path: &Path, credential: &Credential) -> Result<(), AuthError>;
    fn clear(&self, path: &Path) -> Result<(), AuthError>;
}

/// File-backed token store writing one JSON document per cache path.
///
/// # Example
/// ```no_run
/// use std::path::Path;
/// use gmail_auth::auth::{Credential, FileTokenStore, TokenStore};
///
/// let store = FileTokenStore::new();
/// let credential = Credential {
///     access_token: "access".to_string(),
///     refresh_token: "refresh".to_string(),
///     token_type: "Bearer".to_string(),
///     expiry: None,
/// };
/// store.save(Path::new("gmail-token.json"), &credential)?;
/// # Ok::<(), gmail_auth::auth::AuthError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct FileTokenStore;

impl FileTokenStore {
    pub fn new() -> Self {
        Self
    }

    fn ensure_parent(path: &Path) -> Result<(), AuthError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }

    fn open_for_write(path: &Path) -> std::io::Result<fs::File> {
        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        options.open(path)
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self, path: &Path) -> Result<Credential, TokenLoadError> {
        let raw = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(TokenLoadError::NotFound {
                    path: path.to_path_buf(),
                });
            }
            Err(err) => {
                return Err(TokenLoadError::Io {
                    path: path.to_path_buf(),
                    message: err.to_string(),
                });
            }
        };
        serde_json::from_str(&raw).map_err(|err| TokenLoadError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }

    fn save(&self, path: &Path, credential: &Credential) -> Result<(), AuthError> {
        Self::ensure_parent(path)?;
        let serialized = serde_json::to_vec_pretty(credential)?;
        let mut file = Self::open_for_write(path)?;
        file.write_all(&serialized)?;
        file.write_all(b"\n")?;
        file.sync_all()?;
        debug!(path = %path.display(), "saved oauth token");
        Ok(())
    }

    fn clear(&self, path: &Path) -> Result<(), AuthError> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(AuthError::Io(err.to_string())),
        }
    }
}

/// Identity a cached credential was authorized for.
///
/// Two keys with the same user and the same scope set (in any order) map to
/// the same cache file; any other difference yields a different file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenCacheKey {
    user: String,
    scopes: Vec<String>,
}

impl TokenCacheKey {
    pub fn new<I, S>(user: &str, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut scopes: Vec<String> = scopes.into_iter().map(Into::into).collect();
        scopes.sort();
        scopes.dedup();
        Self {
            user: normalize_label(user),
            scopes,
        }
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn scopes(&self) -> &[String] {
        &self.scopes
    }

    pub fn file_name(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.user.as_bytes());
        hasher.update(b"\n");
        hasher.update(self.scopes.join(" ").as_bytes());
        let digest = hasher.finalize();
        let hex: String = digest[..8].iter().map(|b| format!("{b:02x}")).collect();
        format!("gmail-token-{hex}.json")
    }
}

/// Where the credential for a session lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenLocation {
    /// One path regardless of user and scopes.
    Fixed(PathBuf),
    /// A file under `dir` named after the cache key.
    Keyed { dir: PathBuf, key: TokenCacheKey },
}

impl TokenLocation {
    pub fn path(&self) -> PathBuf {
        match self {
            Self::Fixed(path) => path.clone(),
            Self::Keyed { dir, key } => dir.join(key.file_name()),
        }
    }
}

fn normalize_label(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return "default".to_string();
    }
    trimmed.to_ascii_lowercase()
}
