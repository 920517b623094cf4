//! OAuth token and its on-disk cache.
//!
//! The cache is a single JSON file. It is read once per authorization and
//! written once after a successful code exchange. Cached tokens are never
//! validated: an expired token is handed back as-is.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use crate::config::{AuthConfig, token_path_in};
use crate::error::{AuthError, AuthResult};

/// Token payload granted by the provider.
///
/// The token is kept as the JSON document the provider sent, or the one found
/// in the cache, so it is written back unchanged. Accessors read the fields
/// the Google client libraries know about and return `None` when a field is
/// missing or has an unexpected type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(Value);

impl Token {
    /// Creates a bare token with only an access token set.
    pub fn new(access_token: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert("access_token".to_string(), Value::String(access_token.into()));
        Self(Value::Object(fields))
    }

    /// Wraps an arbitrary JSON document.
    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// Returns a raw field of the token.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    fn get_str(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(Value::as_str)
    }

    pub fn access_token(&self) -> Option<&str> {
        self.get_str("access_token")
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.get_str("refresh_token")
    }

    pub fn scope(&self) -> Option<&str> {
        self.get_str("scope")
    }

    pub fn token_type(&self) -> Option<&str> {
        self.get_str("token_type")
    }

    pub fn id_token(&self) -> Option<&str> {
        self.get_str("id_token")
    }

    /// Expiry as milliseconds since the Unix epoch.
    ///
    /// Fractional values are truncated.
    pub fn expiry_date(&self) -> Option<i64> {
        let value = self.get("expiry_date")?;
        value.as_i64().or_else(|| {
            value
                .as_f64()
                .filter(|ms| ms.is_finite())
                .map(|ms| ms as i64)
        })
    }

    /// Returns when the access token expires, if the provider said so.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expiry_date().and_then(DateTime::from_timestamp_millis)
    }
}

/// File-backed token cache.
#[derive(Debug, Clone)]
pub struct TokenStore {
    dir: PathBuf,
    path: PathBuf,
}

impl TokenStore {
    /// Creates a store writing `path`, creating `dir` on demand.
    pub fn new(dir: impl Into<PathBuf>, path: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            path: path.into(),
        }
    }

    /// Creates a store for the cache file inside `dir`.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let path = token_path_in(&dir);
        Self { dir, path }
    }

    /// Creates the store described by `config`.
    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(&config.token_dir, &config.token_path)
    }

    /// Returns the token cache file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the token cache directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Reads the cached token.
    ///
    /// Any JSON document is a hit and is returned untouched. A missing or
    /// unreadable file, or content that is not JSON, is a cache miss.
    pub async fn load(&self) -> Option<Token> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("no token cache at {}", self.path.display());
                return None;
            }
            Err(e) => {
                warn!("cannot read token cache {}: {}", self.path.display(), e);
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(token) => {
                debug!("loaded cached token from {}", self.path.display());
                Some(token)
            }
            Err(e) => {
                warn!("ignoring unparseable token cache {}: {}", self.path.display(), e);
                None
            }
        }
    }

    /// Writes `token` to the cache, creating the cache directory if needed.
    pub async fn store(&self, token: &Token) -> AuthResult<()> {
        tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
            AuthError::token_storage(format!(
                "failed to create token directory {}: {}",
                self.dir.display(),
                e
            ))
            .with_source(e)
        })?;

        let content = serde_json::to_string(token).map_err(|e| {
            AuthError::token_storage(format!("failed to serialize token: {}", e)).with_source(e)
        })?;

        // Write to temp file first, then rename
        let temp_path = self.path.with_extension("json.tmp");
        let written = match write_owner_only(&temp_path, content.as_bytes()).await {
            Ok(()) => tokio::fs::rename(&temp_path, &self.path).await.map_err(|e| {
                AuthError::token_storage(format!(
                    "failed to move token file into {}: {}",
                    self.path.display(),
                    e
                ))
                .with_source(e)
            }),
            Err(e) => Err(AuthError::token_storage(format!(
                "failed to write token file {}: {}",
                temp_path.display(),
                e
            ))
            .with_source(e)),
        };

        if written.is_err()
            && let Err(e) = tokio::fs::remove_file(&temp_path).await
            && e.kind() != ErrorKind::NotFound
        {
            warn!("failed to remove {}: {}", temp_path.display(), e);
        }
        written?;

        info!("token stored to {}", self.path.display());
        Ok(())
    }

    /// Deletes the cache file. A missing file is not an error.
    pub async fn clear(&self) -> AuthResult<bool> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                info!("cleared token cache {}", self.path.display());
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(AuthError::token_storage(format!(
                "failed to remove token file {}: {}",
                self.path.display(),
                e
            ))
            .with_source(e)),
        }
    }
}

/// Writes `content` to `path`, readable by the owner only on Unix.
async fn write_owner_only(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let mut options = tokio::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(0o600);

    let mut file = options.open(path).await?;

    // `mode` only applies when the file is created; tighten a stale temp file.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(std::fs::Permissions::from_mode(0o600)).await?;
    }

    file.write_all(content).await?;
    file.sync_all().await
}
