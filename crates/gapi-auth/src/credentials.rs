//! OAuth client credentials loader.
//!
//! Reads the JSON file downloaded from the Google Cloud Console, which holds
//! the client id, client secret and registered redirect URIs.

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{AuthError, AuthResult};

/// Layout of the Google Cloud Console credentials file.
#[derive(Debug, Deserialize)]
struct CredentialsFile {
    installed: Option<InstalledCredentials>,
    web: Option<InstalledCredentials>,
}

/// Client credentials for the installed-app flow.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InstalledCredentials {
    /// The OAuth 2.0 client ID.
    pub client_id: String,
    /// The OAuth 2.0 client secret.
    pub client_secret: String,
    /// Registered redirect URIs; the first one is used.
    #[serde(default)]
    pub redirect_uris: Vec<String>,
}

impl InstalledCredentials {
    /// Reads and parses the credentials file at `path`.
    pub async fn load(path: impl AsRef<Path>) -> AuthResult<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            AuthError::credentials_unavailable(format!(
                "failed to read credentials file {}: {}",
                path.display(),
                e
            ))
            .with_source(e)
        })?;

        debug!("loaded client credentials from {}", path.display());
        Self::from_json(&content)
    }

    /// Parses credentials from the JSON content of a credentials file.
    ///
    /// The `installed` section is preferred; a `web` section with the same
    /// fields is accepted as well.
    pub fn from_json(json: &str) -> AuthResult<Self> {
        let file: CredentialsFile = serde_json::from_str(json).map_err(|e| {
            AuthError::invalid_credentials(format!("failed to parse credentials JSON: {}", e))
                .with_source(e)
        })?;

        file.installed.or(file.web).ok_or_else(|| {
            AuthError::invalid_credentials(
                "credentials file must contain an 'installed' or 'web' section",
            )
        })
    }

    /// Returns the redirect URI used for the flow (the first registered one).
    pub fn redirect_uri(&self) -> AuthResult<&str> {
        self.redirect_uris
            .first()
            .map(String::as_str)
            .ok_or_else(|| {
                AuthError::invalid_credentials("credentials file lists no redirect_uris")
            })
    }
}
