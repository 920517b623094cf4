//! Authorization helper configuration.
//!
//! All paths are resolved once, when the [`AuthConfig`] is built. The home
//! directory comes from the environment (see [`home_dir_from_env`]) and is
//! only used to locate the token cache.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{AuthError, AuthResult};
use crate::oauth::OAuthEndpoints;
use crate::scopes::Scopes;

/// Environment variables consulted for the home directory, in order.
pub const HOME_ENV_VARS: [&str; 3] = ["HOME", "HOMEPATH", "USERPROFILE"];

/// Directory under the home directory holding the token cache.
pub const TOKEN_DIR_NAME: &str = ".credentials";

/// File name of the token cache.
pub const TOKEN_FILE_NAME: &str = "googleapis.json";

/// Credentials file used when the caller does not name one.
pub const DEFAULT_CREDENTIALS_FILE: &str = "credentials.json";

/// Resolves the home directory from the first non-empty variable in
/// [`HOME_ENV_VARS`], using `lookup` to read variables.
pub fn resolve_home_dir<F>(lookup: F) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<OsString>,
{
    HOME_ENV_VARS
        .iter()
        .filter_map(|name| lookup(name))
        .find(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// Resolves the home directory from the process environment, falling back to
/// the platform home directory.
pub fn home_dir_from_env() -> AuthResult<PathBuf> {
    resolve_home_dir(|name| std::env::var_os(name))
        .or_else(dirs::home_dir)
        .ok_or_else(|| {
            AuthError::configuration(format!(
                "cannot locate the home directory (tried {})",
                HOME_ENV_VARS.join(", ")
            ))
        })
}

/// Returns the default token cache directory, `<home>/.credentials`.
pub fn default_token_dir(home: &Path) -> PathBuf {
    home.join(TOKEN_DIR_NAME)
}

/// Returns the token cache file inside `dir`.
pub fn token_path_in(dir: &Path) -> PathBuf {
    dir.join(TOKEN_FILE_NAME)
}

/// Configuration for an [`Authorizer`](crate::Authorizer).
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Scopes requested from the user.
    pub scopes: Scopes,

    /// Path to the OAuth client credentials JSON.
    ///
    /// Defaults to `credentials.json` relative to the working directory.
    pub credentials_path: PathBuf,

    /// Directory holding the token cache, `<home>/.credentials` by default.
    pub token_dir: PathBuf,

    /// Token cache file inside [`token_dir`](Self::token_dir).
    pub token_path: PathBuf,

    /// Authorization and token endpoints.
    pub endpoints: OAuthEndpoints,

    /// Timeout for the token exchange request.
    pub timeout: Duration,

    /// User agent sent to the token endpoint.
    pub user_agent: String,
}

impl AuthConfig {
    /// Default request timeout in seconds.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Creates a configuration whose token cache lives under `home`.
    pub fn new(scopes: Scopes, home: impl AsRef<Path>) -> Self {
        let token_dir = default_token_dir(home.as_ref());
        Self {
            scopes,
            credentials_path: PathBuf::from(DEFAULT_CREDENTIALS_FILE),
            token_path: token_path_in(&token_dir),
            token_dir,
            endpoints: OAuthEndpoints::default(),
            timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
            user_agent: format!("gapi-auth/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Creates a configuration with the home directory taken from the
    /// environment.
    pub fn from_env(scopes: Scopes) -> AuthResult<Self> {
        Ok(Self::new(scopes, home_dir_from_env()?))
    }

    /// Sets the credentials file path.
    pub fn with_credentials_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.credentials_path = path.into();
        self
    }

    /// Moves the token cache into `dir`, keeping the cache file name.
    pub fn with_token_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.token_dir = dir.into();
        self.token_path = token_path_in(&self.token_dir);
        self
    }

    pub fn with_endpoints(mut self, endpoints: OAuthEndpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}
