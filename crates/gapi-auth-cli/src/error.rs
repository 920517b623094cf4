//! CLI error types.

use std::fmt;

use gapi_auth::AuthError;

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur while running a command.
#[derive(Debug)]
pub enum CliError {
    /// Configuration error.
    Config(String),
    /// Authorization flow error.
    Auth(AuthError),
    /// IO error.
    Io(std::io::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "configuration error: {}", msg),
            Self::Auth(err) => write!(f, "authorization failed: {}", err),
            Self::Io(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Auth(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::Config(_) => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<AuthError> for CliError {
    fn from(err: AuthError) -> Self {
        Self::Auth(err)
    }
}
