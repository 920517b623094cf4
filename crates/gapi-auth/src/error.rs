//! Error types for the authorization flow.
//!
//! Every failure the flow can hit (reading credentials, talking to the token
//! endpoint, writing the token cache) is reported as an [`AuthError`] tagged
//! with an [`AuthErrorCode`].

use std::fmt;
use thiserror::Error;

/// The category of an authorization error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthErrorCode {
    /// Invalid helper configuration (scopes, home directory).
    Configuration,
    /// The credentials file could not be read.
    CredentialsUnavailable,
    /// The credentials file is not valid JSON or lacks required fields.
    InvalidCredentials,
    /// Reading the authorization code from the user failed.
    Prompt,
    /// Transport failure while talking to the token endpoint.
    Network,
    /// The token endpoint rejected the authorization code.
    TokenExchange,
    /// The token endpoint answered with something that is not a token.
    InvalidResponse,
    /// The token cache directory or file could not be written.
    TokenStorage,
}

impl AuthErrorCode {
    /// Returns a stable snake_case name for this error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Configuration => "configuration_error",
            Self::CredentialsUnavailable => "credentials_unavailable",
            Self::InvalidCredentials => "invalid_credentials",
            Self::Prompt => "prompt_error",
            Self::Network => "network_error",
            Self::TokenExchange => "token_exchange_failed",
            Self::InvalidResponse => "invalid_response",
            Self::TokenStorage => "token_storage_error",
        }
    }
}

impl fmt::Display for AuthErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An error raised while authorizing against the Google OAuth endpoints.
#[derive(Debug, Error)]
pub struct AuthError {
    code: AuthErrorCode,
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AuthError {
    /// Creates a new error with the given code and message.
    pub fn new(code: AuthErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(AuthErrorCode::Configuration, message)
    }

    pub fn credentials_unavailable(message: impl Into<String>) -> Self {
        Self::new(AuthErrorCode::CredentialsUnavailable, message)
    }

    pub fn invalid_credentials(message: impl Into<String>) -> Self {
        Self::new(AuthErrorCode::InvalidCredentials, message)
    }

    pub fn prompt(message: impl Into<String>) -> Self {
        Self::new(AuthErrorCode::Prompt, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(AuthErrorCode::Network, message)
    }

    pub fn token_exchange(message: impl Into<String>) -> Self {
        Self::new(AuthErrorCode::TokenExchange, message)
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(AuthErrorCode::InvalidResponse, message)
    }

    pub fn token_storage(message: impl Into<String>) -> Self {
        Self::new(AuthErrorCode::TokenStorage, message)
    }

    /// Attaches the underlying cause.
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    /// Returns the error code.
    pub fn code(&self) -> AuthErrorCode {
        self.code
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// A specialized Result type for authorization operations.
pub type AuthResult<T> = Result<T, AuthError>;
