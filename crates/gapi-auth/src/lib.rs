//! Google API installed-app OAuth2 helper.
//!
//! This crate walks a user through the installed-app flow and caches the
//! resulting token on disk:
//!
//! - [`InstalledCredentials`] - client id, secret and redirect URIs loaded from `credentials.json`
//! - [`TokenStore`] - the token cache at `<home>/.credentials/googleapis.json`
//! - [`OAuthClient`] - authorization URL and code exchange
//! - [`Authorizer`] - the facade tying them together
//!
//! # Flow
//!
//! ```text
//!  credentials.json ──► OAuthClient ──► token cache hit? ──yes──► AuthorizedClient
//!                                              │
//!                                              no
//!                                              ▼
//!                          print URL, read code, exchange, store ──► AuthorizedClient
//! ```
//!
//! # Example
//!
//! ```ignore
//! let client = gapi_auth::authorize(["drive.readonly"], None).await?;
//! let files = client
//!     .get("https://www.googleapis.com/drive/v3/files")
//!     .send()
//!     .await?;
//! ```

pub mod authorize;
pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod oauth;
pub mod prompt;
pub mod scopes;
pub mod tokens;
pub mod tracing;

// Re-export main types at crate root
pub use authorize::{Authorizer, authorize};
pub use client::AuthorizedClient;
pub use config::AuthConfig;
pub use credentials::InstalledCredentials;
pub use error::{AuthError, AuthErrorCode, AuthResult};
pub use oauth::{OAuthClient, OAuthEndpoints};
pub use prompt::{CodePrompt, TerminalPrompt};
pub use scopes::Scopes;
pub use tokens::{Token, TokenStore};
