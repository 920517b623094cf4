//! OAuth 2.0 installed-app flow for Google APIs.
//!
//! The user opens the authorization URL, grants access and copies the code
//! shown by Google back into the terminal. The code is then exchanged for a
//! token at the token endpoint.

use std::time::Duration;

use chrono::Utc;
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::client::AuthorizedClient;
use crate::credentials::InstalledCredentials;
use crate::error::{AuthError, AuthResult};
use crate::scopes::Scopes;
use crate::tokens::Token;

/// Google OAuth endpoints.
pub const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
pub const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Authorization and token endpoint URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthEndpoints {
    pub auth_url: String,
    pub token_url: String,
}

impl OAuthEndpoints {
    pub fn new(auth_url: impl Into<String>, token_url: impl Into<String>) -> Self {
        Self {
            auth_url: auth_url.into(),
            token_url: token_url.into(),
        }
    }
}

impl Default for OAuthEndpoints {
    fn default() -> Self {
        Self::new(GOOGLE_AUTH_URL, GOOGLE_TOKEN_URL)
    }
}

/// OAuth client bound to one set of client credentials.
#[derive(Debug, Clone)]
pub struct OAuthClient {
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    endpoints: OAuthEndpoints,
    http_client: reqwest::Client,
}

impl OAuthClient {
    /// Creates a client from loaded credentials, using their first redirect URI.
    pub fn new(
        credentials: &InstalledCredentials,
        endpoints: OAuthEndpoints,
        timeout: Duration,
        user_agent: &str,
    ) -> AuthResult<Self> {
        let redirect_uri = credentials.redirect_uri()?.to_string();

        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| {
                AuthError::configuration(format!("failed to create HTTP client: {}", e))
                    .with_source(e)
            })?;

        Ok(Self {
            client_id: credentials.client_id.clone(),
            client_secret: credentials.client_secret.clone(),
            redirect_uri,
            endpoints,
            http_client,
        })
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }

    pub(crate) fn http_client(&self) -> &reqwest::Client {
        &self.http_client
    }

    /// Builds the consent page URL requesting offline access to `scopes`.
    pub fn generate_auth_url(&self, scopes: &Scopes) -> String {
        format!(
            "{}?access_type=offline&scope={}&response_type=code&client_id={}&redirect_uri={}",
            self.endpoints.auth_url,
            urlencoding::encode(&scopes.joined()),
            urlencoding::encode(&self.client_id),
            urlencoding::encode(&self.redirect_uri),
        )
    }

    /// Exchanges an authorization code for a token.
    ///
    /// A single request is made; failures are not retried.
    pub async fn exchange_code(&self, code: &str) -> AuthResult<Token> {
        let params = [
            ("code", code),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("redirect_uri", self.redirect_uri.as_str()),
            ("grant_type", "authorization_code"),
        ];

        debug!("exchanging authorization code at {}", self.endpoints.token_url);

        let response = self
            .http_client
            .post(&self.endpoints.token_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| {
                AuthError::network(format!("token exchange request failed: {}", e)).with_source(e)
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            AuthError::network(format!("failed to read response: {}", e)).with_source(e)
        })?;

        if !status.is_success() {
            return Err(AuthError::token_exchange(format!(
                "token exchange failed ({}): {}",
                status, body
            )));
        }

        let token = parse_token_response(&body, Utc::now().timestamp_millis())?;
        info!("successfully obtained tokens");
        Ok(token)
    }

    /// Attaches `token`, producing the handle returned to callers.
    pub fn into_authorized(self, token: Token) -> AuthorizedClient {
        AuthorizedClient::new(self, token)
    }
}

/// Turns a token endpoint response into a [`Token`].
///
/// A numeric `expires_in` (seconds from now) is replaced by an absolute
/// `expiry_date` in milliseconds, computed from `now_ms`. Any other field,
/// including a non-numeric `expires_in`, is kept verbatim.
fn parse_token_response(body: &str, now_ms: i64) -> AuthResult<Token> {
    let mut fields: Map<String, Value> = serde_json::from_str(body).map_err(|e| {
        AuthError::invalid_response(format!("invalid token response: {}", e)).with_source(e)
    })?;

    if !matches!(fields.get("access_token"), Some(Value::String(_))) {
        return Err(AuthError::invalid_response("token response has no access_token"));
    }

    if let Some(expires_in_ms) = fields.get("expires_in").and_then(seconds_to_millis) {
        let expiry_date = expires_in_ms
            .and_then(|ms| ms.checked_add(now_ms))
            .ok_or_else(|| AuthError::invalid_response("expires_in is out of range"))?;
        fields.remove("expires_in");
        fields.insert("expiry_date".to_string(), Value::from(expiry_date));
    }

    Ok(Token::from_value(Value::Object(fields)))
}

/// Converts a number of seconds to milliseconds.
///
/// Returns `None` for non-numbers and `Some(None)` on overflow.
fn seconds_to_millis(value: &Value) -> Option<Option<i64>> {
    if let Some(secs) = value.as_i64() {
        return Some(secs.checked_mul(1000));
    }
    let millis = value.as_f64()? * 1000.0;
    Some((millis.is_finite() && millis.abs() < i64::MAX as f64).then(|| millis.round() as i64))
}
