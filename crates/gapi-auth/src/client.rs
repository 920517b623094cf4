//! Authorized client handle returned to callers.

use reqwest::{Method, RequestBuilder};

use crate::oauth::OAuthClient;
use crate::tokens::Token;

/// An OAuth client with a token attached.
///
/// Requests built through [`request`](Self::request) carry the access token
/// as a bearer header, or no authorization header at all when the token has
/// no string `access_token`. The token is not refreshed: once it expires, API
/// calls start failing and the caller has to authorize again.
#[derive(Debug, Clone)]
pub struct AuthorizedClient {
    oauth: OAuthClient,
    token: Token,
}

impl AuthorizedClient {
    pub(crate) fn new(oauth: OAuthClient, token: Token) -> Self {
        Self { oauth, token }
    }

    /// Returns the attached token.
    pub fn credentials(&self) -> &Token {
        &self.token
    }

    /// Replaces the attached token.
    pub fn set_credentials(&mut self, token: Token) {
        self.token = token;
    }

    pub fn client_id(&self) -> &str {
        self.oauth.client_id()
    }

    pub fn client_secret(&self) -> &str {
        self.oauth.client_secret()
    }

    pub fn redirect_uri(&self) -> &str {
        self.oauth.redirect_uri()
    }

    /// Starts a request to `url` with the access token attached.
    pub fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let request = self.oauth.http_client().request(method, url);
        match self.token.access_token() {
            Some(access_token) => request.bearer_auth(access_token),
            None => request,
        }
    }

    /// Shorthand for a GET [`request`](Self::request).
    pub fn get(&self, url: &str) -> RequestBuilder {
        self.request(Method::GET, url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::credentials::InstalledCredentials;
    use crate::oauth::OAuthEndpoints;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn authorized(token: Token) -> AuthorizedClient {
        let creds = InstalledCredentials {
            client_id: "id.apps.googleusercontent.com".to_string(),
            client_secret: "secret".to_string(),
            redirect_uris: vec!["http://localhost".to_string()],
        };
        OAuthClient::new(&creds, OAuthEndpoints::default(), Duration::from_secs(5), "test")
            .unwrap()
            .into_authorized(token)
    }

    #[test]
    fn exposes_client_fields() {
        let client = authorized(Token::new("ya29.a"));
        assert_eq!(client.client_id(), "id.apps.googleusercontent.com");
        assert_eq!(client.client_secret(), "secret");
        assert_eq!(client.redirect_uri(), "http://localhost");
        assert_eq!(client.credentials().access_token(), Some("ya29.a"));
    }

    #[test]
    fn set_credentials_replaces_token() {
        let mut client = authorized(Token::new("old"));
        client.set_credentials(Token::new("new"));
        assert_eq!(client.credentials().access_token(), Some("new"));
    }

    #[tokio::test]
    async fn requests_carry_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/drive/v3/files"))
            .and(header("authorization", "Bearer ya29.a"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .expect(1)
            .mount(&server)
            .await;

        let client = authorized(Token::new("ya29.a"));
        let response = client
            .get(&format!("{}/drive/v3/files", server.uri()))
            .send()
            .await
            .unwrap();
        assert!(response.status().is_success());
    }

    #[test]
    fn token_without_access_token_sends_no_header() {
        let client = authorized(Token::from_value(serde_json::json!({"refresh_token": "1//r"})));
        let request = client.get("https://example.test/files").build().unwrap();
        assert!(request.headers().get(reqwest::header::AUTHORIZATION).is_none());
    }
}
