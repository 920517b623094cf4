//! Authorization facade.
//!
//! [`Authorizer::authorize`] runs the whole flow in order:
//!
//! 1. load the client credentials,
//! 2. build the OAuth client,
//! 3. return straight away if a cached token exists,
//! 4. otherwise prompt for a code, exchange it and cache the token.

use std::path::PathBuf;

use tracing::{debug, error, info};

use crate::client::AuthorizedClient;
use crate::config::AuthConfig;
use crate::credentials::InstalledCredentials;
use crate::error::{AuthError, AuthResult};
use crate::oauth::OAuthClient;
use crate::prompt::{CodePrompt, TerminalPrompt};
use crate::scopes::Scopes;
use crate::tokens::{Token, TokenStore};

/// Runs the installed-app flow for one [`AuthConfig`].
#[derive(Debug)]
pub struct Authorizer<P = TerminalPrompt> {
    config: AuthConfig,
    prompt: P,
}

impl Authorizer<TerminalPrompt> {
    /// Creates an authorizer prompting on the terminal.
    pub fn new(config: AuthConfig) -> Self {
        Self::with_prompt(config, TerminalPrompt::new())
    }

    /// Builds the configuration from scope short names and an optional
    /// credentials path, resolving the home directory from the environment.
    ///
    /// Fails on an empty or blank scope list before touching the filesystem.
    pub fn from_scopes<I, S>(scopes: I, credentials_path: Option<PathBuf>) -> AuthResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let scopes = Scopes::from_short_names(scopes)?;
        let mut config = AuthConfig::from_env(scopes)?;
        if let Some(path) = credentials_path {
            config = config.with_credentials_path(path);
        }
        Ok(Self::new(config))
    }
}

impl<P: CodePrompt> Authorizer<P> {
    /// Creates an authorizer using `prompt` to obtain authorization codes.
    pub fn with_prompt(config: AuthConfig, prompt: P) -> Self {
        Self { config, prompt }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Returns the token cache used by this authorizer.
    pub fn token_store(&self) -> TokenStore {
        TokenStore::from_config(&self.config)
    }

    /// Returns an authorized client, from the token cache when possible.
    ///
    /// A cached token is used without checking its expiry.
    pub async fn authorize(&self) -> AuthResult<AuthorizedClient> {
        let credentials = InstalledCredentials::load(&self.config.credentials_path)
            .await
            .inspect_err(|e| error!("error loading client secret file: {}", e))?;

        let oauth = OAuthClient::new(
            &credentials,
            self.config.endpoints.clone(),
            self.config.timeout,
            &self.config.user_agent,
        )
        .inspect_err(|e| error!("error creating OAuth client: {}", e))?;

        let store = self.token_store();
        if let Some(token) = store.load().await {
            debug!("using cached token from {}", store.path().display());
            return Ok(oauth.into_authorized(token));
        }

        let token = self.acquire_token(&oauth).await?;
        store
            .store(&token)
            .await
            .inspect_err(|e| error!("error storing token: {}", e))?;
        Ok(oauth.into_authorized(token))
    }

    /// Asks the user for an authorization code and exchanges it.
    async fn acquire_token(&self, oauth: &OAuthClient) -> AuthResult<Token> {
        let auth_url = oauth.generate_auth_url(&self.config.scopes);
        info!("no cached token, requesting authorization from the user");

        let code = self.prompt.request_code(&auth_url).await?;
        let code = code.trim();
        if code.is_empty() {
            return Err(AuthError::prompt("no authorization code entered"));
        }

        oauth
            .exchange_code(code)
            .await
            .inspect_err(|e| error!("error while trying to retrieve access token: {}", e))
    }
}

/// Builds an [`Authorizer`] for `scopes` and runs [`Authorizer::authorize`].
pub async fn authorize<I, S>(
    scopes: I,
    credentials_path: Option<PathBuf>,
) -> AuthResult<AuthorizedClient>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Authorizer::from_scopes(scopes, credentials_path)?
        .authorize()
        .await
}
