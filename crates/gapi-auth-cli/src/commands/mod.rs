//! Subcommand implementations.

pub mod authorize;
pub mod config;
pub mod token;

use std::path::PathBuf;

use gapi_auth::TokenStore;
use gapi_auth::config::{default_token_dir, home_dir_from_env};

use crate::error::CliResult;

/// Returns the token cache in `token_dir`, or the default one under the home
/// directory.
pub(crate) fn token_store(token_dir: Option<PathBuf>) -> CliResult<TokenStore> {
    let dir = match token_dir {
        Some(dir) => dir,
        None => default_token_dir(&home_dir_from_env()?),
    };
    Ok(TokenStore::in_dir(dir))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gapi_auth::{AuthConfig, Scopes};

    #[test]
    fn token_store_matches_authorize_config() {
        let scopes = Scopes::from_short_names(["drive.readonly"]).unwrap();
        let config = AuthConfig::new(scopes, "/home/ada").with_token_dir("/var/cache/app");
        let from_config = TokenStore::from_config(&config);

        let store = token_store(Some(PathBuf::from("/var/cache/app"))).unwrap();
        assert_eq!(store.dir(), from_config.dir());
        assert_eq!(store.path(), from_config.path());
    }

    #[test]
    fn default_token_dir_matches_authorize_config() {
        let scopes = Scopes::from_short_names(["drive.readonly"]).unwrap();
        let config = AuthConfig::new(scopes, "/home/ada");
        let store = TokenStore::in_dir(default_token_dir(std::path::Path::new("/home/ada")));
        assert_eq!(store.path(), config.token_path);
    }
}
