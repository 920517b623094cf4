//! `gapi-auth authorize`.

use std::path::{Path, PathBuf};

use tracing::info;

use gapi_auth::config::home_dir_from_env;
use gapi_auth::{AuthConfig, Authorizer, Scopes, TerminalPrompt};

use crate::commands::token::print_summary;
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};

/// Flags of the `authorize` subcommand.
#[derive(Debug, Default)]
pub struct AuthorizeArgs {
    pub scopes: Vec<String>,
    pub credentials: Option<PathBuf>,
    pub token_dir: Option<PathBuf>,
    pub open_browser: bool,
}

/// Run the authorization flow and print what was obtained.
pub async fn run(args: AuthorizeArgs, config: &CliConfig) -> CliResult<()> {
    let open_browser = args.open_browser || config.open_browser;
    let auth_config = build_auth_config(args, config, &home_dir_from_env()?)?;
    let token_path = auth_config.token_path.clone();

    let prompt = TerminalPrompt::new().with_open_browser(open_browser);
    let client = Authorizer::with_prompt(auth_config, prompt)
        .authorize()
        .await?;

    info!("authorized client {}", client.client_id());
    println!();
    println!("Authorized. Token cached at {}", token_path.display());
    print_summary(client.credentials());
    Ok(())
}

/// Merges flags and `config.toml` into an [`AuthConfig`] rooted at `home`.
fn build_auth_config(
    args: AuthorizeArgs,
    config: &CliConfig,
    home: &Path,
) -> CliResult<AuthConfig> {
    let names = config.scopes_or(args.scopes);
    if names.is_empty() {
        return Err(CliError::Config(format!(
            "no scopes requested; pass --scope or set `scopes` in {}",
            CliConfig::default_path().display()
        )));
    }

    let mut auth_config = AuthConfig::new(Scopes::from_short_names(&names)?, home);

    if let Some(path) = args.credentials.or_else(|| config.credentials_file.clone()) {
        auth_config = auth_config.with_credentials_path(path);
    }
    if let Some(dir) = args.token_dir.or_else(|| config.token_dir.clone()) {
        auth_config = auth_config.with_token_dir(dir);
    }

    Ok(auth_config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_come_from_home() {
        let args = AuthorizeArgs {
            scopes: vec!["drive.readonly".to_string()],
            ..Default::default()
        };
        let config =
            build_auth_config(args, &CliConfig::default(), Path::new("/home/ada")).unwrap();

        assert_eq!(
            config.scopes.as_slice(),
            &["https://www.googleapis.com/auth/drive.readonly".to_string()]
        );
        assert_eq!(config.credentials_path, PathBuf::from("credentials.json"));
        assert_eq!(
            config.token_path,
            PathBuf::from("/home/ada/.credentials/googleapis.json")
        );
    }

    #[test]
    fn flags_override_config_file() {
        let file = CliConfig {
            scopes: vec!["calendar".to_string()],
            credentials_file: Some(PathBuf::from("/etc/from-file.json")),
            token_dir: Some(PathBuf::from("/var/from-file")),
            open_browser: false,
        };
        let args = AuthorizeArgs {
            scopes: vec!["gmail.send".to_string()],
            credentials: Some(PathBuf::from("/etc/from-flag.json")),
            token_dir: None,
            open_browser: false,
        };

        let config = build_auth_config(args, &file, Path::new("/home/ada")).unwrap();
        assert_eq!(
            config.scopes.as_slice(),
            &["https://www.googleapis.com/auth/gmail.send".to_string()]
        );
        assert_eq!(config.credentials_path, PathBuf::from("/etc/from-flag.json"));
        assert_eq!(
            config.token_path,
            PathBuf::from("/var/from-file/googleapis.json")
        );
    }

    #[test]
    fn no_scopes_anywhere_fails() {
        let err = build_auth_config(
            AuthorizeArgs::default(),
            &CliConfig::default(),
            Path::new("/home/ada"),
        )
        .unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[test]
    fn blank_scope_is_an_auth_error() {
        let args = AuthorizeArgs {
            scopes: vec![" ".to_string()],
            ..Default::default()
        };
        let err =
            build_auth_config(args, &CliConfig::default(), Path::new("/home/ada")).unwrap_err();
        assert!(matches!(err, CliError::Auth(_)));
    }
}
