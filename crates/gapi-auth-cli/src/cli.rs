//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use gapi_auth::tracing::LogFormat;

/// gapi-auth - Google API OAuth2 authorization helper
#[derive(Debug, Parser)]
#[command(name = "gapi-auth")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "GAPI_AUTH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v')]
    pub debug: bool,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormatArg::Compact)]
    pub log_format: LogFormatArg,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Authorize access to Google APIs, reusing the cached token if present
    Authorize {
        /// Scope short name, e.g. `drive.readonly` (can be repeated)
        #[arg(long = "scope", short = 's', action = clap::ArgAction::Append)]
        scopes: Vec<String>,

        /// Path to the OAuth client credentials JSON
        #[arg(long, env = "GAPI_AUTH_CREDENTIALS")]
        credentials: Option<PathBuf>,

        /// Directory holding the token cache (default: ~/.credentials)
        #[arg(long)]
        token_dir: Option<PathBuf>,

        /// Also open the authorization URL in the default browser
        #[arg(long)]
        open_browser: bool,
    },

    /// Token cache commands
    Token {
        /// Directory holding the token cache (default: ~/.credentials)
        #[arg(long, global = true)]
        token_dir: Option<PathBuf>,

        #[command(subcommand)]
        action: TokenAction,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Token cache actions.
#[derive(Debug, Subcommand)]
pub enum TokenAction {
    /// Show the token cache file path
    Path,

    /// Show a summary of the cached token
    Show,

    /// Delete the cached token so the next run prompts again
    Clear,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration
    Dump,

    /// Show configuration file path
    Path,
}

/// `--log-format` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_authorize_with_scopes() {
        let cli = Cli::try_parse_from([
            "gapi-auth",
            "authorize",
            "--scope",
            "drive.readonly",
            "-s",
            "calendar",
            "--credentials",
            "/tmp/client.json",
        ])
        .unwrap();

        match cli.command {
            Command::Authorize {
                scopes,
                credentials,
                token_dir,
                open_browser,
            } => {
                assert_eq!(scopes, vec!["drive.readonly", "calendar"]);
                assert_eq!(credentials, Some(PathBuf::from("/tmp/client.json")));
                assert!(token_dir.is_none());
                assert!(!open_browser);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn parse_token_show() {
        let cli = Cli::try_parse_from(["gapi-auth", "token", "show", "--token-dir", "/tmp/cache"])
            .unwrap();
        match cli.command {
            Command::Token { token_dir, action } => {
                assert_eq!(token_dir, Some(PathBuf::from("/tmp/cache")));
                assert!(matches!(action, TokenAction::Show));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn parse_global_flags() {
        let cli = Cli::try_parse_from(["gapi-auth", "-v", "--log-format", "json", "config", "path"])
            .unwrap();
        assert!(cli.debug);
        assert_eq!(cli.log_format, LogFormatArg::Json);
        assert_eq!(LogFormat::from(cli.log_format), LogFormat::Json);
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["gapi-auth"]).is_err());
    }
}
