//! gapi-auth CLI entry point.

use std::process::ExitCode;

use clap::Parser;

use gapi_auth::tracing::{TracingConfig, init_tracing};
use gapi_auth_cli::cli::{Cli, Command, ConfigAction, TokenAction};
use gapi_auth_cli::commands::{self, authorize::AuthorizeArgs};
use gapi_auth_cli::config::CliConfig;
use gapi_auth_cli::error::{CliError, CliResult};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let tracing_config = if cli.debug {
        TracingConfig::debug()
    } else {
        TracingConfig::default()
    };
    if let Err(e) = init_tracing(tracing_config.with_format(cli.log_format.into())) {
        eprintln!("warning: {}", e);
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    let config = match cli.config {
        Some(ref path) => CliConfig::load_from(path).map_err(CliError::Config)?,
        None => CliConfig::load().map_err(CliError::Config)?,
    };

    match cli.command {
        Command::Authorize {
            scopes,
            credentials,
            token_dir,
            open_browser,
        } => {
            let args = AuthorizeArgs {
                scopes,
                credentials,
                token_dir,
                open_browser,
            };
            commands::authorize::run(args, &config).await
        }
        Command::Token { token_dir, action } => {
            let token_dir = token_dir.or_else(|| config.token_dir.clone());
            match action {
                TokenAction::Path => commands::token::path(token_dir),
                TokenAction::Show => commands::token::show(token_dir).await,
                TokenAction::Clear => commands::token::clear(token_dir).await,
            }
        }
        Command::Config { action } => match action {
            ConfigAction::Dump => commands::config::dump(&config),
            ConfigAction::Path => commands::config::path(),
        },
    }
}
