//! `gapi-auth token` subcommands.

use std::path::PathBuf;

use chrono::Utc;
use serde_json::Value;

use gapi_auth::Token;

use crate::commands::token_store;
use crate::error::CliResult;

/// Print the token cache path.
pub fn path(token_dir: Option<PathBuf>) -> CliResult<()> {
    let store = token_store(token_dir)?;
    println!("token: {}", store.path().display());
    Ok(())
}

/// Print a summary of the cached token.
pub async fn show(token_dir: Option<PathBuf>) -> CliResult<()> {
    let store = token_store(token_dir)?;
    match store.load().await {
        Some(token) => {
            println!("token: {}", store.path().display());
            print_summary(&token);
        }
        None => println!("No cached token at {}", store.path().display()),
    }
    Ok(())
}

/// Delete the cached token.
pub async fn clear(token_dir: Option<PathBuf>) -> CliResult<()> {
    let store = token_store(token_dir)?;
    if store.clear().await? {
        println!("Removed {}", store.path().display());
    } else {
        println!("No cached token at {}", store.path().display());
    }
    Ok(())
}

/// Prints the non-secret parts of a token.
pub(crate) fn print_summary(token: &Token) {
    for line in summary_lines(token) {
        println!("  {}", line);
    }
}

fn summary_lines(token: &Token) -> Vec<String> {
    let access_token = token.access_token().map_or_else(|| "none".to_string(), mask);
    let mut lines = vec![format!("access token:  {}", access_token)];

    lines.push(format!(
        "refresh token: {}",
        if token.refresh_token().is_some() { "present" } else { "none" }
    ));
    if let Some(token_type) = token.token_type() {
        lines.push(format!("type:          {}", token_type));
    }
    match token.get("scope") {
        Some(Value::String(scope)) => lines.push(format!("scope:         {}", scope)),
        Some(other) => lines.push(format!("scope:         {}", other)),
        None => {}
    }
    match token.expires_at() {
        Some(at) if at <= Utc::now() => {
            lines.push(format!("expires:       {} (expired)", at.to_rfc3339()))
        }
        Some(at) => lines.push(format!("expires:       {}", at.to_rfc3339())),
        None => lines.push("expires:       unknown".to_string()),
    }

    lines
}

/// Keeps the first few characters of a secret.
fn mask(secret: &str) -> String {
    let prefix: String = secret.chars().take(8).collect();
    if prefix.len() == secret.len() {
        "*".repeat(secret.chars().count())
    } else {
        format!("{}...", prefix)
    }
}
