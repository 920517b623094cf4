//! CLI configuration.
//!
//! Optional settings live in `~/.config/gapi-auth/config.toml`. Command-line
//! flags take precedence over the file.
//!
//! ```toml
//! scopes = ["drive.readonly"]
//! credentials_file = "/home/me/client_secret.json"
//! token_dir = "/home/me/.credentials"
//! open_browser = true
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Settings read from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Scope short names used when `--scope` is not given.
    pub scopes: Vec<String>,

    /// Credentials file used when `--credentials` is not given.
    pub credentials_file: Option<PathBuf>,

    /// Token cache directory used when `--token-dir` is not given.
    pub token_dir: Option<PathBuf>,

    /// Try to open the authorization URL in the browser.
    pub open_browser: bool,
}

impl CliConfig {
    /// Loads configuration from the default path, or defaults if absent.
    pub fn load() -> Result<Self, String> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let content =
            std::fs::read_to_string(path).map_err(|e| format!("failed to read config: {}", e))?;
        toml::from_str(&content).map_err(|e| format!("failed to parse config: {}", e))
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("gapi-auth")
            .join("config.toml")
    }

    /// Picks the CLI scopes if any were given, else the configured ones.
    pub fn scopes_or(&self, cli_scopes: Vec<String>) -> Vec<String> {
        if cli_scopes.is_empty() {
            self.scopes.clone()
        } else {
            cli_scopes
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
scopes = ["drive.readonly", "calendar"]
credentials_file = "/etc/app/client.json"
token_dir = "/var/cache/app"
open_browser = true
"#,
        )
        .unwrap();

        let config = CliConfig::load_from(&path).unwrap();
        assert_eq!(config.scopes, vec!["drive.readonly", "calendar"]);
        assert_eq!(
            config.credentials_file,
            Some(PathBuf::from("/etc/app/client.json"))
        );
        assert_eq!(config.token_dir, Some(PathBuf::from("/var/cache/app")));
        assert!(config.open_browser);
    }

    #[test]
    fn missing_keys_default() {
        let config: CliConfig = toml::from_str("").unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn invalid_file_reports_parse_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "scopes = 3").unwrap();

        let err = CliConfig::load_from(&path).unwrap_err();
        assert!(err.contains("parse"));
    }

    #[test]
    fn missing_file_reports_read_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = CliConfig::load_from(&tmp.path().join("absent.toml")).unwrap_err();
        assert!(err.contains("read"));
    }

    #[test]
    fn cli_scopes_take_precedence() {
        let config = CliConfig {
            scopes: vec!["calendar".to_string()],
            ..Default::default()
        };
        assert_eq!(
            config.scopes_or(vec!["drive".to_string()]),
            vec!["drive".to_string()]
        );
        assert_eq!(config.scopes_or(Vec::new()), vec!["calendar".to_string()]);
    }

    #[test]
    fn default_path_ends_with_config_toml() {
        let path = CliConfig::default_path();
        assert!(path.ends_with("gapi-auth/config.toml"));
    }
}
