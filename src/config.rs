//! API credential configuration
//!
//! Credentials are never hard-coded: they come from a JSON file in the
//! XDG config directory, with `POSTPEEK_*` environment variables taking
//! precedence field by field. Only the bearer token is required for the
//! v2 lookup endpoint; the remaining OAuth 1.0a fields are accepted so a
//! full credential set can live in one place.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the credentials file inside the config directory
const CREDENTIALS_FILE: &str = "credentials.json";

/// Errors that can occur while loading credentials
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The credentials file exists but could not be read
    #[error("Failed to read credentials file: {0}")]
    Io(#[from] std::io::Error),

    /// The credentials file exists but is not valid JSON
    #[error("Failed to parse credentials file: {0}")]
    Parse(#[from] serde_json::Error),

    /// No bearer token was configured anywhere
    #[error("No bearer token configured. Set POSTPEEK_BEARER_TOKEN or add \"bearer_token\" to the credentials file")]
    MissingBearerToken,
}

/// The recognized X API credential set
///
/// All fields are optional at the configuration layer; callers that need a
/// specific credential ask for it explicitly (`bearer_token()`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    /// OAuth 1.0a consumer key
    pub api_key: Option<String>,
    /// OAuth 1.0a consumer secret
    pub api_secret: Option<String>,
    /// OAuth 1.0a access token
    pub access_token: Option<String>,
    /// OAuth 1.0a access token secret
    pub access_token_secret: Option<String>,
    /// OAuth 2.0 bearer token (required for the lookup endpoint)
    pub bearer_token: Option<String>,
}

impl Credentials {
    /// Loads credentials from the config file, then applies env overrides
    ///
    /// A missing config file is not an error; it just means every field
    /// must come from the environment.
    pub fn load() -> Result<Self, ConfigError> {
        let mut credentials = match Self::config_path() {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => Self::default(),
        };

        credentials.apply_env_overrides(|name| std::env::var(name).ok());
        Ok(credentials)
    }

    /// Reads credentials from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Path of the credentials file in the XDG config directory
    ///
    /// `~/.config/postpeek/credentials.json` on Linux. Returns `None` if
    /// the config directory cannot be determined.
    pub fn config_path() -> Option<PathBuf> {
        let project_dirs = ProjectDirs::from("", "", "postpeek")?;
        Some(project_dirs.config_dir().join(CREDENTIALS_FILE))
    }

    /// Overrides fields from an environment lookup
    ///
    /// Takes the lookup as a closure so tests can drive it without
    /// mutating the process environment.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let fields = [
            ("POSTPEEK_API_KEY", &mut self.api_key),
            ("POSTPEEK_API_SECRET", &mut self.api_secret),
            ("POSTPEEK_ACCESS_TOKEN", &mut self.access_token),
            ("POSTPEEK_ACCESS_TOKEN_SECRET", &mut self.access_token_secret),
            ("POSTPEEK_BEARER_TOKEN", &mut self.bearer_token),
        ];

        for (name, field) in fields {
            if let Some(value) = lookup(name).filter(|v| !v.is_empty()) {
                *field = Some(value);
            }
        }
    }

    /// Returns the bearer token, which every API call requires
    pub fn bearer_token(&self) -> Result<&str, ConfigError> {
        self.bearer_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::MissingBearerToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_from_file_parses_all_fields() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("credentials.json");
        fs::write(
            &path,
            r#"{
                "api_key": "k",
                "api_secret": "s",
                "access_token": "at",
                "access_token_secret": "ats",
                "bearer_token": "bt"
            }"#,
        )
        .unwrap();

        let credentials = Credentials::from_file(&path).expect("Should parse file");

        assert_eq!(credentials.api_key.as_deref(), Some("k"));
        assert_eq!(credentials.api_secret.as_deref(), Some("s"));
        assert_eq!(credentials.access_token.as_deref(), Some("at"));
        assert_eq!(credentials.access_token_secret.as_deref(), Some("ats"));
        assert_eq!(credentials.bearer_token().unwrap(), "bt");
    }

    #[test]
    fn test_from_file_tolerates_partial_fields() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("credentials.json");
        fs::write(&path, r#"{"bearer_token": "bt"}"#).unwrap();

        let credentials = Credentials::from_file(&path).expect("Should parse file");

        assert!(credentials.api_key.is_none());
        assert_eq!(credentials.bearer_token().unwrap(), "bt");
    }

    #[test]
    fn test_from_file_rejects_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("credentials.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            Credentials::from_file(&path),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_env_overrides_take_precedence() {
        let mut credentials = Credentials {
            bearer_token: Some("from-file".to_string()),
            ..Default::default()
        };

        credentials.apply_env_overrides(|name| match name {
            "POSTPEEK_BEARER_TOKEN" => Some("from-env".to_string()),
            "POSTPEEK_API_KEY" => Some("env-key".to_string()),
            _ => None,
        });

        assert_eq!(credentials.bearer_token().unwrap(), "from-env");
        assert_eq!(credentials.api_key.as_deref(), Some("env-key"));
    }

    #[test]
    fn test_empty_env_values_do_not_override() {
        let mut credentials = Credentials {
            bearer_token: Some("from-file".to_string()),
            ..Default::default()
        };

        credentials.apply_env_overrides(|name| match name {
            "POSTPEEK_BEARER_TOKEN" => Some(String::new()),
            _ => None,
        });

        assert_eq!(credentials.bearer_token().unwrap(), "from-file");
    }

    #[test]
    fn test_missing_bearer_token_is_an_error() {
        let credentials = Credentials::default();
        assert!(matches!(
            credentials.bearer_token(),
            Err(ConfigError::MissingBearerToken)
        ));
    }

    #[test]
    fn test_empty_bearer_token_is_an_error() {
        let credentials = Credentials {
            bearer_token: Some(String::new()),
            ..Default::default()
        };
        assert!(matches!(
            credentials.bearer_token(),
            Err(ConfigError::MissingBearerToken)
        ));
    }
}
