//! Configuration file loading and saving

use super::validation;
use crate::constants::config::{
    DEFAULT_API_HOST_NAME, DEFAULT_MAXIMUM_RETRIES_WHEN_RESULT_NOT_READY,
    DEFAULT_RETRY_DELAY_SECONDS, DEFAULT_WEB_REQUEST_TIMEOUT_SEC, TOKEN_ENV_VAR,
};
use anyhow::{Context, Result};
use ghops_rest::{GitHubAuth, InvokerSettings};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// `github.com` or the host name of a GitHub Enterprise instance
    pub api_host_name: String,
    pub default_owner_name: Option<String>,
    pub default_repository_name: Option<String>,
    #[serde(skip_serializing)]
    pub access_token: Option<String>,
    /// Suppress progress output for long-running calls
    pub default_no_status: bool,
    /// Skip computing derived fields on decoded resources
    pub disable_pipeline_support: bool,
    pub disable_telemetry: bool,
    pub web_request_timeout_sec: u64,
    pub maximum_retries_when_result_not_ready: u32,
    pub retry_delay_seconds: u64,
}

impl Config {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self {
            api_host_name: DEFAULT_API_HOST_NAME.to_string(),
            default_owner_name: None,
            default_repository_name: None,
            access_token: None,
            default_no_status: false,
            disable_pipeline_support: false,
            disable_telemetry: true,
            web_request_timeout_sec: DEFAULT_WEB_REQUEST_TIMEOUT_SEC,
            maximum_retries_when_result_not_ready: DEFAULT_MAXIMUM_RETRIES_WHEN_RESULT_NOT_READY,
            retry_delay_seconds: DEFAULT_RETRY_DELAY_SECONDS,
        }
    }

    /// Load configuration from a file
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file '{}'", path))?;

        let config: Config = if content.trim().is_empty() {
            Config::new()
        } else {
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse configuration file '{}'", path))?
        };

        config.validate()?;
        Ok(config)
    }

    /// Load the file if it exists, otherwise start from defaults.
    /// `GITHUB_TOKEN` overrides the configured token in both cases.
    pub fn load_or_default(path: &str) -> Result<Self> {
        let config = if Path::new(path).exists() {
            Self::load(path)?
        } else {
            tracing::debug!(path, "configuration file not found, using defaults");
            Self::new()
        };
        Ok(config.with_env_overrides())
    }

    pub fn with_env_overrides(mut self) -> Self {
        if let Some(auth) = GitHubAuth::from_env() {
            tracing::debug!("using access token from {}", TOKEN_ENV_VAR);
            self.access_token = Some(auth.token().to_string());
        }
        self
    }

    /// Save configuration to a file. The access token is never written.
    pub fn save(&self, path: &str) -> Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, format!("---\n{}", yaml))
            .with_context(|| format!("Failed to write configuration file '{}'", path))?;
        Ok(())
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        validation::validate_config(self).map_err(validation::validation_errors_to_anyhow)
    }

    /// Settings for the HTTP invoker derived from this configuration
    pub fn invoker_settings(&self) -> InvokerSettings {
        InvokerSettings {
            api_host_name: self.api_host_name.clone(),
            auth: self
                .access_token
                .as_ref()
                .filter(|token| !token.trim().is_empty())
                .map(|token| GitHubAuth::new(token.clone())),
            timeout: Duration::from_secs(self.web_request_timeout_sec),
            maximum_retries_when_result_not_ready: self.maximum_retries_when_result_not_ready,
            retry_delay: Duration::from_secs(self.retry_delay_seconds),
            show_progress: !self.default_no_status,
            ..InvokerSettings::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::new();
        assert_eq!(config.api_host_name, "github.com");
        assert!(config.disable_telemetry);
        assert!(!config.disable_pipeline_support);
        assert_eq!(config.web_request_timeout_sec, 30);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ghops.yaml");
        std::fs::write(
            &path,
            "default_owner_name: octocat\ndefault_repository_name: hello\n",
        )
        .unwrap();

        let config = Config::load(path.to_str().unwrap()).unwrap();
        assert_eq!(config.default_owner_name.as_deref(), Some("octocat"));
        assert_eq!(config.default_repository_name.as_deref(), Some("hello"));
        assert_eq!(config.api_host_name, "github.com");
        assert_eq!(config.retry_delay_seconds, 30);
    }

    #[test]
    fn test_save_skips_access_token() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ghops.yaml");
        let mut config = Config::new();
        config.access_token = Some("ghp_secret".to_string());
        config.default_owner_name = Some("octocat".to_string());

        config.save(path.to_str().unwrap()).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("---\n"));
        assert!(!written.contains("ghp_secret"));

        let loaded = Config::load(path.to_str().unwrap()).unwrap();
        assert_eq!(loaded.default_owner_name.as_deref(), Some("octocat"));
        assert_eq!(loaded.access_token, None);
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ghops.yaml");
        std::fs::write(&path, "web_request_timeout_sec: 0\n").unwrap();
        assert!(Config::load(path.to_str().unwrap()).is_err());
    }

    #[test]
    fn test_invoker_settings() {
        let mut config = Config::new();
        config.access_token = Some("ghp_token".to_string());
        config.default_no_status = true;
        config.web_request_timeout_sec = 5;

        let settings = config.invoker_settings();
        assert_eq!(settings.auth.unwrap().token(), "ghp_token");
        assert!(!settings.show_progress);
        assert_eq!(settings.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_blank_token_is_ignored() {
        let mut config = Config::new();
        config.access_token = Some("  ".to_string());
        assert!(config.invoker_settings().auth.is_none());
    }
}
