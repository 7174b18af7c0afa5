//! Configuration validation utilities

use super::Config;
use anyhow::anyhow;

/// Enumeration of possible validation errors
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValidationError {
    /// API host name is empty
    EmptyApiHostName,
    /// API host name includes a scheme or path
    InvalidApiHostName(String),
    /// Web request timeout is zero
    ZeroTimeout,
    /// Default owner contains a path separator
    InvalidDefaultOwnerName(String),
    /// Default repository name contains a path separator
    InvalidDefaultRepositoryName(String),
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigValidationError::EmptyApiHostName => {
                write!(f, "api_host_name cannot be empty")
            }
            ConfigValidationError::InvalidApiHostName(host) => {
                write!(
                    f,
                    "api_host_name must be a bare host name without scheme or path: '{}'",
                    host
                )
            }
            ConfigValidationError::ZeroTimeout => {
                write!(f, "web_request_timeout_sec must be greater than zero")
            }
            ConfigValidationError::InvalidDefaultOwnerName(name) => {
                write!(f, "default_owner_name cannot contain '/': '{}'", name)
            }
            ConfigValidationError::InvalidDefaultRepositoryName(name) => {
                write!(f, "default_repository_name cannot contain '/': '{}'", name)
            }
        }
    }
}

/// Validates a complete configuration object, collecting every problem
pub fn validate_config(config: &Config) -> Result<(), Vec<ConfigValidationError>> {
    let mut errors = Vec::new();

    let host = config.api_host_name.trim();
    if host.is_empty() {
        errors.push(ConfigValidationError::EmptyApiHostName);
    } else if host.contains("://") || host.contains('/') {
        errors.push(ConfigValidationError::InvalidApiHostName(
            config.api_host_name.clone(),
        ));
    }

    if config.web_request_timeout_sec == 0 {
        errors.push(ConfigValidationError::ZeroTimeout);
    }

    if let Some(owner) = &config.default_owner_name
        && owner.contains('/')
    {
        errors.push(ConfigValidationError::InvalidDefaultOwnerName(owner.clone()));
    }

    if let Some(name) = &config.default_repository_name
        && name.contains('/')
    {
        errors.push(ConfigValidationError::InvalidDefaultRepositoryName(
            name.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Collapse a list of validation errors into a single anyhow error
pub fn validation_errors_to_anyhow(errors: Vec<ConfigValidationError>) -> anyhow::Error {
    let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
    anyhow!("Invalid configuration:\n  - {}", messages.join("\n  - "))
}
