//! Error type shared by the invocation layer and the operations built on it

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GitHubError>;

#[derive(Debug, Error)]
pub enum GitHubError {
    /// Parameters were rejected before any request was sent
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A value did not have the expected shape (e.g. a repository URI)
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// GitHub answered with a non-success status
    #[error("GitHub API error ({status}): {message}")]
    Api {
        status: u16,
        message: String,
        documentation_url: Option<String>,
    },

    #[error("GitHub API rate limit exceeded (resets at {})", reset_at.map(|r| r.to_string()).unwrap_or_else(|| "unknown".to_string()))]
    RateLimited { reset_at: Option<u64> },

    /// GitHub kept answering 202 Accepted
    #[error("Result was not ready after {attempts} attempts")]
    ResultNotReady { attempts: u32 },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to parse GitHub API response: {0}")]
    Json(#[from] serde_json::Error),
}

impl GitHubError {
    /// HTTP status carried by an API error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            GitHubError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
