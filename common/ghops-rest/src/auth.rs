//! Access token handling

use std::fmt;

/// Personal access token used to authenticate REST calls
#[derive(Clone)]
pub struct GitHubAuth {
    token: String,
}

impl GitHubAuth {
    /// Wrap a token
    pub fn new(token: String) -> Self {
        Self { token }
    }

    /// Read the token from `GITHUB_TOKEN`, ignoring empty values
    pub fn from_env() -> Option<Self> {
        std::env::var("GITHUB_TOKEN")
            .ok()
            .filter(|token| !token.trim().is_empty())
            .map(Self::new)
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Value for the `Authorization` header
    pub fn get_auth_header(&self) -> String {
        format!("token {}", self.token)
    }
}

// Never print the token itself.
impl fmt::Debug for GitHubAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitHubAuth")
            .field("token", &"<redacted>")
            .finish()
    }
}
