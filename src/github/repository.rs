//! Repository identification
//!
//! Operations accept either a repository URI or an owner/name pair, with
//! missing parts filled from the configured defaults. Both forms resolve to a
//! [`RepositoryRef`].

use crate::config::Config;
use ghops_rest::{
    GitHubError, Result, encode_path_segment, join_repository_uri, split_repository_uri,
};
use std::fmt;

/// A fully resolved repository
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepositoryRef {
    pub owner: String,
    pub name: String,
}

impl RepositoryRef {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Parse `https://github.com/<owner>/<name>`
    pub fn from_uri(uri: &str) -> Result<Self> {
        let (owner, name) = split_repository_uri(uri)?;
        Ok(Self { owner, name })
    }

    /// Canonical web URI of the repository
    pub fn uri(&self) -> String {
        join_repository_uri(&self.owner, &self.name)
    }

    /// URI fragment of the repository resource, e.g. `repos/octocat/hello`
    pub fn api_path(&self) -> String {
        format!(
            "repos/{}/{}",
            encode_path_segment(&self.owner),
            encode_path_segment(&self.name)
        )
    }
}

impl fmt::Display for RepositoryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// How a caller identified the repository to operate on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryTarget {
    Uri(String),
    Elements {
        owner: Option<String>,
        name: Option<String>,
    },
}

impl Default for RepositoryTarget {
    /// Use the configured default owner and repository
    fn default() -> Self {
        RepositoryTarget::Elements {
            owner: None,
            name: None,
        }
    }
}

impl RepositoryTarget {
    pub fn uri(uri: impl Into<String>) -> Self {
        RepositoryTarget::Uri(uri.into())
    }

    pub fn elements(owner: impl Into<String>, name: impl Into<String>) -> Self {
        RepositoryTarget::Elements {
            owner: Some(owner.into()),
            name: Some(name.into()),
        }
    }

    /// Resolve to an owner/name pair, falling back to configured defaults
    ///
    /// # Errors
    /// - [`GitHubError::InvalidFormat`] for a malformed URI
    /// - [`GitHubError::InvalidArgument`] when owner or name cannot be determined
    pub fn resolve(&self, config: &Config) -> Result<RepositoryRef> {
        match self {
            RepositoryTarget::Uri(uri) => RepositoryRef::from_uri(uri),
            RepositoryTarget::Elements { owner, name } => {
                let owner = non_empty(owner.as_deref())
                    .or_else(|| non_empty(config.default_owner_name.as_deref()));
                let name = non_empty(name.as_deref())
                    .or_else(|| non_empty(config.default_repository_name.as_deref()));

                match (owner, name) {
                    (Some(owner), Some(name)) => Ok(RepositoryRef::new(owner, name)),
                    (None, Some(_)) => Err(GitHubError::InvalidArgument(
                        "Unable to determine the repository owner. Provide a URI or owner name, or configure default_owner_name".to_string(),
                    )),
                    (Some(_), None) => Err(GitHubError::InvalidArgument(
                        "Unable to determine the repository name. Provide a URI or repository name, or configure default_repository_name".to_string(),
                    )),
                    (None, None) => Err(GitHubError::InvalidArgument(
                        "Unable to determine the repository. Provide a URI or owner and repository names, or configure defaults".to_string(),
                    )),
                }
            }
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
