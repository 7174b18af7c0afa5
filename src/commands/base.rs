//! Base types and traits for the command pattern

use super::validators;
use crate::github::{GitHubClient, RepositoryTarget};
use anyhow::Result;
use clap::Args;
use serde::Serialize;

/// Context passed to all commands
#[derive(Clone)]
pub struct CommandContext {
    /// Client built from the loaded configuration
    pub client: GitHubClient,
}

/// Trait that all commands must implement
#[async_trait::async_trait]
pub trait Command {
    /// Execute the command with the given context
    async fn execute(&self, context: &CommandContext) -> Result<()>;
}

/// Repository selection shared by repository-scoped commands
///
/// Falls back to the configured default owner and repository when neither
/// form is given.
#[derive(Debug, Clone, Default, Args)]
pub struct RepositoryArgs {
    /// Repository URI, e.g. https://github.com/owner/name
    #[arg(long = "uri", global = true)]
    pub repo_uri: Option<String>,

    /// Repository owner
    #[arg(long = "owner", global = true)]
    pub repo_owner: Option<String>,

    /// Repository name
    #[arg(long = "repo", global = true)]
    pub repo_name: Option<String>,
}

impl RepositoryArgs {
    pub fn target(&self) -> Result<RepositoryTarget> {
        validators::validate_repository_args(&self.repo_uri, &self.repo_owner, &self.repo_name)?;
        Ok(match &self.repo_uri {
            Some(uri) => RepositoryTarget::uri(uri.clone()),
            None => RepositoryTarget::Elements {
                owner: self.repo_owner.clone(),
                name: self.repo_name.clone(),
            },
        })
    }
}

/// Print a result as pretty JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
