//! Reference and branch command implementations

use super::{Command, CommandContext, RepositoryArgs, print_json, validators};
use crate::github::ReferenceSelector;
use anyhow::Result;
use async_trait::async_trait;
use clap::{Args, Subcommand};
use serde_json::json;

/// Reference addressed by tag or branch name
#[derive(Debug, Clone, Args)]
pub struct ReferenceArgs {
    /// Tag name
    #[arg(long)]
    pub tag: Option<String>,

    /// Branch name
    #[arg(long)]
    pub branch: Option<String>,
}

impl ReferenceArgs {
    fn selector(&self) -> Result<ReferenceSelector> {
        validators::validate_reference_args(&self.tag, &self.branch)?;
        validators::validate_branch_name(&self.branch)?;
        Ok(ReferenceSelector {
            tag_name: self.tag.clone(),
            branch_name: self.branch.clone(),
        })
    }
}

#[derive(Debug, Clone, Subcommand)]
pub enum ReferenceAction {
    /// Get a single reference
    Get {
        #[command(flatten)]
        reference: ReferenceArgs,
    },

    /// Find references whose name starts with the given tag or branch
    Find {
        #[command(flatten)]
        reference: ReferenceArgs,
    },

    /// List all references
    List,

    /// Create a reference pointing at a commit
    New {
        #[command(flatten)]
        reference: ReferenceArgs,

        /// Commit SHA
        #[arg(long)]
        sha: String,
    },

    /// Point an existing reference at another commit
    Set {
        #[command(flatten)]
        reference: ReferenceArgs,

        /// Commit SHA
        #[arg(long)]
        sha: String,

        /// Allow non fast-forward updates
        #[arg(long)]
        force: bool,
    },

    /// Delete a reference
    Remove {
        #[command(flatten)]
        reference: ReferenceArgs,
    },
}

pub struct ReferenceCommand {
    pub repository: RepositoryArgs,
    pub action: ReferenceAction,
}

#[async_trait]
impl Command for ReferenceCommand {
    async fn execute(&self, context: &CommandContext) -> Result<()> {
        let client = &context.client;
        let target = self.repository.target()?;
        match &self.action {
            ReferenceAction::Get { reference } => {
                print_json(&client.get_reference(&target, &reference.selector()?).await?)
            }
            ReferenceAction::Find { reference } => {
                print_json(&client.find_references(&target, &reference.selector()?).await?)
            }
            ReferenceAction::List => print_json(&client.list_references(&target).await?),
            ReferenceAction::New { reference, sha } => {
                validators::validate_sha(sha)?;
                print_json(
                    &client
                        .new_reference(&target, &reference.selector()?, sha)
                        .await?,
                )
            }
            ReferenceAction::Set {
                reference,
                sha,
                force,
            } => {
                validators::validate_sha(sha)?;
                print_json(
                    &client
                        .set_reference(&target, &reference.selector()?, sha, *force)
                        .await?,
                )
            }
            ReferenceAction::Remove { reference } => {
                let selector = reference.selector()?;
                client.remove_reference(&target, &selector).await?;
                print_json(&json!({ "removed": selector.path()? }))
            }
        }
    }
}

#[derive(Debug, Clone, Subcommand)]
pub enum BranchAction {
    /// List branches
    List {
        /// Only protected branches
        #[arg(long)]
        protected: bool,
    },

    /// Get a branch
    Get { branch_name: String },

    /// Create a branch from another branch (the default branch if omitted)
    New {
        branch_name: String,

        /// Branch to start from
        #[arg(long)]
        from: Option<String>,
    },

    /// Delete a branch
    Remove { branch_name: String },
}

pub struct BranchCommand {
    pub repository: RepositoryArgs,
    pub action: BranchAction,
}

#[async_trait]
impl Command for BranchCommand {
    async fn execute(&self, context: &CommandContext) -> Result<()> {
        let client = &context.client;
        let target = self.repository.target()?;
        match &self.action {
            BranchAction::List { protected } => {
                print_json(&client.list_branches(&target, *protected).await?)
            }
            BranchAction::Get { branch_name } => {
                print_json(&client.get_branch(&target, branch_name).await?)
            }
            BranchAction::New { branch_name, from } => {
                validators::validate_branch_name(&Some(branch_name.clone()))?;
                validators::validate_branch_name(from)?;
                print_json(
                    &client
                        .new_branch(&target, from.as_deref(), branch_name)
                        .await?,
                )
            }
            BranchAction::Remove { branch_name } => {
                client.remove_branch(&target, branch_name).await?;
                print_json(&json!({ "removed": branch_name }))
            }
        }
    }
}
