//! Review and review request command implementations

use super::{Command, CommandContext, RepositoryArgs, print_json, validators};
use crate::github::{NewReview, ReviewEvent};
use anyhow::Result;
use async_trait::async_trait;
use clap::{Subcommand, ValueEnum};
use serde_json::json;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ReviewEventArg {
    Approve,
    RequestChanges,
    Comment,
}

impl From<ReviewEventArg> for ReviewEvent {
    fn from(event: ReviewEventArg) -> Self {
        match event {
            ReviewEventArg::Approve => ReviewEvent::Approve,
            ReviewEventArg::RequestChanges => ReviewEvent::RequestChanges,
            ReviewEventArg::Comment => ReviewEvent::Comment,
        }
    }
}

#[derive(Debug, Clone, Subcommand)]
pub enum ReviewAction {
    /// List the reviews of a pull request
    List { number: u64 },

    /// Get a review
    Get { number: u64, review_id: u64 },

    /// Create a review; it stays pending unless --event is given
    New {
        number: u64,

        #[arg(long)]
        body: Option<String>,

        #[arg(long, value_enum)]
        event: Option<ReviewEventArg>,

        /// Commit the review applies to (defaults to the latest)
        #[arg(long)]
        commit_id: Option<String>,
    },

    /// Submit a pending review
    Submit {
        number: u64,
        review_id: u64,

        #[arg(long, value_enum)]
        event: ReviewEventArg,

        #[arg(long)]
        body: Option<String>,
    },

    /// Replace the body of a review
    Update {
        number: u64,
        review_id: u64,

        #[arg(long)]
        body: String,
    },

    /// Dismiss a review
    Dismiss {
        number: u64,
        review_id: u64,

        #[arg(long)]
        message: String,
    },

    /// Delete a pending review
    Remove { number: u64, review_id: u64 },
}

pub struct ReviewCommand {
    pub repository: RepositoryArgs,
    pub action: ReviewAction,
}

#[async_trait]
impl Command for ReviewCommand {
    async fn execute(&self, context: &CommandContext) -> Result<()> {
        let client = &context.client;
        let target = self.repository.target()?;
        match &self.action {
            ReviewAction::List { number } => print_json(&client.list_reviews(&target, *number).await?),
            ReviewAction::Get { number, review_id } => {
                print_json(&client.get_review(&target, *number, *review_id).await?)
            }
            ReviewAction::New {
                number,
                body,
                event,
                commit_id,
            } => {
                if let Some(sha) = commit_id {
                    validators::validate_sha(sha)?;
                }
                let review = NewReview {
                    body: body.clone(),
                    event: event.map(Into::into),
                    commit_id: commit_id.clone(),
                    comments: Vec::new(),
                };
                print_json(&client.new_review(&target, *number, &review).await?)
            }
            ReviewAction::Submit {
                number,
                review_id,
                event,
                body,
            } => print_json(
                &client
                    .submit_review(
                        &target,
                        *number,
                        *review_id,
                        (*event).into(),
                        body.as_deref(),
                    )
                    .await?,
            ),
            ReviewAction::Update {
                number,
                review_id,
                body,
            } => print_json(
                &client
                    .update_review(&target, *number, *review_id, body)
                    .await?,
            ),
            ReviewAction::Dismiss {
                number,
                review_id,
                message,
            } => print_json(
                &client
                    .dismiss_review(&target, *number, *review_id, message)
                    .await?,
            ),
            ReviewAction::Remove { number, review_id } => {
                print_json(&client.remove_review(&target, *number, *review_id).await?)
            }
        }
    }
}

#[derive(Debug, Clone, Subcommand)]
pub enum ReviewRequestAction {
    /// Show requested reviewers
    Get { number: u64 },

    /// Request reviews
    New {
        number: u64,

        /// User login (repeatable)
        #[arg(long = "user")]
        users: Vec<String>,

        /// Team slug (repeatable)
        #[arg(long = "team")]
        teams: Vec<String>,
    },

    /// Withdraw review requests
    Remove {
        number: u64,

        /// User login (repeatable)
        #[arg(long = "user")]
        users: Vec<String>,

        /// Team slug (repeatable)
        #[arg(long = "team")]
        teams: Vec<String>,
    },
}

pub struct ReviewRequestCommand {
    pub repository: RepositoryArgs,
    pub action: ReviewRequestAction,
}

#[async_trait]
impl Command for ReviewRequestCommand {
    async fn execute(&self, context: &CommandContext) -> Result<()> {
        let client = &context.client;
        let target = self.repository.target()?;
        match &self.action {
            ReviewRequestAction::Get { number } => {
                print_json(&client.get_review_requests(&target, *number).await?)
            }
            ReviewRequestAction::New {
                number,
                users,
                teams,
            } => {
                validators::validate_reviewers(users, teams)?;
                print_json(
                    &client
                        .new_review_request(&target, *number, users, teams)
                        .await?,
                )
            }
            ReviewRequestAction::Remove {
                number,
                users,
                teams,
            } => {
                validators::validate_reviewers(users, teams)?;
                client
                    .remove_review_request(&target, *number, users, teams)
                    .await?;
                print_json(&json!({ "number": number, "users": users, "teams": teams }))
            }
        }
    }
}
