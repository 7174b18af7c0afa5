//! User command implementation

use super::{Command, CommandContext, print_json};
use crate::github::{HovercardSubject, ProfileUpdate};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use clap::{Subcommand, ValueEnum};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SubjectType {
    Organization,
    Repository,
    Issue,
    PullRequest,
}

impl SubjectType {
    fn with_id(self, id: u64) -> HovercardSubject {
        match self {
            SubjectType::Organization => HovercardSubject::Organization(id),
            SubjectType::Repository => HovercardSubject::Repository(id),
            SubjectType::Issue => HovercardSubject::Issue(id),
            SubjectType::PullRequest => HovercardSubject::PullRequest(id),
        }
    }
}

#[derive(Debug, Clone, Subcommand)]
pub enum UserAction {
    /// Get a user, or the authenticated user when no name is given
    Get {
        /// User login
        user_name: Option<String>,
    },

    /// List all users
    List,

    /// Get hovercard information about a user
    Context {
        /// User login
        user_name: String,

        /// Kind of subject the hovercard is relative to
        #[arg(long, value_enum, requires = "subject_id")]
        subject_type: Option<SubjectType>,

        /// Identifier of the subject
        #[arg(long, requires = "subject_type")]
        subject_id: Option<u64>,
    },

    /// Update the authenticated user's profile
    Update {
        #[arg(long = "name")]
        display_name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        blog: Option<String>,
        #[arg(long)]
        company: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        bio: Option<String>,
        #[arg(long)]
        hireable: Option<bool>,
    },
}

pub struct UserCommand {
    pub action: UserAction,
}

#[async_trait]
impl Command for UserCommand {
    async fn execute(&self, context: &CommandContext) -> Result<()> {
        let client = &context.client;
        match &self.action {
            UserAction::Get { user_name: Some(name) } => print_json(&client.get_user(name).await?),
            UserAction::Get { user_name: None } => print_json(&client.get_current_user().await?),
            UserAction::List => print_json(&client.list_users().await?),
            UserAction::Context {
                user_name,
                subject_type,
                subject_id,
            } => {
                let subject = match (subject_type, subject_id) {
                    (Some(kind), Some(id)) => Some(kind.with_id(*id)),
                    (None, None) => None,
                    _ => return Err(anyhow!("--subject-type and --subject-id go together")),
                };
                print_json(
                    &client
                        .get_user_contextual_information(user_name, subject)
                        .await?,
                )
            }
            UserAction::Update {
                display_name,
                email,
                blog,
                company,
                location,
                bio,
                hireable,
            } => {
                let update = ProfileUpdate {
                    name: display_name.clone(),
                    email: email.clone(),
                    blog: blog.clone(),
                    company: company.clone(),
                    location: location.clone(),
                    bio: bio.clone(),
                    hireable: *hireable,
                };
                print_json(&client.update_profile(&update).await?)
            }
        }
    }
}
