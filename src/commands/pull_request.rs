//! Pull request command implementation

use super::{Command, CommandContext, RepositoryArgs, print_json, validators};
use crate::github::{
    MergeMethod, MergeOptions, NewPullRequest, PullRequestFilter, PullRequestSort,
    PullRequestState, PullRequestUpdate, SortDirection,
};
use anyhow::Result;
use async_trait::async_trait;
use clap::{Subcommand, ValueEnum};
use serde_json::json;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StateArg {
    Open,
    Closed,
    All,
}

impl From<StateArg> for PullRequestState {
    fn from(state: StateArg) -> Self {
        match state {
            StateArg::Open => PullRequestState::Open,
            StateArg::Closed => PullRequestState::Closed,
            StateArg::All => PullRequestState::All,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortArg {
    Created,
    Updated,
    Popularity,
    LongRunning,
}

impl From<SortArg> for PullRequestSort {
    fn from(sort: SortArg) -> Self {
        match sort {
            SortArg::Created => PullRequestSort::Created,
            SortArg::Updated => PullRequestSort::Updated,
            SortArg::Popularity => PullRequestSort::Popularity,
            SortArg::LongRunning => PullRequestSort::LongRunning,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DirectionArg {
    Asc,
    Desc,
}

impl From<DirectionArg> for SortDirection {
    fn from(direction: DirectionArg) -> Self {
        match direction {
            DirectionArg::Asc => SortDirection::Asc,
            DirectionArg::Desc => SortDirection::Desc,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum MergeMethodArg {
    #[default]
    Merge,
    Squash,
    Rebase,
}

impl From<MergeMethodArg> for MergeMethod {
    fn from(method: MergeMethodArg) -> Self {
        match method {
            MergeMethodArg::Merge => MergeMethod::Merge,
            MergeMethodArg::Squash => MergeMethod::Squash,
            MergeMethodArg::Rebase => MergeMethod::Rebase,
        }
    }
}

#[derive(Debug, Clone, Subcommand)]
pub enum PullRequestAction {
    /// Get a pull request
    Get { number: u64 },

    /// List pull requests
    List {
        #[arg(long, value_enum)]
        state: Option<StateArg>,

        /// Filter by head, as user:ref-name
        #[arg(long)]
        head: Option<String>,

        /// Filter by base branch
        #[arg(long)]
        base: Option<String>,

        #[arg(long, value_enum)]
        sort: Option<SortArg>,

        #[arg(long, value_enum)]
        direction: Option<DirectionArg>,
    },

    /// Open a pull request
    New {
        /// Branch containing the changes
        #[arg(long)]
        head: String,

        /// Owner of the head branch, for pull requests from forks
        #[arg(long)]
        head_owner: Option<String>,

        /// Branch to merge into
        #[arg(long)]
        base: String,

        #[arg(long, conflicts_with = "issue", required_unless_present = "issue")]
        title: Option<String>,

        #[arg(long, conflicts_with = "issue")]
        body: Option<String>,

        /// Convert an existing issue instead of giving a title
        #[arg(long)]
        issue: Option<u64>,

        /// Open as draft
        #[arg(long)]
        draft: bool,

        /// Do not let maintainers push to the head branch
        #[arg(long)]
        no_maintainer_modify: bool,
    },

    /// Update a pull request
    Update {
        number: u64,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        body: Option<String>,

        #[arg(long, value_enum)]
        state: Option<StateArg>,

        #[arg(long)]
        base: Option<String>,

        #[arg(long)]
        maintainer_can_modify: Option<bool>,
    },

    /// Check whether a pull request is merged
    Merged { number: u64 },

    /// Merge a pull request
    Merge {
        number: u64,

        #[arg(long, value_enum, default_value_t = MergeMethodArg::Merge)]
        method: MergeMethodArg,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        message: Option<String>,

        /// Head SHA that must match for the merge to proceed
        #[arg(long)]
        sha: Option<String>,
    },

    /// List the commits of a pull request
    Commits { number: u64 },
}

pub struct PullRequestCommand {
    pub repository: RepositoryArgs,
    pub action: PullRequestAction,
}

#[async_trait]
impl Command for PullRequestCommand {
    async fn execute(&self, context: &CommandContext) -> Result<()> {
        let client = &context.client;
        let target = self.repository.target()?;
        match &self.action {
            PullRequestAction::Get { number } => {
                print_json(&client.get_pull_request(&target, *number).await?)
            }
            PullRequestAction::List {
                state,
                head,
                base,
                sort,
                direction,
            } => {
                let filter = PullRequestFilter {
                    state: state.map(Into::into),
                    head: head.clone(),
                    base: base.clone(),
                    sort: sort.map(Into::into),
                    direction: direction.map(Into::into),
                };
                print_json(&client.list_pull_requests(&target, &filter).await?)
            }
            PullRequestAction::New {
                head,
                head_owner,
                base,
                title,
                body,
                issue,
                draft,
                no_maintainer_modify,
            } => {
                validators::validate_branch_name(&Some(head.clone()))?;
                validators::validate_branch_name(&Some(base.clone()))?;

                let mut pull_request = match (issue, title) {
                    (Some(issue), _) => NewPullRequest::from_issue(*issue, head, base),
                    (None, title) => {
                        let request =
                            NewPullRequest::new(title.clone().unwrap_or_default(), head, base);
                        match body {
                            Some(body) => request.with_body(body),
                            None => request,
                        }
                    }
                };
                if let Some(owner) = head_owner {
                    pull_request = pull_request.with_head_owner(owner);
                }
                if *draft {
                    pull_request = pull_request.as_draft();
                }
                pull_request = pull_request.maintainer_can_modify(!no_maintainer_modify);

                print_json(&client.new_pull_request(&target, &pull_request).await?)
            }
            PullRequestAction::Update {
                number,
                title,
                body,
                state,
                base,
                maintainer_can_modify,
            } => {
                let update = PullRequestUpdate {
                    title: title.clone(),
                    body: body.clone(),
                    state: state.map(Into::into),
                    base: base.clone(),
                    maintainer_can_modify: *maintainer_can_modify,
                };
                print_json(&client.update_pull_request(&target, *number, &update).await?)
            }
            PullRequestAction::Merged { number } => {
                let merged = client.is_pull_request_merged(&target, *number).await?;
                print_json(&json!({ "number": number, "merged": merged }))
            }
            PullRequestAction::Merge {
                number,
                method,
                title,
                message,
                sha,
            } => {
                if let Some(sha) = sha {
                    validators::validate_sha(sha)?;
                }
                let options = MergeOptions {
                    commit_title: title.clone(),
                    commit_message: message.clone(),
                    sha: sha.clone(),
                    merge_method: (*method).into(),
                };
                print_json(&client.merge_pull_request(&target, *number, &options).await?)
            }
            PullRequestAction::Commits { number } => {
                print_json(&client.list_pull_request_commits(&target, *number).await?)
            }
        }
    }
}
