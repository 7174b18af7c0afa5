//! GitHub REST v3 operations
//!
//! Every operation is an async method on [`GitHubClient`]. The API areas live in
//! separate sub-modules, each adding an `impl GitHubClient` block.
//!
//! ## Architecture
//!
//! - [`client`]: the client, request dispatch and telemetry
//! - [`repository`]: owner/name resolution from a URI or configured defaults
//! - [`types`]: typed resources and their decoration
//! - [`references`], [`branches`]: Git references
//! - [`pull_requests`], [`reviews`], [`review_requests`]: pull request workflow
//! - [`users`], [`meta`]: users and service information
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ghops::config::Config;
//! use ghops::github::{GitHubClient, ReferenceSelector, RepositoryTarget};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = GitHubClient::new(Config::load_or_default("ghops.yaml")?)?;
//! let target = RepositoryTarget::elements("rust-lang", "rust");
//!
//! let reference = client
//!     .get_reference(&target, &ReferenceSelector::branch("master"))
//!     .await?;
//! println!("{:?} at {:?}", reference.branch_name, reference.sha);
//! # Ok(())
//! # }
//! ```

pub mod branches;
pub mod client;
pub mod meta;
pub mod pull_requests;
pub mod references;
pub mod repository;
pub mod review_requests;
pub mod reviews;
pub mod types;
pub mod users;

pub use client::GitHubClient;
pub use pull_requests::{
    MergeMethod, MergeOptions, NewPullRequest, PullRequestFilter, PullRequestSort,
    PullRequestSource, PullRequestState, PullRequestUpdate, SortDirection,
};
pub use references::{ReferenceSelector, resolve_reference};
pub use repository::{RepositoryRef, RepositoryTarget};
pub use reviews::{NewReview, ReviewComment, ReviewEvent};
pub use types::{
    Branch, Commit, MergeResult, Meta, PullRequest, RateLimitStatus, Reference, ReferenceKind,
    Resource, ResponseContext, Review, ReviewRequest, Team, User, UserContext,
};
pub use users::{HovercardSubject, ProfileUpdate};
