//! Command implementations for the ghops binary

pub mod base;
pub mod meta;
pub mod pull_request;
pub mod reference;
pub mod review;
pub mod user;
pub mod validators;

pub use base::{Command, CommandContext, RepositoryArgs, print_json};
pub use meta::{MetaAction, MetaCommand};
pub use pull_request::{PullRequestAction, PullRequestCommand};
pub use reference::{BranchAction, BranchCommand, ReferenceAction, ReferenceCommand};
pub use review::{ReviewAction, ReviewCommand, ReviewRequestAction, ReviewRequestCommand};
pub use user::{UserAction, UserCommand};
