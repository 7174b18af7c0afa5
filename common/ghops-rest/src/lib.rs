//! GitHub REST v3 invocation layer
//!
//! This library provides the transport seam used by the `ghops` operations:
//! a typed error, the [`RestInvoker`] trait with its reqwest-backed
//! implementation, and helpers for working with repository URIs.
//!
//! ## Modules
//!
//! - [`auth`]: Access token handling
//! - [`error`]: Error type shared by every operation
//! - [`http`]: reqwest-backed invoker with pagination and retry support
//! - [`invoker`]: The request/response types and the [`RestInvoker`] trait
//! - [`testing`]: In-memory invoker for tests
//! - [`util`]: Repository URI splitting and joining

pub mod auth;
pub mod error;
pub mod http;
pub mod invoker;
pub mod testing;
pub mod util;

// Re-export public API
pub use auth::GitHubAuth;
pub use error::{GitHubError, Result};
pub use http::{HttpInvoker, InvokerSettings};
pub use invoker::{RestInvoker, RestRequest, RestResponse};
pub use reqwest::Method;
pub use testing::MockInvoker;
pub use util::{
    encode_path, encode_path_segment, join_repository_uri, repository_from_api_url,
    split_repository_uri, with_query,
};
