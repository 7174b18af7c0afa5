//! GitHub API client implementation
//!
//! This module provides the main `GitHubClient` struct which serves as the entry point
//! for all GitHub API operations. The client owns the resolved configuration and the
//! [`RestInvoker`] every call goes through.
//!
//! ## Architecture
//!
//! Different API areas are organized into separate modules, each extending
//! `GitHubClient` with an `impl` block:
//! - `users.rs` - Users and profiles
//! - `references.rs` - Git references (branches and tags)
//! - `branches.rs` - Branch listing, creation and removal
//! - `pull_requests.rs` - Pull requests
//! - `reviews.rs` - Pull request reviews
//! - `review_requests.rs` - Review requests
//! - `meta.rs` - Meta information about the service

use super::repository::{RepositoryRef, RepositoryTarget};
use super::types::{Resource, ResponseContext, decode, decode_all};
use crate::config::Config;
use crate::constants::TELEMETRY_TARGET;
use ghops_rest::{HttpInvoker, RestInvoker, RestRequest, RestResponse, Result};
use serde_json::Value;
use std::sync::Arc;

/// GitHub API client for interacting with GitHub's REST API
///
/// ## Example
///
/// ```rust,no_run
/// use ghops::config::Config;
/// use ghops::github::{GitHubClient, RepositoryTarget};
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::load_or_default("ghops.yaml")?;
/// let client = GitHubClient::new(config)?;
///
/// let target = RepositoryTarget::uri("https://github.com/octocat/Hello-World");
/// let pulls = client.list_pull_requests(&target, &Default::default()).await?;
/// println!("{} pull requests", pulls.len());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct GitHubClient {
    pub(crate) invoker: Arc<dyn RestInvoker>,
    pub(crate) config: Config,
}

impl GitHubClient {
    /// Create a client that talks to the host named in `config`
    pub fn new(config: Config) -> Result<Self> {
        let invoker = HttpInvoker::new(config.invoker_settings())?;
        Ok(Self::with_invoker(Arc::new(invoker), config))
    }

    /// Create a client on top of an existing invoker
    pub fn with_invoker(invoker: Arc<dyn RestInvoker>, config: Config) -> Self {
        Self { invoker, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Check if the client has authentication configured
    pub fn is_authenticated(&self) -> bool {
        self.config
            .access_token
            .as_deref()
            .is_some_and(|token| !token.trim().is_empty())
    }

    /// Resolve a repository target against the configured defaults
    pub fn resolve_repository(&self, target: &RepositoryTarget) -> Result<RepositoryRef> {
        target.resolve(&self.config)
    }

    /// Issue a single call and return the raw response
    pub(crate) async fn send(&self, request: RestRequest) -> Result<RestResponse> {
        self.invoker.invoke(request).await
    }

    /// Issue a single call and decode its body
    pub(crate) async fn fetch<T: Resource>(
        &self,
        request: RestRequest,
        context: &ResponseContext,
    ) -> Result<T> {
        let response = self.invoker.invoke(request).await?;
        decode(response.body, context, self.decorate())
    }

    /// Issue a paginated call and decode every element
    pub(crate) async fn fetch_all<T: Resource>(
        &self,
        request: RestRequest,
        context: &ResponseContext,
    ) -> Result<Vec<T>> {
        let values: Vec<Value> = self.invoker.invoke_multi(request).await?;
        decode_all(values, context, self.decorate())
    }

    fn decorate(&self) -> bool {
        !self.config.disable_pipeline_support
    }

    /// Emit the operation event when telemetry is enabled
    pub(crate) fn record_event(&self, operation: &str) {
        if !self.config.disable_telemetry {
            tracing::info!(target: TELEMETRY_TARGET, operation, "operation invoked");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ghops_rest::MockInvoker;

    #[test]
    fn test_is_authenticated() {
        let mut config = Config::new();
        let client = GitHubClient::with_invoker(Arc::new(MockInvoker::new()), config.clone());
        assert!(!client.is_authenticated());

        config.access_token = Some("ghp_token".to_string());
        let client = GitHubClient::with_invoker(Arc::new(MockInvoker::new()), config);
        assert!(client.is_authenticated());
    }

    #[test]
    fn test_new_builds_http_invoker() {
        let client = GitHubClient::new(Config::new()).unwrap();
        assert_eq!(client.config().api_host_name, "github.com");
    }
}
