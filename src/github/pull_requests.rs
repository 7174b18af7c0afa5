//! GitHub Pull Request API operations
//!
//! This module contains all functionality related to GitHub pull requests,
//! including creation, updates, merging, and querying of pull requests.

use super::client::GitHubClient;
use super::repository::RepositoryTarget;
use super::types::{Commit, MergeResult, PullRequest, ResponseContext};
use ghops_rest::{GitHubError, RestRequest, Result, with_query};
use serde::Serialize;
use serde_json::{Map, Value, json};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PullRequestState {
    Open,
    Closed,
    All,
}

impl PullRequestState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PullRequestState::Open => "open",
            PullRequestState::Closed => "closed",
            PullRequestState::All => "all",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullRequestSort {
    Created,
    Updated,
    Popularity,
    LongRunning,
}

impl PullRequestSort {
    pub fn as_str(&self) -> &'static str {
        match self {
            PullRequestSort::Created => "created",
            PullRequestSort::Updated => "updated",
            PullRequestSort::Popularity => "popularity",
            PullRequestSort::LongRunning => "long-running",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Filters for listing pull requests
#[derive(Debug, Clone, Default)]
pub struct PullRequestFilter {
    pub state: Option<PullRequestState>,
    /// `user:ref-name` or `organization:ref-name`
    pub head: Option<String>,
    pub base: Option<String>,
    pub sort: Option<PullRequestSort>,
    pub direction: Option<SortDirection>,
}

impl PullRequestFilter {
    fn params(&self) -> Vec<(&'static str, &str)> {
        let mut params = Vec::new();
        if let Some(state) = self.state {
            params.push(("state", state.as_str()));
        }
        if let Some(head) = &self.head {
            params.push(("head", head.as_str()));
        }
        if let Some(base) = &self.base {
            params.push(("base", base.as_str()));
        }
        if let Some(sort) = self.sort {
            params.push(("sort", sort.as_str()));
        }
        if let Some(direction) = self.direction {
            params.push(("direction", direction.as_str()));
        }
        params
    }
}

/// What a new pull request is built from
#[derive(Debug, Clone, PartialEq)]
pub enum PullRequestSource {
    Title { title: String, body: Option<String> },
    /// Convert an existing issue into a pull request
    Issue(u64),
}

/// Parameters for creating a pull request
#[derive(Debug, Clone)]
pub struct NewPullRequest {
    pub source: PullRequestSource,
    pub head: String,
    /// Qualifies `head` as `<owner>:<head>` for cross-repository pull requests
    pub head_owner: Option<String>,
    pub base: String,
    pub maintainer_can_modify: bool,
    pub draft: bool,
}

impl NewPullRequest {
    pub fn new(title: impl Into<String>, head: impl Into<String>, base: impl Into<String>) -> Self {
        Self {
            source: PullRequestSource::Title {
                title: title.into(),
                body: None,
            },
            head: head.into(),
            head_owner: None,
            base: base.into(),
            maintainer_can_modify: true,
            draft: false,
        }
    }

    pub fn from_issue(issue: u64, head: impl Into<String>, base: impl Into<String>) -> Self {
        Self {
            source: PullRequestSource::Issue(issue),
            ..Self::new(String::new(), head, base)
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        if let PullRequestSource::Title { body: current, .. } = &mut self.source {
            *current = Some(body.into());
        }
        self
    }

    pub fn with_head_owner(mut self, owner: impl Into<String>) -> Self {
        self.head_owner = Some(owner.into());
        self
    }

    pub fn as_draft(mut self) -> Self {
        self.draft = true;
        self
    }

    pub fn maintainer_can_modify(mut self, allowed: bool) -> Self {
        self.maintainer_can_modify = allowed;
        self
    }

    fn payload(&self) -> Result<Value> {
        if self.head.trim().is_empty() {
            return Err(GitHubError::InvalidArgument(
                "A head branch is required".to_string(),
            ));
        }
        if self.base.trim().is_empty() {
            return Err(GitHubError::InvalidArgument(
                "A base branch is required".to_string(),
            ));
        }

        let head = match self.head_owner.as_deref().filter(|o| !o.is_empty()) {
            Some(owner) => format!("{}:{}", owner, self.head),
            None => self.head.clone(),
        };

        let mut payload = json!({
            "head": head,
            "base": self.base,
            "maintainer_can_modify": self.maintainer_can_modify,
            "draft": self.draft,
        });

        match &self.source {
            PullRequestSource::Title { title, body } => {
                if title.trim().is_empty() {
                    return Err(GitHubError::InvalidArgument(
                        "A pull request title is required".to_string(),
                    ));
                }
                payload["title"] = json!(title);
                if let Some(body) = body {
                    payload["body"] = json!(body);
                }
            }
            PullRequestSource::Issue(issue) => {
                payload["issue"] = json!(issue);
            }
        }

        Ok(payload)
    }
}

/// Fields to change on an existing pull request
#[derive(Debug, Clone, Default)]
pub struct PullRequestUpdate {
    pub title: Option<String>,
    pub body: Option<String>,
    /// Only `Open` and `Closed` are meaningful here
    pub state: Option<PullRequestState>,
    pub base: Option<String>,
    pub maintainer_can_modify: Option<bool>,
}

impl PullRequestUpdate {
    fn payload(&self) -> Result<Value> {
        let mut payload = Map::new();
        if let Some(title) = &self.title {
            payload.insert("title".to_string(), json!(title));
        }
        if let Some(body) = &self.body {
            payload.insert("body".to_string(), json!(body));
        }
        if let Some(state) = self.state {
            if state == PullRequestState::All {
                return Err(GitHubError::InvalidArgument(
                    "A pull request can only be set to open or closed".to_string(),
                ));
            }
            payload.insert("state".to_string(), json!(state.as_str()));
        }
        if let Some(base) = &self.base {
            payload.insert("base".to_string(), json!(base));
        }
        if let Some(allowed) = self.maintainer_can_modify {
            payload.insert("maintainer_can_modify".to_string(), json!(allowed));
        }

        if payload.is_empty() {
            return Err(GitHubError::InvalidArgument(
                "Nothing to update on the pull request".to_string(),
            ));
        }
        Ok(Value::Object(payload))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergeMethod {
    #[default]
    Merge,
    Squash,
    Rebase,
}

impl MergeMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            MergeMethod::Merge => "merge",
            MergeMethod::Squash => "squash",
            MergeMethod::Rebase => "rebase",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MergeOptions {
    pub commit_title: Option<String>,
    pub commit_message: Option<String>,
    /// Head SHA the pull request must match for the merge to proceed
    pub sha: Option<String>,
    pub merge_method: MergeMethod,
}

impl MergeOptions {
    fn payload(&self) -> Value {
        let mut payload = json!({ "merge_method": self.merge_method.as_str() });
        if let Some(title) = &self.commit_title {
            payload["commit_title"] = json!(title);
        }
        if let Some(message) = &self.commit_message {
            payload["commit_message"] = json!(message);
        }
        if let Some(sha) = &self.sha {
            payload["sha"] = json!(sha);
        }
        payload
    }
}

impl GitHubClient {
    /// Get a specific pull request by number
    pub async fn get_pull_request(
        &self,
        target: &RepositoryTarget,
        number: u64,
    ) -> Result<PullRequest> {
        let repo = self.resolve_repository(target)?;
        self.record_event("get_pull_request");

        let request = RestRequest::get(format!("{}/pulls/{}", repo.api_path(), number))
            .with_description(format!("Getting pull request {} for {}", number, repo));
        self.fetch(request, &ResponseContext::for_repository(&repo))
            .await
    }

    /// List pull requests for a repository
    pub async fn list_pull_requests(
        &self,
        target: &RepositoryTarget,
        filter: &PullRequestFilter,
    ) -> Result<Vec<PullRequest>> {
        let repo = self.resolve_repository(target)?;
        self.record_event("list_pull_requests");

        let uri_fragment = with_query(format!("{}/pulls", repo.api_path()), &filter.params());

        let request = RestRequest::get(uri_fragment)
            .with_description(format!("Getting pull requests for {}", repo));
        self.fetch_all(request, &ResponseContext::for_repository(&repo))
            .await
    }

    /// Create a new pull request
    pub async fn new_pull_request(
        &self,
        target: &RepositoryTarget,
        pull_request: &NewPullRequest,
    ) -> Result<PullRequest> {
        let payload = pull_request.payload()?;
        let repo = self.resolve_repository(target)?;
        self.record_event("new_pull_request");

        let request = RestRequest::post(format!("{}/pulls", repo.api_path()))
            .with_body(payload)
            .with_description(format!(
                "Creating pull request from {} into {} for {}",
                pull_request.head, pull_request.base, repo
            ));
        self.fetch(request, &ResponseContext::for_repository(&repo))
            .await
    }

    /// Update title, body, state, base or maintainer permissions
    pub async fn update_pull_request(
        &self,
        target: &RepositoryTarget,
        number: u64,
        update: &PullRequestUpdate,
    ) -> Result<PullRequest> {
        let payload = update.payload()?;
        let repo = self.resolve_repository(target)?;
        self.record_event("update_pull_request");

        let request = RestRequest::patch(format!("{}/pulls/{}", repo.api_path(), number))
            .with_body(payload)
            .with_description(format!("Updating pull request {} for {}", number, repo));
        self.fetch(request, &ResponseContext::for_repository(&repo))
            .await
    }

    /// Whether a pull request has been merged
    ///
    /// GitHub answers 204 for merged pull requests and 404 otherwise; any
    /// non-204 answer counts as not merged. Transport failures still propagate.
    pub async fn is_pull_request_merged(
        &self,
        target: &RepositoryTarget,
        number: u64,
    ) -> Result<bool> {
        let repo = self.resolve_repository(target)?;
        self.record_event("is_pull_request_merged");

        let request = RestRequest::get(format!("{}/pulls/{}/merge", repo.api_path(), number))
            .with_description(format!(
                "Checking if pull request {} for {} is merged",
                number, repo
            ));
        match self.send(request).await {
            Ok(response) => Ok(response.status == 204),
            Err(GitHubError::Api { status, .. }) => {
                tracing::debug!(status, number, "pull request is not merged");
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }

    /// Merge a pull request
    pub async fn merge_pull_request(
        &self,
        target: &RepositoryTarget,
        number: u64,
        options: &MergeOptions,
    ) -> Result<MergeResult> {
        let repo = self.resolve_repository(target)?;
        self.record_event("merge_pull_request");

        let request = RestRequest::put(format!("{}/pulls/{}/merge", repo.api_path(), number))
            .with_body(options.payload())
            .with_description(format!("Merging pull request {} for {}", number, repo));
        let response = self.send(request).await?;
        Ok(serde_json::from_value(response.body)?)
    }

    /// List the commits of a pull request
    pub async fn list_pull_request_commits(
        &self,
        target: &RepositoryTarget,
        number: u64,
    ) -> Result<Vec<Commit>> {
        let repo = self.resolve_repository(target)?;
        self.record_event("list_pull_request_commits");

        let request = RestRequest::get(format!("{}/pulls/{}/commits", repo.api_path(), number))
            .with_description(format!(
                "Getting commits of pull request {} for {}",
                number, repo
            ));
        self.fetch_all(request, &ResponseContext::for_pull_request(&repo, number))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_query() {
        let query = |filter: &PullRequestFilter| with_query("pulls", &filter.params());
        assert_eq!(query(&PullRequestFilter::default()), "pulls");

        let filter = PullRequestFilter {
            state: Some(PullRequestState::Closed),
            head: Some("octocat:feature".to_string()),
            base: Some("main".to_string()),
            sort: Some(PullRequestSort::LongRunning),
            direction: Some(SortDirection::Asc),
        };
        assert_eq!(
            query(&filter),
            "pulls?state=closed&head=octocat%3Afeature&base=main&sort=long-running&direction=asc"
        );

        let filter = PullRequestFilter {
            head: Some("a&b".to_string()),
            base: Some("c++".to_string()),
            ..Default::default()
        };
        assert_eq!(query(&filter), "pulls?head=a%26b&base=c%2B%2B");
    }

    #[test]
    fn test_new_pull_request_payload() {
        let payload = NewPullRequest::new("Add feature", "feature", "main")
            .with_body("Details")
            .with_head_owner("fork-owner")
            .as_draft()
            .payload()
            .unwrap();

        assert_eq!(payload["title"], "Add feature");
        assert_eq!(payload["body"], "Details");
        assert_eq!(payload["head"], "fork-owner:feature");
        assert_eq!(payload["base"], "main");
        assert_eq!(payload["draft"], true);
        assert_eq!(payload["maintainer_can_modify"], true);
        assert!(payload.get("issue").is_none());
    }

    #[test]
    fn test_new_pull_request_from_issue() {
        let payload = NewPullRequest::from_issue(17, "fix", "main")
            .payload()
            .unwrap();
        assert_eq!(payload["issue"], 17);
        assert!(payload.get("title").is_none());
    }

    #[test]
    fn test_new_pull_request_validation() {
        assert!(NewPullRequest::new("", "feature", "main").payload().is_err());
        assert!(NewPullRequest::new("T", " ", "main").payload().is_err());
        assert!(NewPullRequest::new("T", "feature", "").payload().is_err());
    }

    #[test]
    fn test_update_payload() {
        let update = PullRequestUpdate {
            state: Some(PullRequestState::Closed),
            maintainer_can_modify: Some(false),
            ..Default::default()
        };
        assert_eq!(
            update.payload().unwrap(),
            json!({"state": "closed", "maintainer_can_modify": false})
        );

        assert!(PullRequestUpdate::default().payload().is_err());

        let invalid = PullRequestUpdate {
            state: Some(PullRequestState::All),
            ..Default::default()
        };
        assert!(invalid.payload().is_err());
    }

    #[test]
    fn test_merge_payload() {
        let options = MergeOptions {
            commit_title: Some("Release".to_string()),
            merge_method: MergeMethod::Squash,
            ..Default::default()
        };
        assert_eq!(
            options.payload(),
            json!({"merge_method": "squash", "commit_title": "Release"})
        );
    }
}
