//! Typed GitHub resources
//!
//! Each resource keeps the fields this crate works with as typed members and
//! everything else in a flattened `extra` map, so re-serializing a resource
//! reproduces the original payload. Derived convenience fields (repository
//! URI, normalized names, identifier aliases) are filled once at decode time
//! by [`Resource::derive_fields`] and are left empty when pipeline support is
//! disabled in the configuration.

use super::repository::RepositoryRef;
use crate::constants::{refs, type_names};
use ghops_rest::{Result, repository_from_api_url, split_repository_uri};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// What the request that produced a payload already knows
#[derive(Debug, Clone, Default)]
pub struct ResponseContext {
    pub repository: Option<RepositoryRef>,
    pub pull_request_number: Option<u64>,
    pub user_name: Option<String>,
}

impl ResponseContext {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn for_repository(repository: &RepositoryRef) -> Self {
        Self {
            repository: Some(repository.clone()),
            ..Self::default()
        }
    }

    pub fn for_pull_request(repository: &RepositoryRef, number: u64) -> Self {
        Self {
            repository: Some(repository.clone()),
            pull_request_number: Some(number),
            ..Self::default()
        }
    }

    pub fn for_user(user_name: &str) -> Self {
        Self {
            user_name: Some(user_name.to_string()),
            ..Self::default()
        }
    }

    /// Repository URI from the context, else from one of the payload's own URLs
    fn repository_url(&self, urls: &[Option<&str>]) -> Option<String> {
        if let Some(repository) = &self.repository {
            return Some(repository.uri());
        }
        urls.iter().flatten().find_map(|url| {
            repository_from_api_url(url)
                .or_else(|| split_repository_uri(url).ok())
                .map(|(owner, name)| RepositoryRef::new(owner, name).uri())
        })
    }
}

/// A decoded GitHub payload
pub trait Resource: DeserializeOwned {
    const TYPE_NAME: &'static str;

    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    /// Fill derived fields. Missing source data leaves them empty.
    fn derive_fields(&mut self, context: &ResponseContext);
}

/// Deserialize `value` and, when `decorate` is set, compute derived fields
pub fn decode<T: Resource>(value: Value, context: &ResponseContext, decorate: bool) -> Result<T> {
    let mut resource: T = serde_json::from_value(value)?;
    if decorate {
        resource.derive_fields(context);
    }
    Ok(resource)
}

pub fn decode_all<T: Resource>(
    values: Vec<Value>,
    context: &ResponseContext,
    decorate: bool,
) -> Result<Vec<T>> {
    values
        .into_iter()
        .map(|value| decode(value, context, decorate))
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub login: String,
    pub id: u64,
    pub node_id: Option<String>,
    pub url: Option<String>,
    pub html_url: Option<String>,
    #[serde(rename = "type")]
    pub account_type: Option<String>,
    pub site_admin: Option<bool>,
    pub name: Option<String>,
    pub company: Option<String>,
    pub blog: Option<String>,
    pub location: Option<String>,
    pub email: Option<String>,
    pub bio: Option<String>,
    pub hireable: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,

    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
}

impl Resource for User {
    const TYPE_NAME: &'static str = type_names::USER;

    fn derive_fields(&mut self, _context: &ResponseContext) {
        self.user_name = Some(self.login.clone());
        self.user_id = Some(self.id);
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HovercardContext {
    pub message: String,
    pub octicon: Option<String>,
}

/// Hovercard information about a user, optionally relative to a subject
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserContext {
    #[serde(default)]
    pub contexts: Vec<HovercardContext>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,

    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
}

impl Resource for UserContext {
    const TYPE_NAME: &'static str = type_names::USER_CONTEXTUAL_INFORMATION;

    fn derive_fields(&mut self, context: &ResponseContext) {
        self.user_name = context.user_name.clone();
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub id: u64,
    pub name: String,
    pub slug: String,
    pub node_id: Option<String>,
    pub description: Option<String>,
    pub privacy: Option<String>,
    pub permission: Option<String>,
    pub html_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,

    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub team_name: Option<String>,
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<u64>,
}

impl Resource for Team {
    const TYPE_NAME: &'static str = type_names::TEAM;

    fn derive_fields(&mut self, _context: &ResponseContext) {
        self.team_name = Some(self.name.clone());
        self.team_id = Some(self.id);
    }
}

/// Whether a reference points at a branch or a tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Branch,
    Tag,
}

impl ReferenceKind {
    /// Classify a full ref path, returning the short name after the namespace.
    /// Refs outside `refs/heads/` and `refs/tags/` are neither.
    pub fn classify(ref_path: &str) -> Option<(ReferenceKind, &str)> {
        if let Some(name) = ref_path.strip_prefix(refs::HEADS_PREFIX) {
            Some((ReferenceKind::Branch, name))
        } else {
            ref_path
                .strip_prefix(refs::TAGS_PREFIX)
                .map(|name| (ReferenceKind::Tag, name))
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            ReferenceKind::Branch => type_names::BRANCH,
            ReferenceKind::Tag => type_names::TAG,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitObject {
    pub sha: String,
    #[serde(rename = "type")]
    pub object_type: String,
    pub url: Option<String>,
}

/// A Git reference (`refs/heads/<branch>` or `refs/tags/<tag>`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reference {
    #[serde(rename = "ref")]
    pub ref_path: String,
    pub node_id: Option<String>,
    pub url: Option<String>,
    pub object: GitObject,
    #[serde(flatten)]
    pub extra: Map<String, Value>,

    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub repository_url: Option<String>,
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub branch_name: Option<String>,
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub tag_name: Option<String>,
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
}

impl Reference {
    pub fn kind(&self) -> Option<ReferenceKind> {
        ReferenceKind::classify(&self.ref_path).map(|(kind, _)| kind)
    }
}

impl Resource for Reference {
    const TYPE_NAME: &'static str = type_names::REFERENCE;

    fn type_name(&self) -> &'static str {
        self.kind()
            .map(|kind| kind.type_name())
            .unwrap_or(Self::TYPE_NAME)
    }

    fn derive_fields(&mut self, context: &ResponseContext) {
        self.repository_url = context.repository_url(&[self.url.as_deref()]);
        self.sha = Some(self.object.sha.clone());
        self.branch_name = None;
        self.tag_name = None;
        match ReferenceKind::classify(&self.ref_path) {
            Some((ReferenceKind::Branch, name)) => self.branch_name = Some(name.to_string()),
            Some((ReferenceKind::Tag, name)) => self.tag_name = Some(name.to_string()),
            None => {}
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchCommit {
    pub sha: String,
    pub url: Option<String>,
}

/// An entry of the branches endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Branch {
    pub name: String,
    pub commit: BranchCommit,
    pub protected: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,

    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub repository_url: Option<String>,
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub branch_name: Option<String>,
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
}

impl Resource for Branch {
    const TYPE_NAME: &'static str = type_names::BRANCH;

    fn derive_fields(&mut self, context: &ResponseContext) {
        self.repository_url = context.repository_url(&[self.commit.url.as_deref()]);
        self.branch_name = Some(self.name.clone());
        self.sha = Some(self.commit.sha.clone());
    }
}

/// The `head` or `base` side of a pull request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequestBranch {
    #[serde(rename = "ref")]
    pub ref_name: String,
    pub sha: String,
    pub label: Option<String>,
    pub user: Option<User>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequest {
    pub id: u64,
    pub number: u64,
    pub node_id: Option<String>,
    pub url: Option<String>,
    pub html_url: Option<String>,
    pub state: String,
    pub title: String,
    pub body: Option<String>,
    pub draft: Option<bool>,
    pub merged: Option<bool>,
    pub mergeable: Option<bool>,
    pub merge_commit_sha: Option<String>,
    pub user: Option<User>,
    pub head: PullRequestBranch,
    pub base: PullRequestBranch,
    #[serde(default)]
    pub requested_reviewers: Vec<User>,
    #[serde(default)]
    pub requested_teams: Vec<Team>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,

    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub repository_url: Option<String>,
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub pull_request_id: Option<u64>,
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub pull_request_number: Option<u64>,
}

impl Resource for PullRequest {
    const TYPE_NAME: &'static str = type_names::PULL_REQUEST;

    fn derive_fields(&mut self, context: &ResponseContext) {
        self.repository_url =
            context.repository_url(&[self.html_url.as_deref(), self.url.as_deref()]);
        self.pull_request_id = Some(self.id);
        self.pull_request_number = Some(self.number);

        let users = self
            .user
            .iter_mut()
            .chain(self.head.user.iter_mut())
            .chain(self.base.user.iter_mut())
            .chain(self.requested_reviewers.iter_mut());
        for user in users {
            user.derive_fields(context);
        }
        for team in &mut self.requested_teams {
            team.derive_fields(context);
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitActor {
    pub name: Option<String>,
    pub email: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitDetail {
    pub message: String,
    pub author: Option<GitActor>,
    pub committer: Option<GitActor>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitParent {
    pub sha: String,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Commit {
    pub sha: String,
    pub node_id: Option<String>,
    pub url: Option<String>,
    pub html_url: Option<String>,
    pub commit: CommitDetail,
    pub author: Option<User>,
    pub committer: Option<User>,
    #[serde(default)]
    pub parents: Vec<CommitParent>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,

    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub repository_url: Option<String>,
}

impl Resource for Commit {
    const TYPE_NAME: &'static str = type_names::COMMIT;

    fn derive_fields(&mut self, context: &ResponseContext) {
        self.repository_url =
            context.repository_url(&[self.url.as_deref(), self.html_url.as_deref()]);
        for user in self.author.iter_mut().chain(self.committer.iter_mut()) {
            user.derive_fields(context);
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: u64,
    pub node_id: Option<String>,
    pub user: Option<User>,
    pub body: Option<String>,
    pub state: String,
    pub html_url: Option<String>,
    pub pull_request_url: Option<String>,
    pub commit_id: Option<String>,
    pub submitted_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,

    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub repository_url: Option<String>,
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub pull_request_number: Option<u64>,
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub review_id: Option<u64>,
}

impl Resource for Review {
    const TYPE_NAME: &'static str = type_names::PULL_REQUEST_REVIEW;

    fn derive_fields(&mut self, context: &ResponseContext) {
        self.repository_url = context.repository_url(&[
            self.pull_request_url.as_deref(),
            self.html_url.as_deref(),
        ]);
        self.pull_request_number = context.pull_request_number.or_else(|| {
            self.pull_request_url
                .as_deref()
                .and_then(pull_request_number_from_url)
        });
        self.review_id = Some(self.id);
        if let Some(user) = &mut self.user {
            user.derive_fields(context);
        }
    }
}

/// `.../pulls/12` → `12`
fn pull_request_number_from_url(url: &str) -> Option<u64> {
    let (prefix, number) = url.trim_end_matches('/').rsplit_once('/')?;
    if prefix.ends_with("/pulls") || prefix.ends_with("/pull") {
        number.parse().ok()
    } else {
        None
    }
}

/// Users and teams whose review has been requested on a pull request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRequest {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub teams: Vec<Team>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,

    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub repository_url: Option<String>,
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub pull_request_number: Option<u64>,
}

impl Resource for ReviewRequest {
    const TYPE_NAME: &'static str = type_names::PULL_REQUEST_REVIEW_REQUEST;

    fn derive_fields(&mut self, context: &ResponseContext) {
        self.repository_url = context.repository_url(&[]);
        self.pull_request_number = context.pull_request_number;
        for user in &mut self.users {
            user.derive_fields(context);
        }
        for team in &mut self.teams {
            team.derive_fields(context);
        }
    }
}

/// Outcome of a merge request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeResult {
    pub sha: Option<String>,
    pub merged: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meta {
    pub verifiable_password_authentication: Option<bool>,
    #[serde(default)]
    pub hooks: Vec<String>,
    #[serde(default)]
    pub web: Vec<String>,
    #[serde(default)]
    pub api: Vec<String>,
    #[serde(default)]
    pub git: Vec<String>,
    #[serde(default)]
    pub pages: Vec<String>,
    #[serde(default)]
    pub importer: Vec<String>,
    #[serde(default)]
    pub actions: Vec<String>,
    #[serde(default)]
    pub dependabot: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Resource for Meta {
    const TYPE_NAME: &'static str = type_names::META;

    fn derive_fields(&mut self, _context: &ResponseContext) {}
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitWindow {
    pub limit: u64,
    pub remaining: u64,
    pub reset: u64,
    pub used: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitStatus {
    #[serde(default)]
    pub resources: BTreeMap<String, RateLimitWindow>,
    pub rate: RateLimitWindow,
}

impl Resource for RateLimitStatus {
    const TYPE_NAME: &'static str = type_names::RATE_LIMIT;

    fn derive_fields(&mut self, _context: &ResponseContext) {}
}
