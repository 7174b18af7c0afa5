//! GitHub Git reference API operations
//!
//! References are addressed by a tag name or a branch name. Both resolve to a
//! path segment relative to `refs/` (`tags/<name>` or `heads/<name>`).

use super::client::GitHubClient;
use super::repository::{RepositoryRef, RepositoryTarget};
use super::types::{Reference, ResponseContext};
use crate::constants::refs;
use ghops_rest::{GitHubError, RestRequest, Result, encode_path};
use serde_json::json;

/// Resolve a tag or branch name into the canonical reference segment
///
/// Returns `tags/<tag>` when a tag is given, otherwise `heads/<branch>`
/// (an absent branch yields `heads/`).
///
/// # Errors
/// Returns [`GitHubError::InvalidArgument`] when both names are non-empty
pub fn resolve_reference(tag_name: Option<&str>, branch_name: Option<&str>) -> Result<String> {
    let tag_name = tag_name.unwrap_or_default();
    let branch_name = branch_name.unwrap_or_default();

    if !tag_name.is_empty() && !branch_name.is_empty() {
        return Err(GitHubError::InvalidArgument(format!(
            "Specify either a tag name or a branch name, not both (tag '{}', branch '{}')",
            tag_name, branch_name
        )));
    }

    if !tag_name.is_empty() {
        Ok(format!("{}{}", refs::TAGS, tag_name))
    } else {
        Ok(format!("{}{}", refs::HEADS, branch_name))
    }
}

/// Identifies a reference by tag or branch name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceSelector {
    pub tag_name: Option<String>,
    pub branch_name: Option<String>,
}

impl ReferenceSelector {
    pub fn tag(name: impl Into<String>) -> Self {
        Self {
            tag_name: Some(name.into()),
            branch_name: None,
        }
    }

    pub fn branch(name: impl Into<String>) -> Self {
        Self {
            tag_name: None,
            branch_name: Some(name.into()),
        }
    }

    /// Reference path relative to `refs/`
    pub fn path(&self) -> Result<String> {
        resolve_reference(self.tag_name.as_deref(), self.branch_name.as_deref())
    }

    /// Like [`path`](Self::path), but a name is mandatory
    pub fn required_path(&self) -> Result<String> {
        let has_name = |name: &Option<String>| name.as_deref().is_some_and(|n| !n.is_empty());
        if !has_name(&self.tag_name) && !has_name(&self.branch_name) {
            return Err(GitHubError::InvalidArgument(
                "A tag name or a branch name is required".to_string(),
            ));
        }
        self.path()
    }
}

impl GitHubClient {
    /// Get a single reference by exact name
    pub async fn get_reference(
        &self,
        target: &RepositoryTarget,
        selector: &ReferenceSelector,
    ) -> Result<Reference> {
        let reference = selector.required_path()?;
        let repo = self.resolve_repository(target)?;
        self.record_event("get_reference");

        let request = RestRequest::get(format!(
            "{}/git/ref/{}",
            repo.api_path(),
            encode_path(&reference)
        ))
            .with_description(format!("Getting reference {} for {}", reference, repo));
        self.fetch(request, &ResponseContext::for_repository(&repo))
            .await
    }

    /// Get every reference whose name starts with the given tag or branch name
    pub async fn find_references(
        &self,
        target: &RepositoryTarget,
        selector: &ReferenceSelector,
    ) -> Result<Vec<Reference>> {
        let reference = selector.required_path()?;
        let repo = self.resolve_repository(target)?;
        self.record_event("find_references");

        let request =
            RestRequest::get(format!(
                "{}/git/matching-refs/{}",
                repo.api_path(),
                encode_path(&reference)
            ))
                .with_description(format!(
                    "Getting references matching {} for {}",
                    reference, repo
                ));
        self.fetch_all(request, &ResponseContext::for_repository(&repo))
            .await
    }

    /// Get all references in a repository
    pub async fn list_references(&self, target: &RepositoryTarget) -> Result<Vec<Reference>> {
        let repo = self.resolve_repository(target)?;
        self.record_event("list_references");

        let request = RestRequest::get(format!("{}/git/refs", repo.api_path()))
            .with_description(format!("Getting all references for {}", repo));
        self.fetch_all(request, &ResponseContext::for_repository(&repo))
            .await
    }

    /// Create a reference pointing at `sha`
    pub async fn new_reference(
        &self,
        target: &RepositoryTarget,
        selector: &ReferenceSelector,
        sha: &str,
    ) -> Result<Reference> {
        let reference = selector.required_path()?;
        require_sha(sha)?;
        let repo = self.resolve_repository(target)?;
        self.record_event("new_reference");
        self.create_reference(&repo, &reference, sha).await
    }

    pub(crate) async fn create_reference(
        &self,
        repo: &RepositoryRef,
        reference: &str,
        sha: &str,
    ) -> Result<Reference> {
        let full_ref = format!("{}{}", refs::REFS_PREFIX, reference);
        let request = RestRequest::post(format!("{}/git/refs", repo.api_path()))
            .with_body(json!({ "ref": full_ref, "sha": sha }))
            .with_description(format!("Creating reference {} for {}", full_ref, repo));
        self.fetch(request, &ResponseContext::for_repository(repo))
            .await
    }

    /// Point an existing reference at `sha`. Without `force` the update must
    /// be a fast-forward.
    pub async fn set_reference(
        &self,
        target: &RepositoryTarget,
        selector: &ReferenceSelector,
        sha: &str,
        force: bool,
    ) -> Result<Reference> {
        let reference = selector.required_path()?;
        require_sha(sha)?;
        let repo = self.resolve_repository(target)?;
        self.record_event("set_reference");

        let request = RestRequest::patch(format!(
            "{}/git/refs/{}",
            repo.api_path(),
            encode_path(&reference)
        ))
            .with_body(json!({ "sha": sha, "force": force }))
            .with_description(format!("Updating reference {} for {}", reference, repo));
        self.fetch(request, &ResponseContext::for_repository(&repo))
            .await
    }

    /// Delete a reference
    pub async fn remove_reference(
        &self,
        target: &RepositoryTarget,
        selector: &ReferenceSelector,
    ) -> Result<()> {
        let reference = selector.required_path()?;
        let repo = self.resolve_repository(target)?;
        self.record_event("remove_reference");

        let request = RestRequest::delete(format!(
            "{}/git/refs/{}",
            repo.api_path(),
            encode_path(&reference)
        ))
            .with_description(format!("Deleting reference {} from {}", reference, repo));
        self.send(request).await?;
        Ok(())
    }
}

fn require_sha(sha: &str) -> Result<()> {
    if sha.trim().is_empty() {
        return Err(GitHubError::InvalidArgument(
            "A commit SHA is required".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_tag() {
        for tag in ["v1.0", "release-2024", "a"] {
            assert_eq!(
                resolve_reference(Some(tag), None).unwrap(),
                format!("tags/{}", tag)
            );
            assert_eq!(
                resolve_reference(Some(tag), Some("")).unwrap(),
                format!("tags/{}", tag)
            );
        }
    }

    #[test]
    fn test_resolve_branch() {
        for branch in ["main", "feature/login", "x"] {
            assert_eq!(
                resolve_reference(None, Some(branch)).unwrap(),
                format!("heads/{}", branch)
            );
            assert_eq!(
                resolve_reference(Some(""), Some(branch)).unwrap(),
                format!("heads/{}", branch)
            );
        }
    }

    #[test]
    fn test_resolve_neither_yields_bare_heads() {
        assert_eq!(resolve_reference(None, None).unwrap(), "heads/");
        assert_eq!(resolve_reference(Some(""), Some("")).unwrap(), "heads/");
    }

    #[test]
    fn test_resolve_both_is_ambiguous() {
        for (tag, branch) in [("v1", "main"), ("a", "b"), ("same", "same")] {
            let err = resolve_reference(Some(tag), Some(branch)).unwrap_err();
            assert!(matches!(err, GitHubError::InvalidArgument(_)));
        }
    }

    #[test]
    fn test_selector_requires_a_name() {
        assert!(ReferenceSelector::default().required_path().is_err());
        assert_eq!(
            ReferenceSelector::branch("main").required_path().unwrap(),
            "heads/main"
        );
        assert_eq!(
            ReferenceSelector::tag("v2").required_path().unwrap(),
            "tags/v2"
        );
    }
}
