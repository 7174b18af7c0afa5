//! GitHub branch operations

use super::client::GitHubClient;
use super::references::resolve_reference;
use super::repository::RepositoryTarget;
use super::types::{Branch, Reference, ResponseContext};
use ghops_rest::{GitHubError, RestRequest, Result, encode_path};

impl GitHubClient {
    /// List branches, optionally only protected ones
    pub async fn list_branches(
        &self,
        target: &RepositoryTarget,
        protected_only: bool,
    ) -> Result<Vec<Branch>> {
        let repo = self.resolve_repository(target)?;
        self.record_event("list_branches");

        let mut uri_fragment = format!("{}/branches", repo.api_path());
        if protected_only {
            uri_fragment.push_str("?protected=true");
        }

        let request =
            RestRequest::get(uri_fragment).with_description(format!("Getting branches for {}", repo));
        self.fetch_all(request, &ResponseContext::for_repository(&repo))
            .await
    }

    /// Get a single branch
    pub async fn get_branch(&self, target: &RepositoryTarget, name: &str) -> Result<Branch> {
        require_branch_name(name)?;
        let repo = self.resolve_repository(target)?;
        self.record_event("get_branch");

        let request =
            RestRequest::get(format!("{}/branches/{}", repo.api_path(), encode_path(name)))
                .with_description(format!("Getting branch {} for {}", name, repo));
        self.fetch(request, &ResponseContext::for_repository(&repo))
            .await
    }

    /// Create `target_branch` at the head of `origin_branch`
    ///
    /// When no origin is given, the repository's default branch is used.
    ///
    /// # Errors
    /// Returns [`GitHubError::InvalidArgument`] if the origin branch does not exist
    pub async fn new_branch(
        &self,
        target: &RepositoryTarget,
        origin_branch: Option<&str>,
        target_branch: &str,
    ) -> Result<Reference> {
        require_branch_name(target_branch)?;
        let repo = self.resolve_repository(target)?;
        self.record_event("new_branch");

        let origin = match origin_branch.filter(|b| !b.is_empty()) {
            Some(origin) => origin.to_string(),
            None => {
                let request = RestRequest::get(repo.api_path())
                    .with_description(format!("Getting default branch of {}", repo));
                let response = self.send(request).await?;
                response.body["default_branch"]
                    .as_str()
                    .map(str::to_string)
                    .ok_or_else(|| {
                        GitHubError::InvalidArgument(format!(
                            "Unable to determine the default branch of {}",
                            repo
                        ))
                    })?
            }
        };

        let origin_ref = resolve_reference(None, Some(&origin))?;
        let request = RestRequest::get(format!(
            "{}/git/ref/{}",
            repo.api_path(),
            encode_path(&origin_ref)
        ))
            .with_description(format!("Getting origin branch {} of {}", origin, repo));
        let origin_head: Reference = match self
            .fetch(request, &ResponseContext::for_repository(&repo))
            .await
        {
            Ok(reference) => reference,
            Err(err) if err.is_not_found() => {
                return Err(GitHubError::InvalidArgument(format!(
                    "Origin branch '{}' not found in {}",
                    origin, repo
                )));
            }
            Err(err) => return Err(err),
        };

        tracing::debug!(
            origin = %origin,
            branch = %target_branch,
            sha = %origin_head.object.sha,
            "creating branch"
        );

        let new_ref = resolve_reference(None, Some(target_branch))?;
        self.create_reference(&repo, &new_ref, &origin_head.object.sha)
            .await
    }

    /// Delete a branch
    pub async fn remove_branch(&self, target: &RepositoryTarget, name: &str) -> Result<()> {
        require_branch_name(name)?;
        let repo = self.resolve_repository(target)?;
        self.record_event("remove_branch");

        let reference = resolve_reference(None, Some(name))?;
        let request = RestRequest::delete(format!(
            "{}/git/refs/{}",
            repo.api_path(),
            encode_path(&reference)
        ))
            .with_description(format!("Deleting branch {} from {}", name, repo));
        self.send(request).await?;
        Ok(())
    }
}

fn require_branch_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(GitHubError::InvalidArgument(
            "A branch name is required".to_string(),
        ));
    }
    Ok(())
}
