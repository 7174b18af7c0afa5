//! GitHub review request operations

use super::client::GitHubClient;
use super::repository::RepositoryTarget;
use super::types::{PullRequest, ResponseContext, ReviewRequest};
use ghops_rest::{GitHubError, RestRequest, Result};
use serde_json::{Value, json};

fn reviewers_payload(users: &[String], teams: &[String]) -> Result<Value> {
    if users.is_empty() && teams.is_empty() {
        return Err(GitHubError::InvalidArgument(
            "At least one user or team reviewer is required".to_string(),
        ));
    }
    Ok(json!({ "reviewers": users, "team_reviewers": teams }))
}

impl GitHubClient {
    /// Users and teams currently requested to review a pull request
    pub async fn get_review_requests(
        &self,
        target: &RepositoryTarget,
        number: u64,
    ) -> Result<ReviewRequest> {
        let repo = self.resolve_repository(target)?;
        self.record_event("get_review_requests");

        let request = RestRequest::get(format!(
            "{}/pulls/{}/requested_reviewers",
            repo.api_path(),
            number
        ))
        .with_description(format!(
            "Getting review requests of pull request {} for {}",
            number, repo
        ));
        self.fetch(request, &ResponseContext::for_pull_request(&repo, number))
            .await
    }

    /// Request reviews from users and/or teams
    pub async fn new_review_request(
        &self,
        target: &RepositoryTarget,
        number: u64,
        users: &[String],
        teams: &[String],
    ) -> Result<PullRequest> {
        let payload = reviewers_payload(users, teams)?;
        let repo = self.resolve_repository(target)?;
        self.record_event("new_review_request");

        let request = RestRequest::post(format!(
            "{}/pulls/{}/requested_reviewers",
            repo.api_path(),
            number
        ))
        .with_body(payload)
        .with_description(format!(
            "Requesting reviews on pull request {} for {}",
            number, repo
        ));
        self.fetch(request, &ResponseContext::for_pull_request(&repo, number))
            .await
    }

    /// Withdraw review requests
    pub async fn remove_review_request(
        &self,
        target: &RepositoryTarget,
        number: u64,
        users: &[String],
        teams: &[String],
    ) -> Result<()> {
        let payload = reviewers_payload(users, teams)?;
        let repo = self.resolve_repository(target)?;
        self.record_event("remove_review_request");

        let request = RestRequest::delete(format!(
            "{}/pulls/{}/requested_reviewers",
            repo.api_path(),
            number
        ))
        .with_body(payload)
        .with_description(format!(
            "Removing review requests from pull request {} for {}",
            number, repo
        ));
        self.send(request).await?;
        Ok(())
    }
}
