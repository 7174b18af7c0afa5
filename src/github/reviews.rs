//! GitHub pull request review operations

use super::client::GitHubClient;
use super::repository::RepositoryTarget;
use super::types::{ResponseContext, Review};
use ghops_rest::{GitHubError, RestRequest, Result};
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewEvent {
    Approve,
    RequestChanges,
    Comment,
}

impl ReviewEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewEvent::Approve => "APPROVE",
            ReviewEvent::RequestChanges => "REQUEST_CHANGES",
            ReviewEvent::Comment => "COMMENT",
        }
    }

    fn requires_body(&self) -> bool {
        matches!(self, ReviewEvent::Comment | ReviewEvent::RequestChanges)
    }
}

/// A line comment attached to a new review
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewComment {
    pub path: String,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side: Option<String>,
}

/// Parameters for creating a review. Without an event the review stays pending.
#[derive(Debug, Clone, Default)]
pub struct NewReview {
    pub body: Option<String>,
    pub event: Option<ReviewEvent>,
    pub commit_id: Option<String>,
    pub comments: Vec<ReviewComment>,
}

impl NewReview {
    fn payload(&self) -> Result<Value> {
        if let Some(event) = self.event {
            check_body(event, self.body.as_deref())?;
        }

        let mut payload = json!({});
        if let Some(body) = &self.body {
            payload["body"] = json!(body);
        }
        if let Some(event) = self.event {
            payload["event"] = json!(event.as_str());
        }
        if let Some(commit_id) = &self.commit_id {
            payload["commit_id"] = json!(commit_id);
        }
        if !self.comments.is_empty() {
            payload["comments"] = serde_json::to_value(&self.comments)?;
        }
        Ok(payload)
    }
}

fn check_body(event: ReviewEvent, body: Option<&str>) -> Result<()> {
    if event.requires_body() && body.is_none_or(|b| b.trim().is_empty()) {
        return Err(GitHubError::InvalidArgument(format!(
            "A body is required when the review event is {}",
            event.as_str()
        )));
    }
    Ok(())
}

impl GitHubClient {
    /// List the reviews of a pull request
    pub async fn list_reviews(&self, target: &RepositoryTarget, number: u64) -> Result<Vec<Review>> {
        let repo = self.resolve_repository(target)?;
        self.record_event("list_reviews");

        let request = RestRequest::get(format!("{}/pulls/{}/reviews", repo.api_path(), number))
            .with_description(format!(
                "Getting reviews of pull request {} for {}",
                number, repo
            ));
        self.fetch_all(request, &ResponseContext::for_pull_request(&repo, number))
            .await
    }

    pub async fn get_review(
        &self,
        target: &RepositoryTarget,
        number: u64,
        review_id: u64,
    ) -> Result<Review> {
        let repo = self.resolve_repository(target)?;
        self.record_event("get_review");

        let request = RestRequest::get(format!(
            "{}/pulls/{}/reviews/{}",
            repo.api_path(),
            number,
            review_id
        ))
        .with_description(format!(
            "Getting review {} of pull request {} for {}",
            review_id, number, repo
        ));
        self.fetch(request, &ResponseContext::for_pull_request(&repo, number))
            .await
    }

    /// Create a review, pending unless an event is given
    pub async fn new_review(
        &self,
        target: &RepositoryTarget,
        number: u64,
        review: &NewReview,
    ) -> Result<Review> {
        let payload = review.payload()?;
        let repo = self.resolve_repository(target)?;
        self.record_event("new_review");

        let request = RestRequest::post(format!("{}/pulls/{}/reviews", repo.api_path(), number))
            .with_body(payload)
            .with_description(format!(
                "Creating review on pull request {} for {}",
                number, repo
            ));
        self.fetch(request, &ResponseContext::for_pull_request(&repo, number))
            .await
    }

    /// Submit a pending review
    pub async fn submit_review(
        &self,
        target: &RepositoryTarget,
        number: u64,
        review_id: u64,
        event: ReviewEvent,
        body: Option<&str>,
    ) -> Result<Review> {
        check_body(event, body)?;
        let repo = self.resolve_repository(target)?;
        self.record_event("submit_review");

        let mut payload = json!({ "event": event.as_str() });
        if let Some(body) = body {
            payload["body"] = json!(body);
        }

        let request = RestRequest::post(format!(
            "{}/pulls/{}/reviews/{}/events",
            repo.api_path(),
            number,
            review_id
        ))
        .with_body(payload)
        .with_description(format!(
            "Submitting review {} on pull request {} for {}",
            review_id, number, repo
        ));
        self.fetch(request, &ResponseContext::for_pull_request(&repo, number))
            .await
    }

    /// Replace the summary body of a review
    pub async fn update_review(
        &self,
        target: &RepositoryTarget,
        number: u64,
        review_id: u64,
        body: &str,
    ) -> Result<Review> {
        if body.trim().is_empty() {
            return Err(GitHubError::InvalidArgument(
                "A review body is required".to_string(),
            ));
        }
        let repo = self.resolve_repository(target)?;
        self.record_event("update_review");

        let request = RestRequest::put(format!(
            "{}/pulls/{}/reviews/{}",
            repo.api_path(),
            number,
            review_id
        ))
        .with_body(json!({ "body": body }))
        .with_description(format!(
            "Updating review {} on pull request {} for {}",
            review_id, number, repo
        ));
        self.fetch(request, &ResponseContext::for_pull_request(&repo, number))
            .await
    }

    /// Dismiss a submitted review
    pub async fn dismiss_review(
        &self,
        target: &RepositoryTarget,
        number: u64,
        review_id: u64,
        message: &str,
    ) -> Result<Review> {
        if message.trim().is_empty() {
            return Err(GitHubError::InvalidArgument(
                "A dismissal message is required".to_string(),
            ));
        }
        let repo = self.resolve_repository(target)?;
        self.record_event("dismiss_review");

        let request = RestRequest::put(format!(
            "{}/pulls/{}/reviews/{}/dismissals",
            repo.api_path(),
            number,
            review_id
        ))
        .with_body(json!({ "message": message, "event": "DISMISS" }))
        .with_description(format!(
            "Dismissing review {} on pull request {} for {}",
            review_id, number, repo
        ));
        self.fetch(request, &ResponseContext::for_pull_request(&repo, number))
            .await
    }

    /// Delete a review that has not been submitted yet
    pub async fn remove_review(
        &self,
        target: &RepositoryTarget,
        number: u64,
        review_id: u64,
    ) -> Result<Review> {
        let repo = self.resolve_repository(target)?;
        self.record_event("remove_review");

        let request = RestRequest::delete(format!(
            "{}/pulls/{}/reviews/{}",
            repo.api_path(),
            number,
            review_id
        ))
        .with_description(format!(
            "Deleting pending review {} on pull request {} for {}",
            review_id, number, repo
        ));
        self.fetch(request, &ResponseContext::for_pull_request(&repo, number))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_review_has_no_event() {
        let review = NewReview {
            body: Some("Draft thoughts".to_string()),
            ..Default::default()
        };
        let payload = review.payload().unwrap();
        assert_eq!(payload, json!({"body": "Draft thoughts"}));
    }

    #[test]
    fn test_approve_without_body_is_allowed() {
        let review = NewReview {
            event: Some(ReviewEvent::Approve),
            ..Default::default()
        };
        assert_eq!(review.payload().unwrap(), json!({"event": "APPROVE"}));
    }

    #[test]
    fn test_comment_and_request_changes_need_body() {
        for event in [ReviewEvent::Comment, ReviewEvent::RequestChanges] {
            let review = NewReview {
                event: Some(event),
                body: Some("   ".to_string()),
                ..Default::default()
            };
            assert!(matches!(
                review.payload(),
                Err(GitHubError::InvalidArgument(_))
            ));
        }
    }

    #[test]
    fn test_line_comments_serialize() {
        let review = NewReview {
            body: Some("See inline".to_string()),
            event: Some(ReviewEvent::Comment),
            comments: vec![ReviewComment {
                path: "src/lib.rs".to_string(),
                body: "Typo".to_string(),
                line: Some(12),
                side: None,
            }],
            ..Default::default()
        };
        let payload = review.payload().unwrap();
        assert_eq!(
            payload["comments"],
            json!([{"path": "src/lib.rs", "body": "Typo", "line": 12}])
        );
        assert_eq!(payload["event"], "COMMENT");
    }
}
