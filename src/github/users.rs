//! GitHub user API operations

use super::client::GitHubClient;
use super::types::{ResponseContext, User, UserContext};
use ghops_rest::{GitHubError, RestRequest, Result, encode_path_segment, with_query};
use serde::Serialize;

/// Subject a hovercard is requested relative to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HovercardSubject {
    Organization(u64),
    Repository(u64),
    Issue(u64),
    PullRequest(u64),
}

impl HovercardSubject {
    fn params(&self) -> [(&'static str, String); 2] {
        let (subject_type, subject_id) = match self {
            HovercardSubject::Organization(id) => ("organization", id),
            HovercardSubject::Repository(id) => ("repository", id),
            HovercardSubject::Issue(id) => ("issue", id),
            HovercardSubject::PullRequest(id) => ("pull_request", id),
        };
        [
            ("subject_type", subject_type.to_string()),
            ("subject_id", subject_id.to_string()),
        ]
    }
}

/// Profile fields to change on the authenticated user. Unset fields are left
/// untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blog: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hireable: Option<bool>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl GitHubClient {
    /// Get a user by login
    pub async fn get_user(&self, user_name: &str) -> Result<User> {
        require_user_name(user_name)?;
        self.record_event("get_user");

        let request = RestRequest::get(format!("users/{}", encode_path_segment(user_name)))
            .with_description(format!("Getting user {}", user_name));
        self.fetch(request, &ResponseContext::for_user(user_name))
            .await
    }

    /// Get the authenticated user
    pub async fn get_current_user(&self) -> Result<User> {
        self.record_event("get_current_user");

        let request = RestRequest::get("user").with_description("Getting current authenticated user");
        self.fetch(request, &ResponseContext::none()).await
    }

    /// List every user on the instance, in sign-up order
    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.record_event("list_users");

        let request = RestRequest::get("users").with_description("Getting all users");
        self.fetch_all(request, &ResponseContext::none()).await
    }

    /// Get hovercard information for a user, optionally relative to a subject
    pub async fn get_user_contextual_information(
        &self,
        user_name: &str,
        subject: Option<HovercardSubject>,
    ) -> Result<UserContext> {
        require_user_name(user_name)?;
        self.record_event("get_user_contextual_information");

        let uri_fragment = format!("users/{}/hovercard", encode_path_segment(user_name));
        let uri_fragment = match subject {
            Some(subject) => with_query(uri_fragment, &subject.params()),
            None => uri_fragment,
        };

        let request = RestRequest::get(uri_fragment)
            .with_description(format!("Getting hovercard information for {}", user_name));
        self.fetch(request, &ResponseContext::for_user(user_name))
            .await
    }

    /// Update the authenticated user's profile
    ///
    /// # Errors
    /// Returns [`GitHubError::InvalidArgument`] if no field is set
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User> {
        if update.is_empty() {
            return Err(GitHubError::InvalidArgument(
                "At least one profile field must be provided".to_string(),
            ));
        }
        self.record_event("update_profile");

        let request = RestRequest::patch("user")
            .with_body(serde_json::to_value(update)?)
            .with_description("Updating current authenticated user");
        self.fetch(request, &ResponseContext::none()).await
    }
}

fn require_user_name(user_name: &str) -> Result<()> {
    if user_name.trim().is_empty() {
        return Err(GitHubError::InvalidArgument(
            "A user name is required".to_string(),
        ));
    }
    Ok(())
}
