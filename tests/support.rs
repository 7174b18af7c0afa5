//! Common test support utilities and fixtures
//!
//! Clients built here talk to a [`MockInvoker`], so tests queue the replies
//! GitHub would send and assert on the requests that were made.
#![allow(dead_code)]

use ghops::config::Config;
use ghops::github::{GitHubClient, RepositoryTarget};
use ghops_rest::MockInvoker;
use serde_json::{Value, json};
use std::sync::Arc;

pub const OWNER: &str = "octocat";
pub const REPO: &str = "Hello-World";
pub const REPO_URI: &str = "https://github.com/octocat/Hello-World";
pub const SHA: &str = "aa218f56b14c9653891f9e74264a383fa43fefbd";

/// Configuration with a default repository and a token
pub fn test_config() -> Config {
    Config {
        default_owner_name: Some(OWNER.to_string()),
        default_repository_name: Some(REPO.to_string()),
        access_token: Some("ghp_test".to_string()),
        ..Config::new()
    }
}

/// A client over a fresh mock, plus the mock for queuing replies
pub fn mock_client() -> (Arc<MockInvoker>, GitHubClient) {
    mock_client_with(test_config())
}

pub fn mock_client_with(config: Config) -> (Arc<MockInvoker>, GitHubClient) {
    let invoker = Arc::new(MockInvoker::new());
    let client = GitHubClient::with_invoker(invoker.clone(), config);
    (invoker, client)
}

/// Target resolved from the configured defaults
pub fn default_target() -> RepositoryTarget {
    RepositoryTarget::default()
}

pub fn user_json(login: &str, id: u64) -> Value {
    json!({
        "login": login,
        "id": id,
        "node_id": "MDQ6VXNlcjE=",
        "url": format!("https://api.github.com/users/{}", login),
        "html_url": format!("https://github.com/{}", login),
        "type": "User",
        "site_admin": false,
        "avatar_url": format!("https://github.com/images/{}.gif", login),
    })
}

pub fn team_json(slug: &str, id: u64) -> Value {
    json!({
        "id": id,
        "node_id": "MDQ6VGVhbTE=",
        "name": slug,
        "slug": slug,
        "privacy": "closed",
        "permission": "admin",
    })
}

pub fn reference_json(ref_path: &str, sha: &str) -> Value {
    json!({
        "ref": ref_path,
        "node_id": "MDM6UmVmcmVmcy9oZWFkcy9mZWF0dXJlQQ==",
        "url": format!("https://api.github.com/repos/{}/{}/git/{}", OWNER, REPO, ref_path),
        "object": {
            "type": "commit",
            "sha": sha,
            "url": format!("https://api.github.com/repos/{}/{}/git/commits/{}", OWNER, REPO, sha),
        }
    })
}

pub fn branch_json(name: &str, sha: &str, protected: bool) -> Value {
    json!({
        "name": name,
        "commit": {
            "sha": sha,
            "url": format!("https://api.github.com/repos/{}/{}/commits/{}", OWNER, REPO, sha),
        },
        "protected": protected,
    })
}

pub fn pull_request_json(number: u64, title: &str) -> Value {
    json!({
        "id": 1000 + number,
        "number": number,
        "node_id": "MDExOlB1bGxSZXF1ZXN0MQ==",
        "url": format!("https://api.github.com/repos/{}/{}/pulls/{}", OWNER, REPO, number),
        "html_url": format!("https://github.com/{}/{}/pull/{}", OWNER, REPO, number),
        "state": "open",
        "title": title,
        "body": "Please pull these awesome changes",
        "draft": false,
        "locked": false,
        "user": user_json(OWNER, 1),
        "head": {
            "label": "octocat:new-topic",
            "ref": "new-topic",
            "sha": "6dcb09b5b57875f334f61aebed695e2e4193db5e",
            "user": user_json(OWNER, 1),
        },
        "base": {
            "label": "octocat:main",
            "ref": "main",
            "sha": SHA,
            "user": user_json(OWNER, 1),
        },
        "requested_reviewers": [user_json("other_user", 2)],
        "requested_teams": [team_json("justice-league", 3)],
    })
}

pub fn review_json(id: u64, number: u64, state: &str) -> Value {
    json!({
        "id": id,
        "node_id": "MDE3OlB1bGxSZXF1ZXN0UmV2aWV3ODA=",
        "user": user_json(OWNER, 1),
        "body": "Here is the body for the review.",
        "state": state,
        "html_url": format!("https://github.com/{}/{}/pull/{}#pullrequestreview-{}", OWNER, REPO, number, id),
        "pull_request_url": format!("https://api.github.com/repos/{}/{}/pulls/{}", OWNER, REPO, number),
        "commit_id": "ecdd80bb57125d7ba9641ffaa4d7d2c19d3f3091",
        "author_association": "COLLABORATOR",
    })
}

pub fn commit_json(sha: &str, message: &str) -> Value {
    json!({
        "sha": sha,
        "node_id": "MDY6Q29tbWl0NmRjYjA5YjViNTc4NzVmMzM0ZjYxYWViZWQ2OTVlMmU0MTkzZGI1ZQ==",
        "url": format!("https://api.github.com/repos/{}/{}/commits/{}", OWNER, REPO, sha),
        "html_url": format!("https://github.com/{}/{}/commit/{}", OWNER, REPO, sha),
        "commit": {
            "message": message,
            "author": {"name": "Monalisa Octocat", "email": "support@github.com", "date": "2011-04-14T16:00:49Z"},
            "committer": {"name": "Monalisa Octocat", "email": "support@github.com", "date": "2011-04-14T16:00:49Z"},
            "comment_count": 0,
        },
        "author": user_json(OWNER, 1),
        "committer": user_json(OWNER, 1),
        "parents": [{"sha": SHA, "url": "https://api.github.com/repos/octocat/Hello-World/commits/aa218f56b14c9653891f9e74264a383fa43fefbd"}],
    })
}
