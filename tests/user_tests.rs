//! User and meta operation tests

mod support;

use ghops::github::{HovercardSubject, ProfileUpdate, Resource};
use ghops_rest::{GitHubError, Method, RestResponse};
use serde_json::{Value, json};
use support::*;

#[tokio::test]
async fn test_get_user() {
    let (invoker, client) = mock_client();
    invoker.push_json(user_json(OWNER, 1));

    let user = client.get_user(OWNER).await.unwrap();

    assert_eq!(invoker.last_call().unwrap().uri_fragment, "users/octocat");
    assert_eq!(user.type_name(), "GitHub.User");
    assert_eq!(user.user_name.as_deref(), Some(OWNER));
    assert_eq!(user.user_id, Some(1));
    assert!(user.extra.contains_key("avatar_url"));
}

#[tokio::test]
async fn test_get_current_user() {
    let (invoker, client) = mock_client();
    invoker.push_json(user_json(OWNER, 1));

    client.get_current_user().await.unwrap();

    assert_eq!(invoker.last_call().unwrap().uri_fragment, "user");
}

#[tokio::test]
async fn test_list_users() {
    let (invoker, client) = mock_client();
    invoker.push_items(vec![user_json("a", 1), user_json("b", 2)]);

    let users = client.list_users().await.unwrap();

    assert_eq!(users.len(), 2);
    assert_eq!(users[1].user_name.as_deref(), Some("b"));
}

#[tokio::test]
async fn test_user_contextual_information() {
    let (invoker, client) = mock_client();
    invoker.push_json(json!({
        "contexts": [{"message": "Owns this repository", "octicon": "repo"}]
    }));

    let context = client
        .get_user_contextual_information(OWNER, Some(HovercardSubject::Repository(1296269)))
        .await
        .unwrap();

    assert_eq!(
        invoker.last_call().unwrap().uri_fragment,
        "users/octocat/hovercard?subject_type=repository&subject_id=1296269"
    );
    assert_eq!(context.type_name(), "GitHub.UserContextualInformation");
    assert_eq!(context.contexts[0].message, "Owns this repository");
    assert_eq!(context.user_name.as_deref(), Some(OWNER));
}

#[tokio::test]
async fn test_update_profile() {
    let (invoker, client) = mock_client();
    invoker.push_json(user_json(OWNER, 1));

    let update = ProfileUpdate {
        location: Some("San Francisco".to_string()),
        ..Default::default()
    };
    client.update_profile(&update).await.unwrap();

    let call = invoker.last_call().unwrap();
    assert_eq!(call.method, Method::PATCH);
    assert_eq!(call.uri_fragment, "user");
    assert_eq!(call.body, Some(json!({"location": "San Francisco"})));
}

#[tokio::test]
async fn test_empty_profile_update_is_rejected() {
    let (invoker, client) = mock_client();

    let result = client.update_profile(&ProfileUpdate::default()).await;

    assert!(matches!(result, Err(GitHubError::InvalidArgument(_))));
    assert_eq!(invoker.call_count(), 0);
}

#[tokio::test]
async fn test_get_user_not_found() {
    let (invoker, client) = mock_client();
    invoker.push_api_error(404, "Not Found");

    let error = client.get_user("ghost").await.unwrap_err();

    assert!(error.is_not_found());
}

#[tokio::test]
async fn test_get_meta_and_rate_limit() {
    let (invoker, client) = mock_client();
    invoker
        .push_json(json!({
            "verifiable_password_authentication": true,
            "hooks": ["192.30.252.0/22"],
            "git": ["192.30.252.0/22"],
            "ssh_key_fingerprints": {"SHA256_RSA": "abc"},
        }))
        .push_json(json!({
            "resources": {
                "core": {"limit": 5000, "remaining": 4999, "reset": 1372700873, "used": 1}
            },
            "rate": {"limit": 5000, "remaining": 4999, "reset": 1372700873, "used": 1}
        }));

    let meta = client.get_meta().await.unwrap();
    let rate_limit = client.get_rate_limit().await.unwrap();

    assert_eq!(meta.hooks, vec!["192.30.252.0/22"]);
    assert!(meta.extra.contains_key("ssh_key_fingerprints"));
    assert_eq!(rate_limit.rate.remaining, 4999);
    assert_eq!(rate_limit.resources["core"].limit, 5000);

    let fragments: Vec<_> = invoker.calls().into_iter().map(|c| c.uri_fragment).collect();
    assert_eq!(fragments, vec!["meta", "rate_limit"]);
}

#[tokio::test]
async fn test_get_emojis_and_zen() {
    let (invoker, client) = mock_client();
    invoker
        .push_json(json!({"+1": "https://github.githubassets.com/images/icons/emoji/unicode/1f44d.png"}))
        .push_response(RestResponse::new(
            200,
            Value::String("Keep it logically awesome.".to_string()),
        ));

    let emojis = client.get_emojis().await.unwrap();
    let zen = client.get_zen().await.unwrap();

    assert!(emojis.contains_key("+1"));
    assert_eq!(zen, "Keep it logically awesome.");
}
