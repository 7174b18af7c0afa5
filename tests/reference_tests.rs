//! Reference and branch operation tests

mod support;

use ghops::github::{ReferenceKind, ReferenceSelector, RepositoryTarget, Resource, resolve_reference};
use ghops_rest::{GitHubError, Method};
use serde_json::json;
use support::*;

#[test]
fn test_resolve_reference_properties() {
    for name in ["v1.0", "release/2024", "x"] {
        assert_eq!(resolve_reference(Some(name), None).unwrap(), format!("tags/{}", name));
        assert_eq!(resolve_reference(None, Some(name)).unwrap(), format!("heads/{}", name));
        assert!(resolve_reference(Some(name), Some(name)).is_err());
    }
}

#[tokio::test]
async fn test_get_reference_decorates_branch() {
    let (invoker, client) = mock_client();
    invoker.push_json(reference_json("refs/heads/release", SHA));

    let reference = client
        .get_reference(&default_target(), &ReferenceSelector::branch("release"))
        .await
        .unwrap();

    let call = invoker.last_call().unwrap();
    assert_eq!(call.method, Method::GET);
    assert_eq!(call.uri_fragment, "repos/octocat/Hello-World/git/ref/heads/release");

    assert_eq!(reference.kind(), Some(ReferenceKind::Branch));
    assert_eq!(reference.type_name(), "GitHub.Branch");
    assert_eq!(reference.branch_name.as_deref(), Some("release"));
    assert_eq!(reference.tag_name, None);
    assert_eq!(reference.repository_url.as_deref(), Some(REPO_URI));
    assert_eq!(reference.sha.as_deref(), Some(SHA));
}

#[tokio::test]
async fn test_get_reference_by_tag_with_uri_target() {
    let (invoker, client) = mock_client();
    invoker.push_json(reference_json("refs/tags/v1.0", SHA));

    let target = RepositoryTarget::uri("https://github.com/rust-lang/rust.git");
    let reference = client
        .get_reference(&target, &ReferenceSelector::tag("v1.0"))
        .await
        .unwrap();

    assert_eq!(
        invoker.last_call().unwrap().uri_fragment,
        "repos/rust-lang/rust/git/ref/tags/v1.0"
    );
    assert_eq!(reference.type_name(), "GitHub.Tag");
    assert_eq!(reference.tag_name.as_deref(), Some("v1.0"));
    assert_eq!(reference.branch_name, None);
    assert_eq!(
        reference.repository_url.as_deref(),
        Some("https://github.com/rust-lang/rust")
    );
}

#[tokio::test]
async fn test_get_reference_with_tag_and_branch_makes_no_call() {
    let (invoker, client) = mock_client();
    let selector = ReferenceSelector {
        tag_name: Some("v1.0".to_string()),
        branch_name: Some("main".to_string()),
    };

    let result = client.get_reference(&default_target(), &selector).await;

    assert!(matches!(result, Err(GitHubError::InvalidArgument(_))));
    assert_eq!(invoker.call_count(), 0);
}

#[tokio::test]
async fn test_find_references_uses_matching_refs() {
    let (invoker, client) = mock_client();
    invoker.push_items(vec![
        reference_json("refs/heads/feature-a", SHA),
        reference_json("refs/heads/feature-b", SHA),
    ]);

    let references = client
        .find_references(&default_target(), &ReferenceSelector::branch("feature"))
        .await
        .unwrap();

    assert_eq!(
        invoker.last_call().unwrap().uri_fragment,
        "repos/octocat/Hello-World/git/matching-refs/heads/feature"
    );
    let names: Vec<_> = references
        .iter()
        .filter_map(|r| r.branch_name.as_deref())
        .collect();
    assert_eq!(names, vec!["feature-a", "feature-b"]);
}

#[tokio::test]
async fn test_list_references_leaves_other_namespaces_undecorated() {
    let (invoker, client) = mock_client();
    invoker.push_items(vec![
        reference_json("refs/heads/main", SHA),
        reference_json("refs/tags/v2.0", SHA),
        reference_json("refs/pull/42/head", SHA),
    ]);

    let references = client.list_references(&default_target()).await.unwrap();

    assert_eq!(references.len(), 3);
    let pull_ref = &references[2];
    assert_eq!(pull_ref.kind(), None);
    assert_eq!(pull_ref.type_name(), "GitHub.Reference");
    assert_eq!(pull_ref.branch_name, None);
    assert_eq!(pull_ref.tag_name, None);
    assert_eq!(pull_ref.repository_url.as_deref(), Some(REPO_URI));
}

#[tokio::test]
async fn test_new_reference_posts_full_ref() {
    let (invoker, client) = mock_client();
    invoker.push_json(reference_json("refs/tags/v3.0", SHA));

    client
        .new_reference(&default_target(), &ReferenceSelector::tag("v3.0"), SHA)
        .await
        .unwrap();

    let call = invoker.last_call().unwrap();
    assert_eq!(call.method, Method::POST);
    assert_eq!(call.uri_fragment, "repos/octocat/Hello-World/git/refs");
    assert_eq!(call.body, Some(json!({"ref": "refs/tags/v3.0", "sha": SHA})));
}

#[tokio::test]
async fn test_set_reference_sends_force_flag() {
    let (invoker, client) = mock_client();
    invoker.push_json(reference_json("refs/heads/main", SHA));

    client
        .set_reference(&default_target(), &ReferenceSelector::branch("main"), SHA, true)
        .await
        .unwrap();

    let call = invoker.last_call().unwrap();
    assert_eq!(call.method, Method::PATCH);
    assert_eq!(call.uri_fragment, "repos/octocat/Hello-World/git/refs/heads/main");
    assert_eq!(call.body, Some(json!({"sha": SHA, "force": true})));
}

#[tokio::test]
async fn test_remove_reference() {
    let (invoker, client) = mock_client();
    invoker.push_response(ghops_rest::RestResponse::no_content());

    client
        .remove_reference(&default_target(), &ReferenceSelector::tag("old"))
        .await
        .unwrap();

    let call = invoker.last_call().unwrap();
    assert_eq!(call.method, Method::DELETE);
    assert_eq!(call.uri_fragment, "repos/octocat/Hello-World/git/refs/tags/old");
}

#[tokio::test]
async fn test_missing_repository_is_invalid_argument() {
    let config = ghops::config::Config::new();
    let (invoker, client) = mock_client_with(config);

    let result = client.list_references(&default_target()).await;

    assert!(matches!(result, Err(GitHubError::InvalidArgument(_))));
    assert_eq!(invoker.call_count(), 0);
}

#[tokio::test]
async fn test_list_protected_branches() {
    let (invoker, client) = mock_client();
    invoker.push_items(vec![branch_json("main", SHA, true)]);

    let branches = client.list_branches(&default_target(), true).await.unwrap();

    assert_eq!(
        invoker.last_call().unwrap().uri_fragment,
        "repos/octocat/Hello-World/branches?protected=true"
    );
    assert_eq!(branches[0].branch_name.as_deref(), Some("main"));
    assert_eq!(branches[0].sha.as_deref(), Some(SHA));
    assert_eq!(branches[0].repository_url.as_deref(), Some(REPO_URI));
}

#[tokio::test]
async fn test_new_branch_from_default_branch() {
    let (invoker, client) = mock_client();
    invoker
        .push_json(json!({"name": REPO, "default_branch": "trunk"}))
        .push_json(reference_json("refs/heads/trunk", SHA))
        .push_json(reference_json("refs/heads/feature", SHA));

    let reference = client
        .new_branch(&default_target(), None, "feature")
        .await
        .unwrap();

    let calls = invoker.calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[0].uri_fragment, "repos/octocat/Hello-World");
    assert_eq!(calls[1].uri_fragment, "repos/octocat/Hello-World/git/ref/heads/trunk");
    assert_eq!(calls[2].method, Method::POST);
    assert_eq!(
        calls[2].body,
        Some(json!({"ref": "refs/heads/feature", "sha": SHA}))
    );
    assert_eq!(reference.branch_name.as_deref(), Some("feature"));
}

#[tokio::test]
async fn test_new_branch_from_explicit_origin_skips_repository_lookup() {
    let (invoker, client) = mock_client();
    invoker
        .push_json(reference_json("refs/heads/develop", SHA))
        .push_json(reference_json("refs/heads/feature", SHA));

    client
        .new_branch(&default_target(), Some("develop"), "feature")
        .await
        .unwrap();

    let calls = invoker.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].uri_fragment, "repos/octocat/Hello-World/git/ref/heads/develop");
}

#[tokio::test]
async fn test_new_branch_with_missing_origin() {
    let (invoker, client) = mock_client();
    invoker.push_api_error(404, "Not Found");

    let result = client
        .new_branch(&default_target(), Some("ghost"), "feature")
        .await;

    match result {
        Err(GitHubError::InvalidArgument(message)) => assert!(message.contains("ghost")),
        other => panic!("expected InvalidArgument, got {:?}", other),
    }
    assert_eq!(invoker.call_count(), 1);
}

#[tokio::test]
async fn test_remove_branch() {
    let (invoker, client) = mock_client();
    invoker.push_response(ghops_rest::RestResponse::no_content());

    client
        .remove_branch(&default_target(), "feature")
        .await
        .unwrap();

    let call = invoker.last_call().unwrap();
    assert_eq!(call.method, Method::DELETE);
    assert_eq!(call.uri_fragment, "repos/octocat/Hello-World/git/refs/heads/feature");
}

#[tokio::test]
async fn test_reference_names_are_percent_encoded() {
    let (invoker, client) = mock_client();
    invoker
        .push_json(reference_json("refs/tags/v1#rc", SHA))
        .push_json(reference_json("refs/heads/50%/done?", SHA))
        .push_response(ghops_rest::RestResponse::no_content());

    client
        .get_reference(&default_target(), &ReferenceSelector::tag("v1#rc"))
        .await
        .unwrap();
    client
        .set_reference(
            &default_target(),
            &ReferenceSelector::branch("50%/done?"),
            SHA,
            false,
        )
        .await
        .unwrap();
    client
        .remove_branch(&default_target(), "fix #12")
        .await
        .unwrap();

    let fragments: Vec<_> = invoker.calls().into_iter().map(|c| c.uri_fragment).collect();
    assert_eq!(
        fragments,
        vec![
            "repos/octocat/Hello-World/git/ref/tags/v1%23rc",
            "repos/octocat/Hello-World/git/refs/heads/50%25/done%3F",
            "repos/octocat/Hello-World/git/refs/heads/fix%20%2312",
        ]
    );
}
