//! Workspace operations against a mocked API.

mod common;

use serde_json::json;
use tfe_client::{WorkspaceCreateOptions, WorkspaceListOptions};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_create_then_list_workspaces() {
    let server = MockServer::start().await;
    let workspace = json!({
        "type": "workspaces",
        "id": "ws-1",
        "attributes": { "name": "prod", "auto-apply": false, "terraform-version": "0.11.1" }
    });

    Mock::given(method("POST"))
        .and(path("/api/v2/organizations/my-org/workspaces"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "data": workspace.clone() })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v2/organizations/my-org/workspaces"))
        .and(query_param("search[name]", "pro"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [ workspace ] })))
        .expect(1)
        .mount(&server)
        .await;

    let workspaces = common::client(&server).workspaces();
    let created = workspaces
        .create(
            "my-org",
            WorkspaceCreateOptions {
                name: Some(String::from("prod")),
                terraform_version: Some(String::from("0.11.1")),
                ..Default::default()
            },
        )
        .await
        .expect("create succeeds");

    let listed = workspaces
        .list(
            "my-org",
            &WorkspaceListOptions {
                search: Some(String::from("pro")),
                ..Default::default()
            },
        )
        .await
        .expect("list succeeds");

    assert_eq!(listed, [created]);
}

#[tokio::test]
async fn test_read_missing_workspace() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/organizations/my-org/workspaces/staging"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = common::client(&server)
        .workspaces()
        .read("my-org", "staging")
        .await
        .unwrap_err();

    assert!(err.is_not_found());
}
