//! SSH key operations against a mocked API.

mod common;

use serde_json::json;
use tfe_client::{SshKeyCreateOptions, SshKeyListOptions, SshKeyUpdateOptions};
use wiremock::matchers::{bearer_token, body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn key_json(id: &str, name: &str) -> serde_json::Value {
    json!({ "type": "ssh-keys", "id": id, "attributes": { "name": name } })
}

#[tokio::test]
async fn test_create_then_read_returns_same_key() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/organizations/my-org/ssh-keys"))
        .and(bearer_token(common::TOKEN))
        .and(header("content-type", "application/vnd.api+json"))
        .and(body_json(json!({
            "data": {
                "type": "ssh-keys",
                "attributes": { "name": "deploy", "value": "key-material" }
            }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "data": key_json("sshkey-1", "deploy") })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v2/ssh-keys/sshkey-1"))
        .and(header("accept", "application/vnd.api+json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": key_json("sshkey-1", "deploy") })))
        .expect(1)
        .mount(&server)
        .await;

    let keys = common::client(&server).ssh_keys();
    let created = keys
        .create(
            "my-org",
            SshKeyCreateOptions {
                name: Some(String::from("deploy")),
                value: Some(String::from("key-material")),
                ..Default::default()
            },
        )
        .await
        .expect("create succeeds");
    let read = keys.read(&created.id).await.expect("read succeeds");

    assert_eq!(created, read);
}

#[tokio::test]
async fn test_deleted_key_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v2/ssh-keys/sshkey-1"))
        .respond_with(ResponseTemplate::new(204))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/v2/ssh-keys/sshkey-1"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "errors": [ { "status": "404", "title": "not found" } ]
        })))
        .with_priority(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v2/ssh-keys/sshkey-1"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let keys = common::client(&server).ssh_keys();
    keys.delete("sshkey-1").await.expect("first delete succeeds");

    let err = keys.read("sshkey-1").await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "resource not found");

    let err = keys.delete("sshkey-1").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_list_keeps_server_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/organizations/my-org/ssh-keys"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [ key_json("sshkey-b", "second"), key_json("sshkey-a", "first") ]
        })))
        .mount(&server)
        .await;

    let keys = common::client(&server)
        .ssh_keys()
        .list("my-org", &SshKeyListOptions::default())
        .await
        .expect("list succeeds");

    let names: Vec<&str> = keys.iter().map(|k| k.name.as_str()).collect();
    assert_eq!(names, ["second", "first"]);
}

#[tokio::test]
async fn test_out_of_range_page_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/organizations/my-org/ssh-keys"))
        .and(query_param("page[number]", "999"))
        .and(query_param("page[size]", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let keys = common::client(&server)
        .ssh_keys()
        .list("my-org", &SshKeyListOptions::page(999, 20))
        .await
        .expect("list succeeds");

    assert!(keys.is_empty());
}

#[tokio::test]
async fn test_update_sends_only_changed_fields() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/api/v2/ssh-keys/sshkey-1"))
        .and(body_json(json!({
            "data": { "type": "ssh-keys", "attributes": { "name": "renamed" } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": key_json("sshkey-1", "renamed") })))
        .expect(1)
        .mount(&server)
        .await;

    let key = common::client(&server)
        .ssh_keys()
        .update(
            "sshkey-1",
            SshKeyUpdateOptions {
                name: Some(String::from("renamed")),
                ..Default::default()
            },
        )
        .await
        .expect("update succeeds");

    assert_eq!(key.name, "renamed");
}

#[tokio::test]
async fn test_unauthorized_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/ssh-keys/sshkey-1"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "errors": [ { "status": "401", "title": "unauthorized" } ]
        })))
        .mount(&server)
        .await;

    let err = common::client(&server)
        .ssh_keys()
        .read("sshkey-1")
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(401));
    assert!(!err.is_not_found());
}
