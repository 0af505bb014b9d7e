//! Organization operations against a mocked API.

mod common;

use serde_json::json;
use tfe_client::{ListOptions, OrganizationCreateOptions, OrganizationUpdateOptions};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_create_organization() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/organizations"))
        .and(body_json(json!({
            "data": {
                "type": "organizations",
                "attributes": { "name": "my-org", "email": "ops@example.com" }
            }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "data": {
                "type": "organizations",
                "id": "my-org",
                "attributes": { "name": "my-org", "email": "ops@example.com" }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let org = common::client(&server)
        .organizations()
        .create(OrganizationCreateOptions {
            name: Some(String::from("my-org")),
            email: Some(String::from("ops@example.com")),
            ..Default::default()
        })
        .await
        .expect("create succeeds");

    assert_eq!(org.id, "my-org");
}

#[tokio::test]
async fn test_list_organizations_paged() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/organizations"))
        .and(query_param("page[number]", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let orgs = common::client(&server)
        .organizations()
        .list(&ListOptions {
            page_number: Some(2),
            page_size: None,
        })
        .await
        .expect("list succeeds");

    assert!(orgs.is_empty());
}

#[tokio::test]
async fn test_update_then_delete_organization() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/api/v2/organizations/my-org"))
        .and(body_json(json!({
            "data": { "type": "organizations", "attributes": { "email": "new@example.com" } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "type": "organizations",
                "id": "my-org",
                "attributes": { "name": "my-org", "email": "new@example.com" }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/v2/organizations/my-org"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let organizations = common::client(&server).organizations();
    let org = organizations
        .update(
            "my-org",
            OrganizationUpdateOptions {
                email: Some(String::from("new@example.com")),
                ..Default::default()
            },
        )
        .await
        .expect("update succeeds");
    assert_eq!(org.email, "new@example.com");

    organizations.delete("my-org").await.expect("delete succeeds");
}
