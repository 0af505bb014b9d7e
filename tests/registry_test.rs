//! Private registry operations against a mocked API.

mod common;

use serde_json::json;
use tfe_client::{ModuleCreateOptions, ModuleCreateVersionOptions, RegistryModuleStatus};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_create_module_and_version() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/organizations/my-org/registry-modules"))
        .and(body_json(json!({
            "data": {
                "type": "registry-modules",
                "attributes": { "name": "vpc", "provider": "aws" }
            }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "data": {
                "type": "registry-modules",
                "id": "mod-1",
                "attributes": { "name": "vpc", "provider": "aws", "status": "pending" }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v2/registry-modules/my-org/vpc/aws/versions"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "data": {
                "type": "registry-module-versions",
                "id": "modver-1",
                "attributes": { "status": "pending", "version": "0.1.0" }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let registry = common::client(&server).registry();
    let module = registry
        .create_module(
            "my-org",
            &ModuleCreateOptions {
                name: Some(String::from("vpc")),
                provider: Some(String::from("aws")),
            },
        )
        .await
        .expect("create module succeeds");
    assert_eq!(module.status, RegistryModuleStatus::Pending);

    let version = registry
        .create_module_version(
            "my-org",
            &module.name,
            &module.provider,
            &ModuleCreateVersionOptions {
                version: Some(String::from("0.1.0")),
            },
        )
        .await
        .expect("create version succeeds");
    assert_eq!(version.version, "0.1.0");
}

#[tokio::test]
async fn test_delete_module_version_uses_post() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/registry-modules/actions/delete/my-org/vpc/aws/0.1.0"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    common::client(&server)
        .registry()
        .delete_module_version("my-org", "vpc", "aws", "0.1.0")
        .await
        .expect("delete succeeds");
}

#[tokio::test]
async fn test_read_missing_module() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/registry-modules/show/my-org/vpc/aws"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = common::client(&server)
        .registry()
        .read_module("my-org", "vpc", "aws")
        .await
        .unwrap_err();

    assert!(err.is_not_found());
}
