//! Cancellation of in-flight requests.

mod common;

use std::time::Duration;

use serde_json::json;
use tfe_client::{CancellationToken, TfeError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_cancel_in_flight_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/runs/run-1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": { "type": "runs", "id": "run-1", "attributes": {} } }))
                .set_delay(Duration::from_secs(10)),
        )
        .mount(&server)
        .await;

    let token = CancellationToken::new();
    let runs = common::client(&server).with_cancellation(token.clone()).runs();

    let canceller = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        token.cancel();
    });

    let err = runs.read("run-1").await.unwrap_err();
    canceller.await.expect("canceller finishes");

    assert!(matches!(err, TfeError::Cancelled));
}

#[tokio::test]
async fn test_uncancelled_token_does_not_interfere() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v2/ssh-keys/sshkey-1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    common::client(&server)
        .with_cancellation(CancellationToken::new())
        .ssh_keys()
        .delete("sshkey-1")
        .await
        .expect("delete succeeds");
}
