//! Transport double for unit tests.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::config::ClientConfig;
use crate::error::{Result, TfeError};

use super::api::ApiCore;
use super::transport::{HttpRequest, HttpResponse, Transport};

/// Core wired to `transport`, rooted at `https://tfe.example.com/api/v2/`.
pub fn core_with(transport: &Arc<RecordingTransport>) -> Arc<ApiCore> {
    let config = ClientConfig::new("https://tfe.example.com", "test-token");
    let core = ApiCore::with_transport(&config, transport.clone()).expect("core builds");
    Arc::new(core)
}

/// Records every request and replays queued responses in order.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    requests: Mutex<Vec<HttpRequest>>,
    responses: Mutex<VecDeque<HttpResponse>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, status: StatusCode, body: &str) {
        self.responses
            .lock()
            .expect("responses lock")
            .push_back(HttpResponse::new(status, body.as_bytes().to_vec()));
    }

    pub fn respond_json(&self, status: StatusCode, body: &Value) {
        let body = serde_json::to_vec(body).expect("json serializes");
        self.responses
            .lock()
            .expect("responses lock")
            .push_back(HttpResponse::new(status, body));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().expect("requests lock").clone()
    }

    /// Body of the only recorded request, parsed as JSON.
    pub fn single_body(&self) -> Value {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request");
        let body = requests[0].body.as_deref().expect("request has a body");
        serde_json::from_slice(body).expect("body is json")
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        self.requests.lock().expect("requests lock").push(request);
        self.responses
            .lock()
            .expect("responses lock")
            .pop_front()
            .ok_or_else(|| TfeError::transport("no response queued"))
    }
}
