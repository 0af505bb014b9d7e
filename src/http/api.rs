//! Shared request/response core used by every resource module.

use reqwest::Method;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{Result, TfeError};

use super::document::Resource;
use super::request::{Payload, RequestBuilder};
use super::response;
use super::transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};

/// Builds, sends and decodes requests.
///
/// Holds no per-call state; clones share the transport.
#[derive(Debug, Clone)]
pub struct ApiCore {
    /// Request builder bound to the configured API root.
    builder: RequestBuilder,
    /// Transport used for every call.
    transport: Arc<dyn Transport>,
    /// Aborts in-flight calls when fired.
    cancel: Option<CancellationToken>,
}

impl ApiCore {
    /// Creates a core backed by a `reqwest` transport.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the address is unusable or the HTTP
    /// client cannot be created.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(config.timeout())?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Creates a core backed by the given transport.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the address is unusable.
    pub fn with_transport(config: &ClientConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        Ok(Self {
            builder: RequestBuilder::new(config)?,
            transport,
            cancel: None,
        })
    }

    /// Returns a copy whose calls are aborted when `token` fires.
    #[must_use]
    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        Self {
            cancel: Some(token),
            ..self.clone()
        }
    }

    /// Returns the request builder.
    #[must_use]
    pub const fn builder(&self) -> &RequestBuilder {
        &self.builder
    }

    /// Sends a request through the transport.
    ///
    /// # Errors
    ///
    /// Returns a transport error, or [`TfeError::Cancelled`] when the
    /// cancellation token fires first.
    pub async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        debug!("{} {}", request.method, request.url);

        match &self.cancel {
            Some(token) => {
                tokio::select! {
                    biased;
                    () = token.cancelled() => Err(TfeError::Cancelled),
                    result = self.transport.execute(request) => result,
                }
            }
            None => self.transport.execute(request).await,
        }
    }

    /// Sends a request and decodes a single resource.
    ///
    /// # Errors
    ///
    /// Returns any build, transport, API or decode error.
    pub async fn send_one<T: Resource>(&self, method: Method, path: &str, payload: Payload) -> Result<T> {
        let request = self.builder.build(method, path, payload)?;
        let response = self.execute(request).await?;
        response::decode_one(&response)
    }

    /// Sends a request and decodes a collection in server order.
    ///
    /// # Errors
    ///
    /// Returns any build, transport, API or decode error.
    pub async fn send_many<T: Resource>(
        &self,
        method: Method,
        path: &str,
        payload: Payload,
    ) -> Result<Vec<T>> {
        let request = self.builder.build(method, path, payload)?;
        let response = self.execute(request).await?;
        response::decode_many(&response)
    }

    /// Sends a request whose response body is ignored.
    ///
    /// # Errors
    ///
    /// Returns any build, transport or API error.
    pub async fn send_empty(&self, method: Method, path: &str, payload: Payload) -> Result<()> {
        let request = self.builder.build(method, path, payload)?;
        let response = self.execute(request).await?;
        response::expect_empty(&response)
    }
}
