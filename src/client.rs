//! Client facade.
//!
//! [`Client`] validates configuration once, owns the shared [`ApiCore`] and
//! hands out the resource modules. Cloning a client or a module is cheap.

use reqwest::Url;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::config::{ClientConfig, ConfigParser, ConfigValidator};
use crate::error::Result;
use crate::http::{ApiCore, Transport};
use crate::resources::{Accounts, Organizations, Registry, Runs, SshKeys, Workspaces};

/// Entry point to the API.
#[derive(Debug, Clone)]
pub struct Client {
    core: Arc<ApiCore>,
}

impl Client {
    /// Creates a client that talks HTTP through `reqwest`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if validation fails or the HTTP client
    /// cannot be created.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        validate(config)?;
        let core = ApiCore::new(config)?;
        info!("TFE client ready at {}", core.builder().base_url());
        Ok(Self {
            core: Arc::new(core),
        })
    }

    /// Creates a client on top of a custom transport.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if validation fails.
    pub fn with_transport(config: &ClientConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        validate(config)?;
        let core = ApiCore::with_transport(config, transport)?;
        Ok(Self {
            core: Arc::new(core),
        })
    }

    /// Creates a client from `.env` and `TFE_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the environment is incomplete or
    /// invalid.
    pub fn from_env() -> Result<Self> {
        let config = ConfigParser::new().from_env()?;
        Self::new(&config)
    }

    /// Returns a client whose requests are aborted once `token` is cancelled.
    ///
    /// The original client is unaffected.
    #[must_use]
    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        Self {
            core: Arc::new(self.core.with_cancellation(token)),
        }
    }

    /// Returns the versioned API root requests are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        self.core.builder().base_url()
    }

    /// Account operations.
    #[must_use]
    pub fn accounts(&self) -> Accounts {
        Accounts::new(Arc::clone(&self.core))
    }

    /// Organization operations.
    #[must_use]
    pub fn organizations(&self) -> Organizations {
        Organizations::new(Arc::clone(&self.core))
    }

    /// Private module registry operations.
    #[must_use]
    pub fn registry(&self) -> Registry {
        Registry::new(Arc::clone(&self.core))
    }

    /// Run operations.
    #[must_use]
    pub fn runs(&self) -> Runs {
        Runs::new(Arc::clone(&self.core))
    }

    /// SSH key operations.
    #[must_use]
    pub fn ssh_keys(&self) -> SshKeys {
        SshKeys::new(Arc::clone(&self.core))
    }

    /// Workspace operations.
    #[must_use]
    pub fn workspaces(&self) -> Workspaces {
        Workspaces::new(Arc::clone(&self.core))
    }
}

fn validate(config: &ClientConfig) -> Result<()> {
    let result = ConfigValidator::new().validate(config)?;
    for warning in &result.warnings {
        warn!("{warning}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::testing::RecordingTransport;
    use reqwest::StatusCode;
    use serde_json::json;

    #[test]
    fn test_new_rejects_missing_token() {
        let err = Client::new(&ClientConfig::new("https://tfe.example.com", "")).unwrap_err();
        assert!(err.to_string().contains("API token is required"));
    }

    #[test]
    fn test_base_url_includes_base_path() {
        let config = ClientConfig::new("https://tfe.example.com/", "token").with_base_path("/api/v2");
        let client = Client::new(&config).expect("client builds");
        assert_eq!(client.base_url().as_str(), "https://tfe.example.com/api/v2/");
    }

    #[tokio::test]
    async fn test_modules_share_transport() {
        let transport = Arc::new(RecordingTransport::new());
        transport.respond_json(
            StatusCode::OK,
            &json!({ "data": { "type": "ssh-keys", "id": "sshkey-1", "attributes": { "name": "a" } } }),
        );
        transport.respond(StatusCode::NO_CONTENT, "");

        let client = Client::with_transport(
            &ClientConfig::new("https://tfe.example.com", "token"),
            transport.clone(),
        )
        .expect("client builds");

        client.ssh_keys().read("sshkey-1").await.expect("read succeeds");
        client.workspaces().delete("my-org", "prod").await.expect("delete succeeds");

        assert_eq!(transport.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_cancelled_client_leaves_original_usable() {
        let transport = Arc::new(RecordingTransport::new());
        transport.respond(StatusCode::NO_CONTENT, "");

        let client = Client::with_transport(
            &ClientConfig::new("https://tfe.example.com", "token"),
            transport.clone(),
        )
        .expect("client builds");
        let token = CancellationToken::new();
        token.cancel();

        let err = client
            .with_cancellation(token)
            .runs()
            .cancel("run-1", &crate::resources::RunCancelOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, crate::TfeError::Cancelled));
        assert!(transport.requests().is_empty());

        client.ssh_keys().delete("sshkey-1").await.expect("original client works");
        assert_eq!(transport.requests().len(), 1);
    }
}
