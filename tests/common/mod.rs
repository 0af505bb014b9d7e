//! Shared helpers for the wiremock-backed integration tests.

use tfe_client::{Client, ClientConfig};
use wiremock::MockServer;

/// Token every mock expects as bearer credential.
pub const TOKEN: &str = "integration-token";

/// Client pointed at the mock server with the default `/api/v2/` base path.
pub fn client(server: &MockServer) -> Client {
    Client::new(&ClientConfig::new(server.uri(), TOKEN)).expect("client builds")
}
