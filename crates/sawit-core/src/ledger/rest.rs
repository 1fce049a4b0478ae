//! Production ledger connector.
//!
//! Talks JSON over HTTP to the organization's local gateway bridge service
//! (the `client.gatewayUrl` entry of the connection profile). The bridge owns
//! the actual Fabric gRPC plumbing; this connector only opens a session,
//! evaluates, and tears the session down:
//!
//! - `POST /connect` with credentials and discovery options, returns a session id
//! - `POST /sessions/{id}/evaluate`, returns the raw chaincode payload bytes
//! - `DELETE /sessions/{id}` on disconnect

use super::{LedgerConnector, LedgerSession};
use crate::config::DiscoveryOptions;
use crate::error::{GatewayError, Result};
use crate::profile::ConnectionProfile;
use crate::wallet::WalletIdentity;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Per-request timeout applied to bridge calls. The bridge enforces its own
/// Fabric-side timeouts; this only bounds the local HTTP hop.
const BRIDGE_TIMEOUT: Duration = Duration::from_secs(30);

/// Connector backed by the org's gateway bridge service.
pub struct RestConnector {
    client: Client,
}

impl RestConnector {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(BRIDGE_TIMEOUT)
            .build()
            .map_err(|e| GatewayError::Connection {
                message: format!("Failed to create HTTP client: {}", e),
                cause: None,
            })?;
        Ok(Self { client })
    }
}

#[derive(Deserialize)]
struct ConnectResponse {
    #[serde(rename = "sessionId")]
    session_id: String,
}

#[async_trait]
impl LedgerConnector for RestConnector {
    async fn connect(
        &self,
        profile: &ConnectionProfile,
        identity: &WalletIdentity,
        discovery: &DiscoveryOptions,
    ) -> Result<Box<dyn LedgerSession>> {
        let endpoint = profile.gateway_url()?;
        let url = join_url(&endpoint, "connect")?;
        debug!("Connecting to gateway bridge at {}", endpoint);

        let response = self
            .client
            .post(url)
            .json(&json!({
                "mspId": identity.msp_id,
                "certificate": identity.certificate,
                "privateKey": identity.private_key,
                "discovery": {
                    "enabled": discovery.enabled,
                    "asLocalhost": discovery.as_localhost,
                },
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Connection {
                message: format!("gateway bridge refused connection ({})", status),
                cause: Some(body),
            });
        }

        let connected: ConnectResponse = response.json().await?;
        debug!("Session {} established", connected.session_id);

        Ok(Box::new(RestSession {
            client: self.client.clone(),
            endpoint,
            session_id: connected.session_id,
        }))
    }
}

struct RestSession {
    client: Client,
    endpoint: Url,
    session_id: String,
}

impl RestSession {
    fn session_url(&self, suffix: &str) -> Result<Url> {
        join_url(
            &self.endpoint,
            &format!("sessions/{}{}", self.session_id, suffix),
        )
    }
}

#[async_trait]
impl LedgerSession for RestSession {
    async fn evaluate(
        &self,
        channel: &str,
        chaincode: &str,
        function: &str,
        args: &[Value],
    ) -> Result<Vec<u8>> {
        let url = self.session_url("/evaluate")?;
        debug!("Evaluating {}.{}.{}", channel, chaincode, function);

        let response = self
            .client
            .post(url)
            .json(&json!({
                "channel": channel,
                "chaincode": chaincode,
                "function": function,
                "args": args,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Evaluation {
                function: function.to_string(),
                message: if body.is_empty() {
                    format!("rejected with status {}", status)
                } else {
                    body
                },
            });
        }

        Ok(response.bytes().await?.to_vec())
    }

    async fn disconnect(&mut self) {
        let url = match self.session_url("") {
            Ok(url) => url,
            Err(e) => {
                warn!("Cannot build disconnect URL for {}: {}", self.session_id, e);
                return;
            }
        };
        if let Err(e) = self.client.delete(url).send().await {
            warn!("Disconnect of session {} failed: {}", self.session_id, e);
        }
    }
}

fn join_url(base: &Url, path: &str) -> Result<Url> {
    base.join(path).map_err(|e| GatewayError::Connection {
        message: format!("invalid gateway bridge URL: {}", e),
        cause: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connector_builds() {
        assert!(RestConnector::new().is_ok());
    }

    #[test]
    fn test_join_url_preserves_base_path() {
        let base = Url::parse("http://localhost:7059/bridge/").unwrap();
        let joined = join_url(&base, "sessions/abc/evaluate").unwrap();
        assert_eq!(
            joined.as_str(),
            "http://localhost:7059/bridge/sessions/abc/evaluate"
        );
    }
}
