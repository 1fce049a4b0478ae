//! Query dispatch.
//!
//! One inbound request maps to exactly one connect → evaluate → disconnect
//! cycle against the ledger. Nothing is cached or pooled: the connection
//! profile and wallet are re-read from disk on every call, and the session is
//! torn down before the result is returned, on success and failure alike.

use crate::config::{GatewayConfig, Organization};
use crate::error::{GatewayError, Result};
use crate::ledger::{LedgerConnector, LedgerSession, NetworkHandle};
use crate::profile::ConnectionProfile;
use crate::wallet::FileSystemWallet;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error};

/// Stateless dispatcher for read-only ledger queries.
pub struct QueryDispatcher {
    config: GatewayConfig,
    connector: Arc<dyn LedgerConnector>,
}

impl QueryDispatcher {
    pub fn new(config: GatewayConfig, connector: Arc<dyn LedgerConnector>) -> Self {
        Self { config, connector }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Evaluate `function` with `args` as `user` of `org` and decode the
    /// payload as JSON.
    ///
    /// Unknown organizations and unenrolled identities are rejected before
    /// any network I/O. Once a session is established it is disconnected
    /// exactly once, whatever the outcome of the evaluation.
    pub async fn dispatch(
        &self,
        org: &str,
        user: &str,
        function: &str,
        args: &[Value],
    ) -> Result<Value> {
        let org = Organization::from_str(org)
            .ok_or_else(|| GatewayError::InvalidOrganization(org.to_string()))?;

        let profile = ConnectionProfile::load(&self.config.profile_path(org))?;
        let wallet = FileSystemWallet::open(self.config.wallet_path(org));
        let identity = wallet
            .get(user)?
            .ok_or_else(|| GatewayError::IdentityNotFound {
                org: org.to_string(),
                label: user.to_string(),
            })?;

        debug!(
            "Dispatching {} for {}@{} with {} argument(s)",
            function,
            user,
            org,
            args.len()
        );

        let mut session = self
            .connector
            .connect(&profile, &identity, &self.config.discovery)
            .await?;

        // try/finally equivalent: the evaluation outcome is held until the
        // session is released, then unwrapped.
        let outcome = self.evaluate(session.as_ref(), function, args).await;
        session.disconnect().await;
        let payload = outcome?;

        serde_json::from_slice(&payload).map_err(|e| {
            error!("Non-JSON payload from {}: {}", function, e);
            GatewayError::decode(e)
        })
    }

    async fn evaluate(
        &self,
        session: &dyn LedgerSession,
        function: &str,
        args: &[Value],
    ) -> Result<Vec<u8>> {
        let network = NetworkHandle::new(session, &self.config.channel);
        let contract = network.contract(&self.config.chaincode);
        contract.evaluate(function, args).await
    }
}
