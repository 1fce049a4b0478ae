//! Ledger client port.
//!
//! The gateway never talks wire protocol itself; it drives a [`LedgerConnector`]
//! that opens request-scoped [`LedgerSession`]s. The production implementation
//! lives in [`rest`]; tests substitute mocks behind the same traits.

pub mod rest;

use crate::config::DiscoveryOptions;
use crate::error::Result;
use crate::profile::ConnectionProfile;
use crate::wallet::WalletIdentity;
use async_trait::async_trait;
use serde_json::Value;

/// Opens sessions against one organization's ledger network.
#[async_trait]
pub trait LedgerConnector: Send + Sync {
    /// Establish a session authenticated as `identity` against the network
    /// described by `profile`.
    async fn connect(
        &self,
        profile: &ConnectionProfile,
        identity: &WalletIdentity,
        discovery: &DiscoveryOptions,
    ) -> Result<Box<dyn LedgerSession>>;
}

/// An established connection, scoped to exactly one request.
///
/// Sessions are never shared or reused; the dispatcher disconnects exactly
/// once before returning, on success and failure alike.
#[async_trait]
pub trait LedgerSession: Send + Sync {
    /// Evaluate a read-only chaincode function and return its raw payload.
    async fn evaluate(
        &self,
        channel: &str,
        chaincode: &str,
        function: &str,
        args: &[Value],
    ) -> Result<Vec<u8>>;

    /// Release the session. Infallible by contract; implementations log
    /// teardown failures instead of propagating them.
    async fn disconnect(&mut self);
}

/// Read-only view selecting a logical channel within a session.
pub struct NetworkHandle<'s> {
    session: &'s dyn LedgerSession,
    channel: &'s str,
}

impl<'s> NetworkHandle<'s> {
    pub fn new(session: &'s dyn LedgerSession, channel: &'s str) -> Self {
        Self { session, channel }
    }

    /// Select a deployed chaincode on this channel.
    pub fn contract(&self, name: &'s str) -> ContractHandle<'s> {
        ContractHandle {
            session: self.session,
            channel: self.channel,
            chaincode: name,
        }
    }
}

/// Read-only view selecting a deployed chaincode; the only evaluation call site.
pub struct ContractHandle<'s> {
    session: &'s dyn LedgerSession,
    channel: &'s str,
    chaincode: &'s str,
}

impl ContractHandle<'_> {
    /// Evaluate `function` without submitting a ledger-mutating transaction.
    /// Arguments are forwarded positionally, in order.
    pub async fn evaluate(&self, function: &str, args: &[Value]) -> Result<Vec<u8>> {
        self.session
            .evaluate(self.channel, self.chaincode, function, args)
            .await
    }
}
