//! Sawit Core - headless query gateway for the palm-oil traceability ledger.
//!
//! This crate resolves an organizational identity, opens a one-shot session
//! against the permissioned ledger, evaluates a read-only chaincode function,
//! and returns the decoded JSON payload. It can be used programmatically
//! without any HTTP layer; the `sawit-rpc` crate puts the two REST endpoints
//! in front of it.
//!
//! # Example
//!
//! ```rust,ignore
//! use sawit_core::{GatewayConfig, QueryDispatcher};
//! use sawit_core::ledger::rest::RestConnector;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> sawit_core::Result<()> {
//!     let config = GatewayConfig::with_root("/srv/sawit".as_ref());
//!     let dispatcher = QueryDispatcher::new(config, Arc::new(RestConnector::new()?));
//!
//!     let farms = dispatcher
//!         .dispatch("Org1", "appUser", "QueryAllFarms", &[])
//!         .await?;
//!     println!("{}", farms);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod dispatch;
pub mod error;
pub mod ledger;
pub mod preprocess;
pub mod profile;
pub mod wallet;

pub use config::{DiscoveryOptions, GatewayConfig, Organization};
pub use dispatch::QueryDispatcher;
pub use error::{GatewayError, Result};
pub use preprocess::ArgumentPreprocessor;
pub use profile::ConnectionProfile;
pub use wallet::{FileSystemWallet, WalletIdentity};
