//! Gateway configuration.
//!
//! All of this is static deployment configuration: the channel and chaincode
//! the gateway fronts, where the per-organization wallets and connection
//! profiles live, and the discovery options passed to the ledger client.
//! The values are built once at startup and injected into the dispatcher;
//! nothing here is mutable at runtime.

use crate::error::{GatewayError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Channel the gateway attaches to.
pub const DEFAULT_CHANNEL: &str = "mychannel";
/// Chaincode queried on that channel.
pub const DEFAULT_CHAINCODE: &str = "palmoil";

/// Organizations participating in the traceability network.
///
/// Exactly two are supported; anything else is rejected before any network
/// I/O is attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Organization {
    Org1,
    Org2,
}

impl Organization {
    pub fn as_str(&self) -> &'static str {
        match self {
            Organization::Org1 => "Org1",
            Organization::Org2 => "Org2",
        }
    }

    /// Directory name of the organization's wallet under the wallet root.
    pub fn wallet_dir_name(&self) -> &'static str {
        match self {
            Organization::Org1 => "org1",
            Organization::Org2 => "org2",
        }
    }

    /// File name of the organization's connection profile.
    pub fn profile_file_name(&self) -> &'static str {
        match self {
            Organization::Org1 => "connection-org1.json",
            Organization::Org2 => "connection-org2.json",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "org1" => Some(Organization::Org1),
            "org2" => Some(Organization::Org2),
            _ => None,
        }
    }
}

impl std::fmt::Display for Organization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Service discovery options forwarded to the ledger client on connect.
///
/// The `as_localhost` default assumes a local single-host network deployment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DiscoveryOptions {
    pub enabled: bool,
    pub as_localhost: bool,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            as_localhost: true,
        }
    }
}

/// Immutable gateway configuration injected into the dispatcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Logical channel name, fixed per deployment.
    #[serde(default = "default_channel")]
    pub channel: String,
    /// Deployed chaincode name, fixed per deployment.
    #[serde(default = "default_chaincode")]
    pub chaincode: String,
    /// Directory containing one wallet directory per organization.
    #[serde(default = "default_wallet_root")]
    pub wallet_root: PathBuf,
    /// Directory containing one connection profile per organization.
    #[serde(default = "default_profile_root")]
    pub profile_root: PathBuf,
    #[serde(default)]
    pub discovery: DiscoveryOptions,
}

fn default_channel() -> String {
    DEFAULT_CHANNEL.to_string()
}

fn default_chaincode() -> String {
    DEFAULT_CHAINCODE.to_string()
}

fn default_wallet_root() -> PathBuf {
    PathBuf::from("wallet")
}

fn default_profile_root() -> PathBuf {
    PathBuf::from("profiles")
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            channel: default_channel(),
            chaincode: default_chaincode(),
            wallet_root: default_wallet_root(),
            profile_root: default_profile_root(),
            discovery: DiscoveryOptions::default(),
        }
    }
}

impl GatewayConfig {
    /// Default configuration with wallets and profiles rooted under `root`.
    pub fn with_root(root: &Path) -> Self {
        Self {
            wallet_root: root.join("wallet"),
            profile_root: root.join("profiles"),
            ..Self::default()
        }
    }

    /// Load configuration from a JSON file. Missing fields take defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| GatewayError::io_with_path(e, path))?;
        serde_json::from_str(&raw).map_err(|e| GatewayError::Config {
            message: format!("invalid config file {}: {}", path.display(), e),
        })
    }

    /// Wallet directory for an organization.
    pub fn wallet_path(&self, org: Organization) -> PathBuf {
        self.wallet_root.join(org.wallet_dir_name())
    }

    /// Connection profile path for an organization.
    pub fn profile_path(&self, org: Organization) -> PathBuf {
        self.profile_root.join(org.profile_file_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_organization_roundtrip() {
        for org in [Organization::Org1, Organization::Org2] {
            let parsed = Organization::from_str(org.as_str()).expect("Should parse");
            assert_eq!(org, parsed);
        }
    }

    #[test]
    fn test_organization_parse_is_case_insensitive() {
        assert_eq!(Organization::from_str("ORG1"), Some(Organization::Org1));
        assert_eq!(Organization::from_str("org2"), Some(Organization::Org2));
    }

    #[test]
    fn test_unknown_organization_rejected() {
        assert_eq!(Organization::from_str("OrgX"), None);
        assert_eq!(Organization::from_str(""), None);
    }

    #[test]
    fn test_orgs_map_to_distinct_paths() {
        let config = GatewayConfig::default();
        assert_ne!(
            config.profile_path(Organization::Org1),
            config.profile_path(Organization::Org2)
        );
        assert_ne!(
            config.wallet_path(Organization::Org1),
            config.wallet_path(Organization::Org2)
        );
    }

    #[test]
    fn test_discovery_defaults_to_localhost() {
        let discovery = DiscoveryOptions::default();
        assert!(discovery.enabled);
        assert!(discovery.as_localhost);
    }

    #[test]
    fn test_config_load_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gateway.json");
        std::fs::write(&path, r#"{"chaincode": "cocoa"}"#).unwrap();

        let config = GatewayConfig::load(&path).unwrap();
        assert_eq!(config.chaincode, "cocoa");
        assert_eq!(config.channel, DEFAULT_CHANNEL);
        assert!(config.discovery.enabled);
    }

    #[test]
    fn test_config_load_rejects_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gateway.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(
            GatewayConfig::load(&path),
            Err(GatewayError::Config { .. })
        ));
    }
}
