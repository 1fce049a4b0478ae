//! Connection profile loading.
//!
//! A connection profile describes how to reach one organization's slice of the
//! ledger network: peer endpoints, TLS material references, and the gateway
//! bridge URL this crate actually consumes. The profile is re-read from disk on
//! every request; the gateway never caches network topology.

use crate::error::{GatewayError, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};
use url::Url;

/// A parsed connection profile for one organization.
#[derive(Debug, Clone)]
pub struct ConnectionProfile {
    path: PathBuf,
    raw: Value,
}

impl ConnectionProfile {
    /// Read and parse a connection profile from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| GatewayError::Profile {
            message: format!("failed to read profile: {}", e),
            path: path.to_path_buf(),
        })?;
        let raw: Value = serde_json::from_str(&raw).map_err(|e| GatewayError::Profile {
            message: format!("invalid profile JSON: {}", e),
            path: path.to_path_buf(),
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            raw,
        })
    }

    /// Network name declared by the profile, if any.
    pub fn name(&self) -> Option<&str> {
        self.raw.get("name").and_then(Value::as_str)
    }

    /// URL of the organization's gateway bridge service.
    pub fn gateway_url(&self) -> Result<Url> {
        let raw = self
            .raw
            .pointer("/client/gatewayUrl")
            .and_then(Value::as_str)
            .ok_or_else(|| GatewayError::Profile {
                message: "missing client.gatewayUrl".into(),
                path: self.path.clone(),
            })?;
        Url::parse(raw).map_err(|e| GatewayError::Profile {
            message: format!("invalid client.gatewayUrl '{}': {}", raw, e),
            path: self.path.clone(),
        })
    }

    /// Path this profile was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn write_profile(dir: &Path, name: &str, body: &Value) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, serde_json::to_vec(body).unwrap()).unwrap();
        path
    }

    #[test]
    fn test_load_reads_name_and_gateway_url() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_profile(
            dir.path(),
            "connection-org1.json",
            &json!({
                "name": "test-network-org1",
                "client": { "gatewayUrl": "http://localhost:7059" }
            }),
        );

        let profile = ConnectionProfile::load(&path).unwrap();
        assert_eq!(profile.name(), Some("test-network-org1"));
        assert_eq!(
            profile.gateway_url().unwrap().as_str(),
            "http://localhost:7059/"
        );
    }

    #[test]
    fn test_missing_gateway_url_is_profile_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_profile(dir.path(), "p.json", &json!({"name": "x"}));

        let profile = ConnectionProfile::load(&path).unwrap();
        assert!(matches!(
            profile.gateway_url(),
            Err(GatewayError::Profile { .. })
        ));
    }

    #[test]
    fn test_missing_file_is_profile_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = ConnectionProfile::load(&dir.path().join("absent.json"));
        assert!(matches!(result, Err(GatewayError::Profile { .. })));
    }

    #[test]
    fn test_malformed_json_is_profile_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{not json").unwrap();

        assert!(matches!(
            ConnectionProfile::load(&path),
            Err(GatewayError::Profile { .. })
        ));
    }
}
