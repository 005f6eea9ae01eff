//! Application configuration structures.

use serde::{Deserialize, Serialize};
use sisyphus_core::telemetry::TelemetryConfig;
use std::fmt;

/// Public Soroban RPC endpoint on the test network.
pub const DEFAULT_NETWORK_URL: &str = "https://soroban-testnet.stellar.org:443";

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application name and metadata.
    #[serde(default)]
    pub app: AppMetadata,

    /// Remote registry configuration.
    #[serde(default)]
    pub registry: RegistryConfig,

    /// Logging configuration.
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Application metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppMetadata {
    /// Application name.
    pub name: String,
    /// Application version.
    pub version: String,
    /// Environment (development, staging, production).
    pub environment: String,
}

impl Default for AppMetadata {
    fn default() -> Self {
        Self {
            name: "sisyphus".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Connection settings for the remote user registry program.
///
/// Immutable once handed to a client.
#[derive(Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Identifier of the deployed registry program.
    #[serde(default)]
    pub contract_id: String,

    /// RPC endpoint URL.
    #[serde(default = "default_network_url")]
    pub network_url: String,

    /// Secret key used to sign mutating calls. Read-only clients leave this unset.
    #[serde(default)]
    pub source_secret_key: Option<String>,
}

fn default_network_url() -> String {
    DEFAULT_NETWORK_URL.to_string()
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            contract_id: String::new(),
            network_url: default_network_url(),
            source_secret_key: None,
        }
    }
}

impl RegistryConfig {
    /// Creates a configuration for `contract_id` on the default network, without a signer.
    #[must_use]
    pub fn new(contract_id: impl Into<String>) -> Self {
        Self {
            contract_id: contract_id.into(),
            ..Self::default()
        }
    }

    /// Overrides the RPC endpoint.
    #[must_use]
    pub fn with_network_url(mut self, network_url: impl Into<String>) -> Self {
        self.network_url = network_url.into();
        self
    }

    /// Sets the signing secret key.
    #[must_use]
    pub fn with_secret_key(mut self, secret_key: impl Into<String>) -> Self {
        self.source_secret_key = Some(secret_key.into());
        self
    }

    /// Returns true if a signing credential is configured.
    #[must_use]
    pub fn has_signer(&self) -> bool {
        self.source_secret_key
            .as_deref()
            .is_some_and(|key| !key.is_empty())
    }
}

impl fmt::Debug for RegistryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryConfig")
            .field("contract_id", &self.contract_id)
            .field("network_url", &self.network_url)
            .field(
                "source_secret_key",
                &self.source_secret_key.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_defaults() {
        let config = RegistryConfig::default();
        assert!(config.contract_id.is_empty());
        assert_eq!(config.network_url, DEFAULT_NETWORK_URL);
        assert!(!config.has_signer());
    }

    #[test]
    fn test_registry_builder() {
        let config = RegistryConfig::new("CREGISTRY")
            .with_network_url("http://localhost:8000/soroban/rpc")
            .with_secret_key("SSECRET");
        assert_eq!(config.contract_id, "CREGISTRY");
        assert_eq!(config.network_url, "http://localhost:8000/soroban/rpc");
        assert!(config.has_signer());
    }

    #[test]
    fn test_empty_secret_is_not_a_signer() {
        let config = RegistryConfig::new("CREGISTRY").with_secret_key("");
        assert!(!config.has_signer());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = RegistryConfig::new("CREGISTRY").with_secret_key("SVERYSECRET");
        let rendered = format!("{:?}", config);
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains("SVERYSECRET"));
    }

    #[test]
    fn test_app_config_deserializes_partial() {
        let config: AppConfig =
            serde_json::from_str(r#"{ "registry": { "contract_id": "CABC" } }"#).unwrap();
        assert_eq!(config.registry.contract_id, "CABC");
        assert_eq!(config.registry.network_url, DEFAULT_NETWORK_URL);
        assert_eq!(config.app.name, "sisyphus");
    }
}
