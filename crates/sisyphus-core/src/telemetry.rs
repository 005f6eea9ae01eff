//! Logging setup for binaries built on the registry client.
//!
//! Library crates only emit `tracing` events. Installing a subscriber is
//! left to the final binary and requires the `telemetry` feature.

#[cfg(feature = "telemetry")]
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[cfg(feature = "telemetry")]
use crate::SisyphusError;
use crate::SisyphusResult;
use serde::{Deserialize, Serialize};

/// Telemetry configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Whether a subscriber is installed at all.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Service name attached to the startup event.
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Filter directives used when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json_output: bool,

    /// Whether to write events to stdout.
    #[serde(default = "default_console_output")]
    pub console_output: bool,
}

fn default_enabled() -> bool {
    true
}

fn default_service_name() -> String {
    "sisyphus-registry".to_string()
}

fn default_log_filter() -> String {
    "info,sisyphus=debug".to_string()
}

fn default_console_output() -> bool {
    true
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            service_name: default_service_name(),
            log_filter: default_log_filter(),
            json_output: false,
            console_output: default_console_output(),
        }
    }
}

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `config.log_filter`. Fails if a global
/// subscriber was already installed.
pub fn init_telemetry(config: &TelemetryConfig) -> SisyphusResult<()> {
    if !config.enabled || !config.console_output {
        tracing::debug!(
            service_name = %config.service_name,
            "Telemetry disabled, no subscriber installed"
        );
        return Ok(());
    }

    install_subscriber(config)
}

#[cfg(feature = "telemetry")]
fn install_subscriber(config: &TelemetryConfig) -> SisyphusResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .map_err(|e| SisyphusError::Configuration(format!("Invalid log filter: {}", e)))?;

    let registry = tracing_subscriber::registry().with(filter);

    let installed = if config.json_output {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .try_init()
    };

    installed
        .map_err(|e| SisyphusError::internal(format!("Failed to install subscriber: {}", e)))?;

    tracing::info!(
        service_name = %config.service_name,
        json_output = config.json_output,
        "Telemetry initialized"
    );

    Ok(())
}

/// Placeholder for when telemetry feature is disabled.
#[cfg(not(feature = "telemetry"))]
fn install_subscriber(config: &TelemetryConfig) -> SisyphusResult<()> {
    tracing::debug!(
        service_name = %config.service_name,
        "Built without the telemetry feature, no subscriber installed"
    );
    Ok(())
}
