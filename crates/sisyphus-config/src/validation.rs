//! Configuration validation module.
//!
//! Collects every problem in one pass so a misconfigured client fails at
//! startup with the full list instead of on its first remote call.

use crate::AppConfig;
use std::fmt;
use url::Url;

/// Configuration validation error variants.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValidationError {
    /// Registry contract identifier is empty.
    MissingContractId,
    /// URL format is invalid.
    InvalidUrl { url_type: String, message: String },
    /// Secret key does not look like a signing seed.
    MalformedSecretKey { reason: String },
    /// Log filter is empty.
    EmptyLogFilter,
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingContractId => write!(f, "Registry contract_id is required"),
            Self::InvalidUrl { url_type, message } => {
                write!(f, "Invalid {} URL: {}", url_type, message)
            }
            // Never echo the key itself.
            Self::MalformedSecretKey { reason } => {
                write!(f, "Malformed source_secret_key: {}", reason)
            }
            Self::EmptyLogFilter => write!(f, "telemetry.log_filter cannot be empty"),
        }
    }
}

impl std::error::Error for ConfigValidationError {}

/// Errors collected during one validation pass.
#[derive(Debug)]
struct ValidationResult {
    errors: Vec<ConfigValidationError>,
}

impl ValidationResult {
    fn new() -> Self {
        Self { errors: Vec::new() }
    }

    fn add_error(&mut self, error: ConfigValidationError) {
        self.errors.push(error);
    }

    fn into_result(self) -> Result<(), Vec<ConfigValidationError>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Length of a strkey-encoded ed25519 secret seed.
    const SECRET_SEED_LENGTH: usize = 56;

    /// Validates the entire application configuration.
    ///
    /// Returns Ok(()) if valid, or Err with all validation errors found.
    pub fn validate(config: &AppConfig) -> Result<(), Vec<ConfigValidationError>> {
        let mut result = ValidationResult::new();

        Self::validate_registry(&config.registry, &mut result);
        Self::validate_telemetry(&config.telemetry, &mut result);

        result.into_result()
    }

    fn validate_registry(config: &crate::RegistryConfig, result: &mut ValidationResult) {
        if config.contract_id.trim().is_empty() {
            result.add_error(ConfigValidationError::MissingContractId);
        }

        match Url::parse(&config.network_url) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
            Ok(url) => result.add_error(ConfigValidationError::InvalidUrl {
                url_type: "network".to_string(),
                message: format!("unsupported scheme '{}'", url.scheme()),
            }),
            Err(e) => result.add_error(ConfigValidationError::InvalidUrl {
                url_type: "network".to_string(),
                message: format!("Invalid URL format: {} ({})", config.network_url, e),
            }),
        }

        if let Some(ref key) = config.source_secret_key {
            if !key.starts_with('S') {
                result.add_error(ConfigValidationError::MalformedSecretKey {
                    reason: "must start with 'S'".to_string(),
                });
            }
            if key.len() != Self::SECRET_SEED_LENGTH {
                result.add_error(ConfigValidationError::MalformedSecretKey {
                    reason: format!(
                        "expected {} characters, got {}",
                        Self::SECRET_SEED_LENGTH,
                        key.len()
                    ),
                });
            }
        }
    }

    fn validate_telemetry(
        config: &sisyphus_core::telemetry::TelemetryConfig,
        result: &mut ValidationResult,
    ) {
        if config.log_filter.trim().is_empty() {
            result.add_error(ConfigValidationError::EmptyLogFilter);
        }
    }
}

/// Formats validation errors for display.
pub fn format_validation_errors(errors: &[ConfigValidationError]) -> String {
    let mut output = String::from("Configuration validation failed:\n");
    for (i, error) in errors.iter().enumerate() {
        output.push_str(&format!("  {}. {}\n", i + 1, error));
    }
    output
}
