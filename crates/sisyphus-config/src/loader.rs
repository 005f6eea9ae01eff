//! Configuration loader with layered sources.

use crate::{format_validation_errors, AppConfig, ConfigValidator};
use config::{Config, ConfigError, Environment, File, Map};
use sisyphus_core::SisyphusError;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

const ENV_PREFIX: &str = "SISYPHUS";
const ENVIRONMENT_VAR: &str = "SISYPHUS_ENVIRONMENT";
const DEFAULT_ENVIRONMENT: &str = "development";

/// Where environment-variable overrides come from.
#[derive(Debug, Clone)]
pub enum EnvironmentSource {
    /// `.env` plus the process environment, re-read on every load.
    Process,
    /// A fixed set of variables; `.env` and the process environment are ignored.
    Fixed(Map<String, String>),
}

impl EnvironmentSource {
    /// Resolves the environment name and the variable map handed to `config`.
    fn resolve(&self) -> (String, Option<Map<String, String>>) {
        match self {
            Self::Process => {
                if let Err(e) = dotenvy::dotenv() {
                    debug!("No .env file found or error loading it: {}", e);
                }
                let environment = std::env::var(ENVIRONMENT_VAR)
                    .unwrap_or_else(|_| DEFAULT_ENVIRONMENT.to_string());
                (environment, None)
            }
            Self::Fixed(vars) => {
                let environment = vars
                    .get(ENVIRONMENT_VAR)
                    .cloned()
                    .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string());
                (environment, Some(vars.clone()))
            }
        }
    }
}

/// Configuration loader with runtime refresh support.
#[derive(Clone)]
pub struct ConfigLoader {
    config: Arc<RwLock<AppConfig>>,
    config_dir: String,
    env_source: EnvironmentSource,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. `config/default.toml` - Default values
    /// 2. `config/{environment}.toml` - Environment-specific overrides
    /// 3. `config/local.toml` - Local overrides
    /// 4. Environment variables with `SISYPHUS_` prefix
    ///    (e.g. `SISYPHUS_REGISTRY__CONTRACT_ID`)
    ///
    /// The environment name comes from `SISYPHUS_ENVIRONMENT`.
    pub fn new(config_dir: impl Into<String>) -> Result<Self, SisyphusError> {
        Self::with_env_source(config_dir, EnvironmentSource::Process)
    }

    /// Creates a loader that takes environment overrides from `env_source`.
    pub fn with_env_source(
        config_dir: impl Into<String>,
        env_source: EnvironmentSource,
    ) -> Result<Self, SisyphusError> {
        let config_dir = config_dir.into();
        let config = Self::load_config(&config_dir, &env_source)?;

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            config_dir,
            env_source,
        })
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> Result<Self, SisyphusError> {
        Self::new("./config")
    }

    /// Returns the current configuration.
    pub async fn get(&self) -> AppConfig {
        self.config.read().await.clone()
    }

    /// Reloads the configuration from disk.
    ///
    /// On failure the previous configuration stays in effect.
    pub async fn reload(&self) -> Result<(), SisyphusError> {
        let new_config = Self::load_config(&self.config_dir, &self.env_source)?;
        let mut config = self.config.write().await;
        *config = new_config;
        info!("Configuration reloaded successfully");
        Ok(())
    }

    fn load_config(
        config_dir: &str,
        env_source: &EnvironmentSource,
    ) -> Result<AppConfig, SisyphusError> {
        let (environment, env_vars) = env_source.resolve();

        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder();

        for layer in ["default", environment.as_str(), "local"] {
            let path = format!("{}/{}.toml", config_dir, layer);
            if Path::new(&path).exists() {
                debug!("Loading {} config from: {}", layer, path);
                builder = builder.add_source(File::with_name(&path).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env_vars),
        );

        let config = builder.build().map_err(config_error_to_sisyphus_error)?;

        let mut app_config: AppConfig = config
            .try_deserialize()
            .map_err(config_error_to_sisyphus_error)?;
        app_config.app.environment = environment;

        if let Err(errors) = ConfigValidator::validate(&app_config) {
            return Err(SisyphusError::Configuration(format_validation_errors(&errors)));
        }

        if app_config.app.environment == "production" && !app_config.registry.has_signer() {
            warn!(
                "No source_secret_key configured: mutating registry calls will not be authorized"
            );
        }

        Ok(app_config)
    }

    /// Gets a specific configuration value by dotted key path.
    pub async fn get_value<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        let config = self.config.read().await;
        let json = serde_json::to_value(&*config).ok()?;

        let mut current = &json;
        for part in key.split('.') {
            current = current.get(part)?;
        }

        serde_json::from_value(current.clone()).ok()
    }
}

fn config_error_to_sisyphus_error(err: ConfigError) -> SisyphusError {
    SisyphusError::Configuration(err.to_string())
}
