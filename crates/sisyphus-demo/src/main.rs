//! # Sisyphus Demo
//!
//! Loads configuration, installs logging, and runs the user registry example
//! flow against an in-process registry that authorizes mutations only when a
//! `source_secret_key` is configured.

use sisyphus_config::ConfigLoader;
use sisyphus_core::telemetry::init_telemetry;
use sisyphus_core::SisyphusResult;
use sisyphus_demo::run_example_flow;
use sisyphus_registry::{InMemoryUserRegistry, UserRegistryClient};
use std::sync::Arc;
use tracing::{error, info, warn};

const EXAMPLE_USER_ID: &str = "GUSER_ADDRESS_HERE";

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        // The subscriber may not be up yet if configuration failed.
        eprintln!("{}", e);
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> SisyphusResult<()> {
    let config_loader = ConfigLoader::from_default_location()?;
    let config = config_loader.get().await;

    init_telemetry(&config.telemetry)?;

    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!("Environment: {}", config.app.environment);
    info!(
        contract_id = %config.registry.contract_id,
        network_url = %config.registry.network_url,
        "Registry configured"
    );

    if !config.registry.has_signer() {
        warn!("No source_secret_key configured: create, update and delete will be rejected");
    }

    let registry = Arc::new(InMemoryUserRegistry::for_config(&config.registry));
    let client = UserRegistryClient::new(config.registry, registry);

    let report = run_example_flow(&client, EXAMPLE_USER_ID).await;
    info!(
        created = report.created,
        updated = report.updated,
        deleted = report.deleted,
        "Example flow finished"
    );

    Ok(())
}
