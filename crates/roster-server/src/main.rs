//! Server binary for the Roster users service.
//!
//! Wires configuration, the seeded user registry, and the HTTP API
//! together, then serves until `Ctrl-C`.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `roster-config.yaml` (or defaults)
//! 2. Initialize structured logging (tracing)
//! 3. Build the registry from the configured seed
//! 4. Serve the API until shutdown

mod error;

use std::path::Path;
use std::sync::Arc;

use roster_api::AppState;
use roster_core::config::{LoggingConfig, RosterConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::LaunchError;

/// Config file looked up relative to the working directory.
const CONFIG_PATH: &str = "roster-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, seeding, binding, or serving fails.
#[tokio::main]
async fn main() -> Result<(), LaunchError> {
    // 1. Load configuration.
    let config = load_config()?;

    // 2. Initialize structured logging.
    init_tracing(&config.logging);
    info!(
        host = config.server.host,
        port = config.server.port,
        mount_prefix = config.server.mount_prefix,
        "Configuration loaded"
    );

    // 3. Build the registry.
    let registry = config.build_registry()?;
    info!(
        seed_users = registry.len(),
        next_id = %registry.next_id(),
        "User registry seeded"
    );

    // 4. Serve.
    let state = Arc::new(AppState::new(registry));
    roster_api::start_server(&config.server, state).await?;

    info!("roster-server shutdown complete");
    Ok(())
}

/// Load configuration from [`CONFIG_PATH`], falling back to defaults
/// (with environment overrides) when the file is missing.
fn load_config() -> Result<RosterConfig, LaunchError> {
    let config_path = Path::new(CONFIG_PATH);
    let config = if config_path.exists() {
        RosterConfig::from_file(config_path)?
    } else {
        RosterConfig::from_env()?
    };
    Ok(config)
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `logging.level`.
fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}
