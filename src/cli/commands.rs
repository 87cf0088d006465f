//! CLI command implementations
//!
//! `serve` boot sequence:
//! 1. Load config (file, then flag overrides) and validate it
//! 2. Install the tracing subscriber
//! 3. Open the store; a load failure is logged and the server falls back
//!    to an empty in-memory store
//! 4. Serve until Ctrl-C

use std::fs;
use std::path::Path;
use std::sync::Arc;

use tracing::{error, info};

use crate::http_server::{HttpServer, ServerConfig};
use crate::models::catalog_schemas;
use crate::observability::{init_tracing, Event};
use crate::storage::MemoryStore;

use super::args::{Command, ServeArgs};
use super::errors::{CliError, CliResult};

/// Dispatch a parsed command
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Serve(args) => {
            let config = resolve_config(&args)?;
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?;
            runtime.block_on(serve(config))
        }
        Command::CheckConfig { config } => check_config(&config),
    }
}

/// Load configuration from a JSON file
pub fn load_config(path: &Path) -> CliResult<ServerConfig> {
    let content = fs::read_to_string(path)
        .map_err(|e| CliError::config_error(format!("Failed to read {}: {}", path.display(), e)))?;

    let config: ServerConfig = serde_json::from_str(&content)
        .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

    config.validate().map_err(CliError::config_error)?;
    Ok(config)
}

/// File config (or defaults) with command-line overrides applied
pub fn resolve_config(args: &ServeArgs) -> CliResult<ServerConfig> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };

    if let Some(host) = &args.host {
        config.host = host.clone();
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(dir) = &args.data_dir {
        config.data_dir = Some(dir.clone());
    }

    config.validate().map_err(CliError::config_error)?;
    Ok(config)
}

/// Open the catalog store described by `config`.
///
/// Never fails: an unloadable data directory is reported and replaced by
/// an empty memory-only store.
pub fn open_store(config: &ServerConfig) -> MemoryStore {
    let Some(dir) = &config.data_dir else {
        info!(event = Event::StoreLoaded.as_str(), "memory-only store");
        return MemoryStore::new(catalog_schemas());
    };

    match MemoryStore::open(dir, catalog_schemas()) {
        Ok(store) => {
            info!(
                event = Event::StoreLoaded.as_str(),
                data_dir = %dir.display(),
                "store opened"
            );
            store
        }
        Err(e) => {
            error!(
                event = Event::StoreLoadFailed.as_str(),
                data_dir = %dir.display(),
                error = %e,
                "cannot open store; continuing with an empty in-memory store"
            );
            MemoryStore::new(catalog_schemas())
        }
    }
}

/// Start the server and block until shutdown
pub async fn serve(config: ServerConfig) -> CliResult<()> {
    init_tracing(&config.log_level, config.log_format)?;
    info!(
        event = Event::ConfigLoaded.as_str(),
        addr = %config.socket_addr(),
        "configuration loaded"
    );

    let store = Arc::new(open_store(&config));
    HttpServer::new(config, store).start().await?;
    Ok(())
}

/// Validate a config file and print the effective configuration
pub fn check_config(path: &Path) -> CliResult<()> {
    let config = load_config(path)?;
    let rendered = serde_json::to_string_pretty(&config)
        .map_err(|e| CliError::config_error(e.to_string()))?;
    println!("{}", rendered);
    Ok(())
}
