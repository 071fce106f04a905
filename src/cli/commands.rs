//! CLI command implementations

use std::path::Path;
use std::sync::Arc;

use serde_json::json;
use tracing::info;

use crate::config::ServiceConfig;
use crate::http_server::HttpServer;
use crate::observability::{init_logging, Event};
use crate::store::{Collection, JsonFileStore, RecordStore};

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::write_json;

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { config, port } => serve(config.as_deref(), port),
        Command::Init { config } => init(config.as_deref()),
        Command::Dump { collection, config } => dump(config.as_deref(), collection),
    }
}

/// Start the HTTP service
///
/// Collection files are created lazily by the first request that reads
/// them, so no `init` is required beforehand.
pub fn serve(config_path: Option<&Path>, port: Option<u16>) -> CliResult<()> {
    let mut config = ServiceConfig::resolve(config_path)?;
    if let Some(port) = port {
        config.http.port = port;
    }

    init_logging(&config.logging)?;
    info!(
        event = Event::ConfigLoaded.as_str(),
        data_dir = %config.storage.data_dir.display(),
        port = config.http.port,
        "configuration loaded"
    );

    let store: Arc<dyn RecordStore> = Arc::new(config.storage.open());
    let server = HttpServer::new(config.http.clone(), store);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Create the data directory and both collections if missing
pub fn init(config_path: Option<&Path>) -> CliResult<()> {
    let config = ServiceConfig::resolve(config_path)?;
    let store = config.storage.open();

    let report = initialize_collections(&store)?;
    write_json(&report)
}

fn initialize_collections(store: &JsonFileStore) -> CliResult<serde_json::Value> {
    let mut collections = serde_json::Map::new();
    for collection in Collection::ALL {
        let created = store.ensure_exists(collection)?;
        collections.insert(
            collection.as_str().to_string(),
            json!({
                "path": store.path_of(collection).display().to_string(),
                "created": created,
            }),
        );
    }

    Ok(json!({ "initialized": true, "collections": collections }))
}

/// Print a collection as pretty JSON
///
/// Unlike request handling, a corrupt or unreadable file is reported
/// instead of being replaced by an empty list.
pub fn dump(config_path: Option<&Path>, collection: Collection) -> CliResult<()> {
    let config = ServiceConfig::resolve(config_path)?;
    let records = config.storage.open().load(collection)?;
    write_json(&records)
}
