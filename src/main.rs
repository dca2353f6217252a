//! Gateway entry point.
//!
//! Initializes logging, loads configuration, and serves the HTTP API until
//! Ctrl-C. The remote session is opened lazily by the first request.

use anyhow::Result;
use tokio_util::sync::CancellationToken;
use tracing::{Level, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use docs_mcp_gateway::core::{Config, Gateway, TransportService};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration from environment
    let config = Config::from_env();

    // Initialize logging
    init_logging(&config.logging.level);

    config.validate()?;

    info!("Starting {} v{}", config.server.name, config.server.version);

    let transport = TransportService::new(config.transport.clone());
    let gateway = Gateway::new(config);

    info!("Gateway initialized");

    let shutdown = CancellationToken::new();
    spawn_shutdown_listener(shutdown.clone());

    transport.run(gateway, shutdown).await?;

    info!("Gateway shutting down");

    Ok(())
}

/// Cancel `shutdown` on Ctrl-C.
fn spawn_shutdown_listener(shutdown: CancellationToken) {
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
            return;
        }
        info!("Shutdown requested");
        shutdown.cancel();
    });
}

/// Initialize the logging subsystem.
///
/// Configures tracing with the specified log level and format.
fn init_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}
