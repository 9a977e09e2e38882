//! hwprops Server
//!
//! REST API server answering fan speed, device temperature and CPU usage
//! queries through the thermal HAL bridge.
//!
//! # Thermal service
//!
//! The thermal HAL is looked up by name (`[thermal] service_name`, default
//! `thermal`). It can be provided in two ways:
//!
//! 1. **`--mock`**: register a built-in demo data set.
//! 2. **Fixture file**: `--fixture <path>` or `[thermal] fixture` in
//!    config.toml. The flag takes precedence over the config file.
//!
//! Without either, the daemon still starts and every query answers with an
//! empty result.

mod api;
mod config;

use anyhow::Result;
use api::AppState;
use clap::Parser;
use config::ThermalSource;
use hwprops_core::{default_config_path, StaticConfig};
use hwprops_hal::HardwareProperties;
use std::path::PathBuf;
use tokio::signal;
use tracing::{info, warn};

/// hwprops API Server
#[derive(Parser, Debug)]
#[command(name = "hwpropsd")]
#[command(version, about = "Hardware Properties API Server", long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Server bind address (overrides `[server] hostname`)
    #[arg(short, long)]
    bind: Option<String>,

    /// Server port
    #[arg(short, long)]
    port: Option<u16>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Enable mock mode (serve built-in demo thermal data)
    #[arg(long)]
    mock: bool,

    /// Thermal fixture file served as the HAL
    ///
    /// Takes precedence over `[thermal] fixture` in the config file.
    #[arg(long)]
    fixture: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_tracing(args.verbose);

    info!("hwprops Server starting...");

    // Determine config path: CLI flag > env var > default
    let config_path = args.config.unwrap_or_else(|| {
        std::env::var("HWPROPS_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_config_path())
    });
    info!("Configuration file: {}", config_path.display());

    let static_config = config::load_static_config(&config_path).await?;
    info!("Configuration loaded successfully");

    let bind_addr = bind_address(args.bind, args.port, &static_config);

    // Register the thermal service and connect the bridge to it
    let service_name = static_config.thermal.service_name.clone();
    let source = ThermalSource::resolve(args.mock, args.fixture, &static_config);
    let services = config::build_service_manager(&service_name, &source)?;

    let mut properties = HardwareProperties::new(&service_name);
    if properties.init(&services) {
        info!("Connected to thermal service '{}'", service_name);
    } else {
        warn!("Thermal service unavailable, queries will return empty results");
    }

    let app_state = AppState::new(properties, source == ThermalSource::Demo);
    let app = api::create_router(app_state);

    info!("Starting server on {}", bind_addr);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    info!("hwprops API Server listening on {}", bind_addr);
    info!("Server ready!");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Resolve the listen address; flags override the static config
fn bind_address(bind: Option<String>, port: Option<u16>, config: &StaticConfig) -> String {
    let host = bind.unwrap_or_else(|| config.server.hostname.clone());
    let port = port.unwrap_or(config.server.port);
    format!("{}:{}", host, port)
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down gracefully...");
        },
        _ = terminate => {
            info!("Received SIGTERM, shutting down gracefully...");
        },
    }
}

/// Initialize tracing subscriber for logging
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
