//! Zayra ECG API server

use clap::Parser;
use std::process;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use zayra_adapter_in_memory::InMemoryStore;
use zayra_core::prelude::*;
use zayra_http::HttpServer;

mod cli;
mod config;

use cli::Cli;
use config::ZayraConfig;

#[tokio::main]
async fn main() {
    let args = Cli::parse();

    // Initialize logging; RUST_LOG takes precedence over -v
    let default_level = match args.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    // Load configuration
    let config = match ZayraConfig::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Override config with CLI args
    let config = config.with_overrides(&args);

    if let Err(e) = run(config).await {
        error!("Server failed: {}", e);
        process::exit(1);
    }
}

async fn run(config: ZayraConfig) -> CoreResult<()> {
    let http_config = config.http_config()?;
    info!(
        "Starting {} v{} on {}",
        http_config.service_name,
        env!("CARGO_PKG_VERSION"),
        http_config.bind_address
    );

    let store: Arc<dyn RecordStore> = Arc::new(InMemoryStore::new());
    store.health_check().await?;

    HttpServer::new(http_config).serve(store, shutdown_signal()).await?;
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on Unix
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, draining connections");
}
