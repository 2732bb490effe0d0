//! Job board backend server
//!
//! Entry point: configuration loading, store connection and HTTP server startup.

use std::sync::Arc;

use clap::Parser;
use jobboard_backend::service::FallbackPolicy;
use jobboard_backend::state::AppState;
use jobboard_db_connection::sanitize_database_url;
use tokio::net::TcpListener;

mod cli;
mod config_helpers;
mod tracing_setup;

use cli::CliArgs;
use config_helpers::{database_config_from_config, parse_bind_address, store_from_config};
use tracing_setup::install_tracing_from_config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    eprintln!("[STARTUP] Job board backend starting...");
    let args = CliArgs::parse();

    eprintln!("[STARTUP] Loading config from: {:?}", args.config_path);
    let config = load_config(args.config_path.as_deref())?;
    eprintln!("[STARTUP] Config loaded successfully");

    eprintln!("[STARTUP] Initializing tracing...");
    install_tracing_from_config(&config.logging);
    eprintln!("[STARTUP] Tracing initialized");

    // Connect the store; an unreachable store leaves the server in degraded mode.
    eprintln!("[STARTUP] Connecting document store...");
    let store = store_from_config(&config);
    if config.database.driver == "sqlite" {
        let db_cfg = database_config_from_config(&config);
        tracing::info!(
            db_url = %sanitize_database_url(&db_cfg.url),
            db_max_connections = %db_cfg.max_connections,
            "database configuration"
        );
    }
    match store.connect().await {
        Ok(()) => eprintln!("[STARTUP] Document store connected ({})", store.backend()),
        Err(err) => {
            eprintln!("[STARTUP] WARNING: document store unavailable: {err}");
            tracing::warn!(error = %err, store = store.backend(), "starting without a document store");
        }
    }

    let policy = FallbackPolicy::from(&config.listings);
    tracing::info!(
        fallback_on_empty = policy.on_empty,
        fallback_on_error = policy.on_error,
        "listing fallback policy"
    );
    let state = Arc::new(AppState::new(store.clone(), policy));

    eprintln!("[STARTUP] Building application router...");
    let app = jobboard_backend::build_router(state);
    eprintln!("[STARTUP] Router built successfully");

    let addr = parse_bind_address(&config.server.host, config.server.port);
    eprintln!("[STARTUP] Binding to {addr}");
    let listener = TcpListener::bind(addr).await?;
    eprintln!("[STARTUP] ✓ Server listening on {addr}");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close().await;
    tracing::info!("server stopped");
    Ok(())
}

/// Load configuration from file or defaults, then validate it.
fn load_config(path: Option<&str>) -> anyhow::Result<jobboard_config::Config> {
    let config = jobboard_config::load_config(path).map_err(|e| {
        eprintln!("failed to load configuration: {e}");
        anyhow::anyhow!(e.to_string())
    })?;
    jobboard_config::validate_config(&config).map_err(|e| {
        eprintln!("invalid configuration: {e}");
        anyhow::anyhow!(e.to_string())
    })?;
    Ok(config)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
