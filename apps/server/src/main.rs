//! # Mealcart Server
//!
//! HTTP API server for browsing the catalog and applying recipes to carts.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Mealcart Server                                  │
//! │                                                                         │
//! │  Client ───► HTTP (axum) ───► Services ───► mealcart-core (merge)     │
//! │                                  │                                      │
//! │                                  ▼                                      │
//! │                            mealcart-db ───► SQLite                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod dto;
mod error;
mod routes;
mod services;
mod state;

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;
use crate::state::AppState;
use mealcart_db::{Database, DbConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing; RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("Starting Mealcart server...");

    // Load configuration
    let config = ServerConfig::load()?;
    info!(
        port = config.http_port,
        database_path = %config.database_path,
        "Configuration loaded"
    );

    // Connect to database (runs migrations unless disabled)
    let db_config = DbConfig::new(&config.database_path).run_migrations(config.run_migrations);
    let db = Database::new(db_config).await?;
    info!("Connected to SQLite");

    // Create shared state
    let state = Arc::new(AppState::new(db));

    // Build the router
    let app = routes::router(state);

    // Bind the listener
    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr).await?;
    info!(addr = %addr, "HTTP server started");

    // Start server
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
