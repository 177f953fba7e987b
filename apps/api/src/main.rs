//! # Stockroom API
//!
//! REST server entry point.
//!
//! ## Startup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Server Startup                                 │
//! │                                                                         │
//! │  ApiConfig::load() ──► init tracing ──► Store::open(data_dir)          │
//! │                                               │                         │
//! │                                               ▼                         │
//! │  Ctrl+C / SIGTERM ──► graceful shutdown ◄── axum::serve(0.0.0.0:3000)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use anyhow::Context;
use stockroom_api::{build_router, ApiConfig, AppState};
use stockroom_store::{Store, StoreConfig};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration before logging so log_level can come from it
    let config = ApiConfig::load().context("failed to load configuration")?;
    init_tracing(&config.log_level);

    info!("Starting Stockroom API server...");
    info!(
        port = config.port,
        data_dir = %config.data_dir.display(),
        require_auth = config.require_auth,
        "Configuration loaded"
    );

    if config.uses_dev_secret() {
        warn!("Using the development JWT secret; set STOCKROOM_JWT_SECRET in production");
    }

    let addr = config.socket_addr()?;

    let store = Store::open(StoreConfig::new(&config.data_dir))
        .await
        .context("failed to open document store")?;
    info!("Document store ready");

    let app = build_router(AppState::new(store, config));

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber.
///
/// `RUST_LOG` wins over the configured default filter.
fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
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
