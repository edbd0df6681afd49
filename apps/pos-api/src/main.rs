//! # Toko POS API server binary
//!
//! Wires configuration, the database pool, and the axum router together,
//! then serves until interrupted.

use std::time::Duration;

use tracing::info;
use tracing_subscriber::EnvFilter;

use pos_api::{routes, AppState, Config};
use toko_db::{Database, DbConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing; RUST_LOG overrides the default filter.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "info,sqlx=warn".into()),
        )
        .init();

    info!("Starting Toko POS API server...");

    // Load configuration
    let config = Config::load()?;
    info!(
        port = config.port,
        database_path = %config.database_path,
        "Configuration loaded"
    );

    // Ensure the database directory exists before SQLite opens the file.
    if let Some(parent) = std::path::Path::new(&config.database_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    // Connect to the database and run migrations
    let db_config = DbConfig::new(&config.database_path)
        .max_connections(config.db_max_connections)
        .busy_timeout(Duration::from_millis(config.db_busy_timeout_ms));
    let db = Database::new(db_config).await?;
    info!("Connected to SQLite, migrations applied");

    // Shared state + router
    let state = AppState::new(db, Duration::from_secs(config.category_cache_ttl_secs));
    let app = routes::router(state);

    // Serve
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    info!(addr = %listener.local_addr()?, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl-C (or SIGTERM on Unix), letting in-flight requests
/// finish. Any checkout transaction cut off mid-flight rolls back.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
