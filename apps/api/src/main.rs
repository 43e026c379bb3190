//! # Tally API Server
//!
//! Entry point: load configuration, open the store, serve HTTP until a
//! shutdown signal arrives, then close the pool.

use tally_api::{init_tracing, router, ApiConfig, AppState};
use tally_db::Database;
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    info!("Starting Tally API server...");

    // Load configuration
    let config = ApiConfig::load()?;
    info!(
        addr = %config.bind_addr,
        database = %config.database_path.display(),
        enforce_foreign_keys = config.enforce_foreign_keys,
        "Configuration loaded"
    );

    // Open the store (migrations run here)
    let db = Database::new(config.db_config()).await?;

    let app = router(AppState::new(db.clone()));

    let listener = TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "Starting HTTP server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(?e, "Failed to install Ctrl+C handler");
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
                error!(?e, "Failed to install SIGTERM handler");
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

    info!("Shutdown signal received, starting graceful shutdown...");
}
