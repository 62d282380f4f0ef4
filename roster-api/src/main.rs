//! # Roster API Server
//!
//! HTTP API for the `users` and `items` resources.
//!
//! Start-up order:
//! 1. Load configuration from the environment (`.env` honoured)
//! 2. Initialize tracing
//! 3. Connect and migrate the selected stores; any failure exits non-zero
//! 4. Serve until Ctrl-C / SIGTERM, then close the SQL pool
//!
//! ## Usage
//!
//! ```bash
//! USERS_BACKEND=sql cargo run -p roster-api
//! ```

use anyhow::Context;
use roster_api::{
    app::{build_router, AppState},
    bootstrap,
    config::Config,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("failed to load configuration")?;
    bootstrap::init_tracing(config.log_format);

    tracing::info!(
        "Roster API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let stores = bootstrap::connect_stores(&config).await.map_err(|e| {
        tracing::error!("Startup failed: {:#}", e);
        e
    })?;

    let bind_address = config.bind_address();
    let state = AppState::new(stores.users.clone(), stores.items.clone(), config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("failed to bind {}", bind_address))?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    stores.close().await;
    tracing::info!("Shutdown complete");

    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on Unix
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
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

    tracing::info!("Shutdown signal received, draining connections...");
}
