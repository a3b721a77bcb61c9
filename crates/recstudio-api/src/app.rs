//! Server bootstrap: wires storage + router and runs Axum with graceful
//! shutdown.

use std::sync::Arc;

use tracing::info;

use recstudio_core::config::AppConfig;
use recstudio_core::error::AppError;
use recstudio_storage::local::LocalRecordingStore;

use crate::router::build_router;
use crate::state::AppState;

/// Runs the RecStudio server with the given configuration.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    let store = LocalRecordingStore::new(&config.storage.upload_dir).await?;
    info!(upload_dir = %store.root().display(), "Upload directory ready");

    let state = AppState {
        config: Arc::new(config.clone()),
        store: Arc::new(store),
    };
    let app = build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    info!("RecStudio server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    info!("RecStudio server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
