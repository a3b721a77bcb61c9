//! RecStudio Server — browser recording studio backend.
//!
//! Main entry point: loads configuration, initializes tracing, and runs
//! the HTTP server.

use tracing_subscriber::{EnvFilter, fmt};

use recstudio_core::config::AppConfig;

#[tokio::main]
async fn main() {
    let env = std::env::var("RECSTUDIO_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!("Starting RecStudio v{} (env: {env})", env!("CARGO_PKG_VERSION"));

    if let Err(e) = recstudio_api::run_server(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}
