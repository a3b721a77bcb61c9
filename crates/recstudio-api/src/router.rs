//! Route definitions for the RecStudio HTTP API.
//!
//! API routes are mounted under `/api`; uploaded recordings are served
//! statically (with byte-range support) under `/uploads`. When a frontend
//! directory is configured, unmatched routes fall back to the SPA.

use std::path::Path;
use std::time::Duration;

use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use recstudio_core::config::server::CorsConfig;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
///
/// Receives the fully-constructed `AppState` and threads it through
/// every route via `.with_state(state)`.
pub fn build_router(state: AppState) -> Router {
    let max_upload = state.config.storage.max_upload_size_bytes as usize;

    let api_routes = Router::new()
        .route("/upload", post(handlers::upload::upload_recording))
        .route("/recordings", get(handlers::recordings::list_recordings))
        .route("/health", get(handlers::health::health_check));

    let mut router = Router::new()
        .nest("/api", api_routes)
        .nest_service(
            "/uploads",
            ServeDir::new(&state.config.storage.upload_dir),
        );

    if let Some(frontend_dir) = &state.config.server.frontend_dir {
        let index = Path::new(frontend_dir).join("index.html");
        router = router.fallback_service(
            ServeDir::new(frontend_dir).not_found_service(ServeFile::new(index)),
        );
    }

    router
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(&state.config.server.cors))
        .with_state(state)
}

/// Build CORS layer from configuration.
fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    let mut cors = CorsLayer::new().allow_headers(Any);

    if config.allowed_origins.iter().any(|o| o == "*") {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    let methods: Vec<Method> = config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();

    cors.allow_methods(methods)
        .max_age(Duration::from_secs(config.max_age_seconds))
}
