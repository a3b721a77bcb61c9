//! Application state shared across all handlers.

use std::sync::Arc;

use recstudio_core::config::AppConfig;
use recstudio_core::traits::store::RecordingStore;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. All fields are
/// `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Recording storage backend.
    pub store: Arc<dyn RecordingStore>,
}
