//! Recording listing handler.

use axum::Json;
use axum::extract::State;
use tracing::error;

use recstudio_core::error::AppError;
use recstudio_core::recording::Recording;

use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/recordings — all stored recordings, newest first.
///
/// `id` and `date` are re-derived from the filenames on every call; there
/// is no index to consult.
pub async fn list_recordings(
    State(state): State<AppState>,
) -> Result<Json<Vec<Recording>>, ApiError> {
    let recordings = state.store.list().await.map_err(|e| {
        error!(error = %e, "Error reading uploads directory");
        AppError::storage("Failed to read recordings directory")
    })?;

    Ok(Json(recordings))
}
