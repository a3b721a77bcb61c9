//! Recording upload handler.

use axum::Json;
use axum::extract::{Multipart, State};
use bytes::Bytes;
use tracing::info;

use recstudio_core::error::AppError;
use recstudio_core::recording::{self, UPLOAD_FIELD, UploadReceipt};

use crate::error::ApiError;
use crate::state::AppState;

/// POST /api/upload — accept exactly one file under the `recording` field.
///
/// The stored name is derived from the upload time; the client's filename
/// contributes only its extension. Content is accepted as-is, unvalidated.
pub async fn upload_recording(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadReceipt>, ApiError> {
    let mut file: Option<(String, Bytes)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Malformed multipart request: {e}")))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let original_name = field.file_name().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::validation(format!("Failed to read uploaded file: {e}")))?;
        file = Some((original_name, data));
        break;
    }

    let Some((original_name, data)) = file else {
        return Err(AppError::validation("No file uploaded").into());
    };

    let filename = state
        .store
        .put(data, recording::file_extension(&original_name))
        .await?;

    info!(%filename, "Recording uploaded");

    let path = recording::public_url(&filename);
    Ok(Json(UploadReceipt {
        message: "File uploaded successfully".to_string(),
        filename,
        path,
    }))
}
