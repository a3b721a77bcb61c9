//! Upload client: one multipart POST of a finalized recording with
//! progress reporting.
//!
//! The upload is all-or-nothing; there is no resumable protocol and no
//! cancellation once the request is in flight. On failure the caller
//! surfaces a retryable message — the chunks were only ever buffered in
//! memory, so the user must re-record.

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use bytes::Bytes;
use futures::{Stream, StreamExt};
use tracing::info;

use recstudio_core::error::AppError;
use recstudio_core::recording::{UPLOAD_FIELD, UploadReceipt};
use recstudio_core::result::AppResult;

use crate::session::SessionId;

/// Window size used to stream the blob so progress events fire while the
/// body is being sent.
const PROGRESS_WINDOW_BYTES: usize = 64 * 1024;

/// Bytes sent so far out of the total body size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadProgress {
    pub sent_bytes: u64,
    pub total_bytes: u64,
}

impl UploadProgress {
    /// Completion as a rounded integer percentage.
    pub fn percent(&self) -> u8 {
        if self.total_bytes == 0 {
            return 100;
        }
        ((self.sent_bytes * 100 + self.total_bytes / 2) / self.total_bytes) as u8
    }
}

/// Uploads finalized recordings to the RecStudio server.
#[derive(Debug, Clone)]
pub struct RecordingUploader {
    client: reqwest::Client,
    base_url: String,
}

impl RecordingUploader {
    /// Create an uploader targeting the given server base URL
    /// (e.g. `http://localhost:5000`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Upload one finalized blob under the session's name.
    ///
    /// `on_progress` observes bytes-sent/bytes-total after each streamed
    /// window. Returns the server's receipt on success; on failure the
    /// error message is the server's `error` field when one was returned.
    pub async fn upload<F>(
        &self,
        blob: Bytes,
        session: &SessionId,
        on_progress: F,
    ) -> AppResult<UploadReceipt>
    where
        F: Fn(UploadProgress) + Send + Sync + 'static,
    {
        let total = blob.len() as u64;
        let body = reqwest::Body::wrap_stream(progress_stream(blob, Arc::new(on_progress)));

        let part = reqwest::multipart::Part::stream_with_length(body, total)
            .file_name(format!("recording_{session}.webm"))
            .mime_str("video/webm")
            .map_err(|e| AppError::internal(format!("Invalid upload MIME type: {e}")))?;
        let form = reqwest::multipart::Form::new().part(UPLOAD_FIELD, part);

        let response = self
            .client
            .post(format!("{}/api/upload", self.base_url))
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::network(format!("Upload request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<serde_json::Value>()
                .await
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
                .unwrap_or_else(|| format!("Upload failed with status {status}"));
            return Err(AppError::network(message));
        }

        let receipt = response
            .json::<UploadReceipt>()
            .await
            .map_err(|e| AppError::network(format!("Invalid upload response: {e}")))?;

        info!(filename = %receipt.filename, "Upload complete");
        Ok(receipt)
    }
}

/// Split the blob into windows and report cumulative progress as each
/// window is yielded to the transport.
fn progress_stream<F>(
    blob: Bytes,
    on_progress: Arc<F>,
) -> impl Stream<Item = Result<Bytes, io::Error>>
where
    F: Fn(UploadProgress) + Send + Sync + 'static,
{
    let total = blob.len() as u64;
    let sent = Arc::new(AtomicU64::new(0));

    futures::stream::iter(windows(blob)).map(move |window| {
        let sent_bytes = sent.fetch_add(window.len() as u64, Ordering::SeqCst) + window.len() as u64;
        on_progress(UploadProgress {
            sent_bytes,
            total_bytes: total,
        });
        Ok(window)
    })
}

/// Zero-copy windows of at most [`PROGRESS_WINDOW_BYTES`] each.
fn windows(blob: Bytes) -> Vec<Bytes> {
    let mut out = Vec::with_capacity(blob.len() / PROGRESS_WINDOW_BYTES + 1);
    let mut offset = 0;
    while offset < blob.len() {
        let end = (offset + PROGRESS_WINDOW_BYTES).min(blob.len());
        out.push(blob.slice(offset..end));
        offset = end;
    }
    out
}
