//! Repository trait for recording storage backends.

use async_trait::async_trait;
use bytes::Bytes;

use crate::recording::Recording;
use crate::result::AppResult;

/// Trait for recording storage backends.
///
/// The upload directory is the database: there is no index or manifest, and
/// the listing is a projection of directory entries. The trait is defined
/// here in `recstudio-core` and implemented in `recstudio-storage` so the
/// backend (local disk, object store) can be substituted without touching
/// the HTTP layer.
#[async_trait]
pub trait RecordingStore: Send + Sync + std::fmt::Debug + 'static {
    /// Persist one finalized recording and return the assigned filename.
    ///
    /// The name is `recording_<currentUnixMillis><original_ext>`; a second
    /// upload within the same millisecond overwrites the first.
    async fn put(&self, data: Bytes, original_ext: &str) -> AppResult<String>;

    /// List stored recordings, newest first.
    ///
    /// Non-media files are skipped. Returns an empty vec when the upload
    /// directory is empty or missing; errors only when the directory exists
    /// but cannot be read.
    async fn list(&self) -> AppResult<Vec<Recording>>;

    /// Check whether the backend is ready to accept uploads.
    async fn health_check(&self) -> AppResult<bool>;
}
