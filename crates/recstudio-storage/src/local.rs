//! Local filesystem recording store.

use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use tokio::fs;
use tracing::debug;

use recstudio_core::error::{AppError, ErrorKind};
use recstudio_core::recording::{self, Recording};
use recstudio_core::result::AppResult;
use recstudio_core::traits::store::RecordingStore;

/// Recording store backed by a flat local directory.
///
/// The directory is never locked; concurrent writers rely on the OS's
/// atomic file-create semantics and on timestamp uniqueness in the
/// generated names.
#[derive(Debug, Clone)]
pub struct LocalRecordingStore {
    /// Directory holding all uploaded recordings.
    root: PathBuf,
}

impl LocalRecordingStore {
    /// Create a new store rooted at the given directory, creating it if
    /// absent.
    pub async fn new(upload_dir: &str) -> AppResult<Self> {
        let root = PathBuf::from(upload_dir);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create upload directory: {}", root.display()),
                e,
            )
        })?;
        Ok(Self { root })
    }

    /// The directory this store writes into.
    pub fn root(&self) -> &PathBuf {
        &self.root
    }
}

#[async_trait]
impl RecordingStore for LocalRecordingStore {
    async fn put(&self, data: Bytes, original_ext: &str) -> AppResult<String> {
        let filename = recording::storage_filename(Utc::now().timestamp_millis(), original_ext);

        // The directory may have been removed since construction.
        fs::create_dir_all(&self.root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create upload directory: {}", self.root.display()),
                e,
            )
        })?;

        let path = self.root.join(&filename);
        fs::write(&path, &data).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write recording: {filename}"),
                e,
            )
        })?;

        debug!(filename, bytes = data.len(), "Stored recording");
        Ok(filename)
    }

    async fn list(&self) -> AppResult<Vec<Recording>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut dir = fs::read_dir(&self.root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to list upload directory: {}", self.root.display()),
                e,
            )
        })?;

        let now = Utc::now();
        let mut recordings = Vec::new();
        while let Some(entry) = dir.next_entry().await.map_err(|e| {
            AppError::with_source(ErrorKind::Storage, "Failed to read directory entry", e)
        })? {
            let file_type = entry.file_type().await.map_err(|e| {
                AppError::with_source(ErrorKind::Storage, "Failed to read entry type", e)
            })?;
            if !file_type.is_file() {
                continue;
            }

            let name = entry.file_name().to_string_lossy().to_string();
            if !recording::is_media_file(&name) {
                continue;
            }

            recordings.push(Recording::from_filename(&name, now));
        }

        recording::sort_newest_first(&mut recordings);
        Ok(recordings)
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(self.root.exists() && self.root.is_dir())
    }
}
