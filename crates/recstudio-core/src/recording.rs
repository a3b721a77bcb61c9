//! The `Recording` wire model and the filename-derivation functions.
//!
//! A recording has no metadata store: the filename on disk is the single
//! source of truth, and `id`, `date`, and `url` are recomputed from it on
//! every listing. The derivation lives here as pure functions so a real
//! index could replace it later without changing the API contract.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Filename prefix for stored recordings.
pub const FILENAME_PREFIX: &str = "recording_";

/// Multipart form field carrying the recording blob.
pub const UPLOAD_FIELD: &str = "recording";

/// Public URL prefix under which stored recordings are served.
pub const PUBLIC_PATH: &str = "/uploads";

/// Extensions recognized as media files. Anything else in the upload
/// directory is invisible to the listing but remains on disk.
pub const MEDIA_EXTENSIONS: [&str; 5] = [".webm", ".mp4", ".mpeg", ".ogg", ".wav"];

/// A recording as returned by `GET /api/recordings`.
///
/// Every field other than `filename` is derived, not stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recording {
    /// Derived identifier: the timestamp segment of the filename, or the
    /// full filename when no such segment exists.
    pub id: String,
    /// The name of the file on disk.
    pub filename: String,
    /// Public URL of the file.
    pub url: String,
    /// Upload timestamp parsed out of the filename, or the listing time
    /// for filenames that carry no parseable timestamp.
    pub date: DateTime<Utc>,
}

impl Recording {
    /// Project a directory entry into a `Recording`.
    ///
    /// `now` is the listing-request time, used as the fallback date for
    /// filenames without a parseable timestamp segment. A malformed name
    /// therefore changes its sort position on every call; callers must not
    /// "fix" this by caching the projection.
    pub fn from_filename(filename: &str, now: DateTime<Utc>) -> Self {
        let id = derived_id(filename);
        let date = id
            .parse::<i64>()
            .ok()
            .and_then(DateTime::from_timestamp_millis)
            .unwrap_or(now);

        Self {
            id: id.to_string(),
            url: public_url(filename),
            filename: filename.to_string(),
            date,
        }
    }
}

/// Response body of a successful upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadReceipt {
    /// Human-readable confirmation.
    pub message: String,
    /// Server-assigned filename.
    pub filename: String,
    /// Public relative URL of the stored file.
    pub path: String,
}

/// Build the storage filename for an upload received at `timestamp_millis`.
///
/// Two uploads within the same millisecond produce the same name and the
/// later write wins; collision avoidance relies on timestamp uniqueness.
pub fn storage_filename(timestamp_millis: i64, original_ext: &str) -> String {
    format!("{FILENAME_PREFIX}{timestamp_millis}{original_ext}")
}

/// Extract the identifier segment of a filename: the substring between the
/// first `_` and the following `.`. Falls back to the full filename when
/// the segment is missing or empty.
pub fn derived_id(filename: &str) -> &str {
    filename
        .split('_')
        .nth(1)
        .and_then(|segment| segment.split('.').next())
        .filter(|id| !id.is_empty())
        .unwrap_or(filename)
}

/// The extension of a filename including the leading dot, or `""` when the
/// name has none. A leading dot alone does not count as an extension.
pub fn file_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) if idx > 0 => &name[idx..],
        _ => "",
    }
}

/// Whether a directory entry is a recognized media file (case-insensitive).
pub fn is_media_file(name: &str) -> bool {
    let ext = file_extension(name).to_lowercase();
    MEDIA_EXTENSIONS.contains(&ext.as_str())
}

/// Public URL of a stored recording.
pub fn public_url(filename: &str) -> String {
    format!("{PUBLIC_PATH}/{filename}")
}

/// Sort recordings newest-first by derived date.
///
/// The sort is stable, so entries with equal dates keep directory order.
pub fn sort_newest_first(recordings: &mut [Recording]) {
    recordings.sort_by(|a, b| b.date.cmp(&a.date));
}
