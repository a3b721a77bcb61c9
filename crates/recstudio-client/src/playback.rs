//! Playback view model: fetch the listing once, hold a single selection.

use async_trait::async_trait;
use tracing::error;

use recstudio_core::error::AppError;
use recstudio_core::recording::Recording;
use recstudio_core::result::AppResult;

/// User-facing message shown when the listing cannot be loaded.
const LOAD_FAILED_MESSAGE: &str = "Failed to load recordings. Please try again later.";

/// Source of the recording listing.
#[async_trait]
pub trait RecordingsGateway: Send + Sync {
    /// Fetch all recordings, newest first.
    async fn fetch_recordings(&self) -> AppResult<Vec<Recording>>;
}

/// HTTP implementation of [`RecordingsGateway`] speaking to
/// `GET /api/recordings`.
#[derive(Debug, Clone)]
pub struct HttpRecordingsGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRecordingsGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl RecordingsGateway for HttpRecordingsGateway {
    async fn fetch_recordings(&self) -> AppResult<Vec<Recording>> {
        let response = self
            .client
            .get(format!("{}/api/recordings", self.base_url))
            .send()
            .await
            .map_err(|e| AppError::network(format!("Listing request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(AppError::network(format!(
                "Listing failed with status {}",
                response.status()
            )));
        }

        response
            .json::<Vec<Recording>>()
            .await
            .map_err(|e| AppError::network(format!("Invalid listing response: {e}")))
    }
}

/// State of the playback view: the listing is fetched once on entry, the
/// user picks one entry, and the selection streams/downloads via its
/// direct URL. No caching beyond the single fetch, no auto-refresh; a
/// failed fetch offers a manual retry that reloads the whole view.
#[derive(Debug)]
pub struct PlaybackView<G: RecordingsGateway> {
    gateway: G,
    recordings: Vec<Recording>,
    selected: Option<usize>,
    error: Option<String>,
    loading: bool,
}

impl<G: RecordingsGateway> PlaybackView<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            recordings: Vec::new(),
            selected: None,
            error: None,
            loading: true,
        }
    }

    /// Fetch the listing (view entry). Clears any previous state first.
    pub async fn load(&mut self) {
        self.loading = true;
        self.error = None;
        self.selected = None;
        self.recordings.clear();

        match self.gateway.fetch_recordings().await {
            Ok(recordings) => self.recordings = recordings,
            Err(e) => {
                error!(error = %e, "Failed to fetch recordings");
                self.error = Some(LOAD_FAILED_MESSAGE.to_string());
            }
        }

        self.loading = false;
    }

    /// Manual "try again": reloads the entire view.
    pub async fn retry(&mut self) {
        self.load().await;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn recordings(&self) -> &[Recording] {
        &self.recordings
    }

    /// Select a recording by derived id. Returns whether a matching entry
    /// exists.
    pub fn select(&mut self, id: &str) -> bool {
        self.selected = self.recordings.iter().position(|r| r.id == id);
        self.selected.is_some()
    }

    pub fn selected(&self) -> Option<&Recording> {
        self.selected.and_then(|i| self.recordings.get(i))
    }

    /// Direct media URL of the selection, used for both streaming and
    /// download.
    pub fn selected_url(&self) -> Option<&str> {
        self.selected().map(|r| r.url.as_str())
    }
}
