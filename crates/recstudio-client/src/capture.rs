//! Capture state machine: `idle → recording → idle`, with a terminal
//! failed state.
//!
//! The session is generic over host capability traits (device acquisition,
//! stream, recorder) so the lifecycle rules can be tested without a real
//! capture device. The host delivers encoded chunks and 1-second elapsed
//! ticks while recording; stopping concatenates the accumulated chunks into
//! one finalized blob for upload. Chunks live in memory only — a failed
//! upload loses the recording.

use async_trait::async_trait;
use bytes::Bytes;
use tracing::warn;

use recstudio_core::result::AppResult;

/// Preferred high-efficiency recorder encoding.
pub const PREFERRED_MIME_TYPE: &str = "video/webm;codecs=vp9,opus";

/// Chunk delivery cadence in milliseconds.
pub const TIMESLICE_MILLIS: u32 = 1_000;

/// Options passed to the host when starting a recorder.
#[derive(Debug, Clone)]
pub struct RecorderOptions {
    /// Requested encoding, or `None` for the platform default.
    pub mime_type: Option<String>,
    /// Chunk delivery cadence in milliseconds.
    pub timeslice_millis: u32,
}

/// Host capability: acquire a live audio+video capture stream.
#[async_trait]
pub trait MediaDevices {
    type Stream: MediaStream;

    async fn acquire(&self) -> AppResult<Self::Stream>;
}

/// A live capture stream obtained from [`MediaDevices::acquire`].
pub trait MediaStream {
    type Recorder: MediaRecorder;

    /// Start a recorder on this stream with the given options.
    fn start_recorder(&mut self, options: RecorderOptions) -> AppResult<Self::Recorder>;

    /// Stop all tracks of the stream.
    fn shutdown(&mut self);
}

/// An active recorder producing chunks at the configured cadence.
pub trait MediaRecorder {
    /// Stop the recorder; no further chunks will be delivered.
    fn stop(&mut self);
}

/// Current state of a capture session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureState {
    /// Not recording; a stream may or may not be acquired.
    Idle,
    /// Actively accumulating chunks.
    Recording,
    /// Terminal failure surfaced to the user; no automatic retry.
    Failed(String),
}

/// A finalized recording, ready for upload.
#[derive(Debug, Clone)]
pub struct FinishedRecording {
    /// All chunks concatenated in delivery order.
    pub blob: Bytes,
    /// Elapsed seconds counted while recording.
    pub duration_seconds: u32,
}

/// The capture session state machine.
///
/// At most one recording is active per session. Starting without an
/// acquired stream and stopping without an active recorder are both
/// no-ops.
pub struct CaptureSession<D: MediaDevices> {
    devices: D,
    stream: Option<D::Stream>,
    recorder: Option<<D::Stream as MediaStream>::Recorder>,
    chunks: Vec<Bytes>,
    elapsed_seconds: u32,
    state: CaptureState,
}

impl<D: MediaDevices> CaptureSession<D> {
    /// Create a session with no acquired stream.
    pub fn new(devices: D) -> Self {
        Self {
            devices,
            stream: None,
            recorder: None,
            chunks: Vec::new(),
            elapsed_seconds: 0,
            state: CaptureState::Idle,
        }
    }

    /// Acquire the capture stream. On failure the session enters the
    /// terminal failed state; the user must reload to try again.
    pub async fn initialize(&mut self) {
        match self.devices.acquire().await {
            Ok(stream) => self.stream = Some(stream),
            Err(e) => {
                warn!(error = %e, "Failed to acquire capture stream");
                self.state = CaptureState::Failed(
                    "Could not access camera or microphone. Please check your permissions."
                        .to_string(),
                );
            }
        }
    }

    pub fn state(&self) -> &CaptureState {
        &self.state
    }

    pub fn is_recording(&self) -> bool {
        self.state == CaptureState::Recording
    }

    /// Seconds counted since the current (or last) recording started.
    pub fn elapsed_seconds(&self) -> u32 {
        self.elapsed_seconds
    }

    /// Transition `idle → recording`.
    ///
    /// No-op without an acquired stream, while already recording, or after
    /// a terminal failure. Tries the preferred encoding first, then the
    /// platform default; if both fail the session fails terminally.
    pub fn start(&mut self) {
        if self.state != CaptureState::Idle {
            return;
        }
        let Some(stream) = self.stream.as_mut() else {
            return;
        };

        self.chunks.clear();

        let preferred = RecorderOptions {
            mime_type: Some(PREFERRED_MIME_TYPE.to_string()),
            timeslice_millis: TIMESLICE_MILLIS,
        };
        let recorder = stream.start_recorder(preferred).or_else(|e| {
            warn!(error = %e, "Preferred encoding unavailable, falling back to default");
            stream.start_recorder(RecorderOptions {
                mime_type: None,
                timeslice_millis: TIMESLICE_MILLIS,
            })
        });

        match recorder {
            Ok(recorder) => {
                self.recorder = Some(recorder);
                self.elapsed_seconds = 0;
                self.state = CaptureState::Recording;
            }
            Err(e) => {
                warn!(error = %e, "Recorder initialization failed");
                self.state = CaptureState::Failed(
                    "Recording is not supported in this environment".to_string(),
                );
            }
        }
    }

    /// Deliver one encoded chunk from the host. Empty chunks are ignored;
    /// chunks arriving outside of recording are dropped.
    pub fn push_chunk(&mut self, chunk: Bytes) {
        if self.state == CaptureState::Recording && !chunk.is_empty() {
            self.chunks.push(chunk);
        }
    }

    /// Advance the 1-second elapsed counter. Driven by the host timer;
    /// only counts while recording.
    pub fn tick(&mut self) {
        if self.state == CaptureState::Recording {
            self.elapsed_seconds += 1;
        }
    }

    /// Transition `recording → idle`: stop the recorder and concatenate
    /// the accumulated chunks into one finalized blob.
    ///
    /// No-op (returns `None`) when no recorder is active.
    pub fn stop(&mut self) -> Option<FinishedRecording> {
        let mut recorder = self.recorder.take()?;
        recorder.stop();
        self.state = CaptureState::Idle;

        let total: usize = self.chunks.iter().map(Bytes::len).sum();
        let mut blob = Vec::with_capacity(total);
        for chunk in self.chunks.drain(..) {
            blob.extend_from_slice(&chunk);
        }

        Some(FinishedRecording {
            blob: Bytes::from(blob),
            duration_seconds: self.elapsed_seconds,
        })
    }

    /// Release the capture stream (view teardown). Stops an active
    /// recording first; its chunks are discarded.
    pub fn shutdown(&mut self) {
        if let Some(mut recorder) = self.recorder.take() {
            recorder.stop();
        }
        if let Some(mut stream) = self.stream.take() {
            stream.shutdown();
        }
        self.chunks.clear();
        if self.state == CaptureState::Recording {
            self.state = CaptureState::Idle;
        }
    }
}
