//! # recstudio-client
//!
//! Client-side contracts for RecStudio. The capture state machine is
//! generic over host capability traits so the recording lifecycle can be
//! exercised without a real device; the upload client and the playback
//! gateway speak the server's HTTP API.

pub mod capture;
pub mod playback;
pub mod session;
pub mod upload;

pub use capture::CaptureSession;
pub use playback::PlaybackView;
pub use session::SessionId;
pub use upload::RecordingUploader;
