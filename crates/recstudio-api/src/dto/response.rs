//! Response DTOs.
//!
//! The upload receipt and recording listing bodies are the shared wire
//! models in `recstudio_core::recording`; only API-local shapes live here.

use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status.
    pub status: String,
    /// Server version.
    pub version: String,
    /// Storage backend status.
    pub storage: String,
}
