//! # recstudio-api
//!
//! HTTP API layer for RecStudio built on Axum.
//!
//! Provides the upload and listing endpoints, static serving of uploaded
//! recordings, optional SPA hosting, and the `AppError` → response mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use app::run_server;
pub use router::build_router;
pub use state::AppState;
