//! # recstudio-core
//!
//! Core crate for RecStudio. Contains the configuration schemas, the
//! `Recording` wire model with its filename-derivation functions, the
//! `RecordingStore` repository trait, and the unified error system.
//!
//! This crate has **no** internal dependencies on other RecStudio crates.

pub mod config;
pub mod error;
pub mod recording;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use recording::Recording;
pub use result::AppResult;
