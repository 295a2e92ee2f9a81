//! Common utilities shared across the workspace.
//!
//! This crate provides:
//! - Unified error handling with the `{"msg": ...}` HTTP error body
//! - Configuration structures loaded from the environment

pub mod config;
pub mod error;

pub use config::*;
pub use error::{AppError, AppResult, ErrorBody, OptionExt};
