//! Error handling for WOD reduction operations.
//!
//! Provides error types with context for input discovery, cast parsing,
//! and output writing failures. Per-profile rejections (no data passing
//! QC, out-of-range targets, degenerate levels) are not errors: they are
//! ordinary skip outcomes handled inside the reduction loop.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WodError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Data directory not found: {path}")]
    DataDirNotFound { path: PathBuf },

    #[error("Invalid cast in file {path} near line {line}: {reason}")]
    InvalidCast {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("Processing failed for file {path}: {reason}")]
    ProcessingFailed { path: PathBuf, reason: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Invalid file pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("File discovery failed: {0}")]
    Glob(#[from] glob::GlobError),

    #[error("Worker task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl WodError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, WodError>;
