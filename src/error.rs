//! Error handling for pipeline runs.
//!
//! Only conditions that make a whole run impossible are errors. Per-record
//! validation failures are routed to quarantine and never surface here.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Missing input: {path}")]
    InputNotFound { path: PathBuf },

    #[error("Malformed record in {path} at line {line}: {reason}")]
    MalformedRecord {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Failed to write output {path}: {reason}")]
    OutputFailed { path: PathBuf, reason: String },
}

impl PipelineError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an output failure for a specific artifact
    pub fn output_failed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::OutputFailed {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// True when the run aborted because a required input was absent
    pub fn is_missing_input(&self) -> bool {
        matches!(self, Self::InputNotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
