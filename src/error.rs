//! Error handling for svtool
//!
//! Every failure path of the pipeline maps to one `SvError` variant. Degenerate
//! but well-defined results (zero noise, infinite SNR) are not errors.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for svtool operations
pub type Result<T> = std::result::Result<T, SvError>;

/// Main error type for svtool operations
#[derive(Error, Debug)]
pub enum SvError {
    // Input Errors
    #[error("Unsupported mode: '{mode}' (expected 'sine' or 'square')")]
    UnsupportedMode { mode: String },

    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    // Signal Errors
    #[error("Not enough samples: got {len}, need at least {required}")]
    InsufficientSamples { len: usize, required: usize },

    #[error("Sequence length mismatch: clean has {clean}, noisy has {noisy}")]
    LengthMismatch { clean: usize, noisy: usize },

    // File Errors
    #[error("Directory creation failed: {path}: {source}")]
    DirectoryCreateError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}: {source}")]
    FileWriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read file: {path}: {source}")]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Report Errors
    #[error("Report schema mismatch: {reason}")]
    ReportSchema { reason: String },

    #[error("Report parse error on line {line}: {reason}")]
    ReportParse { line: usize, reason: String },

    // Plot Errors
    #[error("Plot rendering failed for {path}: {reason}")]
    Plot { path: PathBuf, reason: String },

    // I/O Errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization Errors
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SvError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            SvError::UnsupportedMode { .. } => "UNSUPPORTED_MODE",
            SvError::InvalidParameter { .. } => "INVALID_PARAMETER",
            SvError::InsufficientSamples { .. } => "INSUFFICIENT_SAMPLES",
            SvError::LengthMismatch { .. } => "LENGTH_MISMATCH",
            SvError::DirectoryCreateError { .. } => "DIRECTORY_CREATE_ERROR",
            SvError::FileWriteError { .. } => "FILE_WRITE_ERROR",
            SvError::FileReadError { .. } => "FILE_READ_ERROR",
            SvError::ReportSchema { .. } => "REPORT_SCHEMA",
            SvError::ReportParse { .. } => "REPORT_PARSE",
            SvError::Plot { .. } => "PLOT_ERROR",
            SvError::Io(_) => "IO_ERROR",
            SvError::Json(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Returns a user-friendly recovery suggestion, if one exists.
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            SvError::UnsupportedMode { .. } => Some("Use --mode sine or --mode square."),
            SvError::InvalidParameter { .. } => {
                Some("Frequency, duration and sample rate must be positive; noise must be >= 0.")
            }
            SvError::InsufficientSamples { .. } => {
                Some("Increase --duration or --fs so the waveform has at least two samples.")
            }
            SvError::DirectoryCreateError { .. } | SvError::FileWriteError { .. } => {
                Some("Check that --output-dir points to a writable location.")
            }
            SvError::ReportSchema { .. } => {
                Some("Move the existing report.csv aside; it was written with a different column layout.")
            }
            _ => None,
        }
    }
}
