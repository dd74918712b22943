//! Error types for QuoteDesk.

use thiserror::Error;

/// Errors raised while loading or validating QuoteDesk inputs.
///
/// The pricing path itself never returns these; it degrades to zero-valued
/// quotes and reports diagnostics instead.
#[derive(Error, Debug)]
pub enum QuoteDeskError {
    /// Configuration snapshot could not be parsed.
    #[error("Snapshot parse error: {0}")]
    SnapshotParse(#[from] serde_json::Error),

    /// Snapshot could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Caller-supplied input is malformed.
    #[error("Invalid {field}: {message}")]
    InvalidInput { field: String, message: String },
}

impl QuoteDeskError {
    /// Get a stable error code.
    pub fn error_code(&self) -> &'static str {
        match self {
            QuoteDeskError::SnapshotParse(_) => "SNAPSHOT_PARSE",
            QuoteDeskError::Io(_) => "IO_ERROR",
            QuoteDeskError::Configuration(_) => "CONFIGURATION_ERROR",
            QuoteDeskError::InvalidInput { .. } => "INVALID_INPUT",
        }
    }
}

/// Result type alias for QuoteDesk operations.
pub type Result<T> = std::result::Result<T, QuoteDeskError>;
