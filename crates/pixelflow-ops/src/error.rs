//! Error types for pixelflow-ops

use thiserror::Error;

/// Errors that can occur during filter operations
#[derive(Debug, Error)]
pub enum OpsError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] pixelflow_core::Error),

    /// Invalid operation parameter
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type for filter operations
pub type OpsResult<T> = Result<T, OpsError>;
