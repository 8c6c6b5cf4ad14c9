//! Error types for pixelflow-pipeline

use thiserror::Error;

/// Errors that can occur while applying a pipeline or running a batch
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A filter operation failed
    #[error("operation error: {0}")]
    Ops(#[from] pixelflow_ops::OpsError),

    /// Loading or saving an image failed
    #[error("i/o error: {0}")]
    Io(#[from] pixelflow_io::IoError),
}

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;
