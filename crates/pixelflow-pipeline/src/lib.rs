//! pixelflow-pipeline - Ordered filter pipelines and batch execution
//!
//! This crate provides the orchestration layer over the operation
//! library:
//!
//! - [`Operation`] - One named, parameterized transformation; the single
//!   dispatch point shared by preview, pipeline, and batch execution
//! - [`OperationKind`] / [`SliderSpec`] - Parameter ranges the UI layer
//!   uses to build its controls, and the slider-value mapping
//! - [`Pipeline`] - An ordered sequence of operations, applied as a
//!   left-to-right fold with atomic failure
//! - [`execute_batch`] - Applies one pipeline to many input files with
//!   per-item failure isolation and best-effort cancellation
//! - [`PreviewSink`] - The fire-and-forget display boundary implemented
//!   by the UI layer

pub mod batch;
mod error;
pub mod operation;
pub mod pipeline;

pub use batch::{
    BatchFailure, BatchReport, CancelToken, collect_inputs, execute_batch,
    execute_batch_with_cancel,
};
pub use error::{PipelineError, PipelineResult};
pub use operation::{Operation, OperationKind, SliderSpec};
pub use pipeline::Pipeline;

use pixelflow_core::PixelBuffer;

/// Display boundary for on-screen preview.
///
/// Implemented by the UI layer; the core hands over a finished buffer
/// and expects nothing back.
pub trait PreviewSink {
    /// Render the buffer. Fire-and-forget.
    fn display(&mut self, buffer: &PixelBuffer);
}
