//! Pixelflow - image filter pipeline engine
//!
//! Pixelflow loads raster images, applies chains of pixel-level
//! filters, and batch-processes folders of images. The filter set:
//!
//! - Grayscale conversion (BT.601)
//! - Histogram equalization
//! - Gaussian blur
//! - Laplacian sharpening
//! - Binary thresholding
//! - Morphological erosion
//!
//! # Example
//!
//! ```
//! use pixelflow::{Channels, Operation, Pipeline, PixelBuffer};
//!
//! let image = PixelBuffer::new(64, 64, Channels::Bgr).unwrap();
//!
//! let mut pipeline = Pipeline::new();
//! pipeline.append(Operation::Grayscale);
//! pipeline.append(Operation::GaussianBlur { kernel_size: 5 });
//! pipeline.append(Operation::Threshold { cutoff: 128 });
//!
//! let result = pipeline.apply(&image).unwrap();
//! assert_eq!(result.channels(), Channels::Gray);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use pixelflow_core::*;

// Re-export the orchestration surface
pub use pixelflow_pipeline::{
    BatchFailure, BatchReport, CancelToken, Operation, OperationKind, Pipeline, PipelineError,
    PipelineResult, PreviewSink, SliderSpec, collect_inputs, execute_batch,
    execute_batch_with_cancel,
};

// Re-export domain crates as modules to avoid name conflicts
pub use pixelflow_io as io;
pub use pixelflow_ops as ops;
