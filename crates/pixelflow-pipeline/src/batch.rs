//! Batch execution: apply one pipeline to many input files
//!
//! Each input is loaded, run through the pipeline, and written under
//! the output directory with the input's file name. A failure on one
//! item is recorded and never aborts the rest of the batch; a failed
//! item writes nothing. Jobs share no mutable state, so the loop could
//! run jobs on independent workers without further locking; the
//! reference implementation is sequential.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{PipelineError, PipelineResult};
use crate::pipeline::Pipeline;
use pixelflow_core::PixelBuffer;

/// File extensions accepted by [`collect_inputs`].
const INPUT_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "bmp"];

/// Cooperative cancellation flag for a running batch.
///
/// Checked between jobs only; a job that has started runs to
/// completion. Clones share the flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a token in the not-cancelled state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation before the next job starts.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// One failed batch item: which input, and why.
#[derive(Debug)]
pub struct BatchFailure {
    /// The input path that failed
    pub input: PathBuf,
    /// The load, filter, or save error
    pub error: PipelineError,
}

/// Outcome of a batch run, one entry per processed input, in input order.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Inputs processed and written successfully
    pub succeeded: Vec<PathBuf>,
    /// Inputs that failed, with the reason
    pub failed: Vec<BatchFailure>,
    /// Whether the run stopped early on a cancellation request
    pub cancelled: bool,
}

impl BatchReport {
    /// Number of inputs that produced an outcome.
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    /// Whether every processed input succeeded.
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Apply `pipeline` to every input file, writing results to `output_dir`.
///
/// Equivalent to [`execute_batch_with_cancel`] with a token that is
/// never cancelled.
pub fn execute_batch(pipeline: &Pipeline, inputs: &[PathBuf], output_dir: &Path) -> BatchReport {
    execute_batch_with_cancel(pipeline, inputs, output_dir, &CancelToken::new())
}

/// Apply `pipeline` to every input file, with cooperative cancellation.
///
/// For each input, in the order given: load, apply the pipeline, and
/// write the result to `output_dir` under the input's file name (a
/// `png` extension is appended when the input has none, so the default
/// output format is lossless). Any step failing turns that input into a
/// [`BatchFailure`] record and the run moves on. The token is checked
/// before each load; on cancellation the report carries the outcomes
/// accumulated so far with `cancelled` set.
pub fn execute_batch_with_cancel(
    pipeline: &Pipeline,
    inputs: &[PathBuf],
    output_dir: &Path,
    cancel: &CancelToken,
) -> BatchReport {
    let mut report = BatchReport::default();

    for input in inputs {
        if cancel.is_cancelled() {
            tracing::info!("batch cancelled after {} of {} inputs", report.total(), inputs.len());
            report.cancelled = true;
            break;
        }

        match process_one(pipeline, input, output_dir) {
            Ok(()) => report.succeeded.push(input.clone()),
            Err(error) => {
                tracing::warn!("batch item failed: {:?} - {}", input, error);
                report.failed.push(BatchFailure {
                    input: input.clone(),
                    error,
                });
            }
        }
    }

    tracing::info!(
        "batch finished: {} succeeded, {} failed",
        report.succeeded.len(),
        report.failed.len()
    );
    report
}

fn process_one(pipeline: &Pipeline, input: &Path, output_dir: &Path) -> PipelineResult<()> {
    let buffer = pixelflow_io::read_image(input)?;
    let result = pipeline.apply(&buffer)?;
    let output = output_path(input, output_dir);
    write_result(&result, &output)
}

fn write_result(buffer: &PixelBuffer, output: &Path) -> PipelineResult<()> {
    pixelflow_io::write_image(buffer, output)?;
    Ok(())
}

/// Output location for one input: same file name under `output_dir`,
/// defaulting the extension to `png`.
fn output_path(input: &Path, output_dir: &Path) -> PathBuf {
    let name = input.file_name().unwrap_or_else(|| "out".as_ref());
    let mut path = output_dir.join(name);
    if path.extension().is_none() {
        path.set_extension("png");
    }
    path
}

/// Collect the image files directly inside `dir`, sorted by path.
///
/// Accepts the product's input formats (jpg/jpeg/png/bmp, case
/// insensitive); everything else, including subdirectories, is skipped.
pub fn collect_inputs(dir: &Path) -> PipelineResult<Vec<PathBuf>> {
    let mut inputs = Vec::new();
    for entry in walkdir::WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| {
            PipelineError::Io(pixelflow_io::IoError::Io(e.into()))
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.into_path();
        let matches = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| INPUT_EXTENSIONS.iter().any(|ok| e.eq_ignore_ascii_case(ok)))
            .unwrap_or(false);
        if matches {
            inputs.push(path);
        }
    }
    inputs.sort();
    Ok(inputs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_keeps_extension() {
        let out = output_path(Path::new("/in/photo.jpg"), Path::new("/out"));
        assert_eq!(out, PathBuf::from("/out/photo.jpg"));
    }

    #[test]
    fn test_output_path_defaults_to_png() {
        let out = output_path(Path::new("/in/scan"), Path::new("/out"));
        assert_eq!(out, PathBuf::from("/out/scan.png"));
    }

    #[test]
    fn test_cancel_token_shared_between_clones() {
        let token = CancelToken::new();
        let shared = token.clone();
        assert!(!token.is_cancelled());
        shared.cancel();
        assert!(token.is_cancelled());
    }
}
