//! Pipeline - an ordered sequence of operations
//!
//! A plain value object: insertion order is execution order, an empty
//! pipeline is a valid no-op, and `apply` never touches the input
//! buffer it is given.

use crate::error::PipelineResult;
use crate::operation::Operation;
use pixelflow_core::PixelBuffer;

/// Ordered, parameterized sequence of filter operations
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    steps: Vec<Operation>,
}

impl Pipeline {
    /// Create an empty pipeline.
    pub fn new() -> Self {
        Pipeline { steps: Vec::new() }
    }

    /// Append an operation; it runs after every existing step.
    pub fn append(&mut self, op: Operation) {
        self.steps.push(op);
    }

    /// Remove all steps.
    pub fn clear(&mut self) {
        self.steps.clear();
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the pipeline has no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The steps, in execution order.
    pub fn steps(&self) -> &[Operation] {
        &self.steps
    }

    /// Apply every step left-to-right, returning the final buffer.
    ///
    /// Starts from a copy of the input; the original stays untouched so
    /// the caller can re-apply with different parameters. Failure is
    /// atomic: the first failing step's error is returned and no
    /// partially processed buffer escapes.
    pub fn apply(&self, input: &PixelBuffer) -> PipelineResult<PixelBuffer> {
        let mut working = input.clone();
        for op in &self.steps {
            tracing::debug!("applying step: {}", op.name());
            working = op.apply(&working)?;
        }
        Ok(working)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixelflow_core::Channels;

    fn checker_bgr() -> PixelBuffer {
        let mut buf = PixelBuffer::new(8, 8, Channels::Bgr).unwrap();
        for y in 0..8 {
            for x in 0..8 {
                let v = if (x + y) % 2 == 0 { 40 } else { 220 };
                buf.set_sample(x, y, 0, v);
                buf.set_sample(x, y, 1, v / 2);
                buf.set_sample(x, y, 2, v.saturating_add(20));
            }
        }
        buf
    }

    #[test]
    fn test_empty_pipeline_is_identity() {
        let buf = checker_bgr();
        let out = Pipeline::new().apply(&buf).unwrap();
        assert_eq!(out, buf);
    }

    #[test]
    fn test_apply_leaves_input_untouched() {
        let buf = checker_bgr();
        let before = buf.clone();

        let mut pipeline = Pipeline::new();
        pipeline.append(Operation::Grayscale);
        pipeline.append(Operation::Threshold { cutoff: 128 });
        let out = pipeline.apply(&buf).unwrap();

        assert_eq!(buf, before);
        assert_eq!(out.channels(), Channels::Gray);
    }

    #[test]
    fn test_steps_run_in_insertion_order() {
        // For a pixel at 80: threshold(100) first maps it to 0, but
        // threshold(50) first lifts it to 255 which then survives the
        // second cutoff
        let buf = PixelBuffer::from_raw(4, 4, Channels::Gray, vec![80; 16]).unwrap();

        let mut a = Pipeline::new();
        a.append(Operation::Threshold { cutoff: 100 });
        a.append(Operation::Threshold { cutoff: 50 });

        let mut b = Pipeline::new();
        b.append(Operation::Threshold { cutoff: 50 });
        b.append(Operation::Threshold { cutoff: 100 });

        let out_a = a.apply(&buf).unwrap();
        let out_b = b.apply(&buf).unwrap();
        assert!(out_a.data().iter().all(|&v| v == 0));
        assert!(out_b.data().iter().all(|&v| v == 255));
    }

    #[test]
    fn test_failure_is_atomic() {
        let buf = checker_bgr();

        let mut pipeline = Pipeline::new();
        pipeline.append(Operation::Grayscale);
        pipeline.append(Operation::Erode { iterations: 0 });
        pipeline.append(Operation::Threshold { cutoff: 128 });

        assert!(pipeline.apply(&buf).is_err());
    }

    #[test]
    fn test_clear_resets_to_noop() {
        let buf = checker_bgr();
        let mut pipeline = Pipeline::new();
        pipeline.append(Operation::Grayscale);
        assert_eq!(pipeline.len(), 1);

        pipeline.clear();
        assert!(pipeline.is_empty());
        assert_eq!(pipeline.apply(&buf).unwrap(), buf);
    }

    #[test]
    fn test_chained_filters_produce_binary_gray() {
        let buf = checker_bgr();
        let mut pipeline = Pipeline::new();
        pipeline.append(Operation::GaussianBlur { kernel_size: 3 });
        pipeline.append(Operation::HistogramEqualize);
        pipeline.append(Operation::Threshold { cutoff: 100 });

        let out = pipeline.apply(&buf).unwrap();
        assert_eq!(out.channels(), Channels::Gray);
        assert!(out.data().iter().all(|&v| v == 0 || v == 255));
    }
}
