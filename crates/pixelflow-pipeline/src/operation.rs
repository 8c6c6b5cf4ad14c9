//! Operation - one parameterized image transformation
//!
//! An [`Operation`] carries its own parameters, so the same value can
//! be applied from the preview path, a pipeline fold, or a batch run
//! without any shared mutable state. Once appended to a pipeline it is
//! never modified.

use pixelflow_core::PixelBuffer;
use pixelflow_ops::{OpsResult, equalize_hist, erode, gaussian_blur, sharpen, threshold, to_gray};

/// A tagged, parameterized image transformation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operation {
    /// BT.601 luminance conversion to a single channel
    Grayscale,
    /// Full-range histogram equalization (grayscales first)
    HistogramEqualize,
    /// Gaussian blur; an even stored size is bumped to the next odd
    /// value at execution time
    GaussianBlur { kernel_size: u32 },
    /// Laplacian sharpening with the given strength
    Sharpen { strength: f32 },
    /// Binary threshold; out-of-range cutoffs are accepted
    Threshold { cutoff: i32 },
    /// Morphological erosion, 5x5 brick, iterated
    Erode { iterations: u32 },
}

impl Operation {
    /// Apply this operation to a buffer, returning a new buffer.
    ///
    /// This is the single dispatch point for every execution path.
    /// The blur step normalizes an even kernel size here rather than at
    /// construction: the stored value is what the user selected, and
    /// interactive sliders legitimately land on even numbers.
    pub fn apply(&self, buf: &PixelBuffer) -> OpsResult<PixelBuffer> {
        match *self {
            Operation::Grayscale => to_gray(buf),
            Operation::HistogramEqualize => equalize_hist(buf),
            Operation::GaussianBlur { kernel_size } => {
                let size = if kernel_size % 2 == 0 {
                    kernel_size + 1
                } else {
                    kernel_size
                };
                gaussian_blur(buf, size)
            }
            Operation::Sharpen { strength } => sharpen(buf, strength),
            Operation::Threshold { cutoff } => threshold(buf, cutoff),
            Operation::Erode { iterations } => erode(buf, iterations),
        }
    }

    /// Get the operation's kind tag.
    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::Grayscale => OperationKind::Grayscale,
            Operation::HistogramEqualize => OperationKind::HistogramEqualize,
            Operation::GaussianBlur { .. } => OperationKind::GaussianBlur,
            Operation::Sharpen { .. } => OperationKind::Sharpen,
            Operation::Threshold { .. } => OperationKind::Threshold,
            Operation::Erode { .. } => OperationKind::Erode,
        }
    }

    /// Get a short display name.
    pub fn name(&self) -> &'static str {
        self.kind().name()
    }
}

/// Operation kind without parameters, used by the UI boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Grayscale,
    HistogramEqualize,
    GaussianBlur,
    Sharpen,
    Threshold,
    Erode,
}

/// Integer slider range advertised to the UI for one operation kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliderSpec {
    /// Label shown next to the control
    pub label: &'static str,
    /// Minimum slider value
    pub min: i32,
    /// Maximum slider value
    pub max: i32,
    /// Initial slider position
    pub default: i32,
}

impl OperationKind {
    /// All kinds, in menu order.
    pub const ALL: [OperationKind; 6] = [
        OperationKind::Grayscale,
        OperationKind::HistogramEqualize,
        OperationKind::GaussianBlur,
        OperationKind::Sharpen,
        OperationKind::Threshold,
        OperationKind::Erode,
    ];

    /// Get a short display name.
    pub fn name(&self) -> &'static str {
        match self {
            OperationKind::Grayscale => "grayscale",
            OperationKind::HistogramEqualize => "histogram-equalize",
            OperationKind::GaussianBlur => "gaussian-blur",
            OperationKind::Sharpen => "sharpen",
            OperationKind::Threshold => "threshold",
            OperationKind::Erode => "erode",
        }
    }

    /// Slider range for this kind, or `None` for parameterless kinds.
    pub fn slider_spec(&self) -> Option<SliderSpec> {
        match self {
            OperationKind::Grayscale | OperationKind::HistogramEqualize => None,
            OperationKind::GaussianBlur => Some(SliderSpec {
                label: "Gaussian Blur Kernel",
                min: 1,
                max: 31,
                default: 5,
            }),
            OperationKind::Sharpen => Some(SliderSpec {
                label: "Sharpen Strength",
                min: 0,
                max: 100,
                default: 50,
            }),
            OperationKind::Threshold => Some(SliderSpec {
                label: "Threshold Value",
                min: 0,
                max: 255,
                default: 128,
            }),
            OperationKind::Erode => Some(SliderSpec {
                label: "Erosion Iterations",
                min: 1,
                max: 10,
                default: 1,
            }),
        }
    }

    /// Build the operation for a raw slider value.
    ///
    /// Applies the per-kind mapping: blur uses the value as kernel size
    /// (evenness handled at execution), sharpen divides by 100 to get a
    /// strength in [0.0, 1.0], threshold and erosion take the value
    /// directly. Parameterless kinds ignore the value.
    pub fn operation_for(&self, slider_value: i32) -> Operation {
        match self {
            OperationKind::Grayscale => Operation::Grayscale,
            OperationKind::HistogramEqualize => Operation::HistogramEqualize,
            OperationKind::GaussianBlur => Operation::GaussianBlur {
                kernel_size: slider_value.max(1) as u32,
            },
            OperationKind::Sharpen => Operation::Sharpen {
                strength: slider_value.max(0) as f32 / 100.0,
            },
            OperationKind::Threshold => Operation::Threshold {
                cutoff: slider_value,
            },
            OperationKind::Erode => Operation::Erode {
                iterations: slider_value.max(1) as u32,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixelflow_core::Channels;

    #[test]
    fn test_even_blur_size_normalized_at_execution() {
        let buf = PixelBuffer::from_raw(4, 4, Channels::Gray, vec![99; 16]).unwrap();
        // Size 4 would be rejected by the operation library; the
        // dispatch bumps it to 5
        let op = Operation::GaussianBlur { kernel_size: 4 };
        let out = op.apply(&buf).unwrap();
        assert_eq!(out, buf);
    }

    #[test]
    fn test_slider_specs_match_advertised_ranges() {
        let blur = OperationKind::GaussianBlur.slider_spec().unwrap();
        assert_eq!((blur.min, blur.max, blur.default), (1, 31, 5));

        let sharpen = OperationKind::Sharpen.slider_spec().unwrap();
        assert_eq!((sharpen.min, sharpen.max, sharpen.default), (0, 100, 50));

        let threshold = OperationKind::Threshold.slider_spec().unwrap();
        assert_eq!((threshold.min, threshold.max, threshold.default), (0, 255, 128));

        let erode = OperationKind::Erode.slider_spec().unwrap();
        assert_eq!((erode.min, erode.max, erode.default), (1, 10, 1));

        assert!(OperationKind::Grayscale.slider_spec().is_none());
        assert!(OperationKind::HistogramEqualize.slider_spec().is_none());
    }

    #[test]
    fn test_operation_for_maps_slider_values() {
        assert_eq!(
            OperationKind::GaussianBlur.operation_for(7),
            Operation::GaussianBlur { kernel_size: 7 }
        );
        assert_eq!(
            OperationKind::Sharpen.operation_for(50),
            Operation::Sharpen { strength: 0.5 }
        );
        assert_eq!(
            OperationKind::Threshold.operation_for(128),
            Operation::Threshold { cutoff: 128 }
        );
        assert_eq!(
            OperationKind::Erode.operation_for(3),
            Operation::Erode { iterations: 3 }
        );
    }

    #[test]
    fn test_dispatch_covers_every_kind() {
        let buf = PixelBuffer::from_raw(8, 8, Channels::Gray, vec![77; 64]).unwrap();
        for kind in OperationKind::ALL {
            let value = kind.slider_spec().map(|s| s.default).unwrap_or(0);
            let op = kind.operation_for(value);
            assert!(op.apply(&buf).is_ok(), "{} failed", kind.name());
        }
    }
}
