//! Error type shared by the metric entry points.

/// Reasons why a metric call may reject its inputs.
///
/// Degenerate-but-valid inputs (an all-off mask, a single masked pixel for
/// the variance) are not errors; those return `0.0` by convention.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MetricError {
    /// The image has a zero width or height.
    EmptyImage,
    /// The Sobel aperture is not one of the supported sizes.
    InvalidKernelSize { ksize: u32 },
    /// A mask was supplied whose dimensions differ from the image's.
    MaskSizeMismatch {
        image: (usize, usize),
        mask: (usize, usize),
    },
}

impl std::fmt::Display for MetricError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricError::EmptyImage => write!(f, "image is empty"),
            MetricError::InvalidKernelSize { ksize } => {
                write!(f, "invalid Sobel kernel size {ksize} (supported: 1, 3, 5)")
            }
            MetricError::MaskSizeMismatch { image, mask } => write!(
                f,
                "mask size {}x{} does not match image size {}x{}",
                mask.0, mask.1, image.0, image.1
            ),
        }
    }
}

impl std::error::Error for MetricError {}
