#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod error;
pub mod image;
pub mod mask;
pub mod metrics;

// Numeric building blocks – public for tooling, considered internals.
pub mod gradient;
pub mod laplacian;
pub mod resize;

// --- High-level re-exports -------------------------------------------------

// Main entry points: the two metrics + their knobs.
pub use crate::metrics::{
    evaluate, laplacian_variance, tenengrad, EvaluationOptions, SharpnessSummary,
    TenengradOptions,
};

pub use crate::error::MetricError;

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```
/// use sharpness_evaluator::prelude::*;
///
/// let (w, h) = (64usize, 48usize);
/// let gray = vec![0u8; w * h];
/// let img = ImageU8 { w, h, stride: w, data: &gray };
///
/// let score = tenengrad(img, None, &TenengradOptions::default()).unwrap();
/// assert_eq!(score, 0.0); // flat field has no gradient energy
/// ```
pub mod prelude {
    pub use crate::error::MetricError;
    pub use crate::image::ImageU8;
    pub use crate::{laplacian_variance, tenengrad, TenengradOptions};
}
