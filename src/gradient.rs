//! Sobel derivative fields for the Tenengrad energy.
//!
//! - Separable convolution: the horizontal derivative pairs a 1-D derivative
//!   row with a 1-D smoothing column (and transposed for the vertical one).
//! - Apertures 1, 3 and 5; aperture 1 is the plain central difference with
//!   no cross-smoothing.
//! - Borders clamp to the image extents (replicate).
//!
//! Complexity: O(W·H·K) per pass; memory: one float buffer per pass.

use crate::error::MetricError;
use crate::image::{ImageF32, ImageView};

const DERIV_3: [f32; 3] = [-1.0, 0.0, 1.0];
const SMOOTH_1: [f32; 1] = [1.0];
const SMOOTH_3: [f32; 3] = [1.0, 2.0, 1.0];
const DERIV_5: [f32; 5] = [-1.0, -2.0, 0.0, 2.0, 1.0];
const SMOOTH_5: [f32; 5] = [1.0, 4.0, 6.0, 4.0, 1.0];

/// Supported Sobel apertures.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SobelKernel {
    /// 1×3 / 3×1 central difference, no smoothing.
    Aperture1,
    /// Classic 3×3 Sobel.
    Aperture3,
    /// 5×5 Sobel.
    Aperture5,
}

impl SobelKernel {
    /// Validate a caller-supplied kernel size.
    pub fn from_ksize(ksize: u32) -> Result<Self, MetricError> {
        match ksize {
            1 => Ok(SobelKernel::Aperture1),
            3 => Ok(SobelKernel::Aperture3),
            5 => Ok(SobelKernel::Aperture5),
            _ => Err(MetricError::InvalidKernelSize { ksize }),
        }
    }

    fn deriv_taps(self) -> &'static [f32] {
        match self {
            SobelKernel::Aperture1 | SobelKernel::Aperture3 => &DERIV_3,
            SobelKernel::Aperture5 => &DERIV_5,
        }
    }

    fn smooth_taps(self) -> &'static [f32] {
        match self {
            SobelKernel::Aperture1 => &SMOOTH_1,
            SobelKernel::Aperture3 => &SMOOTH_3,
            SobelKernel::Aperture5 => &SMOOTH_5,
        }
    }
}

/// Per-pixel derivative buffers.
#[derive(Clone, Debug)]
pub struct Grad {
    /// Horizontal derivative
    pub gx: ImageF32,
    /// Vertical derivative
    pub gy: ImageF32,
}

/// Horizontal 1-D convolution with clamped borders.
fn convolve_rows(l: &ImageF32, taps: &[f32]) -> ImageF32 {
    let (w, h) = (l.w, l.h);
    let r = taps.len() / 2;
    let mut out = ImageF32::new(w, h);
    for y in 0..h {
        let src = l.row(y);
        let dst = out.row_mut(y);
        for x in 0..w {
            let mut acc = 0.0f32;
            for (k, &t) in taps.iter().enumerate() {
                let sx = (x + k).saturating_sub(r).min(w - 1);
                acc += src[sx] * t;
            }
            dst[x] = acc;
        }
    }
    out
}

/// Vertical 1-D convolution with clamped borders.
fn convolve_cols(l: &ImageF32, taps: &[f32]) -> ImageF32 {
    let (w, h) = (l.w, l.h);
    let r = taps.len() / 2;
    let mut out = ImageF32::new(w, h);
    for y in 0..h {
        let rows: Vec<&[f32]> = taps
            .iter()
            .enumerate()
            .map(|(k, _)| l.row((y + k).saturating_sub(r).min(h - 1)))
            .collect();
        let dst = out.row_mut(y);
        for x in 0..w {
            let mut acc = 0.0f32;
            for (row, &t) in rows.iter().zip(taps.iter()) {
                acc += row[x] * t;
            }
            dst[x] = acc;
        }
    }
    out
}

/// Compute Sobel derivatives on a single-channel float image.
pub fn sobel_gradients(l: &ImageF32, kernel: SobelKernel) -> Grad {
    if l.w == 0 || l.h == 0 {
        return Grad {
            gx: ImageF32::new(l.w, l.h),
            gy: ImageF32::new(l.w, l.h),
        };
    }
    let deriv = kernel.deriv_taps();
    let smooth = kernel.smooth_taps();
    let gx = convolve_cols(&convolve_rows(l, deriv), smooth);
    let gy = convolve_rows(&convolve_cols(l, deriv), smooth);
    Grad { gx, gy }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step_edge(w: usize, h: usize) -> ImageF32 {
        let mut img = ImageF32::new(w, h);
        for y in 0..h {
            let row = img.row_mut(y);
            for x in w / 2..w {
                row[x] = 1.0;
            }
        }
        img
    }

    #[test]
    fn from_ksize_accepts_supported_apertures() {
        assert_eq!(SobelKernel::from_ksize(1), Ok(SobelKernel::Aperture1));
        assert_eq!(SobelKernel::from_ksize(3), Ok(SobelKernel::Aperture3));
        assert_eq!(SobelKernel::from_ksize(5), Ok(SobelKernel::Aperture5));
        assert_eq!(
            SobelKernel::from_ksize(2),
            Err(MetricError::InvalidKernelSize { ksize: 2 })
        );
    }

    #[test]
    fn flat_image_has_zero_gradients() {
        let mut img = ImageF32::new(16, 12);
        img.data.fill(0.7);
        for kernel in [
            SobelKernel::Aperture1,
            SobelKernel::Aperture3,
            SobelKernel::Aperture5,
        ] {
            let grad = sobel_gradients(&img, kernel);
            assert!(grad.gx.data.iter().all(|&v| v == 0.0));
            assert!(grad.gy.data.iter().all(|&v| v == 0.0));
        }
    }

    #[test]
    fn vertical_edge_responds_in_gx_only() {
        let img = step_edge(10, 6);
        let grad = sobel_gradients(&img, SobelKernel::Aperture3);
        // Central difference spans the step at the two adjacent columns,
        // scaled by the [1,2,1] smoothing sum.
        assert!((grad.gx.get(4, 3) - 4.0).abs() < 1e-6);
        assert!((grad.gx.get(5, 3) - 4.0).abs() < 1e-6);
        assert_eq!(grad.gx.get(1, 3), 0.0);
        assert!(grad.gy.data.iter().all(|&v| v.abs() < 1e-6));
    }

    #[test]
    fn aperture1_is_unsmoothed_central_difference() {
        let img = step_edge(10, 6);
        let grad = sobel_gradients(&img, SobelKernel::Aperture1);
        assert!((grad.gx.get(4, 3) - 1.0).abs() < 1e-6);
        assert!((grad.gx.get(5, 3) - 1.0).abs() < 1e-6);
    }
}
