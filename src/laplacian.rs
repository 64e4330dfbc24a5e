//! Fixed 3×3 discrete Laplacian.
//!
//! Kernel `[0 1 0; 1 -4 1; 0 1 0]` with clamped (replicate) borders. The
//! variance of this response field over a region is the Laplacian-variance
//! sharpness measure.

use crate::image::{ImageF32, ImageView};

/// Convolve with the 4-neighbor Laplacian stencil.
pub fn laplacian_response(l: &ImageF32) -> ImageF32 {
    let (w, h) = (l.w, l.h);
    let mut out = ImageF32::new(w, h);
    if w == 0 || h == 0 {
        return out;
    }
    for y in 0..h {
        let up = l.row(y.saturating_sub(1));
        let mid = l.row(y);
        let down = l.row((y + 1).min(h - 1));
        let dst = out.row_mut(y);
        for x in 0..w {
            let left = mid[x.saturating_sub(1)];
            let right = mid[(x + 1).min(w - 1)];
            dst[x] = up[x] + down[x] + left + right - 4.0 * mid[x];
        }
    }
    out
}
