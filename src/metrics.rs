//! The two sharpness metrics, computed over an optional mask region.
//!
//! Both operations are one-shot, stateless and synchronous: convert the
//! 8-bit input to floats, optionally bound the long edge (Tenengrad only),
//! run the convolution, and accumulate over the "on" pixel set. Callers own
//! every buffer; nothing is cached between calls.

use crate::error::MetricError;
use crate::gradient::{sobel_gradients, Grad, SobelKernel};
use crate::image::{GrayBuffer, ImageF32, ImageU8, ImageView};
use crate::laplacian::laplacian_response;
use crate::mask::{coverage, is_on};
use crate::resize::{downscale_area, downscale_mask_nearest, target_dims};
use log::debug;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Knobs for the Tenengrad measure.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TenengradOptions {
    /// Sobel aperture; must be 1, 3 or 5 (validated at call time).
    pub kernel_size: u32,
    /// Bound on `max(width, height)` before measuring; 0 disables downscaling.
    pub max_long_edge: usize,
}

impl Default for TenengradOptions {
    fn default() -> Self {
        Self {
            kernel_size: 3,
            max_long_edge: 0,
        }
    }
}

impl TenengradOptions {
    pub fn with_kernel_size(mut self, kernel_size: u32) -> Self {
        self.kernel_size = kernel_size;
        self
    }

    pub fn with_max_long_edge(mut self, max_long_edge: usize) -> Self {
        self.max_long_edge = max_long_edge;
        self
    }
}

fn validate(image: ImageU8<'_>, mask: Option<ImageU8<'_>>) -> Result<(), MetricError> {
    if image.is_empty() {
        return Err(MetricError::EmptyImage);
    }
    if let Some(m) = mask {
        if (m.w, m.h) != (image.w, image.h) {
            return Err(MetricError::MaskSizeMismatch {
                image: (image.w, image.h),
                mask: (m.w, m.h),
            });
        }
    }
    Ok(())
}

/// Mean Tenengrad energy `gx² + gy²` over the masked pixel set.
///
/// Returns `0.0` when the masked set is empty.
fn masked_mean_energy(grad: &Grad, mask: Option<ImageU8<'_>>) -> f64 {
    let mut sum = 0.0f64;
    let mut count = 0usize;
    for y in 0..grad.gx.h {
        let gx_row = grad.gx.row(y);
        let gy_row = grad.gy.row(y);
        match mask {
            Some(m) => {
                let mask_row = m.row(y);
                for x in 0..grad.gx.w {
                    if is_on(mask_row[x]) {
                        let (gx, gy) = (gx_row[x] as f64, gy_row[x] as f64);
                        sum += gx * gx + gy * gy;
                        count += 1;
                    }
                }
            }
            None => {
                for x in 0..grad.gx.w {
                    let (gx, gy) = (gx_row[x] as f64, gy_row[x] as f64);
                    sum += gx * gx + gy * gy;
                    count += 1;
                }
            }
        }
    }
    if count == 0 {
        debug!("tenengrad: empty masked set -> 0.0");
        return 0.0;
    }
    sum / count as f64
}

/// Tenengrad (Sobel gradient energy) sharpness over the masked region.
///
/// Pipeline: grayscale floats → optional shared downscale (area resampling
/// for the image, nearest-neighbor for the mask) → Sobel `gx`/`gy` → mean of
/// `gx² + gy²` over the "on" pixels. Higher = sharper; an empty masked set
/// scores `0.0` by convention.
pub fn tenengrad(
    image: ImageU8<'_>,
    mask: Option<ImageU8<'_>>,
    opts: &TenengradOptions,
) -> Result<f64, MetricError> {
    validate(image, mask)?;
    let kernel = SobelKernel::from_ksize(opts.kernel_size)?;

    let mut l = ImageF32::from_u8(image);
    let mut resized_mask: Option<GrayBuffer> = None;
    if let Some((nw, nh)) = target_dims(image.w, image.h, opts.max_long_edge) {
        debug!(
            "tenengrad: downscale {}x{} -> {}x{} (max long edge {})",
            image.w, image.h, nw, nh, opts.max_long_edge
        );
        l = downscale_area(&l, nw, nh);
        resized_mask = mask.map(|m| downscale_mask_nearest(m, nw, nh));
    }
    let mask_view = match &resized_mask {
        Some(buf) => Some(buf.as_view()),
        None => mask,
    };

    let grad = sobel_gradients(&l, kernel);
    Ok(masked_mean_energy(&grad, mask_view))
}

/// Laplacian-variance sharpness over the masked region.
///
/// Variance (not mean) of the 3×3 Laplacian response over the "on" pixels.
/// Fewer than two masked samples score `0.0` by convention (the variance is
/// undefined there, and a single sample carries no spread).
pub fn laplacian_variance(
    image: ImageU8<'_>,
    mask: Option<ImageU8<'_>>,
) -> Result<f64, MetricError> {
    validate(image, mask)?;

    let l = ImageF32::from_u8(image);
    let resp = laplacian_response(&l);

    let mut sum = 0.0f64;
    let mut count = 0usize;
    for y in 0..resp.h {
        let resp_row = resp.row(y);
        match mask {
            Some(m) => {
                let mask_row = m.row(y);
                for x in 0..resp.w {
                    if is_on(mask_row[x]) {
                        sum += resp_row[x] as f64;
                        count += 1;
                    }
                }
            }
            None => {
                for &r in resp_row {
                    sum += r as f64;
                    count += 1;
                }
            }
        }
    }
    if count < 2 {
        debug!("laplacian_variance: {count} masked sample(s) -> 0.0");
        return Ok(0.0);
    }
    let mean = sum / count as f64;

    let mut sq_sum = 0.0f64;
    for y in 0..resp.h {
        let resp_row = resp.row(y);
        match mask {
            Some(m) => {
                let mask_row = m.row(y);
                for x in 0..resp.w {
                    if is_on(mask_row[x]) {
                        let d = resp_row[x] as f64 - mean;
                        sq_sum += d * d;
                    }
                }
            }
            None => {
                for &r in resp_row {
                    let d = r as f64 - mean;
                    sq_sum += d * d;
                }
            }
        }
    }
    Ok(sq_sum / count as f64)
}

/// Knobs for [`evaluate`].
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EvaluationOptions {
    pub tenengrad: TenengradOptions,
}

/// Both metrics over one input, with timing, in serializable form.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SharpnessSummary {
    pub width: usize,
    pub height: usize,
    /// "On" pixels at input resolution (`width * height` without a mask).
    pub masked_pixels: usize,
    pub tenengrad: f64,
    pub laplacian_variance: f64,
    pub elapsed_ms: f64,
}

/// Run both metrics over one image/mask pair.
pub fn evaluate(
    image: ImageU8<'_>,
    mask: Option<ImageU8<'_>>,
    opts: &EvaluationOptions,
) -> Result<SharpnessSummary, MetricError> {
    let start = Instant::now();
    let ten = tenengrad(image, mask, &opts.tenengrad)?;
    let lap = laplacian_variance(image, mask)?;
    let masked_pixels = match mask {
        Some(m) => coverage(m),
        None => image.w * image.h,
    };
    Ok(SharpnessSummary {
        width: image.w,
        height: image.h,
        masked_pixels,
        tenengrad: ten,
        laplacian_variance: lap,
        elapsed_ms: start.elapsed().as_secs_f64() * 1000.0,
    })
}
