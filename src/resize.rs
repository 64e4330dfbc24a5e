//! Bounded downscaling of the intensity and mask channels.
//!
//! The metrics accept a "max long edge" bound: when the image exceeds it,
//! both image and mask are resampled so the longer edge equals the bound,
//! preserving aspect ratio. The intensity channel uses area (box) averaging,
//! which anti-aliases without a separate blur pass; the mask channel uses
//! nearest-neighbor so it stays binary.
//!
//! An image already within the bound is not resampled at all, keeping the
//! no-op path bit-exact.

use crate::image::{GrayBuffer, ImageF32, ImageU8, ImageView};

/// Dimensions after bounding the long edge, or `None` when no resampling is
/// needed (`max_long_edge == 0` or the image already satisfies the bound).
///
/// The short edge is scaled proportionally and rounded, with a 1 px floor.
pub fn target_dims(w: usize, h: usize, max_long_edge: usize) -> Option<(usize, usize)> {
    if max_long_edge == 0 {
        return None;
    }
    let long = w.max(h);
    if long <= max_long_edge {
        return None;
    }
    let scale = max_long_edge as f64 / long as f64;
    let (nw, nh) = if w >= h {
        (max_long_edge, ((h as f64 * scale).round() as usize).max(1))
    } else {
        (((w as f64 * scale).round() as usize).max(1), max_long_edge)
    };
    Some((nw, nh))
}

/// One destination pixel's footprint along a single axis.
struct Span {
    start: usize,
    weights: Vec<f32>,
}

/// Fractional source footprints for area resampling `src_len -> dst_len`.
///
/// Weights within a span are normalized to sum to 1.
fn area_spans(src_len: usize, dst_len: usize) -> Vec<Span> {
    let scale = src_len as f64 / dst_len as f64;
    let mut spans = Vec::with_capacity(dst_len);
    for d in 0..dst_len {
        let lo = d as f64 * scale;
        let hi = ((d + 1) as f64 * scale).min(src_len as f64);
        let start = lo.floor() as usize;
        let end = (hi.ceil() as usize).min(src_len);
        let mut weights = Vec::with_capacity(end - start);
        let mut total = 0.0f64;
        for s in start..end {
            let cell_lo = (s as f64).max(lo);
            let cell_hi = ((s + 1) as f64).min(hi);
            let w = (cell_hi - cell_lo).max(0.0);
            total += w;
            weights.push(w as f32);
        }
        if total > 0.0 {
            let inv = (1.0 / total) as f32;
            for w in &mut weights {
                *w *= inv;
            }
        }
        spans.push(Span { start, weights });
    }
    spans
}

/// Area-resample a float image to `nw × nh`.
pub fn downscale_area(src: &ImageF32, nw: usize, nh: usize) -> ImageF32 {
    let mut dst = ImageF32::new(nw, nh);
    if src.w == 0 || src.h == 0 || nw == 0 || nh == 0 {
        return dst;
    }
    let col_spans = area_spans(src.w, nw);
    let row_spans = area_spans(src.h, nh);

    // Horizontal pass into a src.h × nw intermediate, then vertical pass.
    let mut horiz = ImageF32::new(nw, src.h);
    for y in 0..src.h {
        let src_row = src.row(y);
        let dst_row = horiz.row_mut(y);
        for (x, span) in col_spans.iter().enumerate() {
            let mut acc = 0.0f32;
            for (i, &wt) in span.weights.iter().enumerate() {
                acc += src_row[span.start + i] * wt;
            }
            dst_row[x] = acc;
        }
    }
    for (y, span) in row_spans.iter().enumerate() {
        for x in 0..nw {
            let mut acc = 0.0f32;
            for (i, &wt) in span.weights.iter().enumerate() {
                acc += horiz.get(x, span.start + i) * wt;
            }
            dst.row_mut(y)[x] = acc;
        }
    }
    dst
}

/// Nearest-neighbor resample of an 8-bit mask to `nw × nh`.
pub fn downscale_mask_nearest(mask: ImageU8<'_>, nw: usize, nh: usize) -> GrayBuffer {
    let mut data = vec![0u8; nw * nh];
    if mask.w > 0 && mask.h > 0 && nw > 0 && nh > 0 {
        let sx = mask.w as f64 / nw as f64;
        let sy = mask.h as f64 / nh as f64;
        for y in 0..nh {
            let src_y = (((y as f64 + 0.5) * sy) as usize).min(mask.h - 1);
            let src_row = mask.row(src_y);
            let dst_row = &mut data[y * nw..(y + 1) * nw];
            for (x, dst_px) in dst_row.iter_mut().enumerate() {
                let src_x = (((x as f64 + 0.5) * sx) as usize).min(mask.w - 1);
                *dst_px = src_row[src_x];
            }
        }
    }
    GrayBuffer::new(nw, nh, data)
}
