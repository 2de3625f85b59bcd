use image::{RgbImage, imageops};
use rayon::prelude::*;

use crate::foundation::{
    core::{Interpolation, ResolutionSource},
    math::round_to_u8,
};

const CHANNELS: usize = 3;

/// Bring `inner` and `outer` to one shared resolution.
///
/// The image named by `source` keeps its size; the other one is resized to match. A
/// resize that shrinks along either axis uses area averaging, otherwise `interp` is used.
/// Images that already share the target size are returned untouched.
#[tracing::instrument(skip(inner, outer))]
pub fn reconcile(
    inner: RgbImage,
    outer: RgbImage,
    interp: Interpolation,
    source: ResolutionSource,
) -> (RgbImage, RgbImage) {
    match source {
        ResolutionSource::Inner => {
            let target = inner.dimensions();
            let outer = fit_to(outer, target, interp, "outer");
            (inner, outer)
        }
        ResolutionSource::Outer => {
            let target = outer.dimensions();
            let inner = fit_to(inner, target, interp, "inner");
            (inner, outer)
        }
    }
}

fn fit_to(img: RgbImage, target: (u32, u32), interp: Interpolation, role: &str) -> RgbImage {
    let (w, h) = img.dimensions();
    let (tw, th) = target;
    if (w, h) == (tw, th) {
        return img;
    }

    if w > tw || h > th {
        tracing::debug!(role, from = ?(w, h), to = ?(tw, th), "downscaling with area averaging");
        resize_area(&img, tw, th)
    } else {
        tracing::debug!(role, from = ?(w, h), to = ?(tw, th), %interp, "upscaling");
        resize_rgb(&img, tw, th, interp)
    }
}

/// Resize with the filter matching `interp`.
pub fn resize_rgb(img: &RgbImage, width: u32, height: u32, interp: Interpolation) -> RgbImage {
    if img.width() == 0 || img.height() == 0 {
        return RgbImage::new(width, height);
    }
    imageops::resize(img, width, height, filter_for(interp))
}

fn filter_for(interp: Interpolation) -> imageops::FilterType {
    match interp {
        Interpolation::Lanczos4 => imageops::FilterType::Lanczos3,
        Interpolation::Cubic => imageops::FilterType::CatmullRom,
        Interpolation::Linear => imageops::FilterType::Triangle,
        Interpolation::Nearest => imageops::FilterType::Nearest,
    }
}

/// Source pixels contributing to one destination pixel along one axis.
#[derive(Clone, Debug, PartialEq)]
struct Span {
    start: usize,
    weights: Vec<f32>,
}

/// Exact-overlap box weights: each destination cell covers `src_len / dst_len` source
/// cells and every source cell contributes the fraction of it that lies inside.
fn area_spans(src_len: u32, dst_len: u32) -> Vec<Span> {
    let scale = f64::from(src_len) / f64::from(dst_len);
    let src_len = src_len as usize;

    (0..dst_len)
        .map(|d| {
            let lo = f64::from(d) * scale;
            let hi = (f64::from(d) + 1.0) * scale;
            let first = (lo.floor() as usize).min(src_len - 1);
            let last = (hi.ceil() as usize).clamp(first + 1, src_len);

            let weights = (first..last)
                .map(|s| {
                    let overlap = hi.min(s as f64 + 1.0) - lo.max(s as f64);
                    (overlap.max(0.0) / scale) as f32
                })
                .collect();
            Span {
                start: first,
                weights,
            }
        })
        .collect()
}

/// Area-averaging resize, suited to shrinking without aliasing.
///
/// Along an axis that grows, each source pixel is replicated over the destination cells it
/// covers, which looks like nearest-neighbour rather than a linear blend.
///
/// Separable: rows are filtered horizontally into an `f32` buffer, then columns are
/// filtered vertically. Every output value depends only on its own inputs, so the
/// parallel row split does not affect the result.
pub fn resize_area(img: &RgbImage, width: u32, height: u32) -> RgbImage {
    let (src_w, src_h) = img.dimensions();
    if src_w == 0 || src_h == 0 || width == 0 || height == 0 {
        return RgbImage::new(width, height);
    }

    let xs = area_spans(src_w, width);
    let ys = area_spans(src_h, height);
    let src_stride = src_w as usize * CHANNELS;
    let dst_stride = width as usize * CHANNELS;
    let src = img.as_raw();

    let mut tmp = vec![0.0f32; src_h as usize * dst_stride];
    tmp.par_chunks_mut(dst_stride)
        .enumerate()
        .for_each(|(y, row)| {
            let src_row = &src[y * src_stride..(y + 1) * src_stride];
            for (x, span) in xs.iter().enumerate() {
                let mut acc = [0.0f32; CHANNELS];
                for (i, w) in span.weights.iter().enumerate() {
                    let px = &src_row[(span.start + i) * CHANNELS..][..CHANNELS];
                    for c in 0..CHANNELS {
                        acc[c] += f32::from(px[c]) * w;
                    }
                }
                row[x * CHANNELS..][..CHANNELS].copy_from_slice(&acc);
            }
        });

    let mut out = RgbImage::new(width, height);
    out.par_chunks_mut(dst_stride)
        .zip(ys.par_iter())
        .for_each(|(row, span)| {
            for (x, px) in row.iter_mut().enumerate() {
                let mut acc = 0.0f32;
                for (i, w) in span.weights.iter().enumerate() {
                    acc += tmp[(span.start + i) * dst_stride + x] * w;
                }
                *px = round_to_u8(acc);
            }
        });

    out
}

#[cfg(test)]
#[path = "../tests/unit/reconcile.rs"]
mod tests;
