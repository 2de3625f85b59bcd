//! The mirage-tank compositor.
//!
//! Given two equally sized images, produce one RGBA image whose straight-alpha "over"
//! composite shows the (darkened) inner image on black and the outer image on white.
//! The output is achromatic: the technique only has one colour channel's worth of
//! freedom per pixel once alpha is fixed.

use image::{RgbImage, RgbaImage};
use rayon::prelude::*;

use crate::foundation::{
    core::LightCoefficients,
    error::{MirageError, MirageResult},
    math::{clamp_to_u8, luma_u8},
};

/// Composite `inner` (seen on black) and `outer` (seen on white) into one RGBA image.
///
/// Both inputs must already share the same non-zero dimensions; see
/// [`reconcile()`](crate::reconcile()). Coefficients outside `[0, 1]` are accepted and
/// degrade the result; every channel is clamped before it is stored.
#[tracing::instrument(skip(inner, outer), fields(width = inner.width(), height = inner.height()))]
pub fn phantom(
    inner: &RgbImage,
    outer: &RgbImage,
    lights: LightCoefficients,
) -> MirageResult<RgbaImage> {
    let (width, height) = inner.dimensions();
    if outer.dimensions() != (width, height) {
        return Err(MirageError::validation(format!(
            "phantom expects equally sized images, got inner {width}x{height} and outer {}x{}",
            outer.width(),
            outer.height()
        )));
    }
    if width == 0 || height == 0 {
        return Err(MirageError::validation("phantom expects non-empty images"));
    }

    let row_in = width as usize * 3;
    let row_out = width as usize * 4;
    let mut out = RgbaImage::new(width, height);

    out.par_chunks_mut(row_out)
        .zip(inner.as_raw().par_chunks(row_in))
        .zip(outer.as_raw().par_chunks(row_in))
        .for_each(|((dst, inner_row), outer_row)| {
            for ((d, i), o) in dst
                .chunks_exact_mut(4)
                .zip(inner_row.chunks_exact(3))
                .zip(outer_row.chunks_exact(3))
            {
                let inner_gray = luma_u8(i[0], i[1], i[2]);
                let outer_gray = luma_u8(o[0], o[1], o[2]);
                d.copy_from_slice(&phantom_pixel(inner_gray, outer_gray, lights));
            }
        });

    Ok(out)
}

/// The per-pixel formula behind [`phantom`], operating on 8-bit luma values.
///
/// Returns `[c, c, c, a]`. When the computed alpha is not positive the colour saturates
/// to 255 instead of dividing by it.
pub fn phantom_pixel(inner_gray: u8, outer_gray: u8, lights: LightCoefficients) -> [u8; 4] {
    let outer_gray = (f32::from(outer_gray) * lights.inner_light).clamp(0.0, 255.0);
    let inner_gray = (f32::from(inner_gray) * lights.outer_light).clamp(0.0, 255.0);

    let alpha = 1.0 - outer_gray / 255.0 + inner_gray / 255.0;
    let color = if alpha > 0.0 {
        inner_gray / alpha
    } else {
        255.0
    };

    let c = clamp_to_u8(color);
    [c, c, c, clamp_to_u8(alpha * 255.0)]
}

#[cfg(test)]
#[path = "../tests/unit/composite.rs"]
mod tests;
