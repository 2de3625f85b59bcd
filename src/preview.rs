use image::{Rgb, RgbImage, RgbaImage};

use crate::foundation::math::mul_div255;

/// Opaque background a mirage image is viewed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backdrop {
    /// Reveals the inner image.
    Black,
    /// Reveals the outer image.
    White,
}

impl Backdrop {
    fn level(self) -> u8 {
        match self {
            Self::Black => 0,
            Self::White => 255,
        }
    }
}

/// Straight-alpha "over" of `img` onto an opaque `backdrop`.
pub fn flatten(img: &RgbaImage, backdrop: Backdrop) -> RgbImage {
    let bg = backdrop.level();
    RgbImage::from_fn(img.width(), img.height(), |x, y| {
        let [r, g, b, a] = img.get_pixel(x, y).0;
        Rgb([over(r, a, bg), over(g, a, bg), over(b, a, bg)])
    })
}

fn over(src: u8, alpha: u8, bg: u8) -> u8 {
    let a = u16::from(alpha);
    let sc = mul_div255(u16::from(src), a);
    let dc = mul_div255(u16::from(bg), 255 - a);
    (sc + dc).min(255) as u8
}

#[cfg(test)]
#[path = "../tests/unit/preview.rs"]
mod tests;
