// Rec.601 luma weights in 14-bit fixed point; they sum to exactly 1 << 14.
const LUMA_R: u32 = 4899;
const LUMA_G: u32 = 9617;
const LUMA_B: u32 = 1868;
const LUMA_SHIFT: u32 = 14;

/// Perceptual 8-bit luma of one RGB pixel (0.299 R + 0.587 G + 0.114 B).
///
/// Computed in fixed point with round-half-up so the result is always an exact integer,
/// identical on every platform.
pub fn luma_u8(r: u8, g: u8, b: u8) -> u8 {
    let acc = u32::from(r) * LUMA_R + u32::from(g) * LUMA_G + u32::from(b) * LUMA_B;
    ((acc + (1 << (LUMA_SHIFT - 1))) >> LUMA_SHIFT) as u8
}

/// Clamp to `[0, 255]` and truncate toward zero. NaN maps to 0.
pub fn clamp_to_u8(v: f32) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.clamp(0.0, 255.0) as u8
}

/// Clamp to `[0, 255]` and round to nearest. NaN maps to 0.
pub fn round_to_u8(v: f32) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.round().clamp(0.0, 255.0) as u8
}

pub(crate) fn mul_div255(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
