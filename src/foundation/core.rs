use std::{fmt, str::FromStr};

use crate::foundation::error::{MirageError, MirageResult};

/// Filter used when an image has to be enlarged to the target resolution.
///
/// Shrinking always uses area averaging regardless of this choice.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Interpolation {
    /// Windowed-sinc resampling.
    Lanczos4,
    /// Bicubic (Catmull-Rom) resampling.
    #[default]
    Cubic,
    /// Bilinear resampling.
    Linear,
    /// Nearest-neighbour sampling.
    Nearest,
}

impl Interpolation {
    /// All modes, in the order they are listed to users.
    pub const ALL: [Self; 4] = [Self::Lanczos4, Self::Cubic, Self::Linear, Self::Nearest];

    /// Stable lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lanczos4 => "lanczos4",
            Self::Cubic => "cubic",
            Self::Linear => "linear",
            Self::Nearest => "nearest",
        }
    }
}

impl fmt::Display for Interpolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interpolation {
    type Err = MirageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == lower)
            .ok_or_else(|| {
                MirageError::validation(format!(
                    "unknown interpolation '{s}' (expected lanczos4, cubic, linear or nearest)"
                ))
            })
    }
}

/// Which input dictates the output resolution.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionSource {
    /// Keep the inner image's size; the outer image is resized.
    #[default]
    Inner,
    /// Keep the outer image's size; the inner image is resized.
    Outer,
}

impl ResolutionSource {
    /// Map the CLI `--use-outer` flag.
    pub fn from_use_outer(use_outer: bool) -> Self {
        if use_outer { Self::Outer } else { Self::Inner }
    }
}

/// Brightness coefficients applied to the two luma planes.
///
/// Note the cross-wiring, kept for compatibility with existing outputs: `inner_light`
/// scales the luma of the *outer* image and `outer_light` scales the luma of the
/// *inner* image.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LightCoefficients {
    /// Multiplier for the outer image's luma. Nominally in `[0, 1]`.
    pub inner_light: f32,
    /// Multiplier for the inner image's luma. Nominally in `[0, 1]`.
    pub outer_light: f32,
}

impl Default for LightCoefficients {
    fn default() -> Self {
        Self {
            inner_light: 1.0,
            outer_light: 0.3,
        }
    }
}

impl LightCoefficients {
    /// Build a pair of coefficients without validating them.
    pub fn new(inner_light: f32, outer_light: f32) -> Self {
        Self {
            inner_light,
            outer_light,
        }
    }

    /// Reject coefficients that are not finite or fall outside `[0, 1]`.
    ///
    /// The compositor itself tolerates any finite value; this check belongs to the
    /// user-facing layers.
    pub fn validate(&self) -> MirageResult<()> {
        for (name, v) in [
            ("inner-light", self.inner_light),
            ("outer-light", self.outer_light),
        ] {
            if !v.is_finite() || !(0.0..=1.0).contains(&v) {
                return Err(MirageError::validation(format!(
                    "{name} must be a number between 0 and 1, got {v}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
