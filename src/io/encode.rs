use std::path::Path;

use anyhow::Context as _;
use image::{ExtendedColorType, ImageEncoder, RgbaImage, codecs};

use crate::foundation::error::{MirageError, MirageResult};

/// Container formats that keep the alpha channel intact.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// PNG at maximum compression.
    Png,
    /// Lossless WebP.
    Webp,
    /// 32-bit BMP.
    Bmp,
}

impl OutputFormat {
    /// Pick the format from the file extension of `path` (case-insensitive).
    ///
    /// Lossy or alpha-less formats such as JPEG are rejected.
    pub fn from_path(path: &Path) -> MirageResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "png" => Ok(Self::Png),
            "webp" => Ok(Self::Webp),
            "bmp" => Ok(Self::Bmp),
            _ => Err(MirageError::validation(format!(
                "unsupported output format '{}' (expected .png, .webp or .bmp)",
                path.display()
            ))),
        }
    }
}

/// Encode an RGBA image into `format`.
pub fn encode_rgba(img: &RgbaImage, format: OutputFormat) -> MirageResult<Vec<u8>> {
    let (width, height) = img.dimensions();
    let mut buf = Vec::new();
    let res = match format {
        OutputFormat::Png => codecs::png::PngEncoder::new_with_quality(
            &mut buf,
            codecs::png::CompressionType::Best,
            codecs::png::FilterType::Adaptive,
        )
        .write_image(img.as_raw(), width, height, ExtendedColorType::Rgba8),
        OutputFormat::Webp => codecs::webp::WebPEncoder::new_lossless(&mut buf).write_image(
            img.as_raw(),
            width,
            height,
            ExtendedColorType::Rgba8,
        ),
        OutputFormat::Bmp => codecs::bmp::BmpEncoder::new(&mut buf).write_image(
            img.as_raw(),
            width,
            height,
            ExtendedColorType::Rgba8,
        ),
    };
    res.map_err(|e| MirageError::encode(format!("{format:?}: {e}")))?;
    Ok(buf)
}

/// Encode `img` in the format implied by `path` and write it, creating parent directories.
pub fn save_rgba(path: &Path, img: &RgbaImage) -> MirageResult<()> {
    let format = OutputFormat::from_path(path)?;
    let bytes = encode_rgba(img, format)?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/io/encode.rs"]
mod tests;
