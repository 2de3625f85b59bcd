use std::path::Path;

use anyhow::Context as _;
use image::RgbImage;

use crate::foundation::error::{MirageError, MirageResult};

/// Decode encoded image bytes into 8-bit RGB. Any alpha channel is discarded.
pub fn decode_image(bytes: &[u8]) -> MirageResult<RgbImage> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| MirageError::decode(format!("decode image from memory: {e}")))?;
    Ok(dyn_img.to_rgb8())
}

/// Fail unless `path` names an existing regular file.
pub fn check_input(path: &Path) -> MirageResult<()> {
    if !path.is_file() {
        return Err(MirageError::validation(format!(
            "input '{}' does not exist or is not a file",
            path.display()
        )));
    }
    Ok(())
}

/// Read and decode the image file at `path`.
pub fn load_image(path: &Path) -> MirageResult<RgbImage> {
    check_input(path)?;
    let bytes = std::fs::read(path).with_context(|| format!("read '{}'", path.display()))?;
    decode_image(&bytes).map_err(|e| match e {
        MirageError::Decode(msg) => MirageError::decode(format!("{}: {msg}", path.display())),
        other => other,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/io/decode.rs"]
mod tests;
