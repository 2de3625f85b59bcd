use std::path::Path;

use image::{RgbImage, RgbaImage};

use crate::{
    composite::phantom,
    foundation::{
        core::{Interpolation, LightCoefficients, ResolutionSource},
        error::{MirageError, MirageResult},
    },
    io::{
        decode::{check_input, load_image},
        encode::{OutputFormat, save_rgba},
    },
    reconcile::reconcile,
};

/// Everything that controls one mirage build.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MirageOpts {
    /// Brightness coefficients handed to the compositor.
    pub lights: LightCoefficients,
    /// Filter used when an image must be enlarged.
    pub interpolation: Interpolation,
    /// Which input keeps its resolution.
    pub resolution: ResolutionSource,
    /// Worker threads for the pixel loops. `None` uses rayon's default, `Some(0)` runs on
    /// a single worker.
    pub threads: Option<usize>,
}

/// Reconcile resolutions, then composite.
///
/// Runs on a dedicated thread pool sized from [`MirageOpts::threads`]; the pixel values
/// do not depend on the thread count.
pub fn compose(inner: RgbImage, outer: RgbImage, opts: &MirageOpts) -> MirageResult<RgbaImage> {
    let pool = build_thread_pool(opts.threads)?;
    pool.install(|| {
        let (inner, outer) = reconcile(inner, outer, opts.interpolation, opts.resolution);
        tracing::info!(
            width = inner.width(),
            height = inner.height(),
            resolution = ?opts.resolution,
            "resolutions reconciled"
        );
        phantom(&inner, &outer, opts.lights)
    })
}

/// Load both inputs, build the mirage and write it to `output`.
///
/// Options, both input paths and the output extension are checked before anything is
/// decoded.
#[tracing::instrument(skip(opts))]
pub fn compose_files(
    inner_path: &Path,
    outer_path: &Path,
    output: &Path,
    opts: &MirageOpts,
) -> MirageResult<RgbaImage> {
    opts.lights.validate()?;
    OutputFormat::from_path(output)?;
    check_input(inner_path)?;
    check_input(outer_path)?;

    let inner = load_image(inner_path)?;
    let outer = load_image(outer_path)?;
    tracing::info!(
        inner = ?inner.dimensions(),
        outer = ?outer.dimensions(),
        "images decoded"
    );

    let img = compose(inner, outer, opts)?;
    tracing::info!("mirage composited");

    save_rgba(output, &img)?;
    tracing::info!(path = %output.display(), "mirage written");
    Ok(img)
}

fn build_thread_pool(threads: Option<usize>) -> MirageResult<rayon::ThreadPool> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n.max(1));
    }
    builder
        .build()
        .map_err(|e| MirageError::validation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
