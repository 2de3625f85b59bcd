//! Mirage builds "mirage tank" images: one RGBA picture that shows one image on a black
//! background and a different image on a white background.
//!
//! # Pipeline overview
//!
//! 1. **Decode**: both inputs become 8-bit RGB ([`load_image`], [`decode_image`])
//! 2. **Reconcile**: the two images are brought to one resolution ([`reconcile()`])
//! 3. **Composite**: luma planes are folded into colour + alpha ([`phantom`])
//! 4. **Encode**: the RGBA result is written as PNG, WebP or BMP ([`save_rgba`])
//!
//! [`compose`] and [`compose_files`] run steps 2-3 and 1-4 respectively.
//!
//! The *inner* image is the one revealed on black, the *outer* image the one revealed on
//! white. [`flatten`] previews either appearance.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod composite;
mod foundation;
mod io;
mod pipeline;
mod preview;
mod reconcile;

pub use composite::{phantom, phantom_pixel};
pub use foundation::core::{Interpolation, LightCoefficients, ResolutionSource};
pub use foundation::error::{MirageError, MirageResult};
pub use foundation::math::{clamp_to_u8, luma_u8, round_to_u8};
pub use io::decode::{check_input, decode_image, load_image};
pub use io::encode::{OutputFormat, encode_rgba, save_rgba};
pub use pipeline::{MirageOpts, compose, compose_files};
pub use preview::{Backdrop, flatten};
pub use reconcile::{reconcile, resize_area, resize_rgb};
