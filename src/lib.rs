//! monsterid turns arbitrary bytes into a cartoon monster avatar.
//!
//! The same input always yields the same pixels; different inputs almost always yield
//! visibly different monsters.
//!
//! # Pipeline overview
//!
//! 1. **Select**: `input bytes -> MonsterDescriptor` (FNV-1a 64 digest seeding a PCG-DXSM stream
//!    that picks one variant per [`PartCategory`] plus a body hue and saturation)
//! 2. **Load**: each selected part is resolved through a [`PartStore`]
//! 3. **Recolor**: in artistic mode the body is tinted, arms and legs sometimes get their own
//!    hue, and greyscale mode desaturates instead
//! 4. **Composite**: layers are drawn back to front over the background onto a 120x120 canvas
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: the digest, the PRNG and the order of every draw are fixed.
//! - **Never fails on assets**: an unavailable part is logged and left out of the image.
//! - **No artwork shipped**: parts are supplied by the caller (a directory of
//!   `{category}_{index}.png` files or in-memory images).
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod color;
mod foundation;
mod options;
mod render;
mod select;

pub use assets::decode::{check_dimensions, decode_part};
pub use assets::store::{DirPartStore, PartKey, PartStore, PreparedPartStore};
pub use color::hsl::{hsl_to_rgb, hue_to_rgb, rgb_to_hsl};
pub use color::transform::{HIGHLIGHT_LIGHTNESS, MIN_ALPHA, desaturate, luminance, tint};
pub use foundation::core::{Canvas, PremulRgba8, Rgba8};
pub use foundation::error::{MonsterError, MonsterResult};
pub use options::GenerateOptions;
pub use render::canvas::MonsterCanvas;
pub use render::composite::{over, over_straight_in_place};
pub use render::pipeline::{
    LIMB_TINT_PROBABILITY, LayerOutcome, LayerTransform, Monster, generate, generate_monster,
};
pub use select::catalog::{PartCatalog, PartCategory};
pub use select::descriptor::{MonsterDescriptor, input_digest};
pub use select::rng::Pcg64Dxsm;
