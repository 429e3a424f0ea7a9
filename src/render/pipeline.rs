use std::sync::Arc;

use serde::Serialize;

use crate::{
    assets::store::{PartKey, PartStore},
    color::transform::{desaturate, tint},
    foundation::core::Canvas,
    foundation::error::MonsterResult,
    options::GenerateOptions,
    render::canvas::MonsterCanvas,
    select::catalog::PartCategory,
    select::descriptor::MonsterDescriptor,
    select::rng::Pcg64Dxsm,
};

/// Chance that arms or legs get their own random hue in artistic mode.
pub const LIMB_TINT_PROBABILITY: f64 = 0.3;

/// Recoloring applied to one layer before it is composited.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LayerTransform {
    /// Drawn as stored.
    None,
    /// Hue/saturation replaced, lightness kept.
    Tint {
        /// Hue in `[0, 1)`.
        hue: f64,
        /// Saturation in `[0.5, 1.0]`.
        saturation: f64,
    },
    /// Replaced by luminance.
    Desaturate,
}

/// What happened to one category during a generation call.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LayerOutcome {
    /// Category of the layer.
    pub category: PartCategory,
    /// Selected 1-based variant.
    pub index: u32,
    /// Transform applied; `None` for skipped layers.
    pub transform: LayerTransform,
    /// Load or composite failure that caused the layer to be skipped.
    pub error: Option<String>,
}

impl LayerOutcome {
    /// Whether the layer reached the canvas.
    pub fn drawn(&self) -> bool {
        self.error.is_none()
    }
}

/// A generated monster together with how it was built.
#[derive(Clone, Debug)]
pub struct Monster {
    /// Parts and color selected from the input.
    pub descriptor: MonsterDescriptor,
    /// One entry per category, in draw order.
    pub layers: Vec<LayerOutcome>,
    /// Final 120x120 straight-alpha image.
    pub image: image::RgbaImage,
}

/// Generate the monster image for `input`.
///
/// Never fails: parts the store cannot provide are logged and left out.
pub fn generate(input: &[u8], store: &dyn PartStore, opts: &GenerateOptions) -> image::RgbaImage {
    generate_monster(input, store, opts).image
}

/// Generate the monster for `input` and report per-layer decisions.
#[tracing::instrument(skip(input, store), fields(input_len = input.len()))]
pub fn generate_monster(input: &[u8], store: &dyn PartStore, opts: &GenerateOptions) -> Monster {
    let (descriptor, mut rng) = MonsterDescriptor::select_with_stream(input);
    tracing::debug!(?descriptor, "selected parts");

    let mut canvas = MonsterCanvas::new(Canvas::MONSTER, opts.background);
    let mut layers = Vec::with_capacity(PartCategory::DRAW_ORDER.len());

    for category in PartCategory::DRAW_ORDER {
        let index = descriptor.index(category);
        let outcome = draw_layer(
            &mut canvas,
            store,
            opts,
            &descriptor,
            &mut rng,
            category,
            index,
        );
        if let Err(err) = &outcome {
            tracing::warn!(%category, index, error = %err, "skipping part");
        }
        layers.push(match outcome {
            Ok(transform) => LayerOutcome {
                category,
                index,
                transform,
                error: None,
            },
            Err(err) => LayerOutcome {
                category,
                index,
                transform: LayerTransform::None,
                error: Some(err.to_string()),
            },
        });
    }

    Monster {
        descriptor,
        layers,
        image: canvas.into_image(),
    }
}

fn draw_layer(
    canvas: &mut MonsterCanvas,
    store: &dyn PartStore,
    opts: &GenerateOptions,
    descriptor: &MonsterDescriptor,
    rng: &mut Pcg64Dxsm,
    category: PartCategory,
    index: u32,
) -> MonsterResult<LayerTransform> {
    let key = PartKey::new(category, index)?;
    let part = store.load(key)?;

    // Tint decisions only consume the stream once the part is known to exist.
    let transform = choose_transform(category, opts, descriptor, rng);
    match transform {
        LayerTransform::None => canvas.draw(&part)?,
        LayerTransform::Tint { hue, saturation } => {
            let mut layer = Arc::unwrap_or_clone(part);
            tint(&mut layer, hue, saturation, opts.parallel);
            canvas.draw(&layer)?;
        }
        LayerTransform::Desaturate => {
            let mut layer = Arc::unwrap_or_clone(part);
            desaturate(&mut layer, opts.parallel);
            canvas.draw(&layer)?;
        }
    }
    Ok(transform)
}

fn choose_transform(
    category: PartCategory,
    opts: &GenerateOptions,
    descriptor: &MonsterDescriptor,
    rng: &mut Pcg64Dxsm,
) -> LayerTransform {
    if !opts.artistic {
        return LayerTransform::None;
    }

    let tint_hue = match category {
        PartCategory::Body => Some(descriptor.hue),
        PartCategory::Arms | PartCategory::Legs => {
            (rng.next_f64_01() < LIMB_TINT_PROBABILITY).then(|| rng.next_f64_01())
        }
        _ => None,
    };

    // Greyscale still consumes the limb draws above so the stream does not depend on it.
    if opts.greyscale {
        return LayerTransform::Desaturate;
    }
    match tint_hue {
        Some(hue) => LayerTransform::Tint {
            hue,
            saturation: descriptor.saturation,
        },
        None => LayerTransform::None,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
