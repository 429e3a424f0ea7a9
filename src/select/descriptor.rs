use serde::{Deserialize, Serialize};

use crate::{
    foundation::math::Fnv1a64,
    select::catalog::{PartCatalog, PartCategory},
    select::rng::Pcg64Dxsm,
};

/// 64-bit FNV-1a digest of an input byte sequence.
pub fn input_digest(input: &[u8]) -> u64 {
    let mut hasher = Fnv1a64::new_default();
    hasher.write_bytes(input);
    hasher.finish()
}

/// The selected variant per category plus the body color for one monster.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MonsterDescriptor {
    /// Legs variant, `1..=5`.
    pub legs: u32,
    /// Hair variant, `1..=5`.
    pub hair: u32,
    /// Arms variant, `1..=5`.
    pub arms: u32,
    /// Body variant, `1..=15`.
    pub body: u32,
    /// Eyes variant, `1..=15`.
    pub eyes: u32,
    /// Mouth variant, `1..=10`.
    pub mouth: u32,
    /// Body hue in `[0, 1)`.
    pub hue: f64,
    /// Tint saturation in `[0.5, 1.0]`.
    pub saturation: f64,
}

impl MonsterDescriptor {
    /// Derive the descriptor for `input`.
    pub fn select(input: &[u8]) -> Self {
        Self::select_with_stream(input).0
    }

    /// Derive the descriptor and hand back the stream positioned right after the eight
    /// selection draws, ready for the compositor's tint decisions.
    pub(crate) fn select_with_stream(input: &[u8]) -> (Self, Pcg64Dxsm) {
        let mut rng = Pcg64Dxsm::from_digest(input_digest(input));
        let catalog = PartCatalog::STANDARD;

        let mut indices = [0u32; 6];
        for category in PartCategory::DRAW_ORDER {
            let n = u64::from(catalog.count(category));
            indices[category.ordinal()] = rng.below(n) as u32 + 1;
        }
        let hue = rng.next_f64_01();
        let saturation = 0.5 + rng.next_f64_01() * 0.5;

        let [legs, hair, arms, body, eyes, mouth] = indices;
        let descriptor = Self {
            legs,
            hair,
            arms,
            body,
            eyes,
            mouth,
            hue,
            saturation,
        };
        (descriptor, rng)
    }

    /// Selected 1-based variant for `category`.
    pub fn index(&self, category: PartCategory) -> u32 {
        match category {
            PartCategory::Legs => self.legs,
            PartCategory::Hair => self.hair,
            PartCategory::Arms => self.arms,
            PartCategory::Body => self.body,
            PartCategory::Eyes => self.eyes,
            PartCategory::Mouth => self.mouth,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/select/descriptor.rs"]
mod tests;
