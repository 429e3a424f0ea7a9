use serde::{Deserialize, Serialize};

use crate::foundation::error::{MonsterError, MonsterResult};

/// One of the six body-part layers a monster is assembled from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartCategory {
    /// Drawn first, furthest back.
    Legs,
    /// Hair.
    Hair,
    /// Arms.
    Arms,
    /// Body; the layer that always carries the monster's hue.
    Body,
    /// Eyes.
    Eyes,
    /// Drawn last, on top.
    Mouth,
}

impl PartCategory {
    /// Draw order, back to front. Also the order part indices are drawn from the stream.
    pub const DRAW_ORDER: [PartCategory; 6] = [
        PartCategory::Legs,
        PartCategory::Hair,
        PartCategory::Arms,
        PartCategory::Body,
        PartCategory::Eyes,
        PartCategory::Mouth,
    ];

    /// Lowercase name used in asset file names.
    pub fn name(self) -> &'static str {
        match self {
            PartCategory::Legs => "legs",
            PartCategory::Hair => "hair",
            PartCategory::Arms => "arms",
            PartCategory::Body => "body",
            PartCategory::Eyes => "eyes",
            PartCategory::Mouth => "mouth",
        }
    }

    /// Position in [`PartCategory::DRAW_ORDER`].
    pub fn ordinal(self) -> usize {
        self as usize
    }

    /// Parse a lowercase category name.
    pub fn from_name(name: &str) -> MonsterResult<Self> {
        Self::DRAW_ORDER
            .into_iter()
            .find(|c| c.name() == name)
            .ok_or_else(|| MonsterError::validation(format!("unknown part category '{name}'")))
    }
}

impl std::fmt::Display for PartCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Number of pre-drawn variants available per category. Indices are 1-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PartCatalog {
    counts: [u32; 6],
}

impl PartCatalog {
    /// The shipped catalog: legs 5, hair 5, arms 5, body 15, eyes 15, mouth 10.
    pub const STANDARD: PartCatalog = PartCatalog {
        counts: [5, 5, 5, 15, 15, 10],
    };

    /// Variant count for `category`.
    pub fn count(&self, category: PartCategory) -> u32 {
        self.counts[category.ordinal()]
    }

    /// Whether `index` names an existing variant of `category`.
    pub fn contains(&self, category: PartCategory, index: u32) -> bool {
        (1..=self.count(category)).contains(&index)
    }

    /// Total number of part assets in the catalog.
    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    /// Every `(category, index)` pair in draw order, indices ascending.
    pub fn entries(self) -> impl Iterator<Item = (PartCategory, u32)> {
        PartCategory::DRAW_ORDER
            .into_iter()
            .flat_map(move |c| (1..=self.count(c)).map(move |i| (c, i)))
    }
}

impl Default for PartCatalog {
    fn default() -> Self {
        Self::STANDARD
    }
}

#[cfg(test)]
#[path = "../../tests/unit/select/catalog.rs"]
mod tests;
