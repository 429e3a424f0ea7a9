use std::{
    collections::{BTreeMap, HashMap},
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;

use crate::{
    assets::decode::{check_dimensions, decode_part},
    foundation::core::Canvas,
    foundation::error::{MonsterError, MonsterResult},
    select::catalog::{PartCatalog, PartCategory},
};

/// Address of one pre-drawn part: a category and a 1-based variant index inside the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PartKey {
    category: PartCategory,
    index: u32,
}

impl PartKey {
    /// Build a key, rejecting indices outside the standard catalog.
    pub fn new(category: PartCategory, index: u32) -> MonsterResult<Self> {
        if !PartCatalog::STANDARD.contains(category, index) {
            return Err(MonsterError::part_not_found(format!(
                "{category}_{index} is outside the catalog (1..={})",
                PartCatalog::STANDARD.count(category)
            )));
        }
        Ok(Self { category, index })
    }

    /// Parse a `"{category}_{index}"` key, with or without a `.png` suffix.
    pub fn parse(s: &str) -> MonsterResult<Self> {
        let stem = s.strip_suffix(".png").unwrap_or(s);
        let (name, index) = stem
            .rsplit_once('_')
            .ok_or_else(|| MonsterError::validation(format!("malformed part key '{s}'")))?;
        let index = index
            .parse::<u32>()
            .map_err(|_| MonsterError::validation(format!("malformed part index in '{s}'")))?;
        Self::new(PartCategory::from_name(name)?, index)
    }

    /// Category of the part.
    pub fn category(self) -> PartCategory {
        self.category
    }

    /// 1-based variant index.
    pub fn index(self) -> u32 {
        self.index
    }

    /// Asset file name, e.g. `body_7.png`.
    pub fn file_name(self) -> String {
        format!("{self}.png")
    }

    /// Every key of the standard catalog, in draw order.
    pub fn all() -> impl Iterator<Item = PartKey> {
        PartCatalog::STANDARD
            .entries()
            .map(|(category, index)| PartKey { category, index })
    }
}

impl std::fmt::Display for PartKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_{}", self.category, self.index)
    }
}

/// Read-only source of part images. Implementations are shared between concurrent calls.
pub trait PartStore: Send + Sync {
    /// Resolve `key` to a straight-alpha RGBA8 image the size of the monster canvas.
    fn load(&self, key: PartKey) -> MonsterResult<Arc<image::RgbaImage>>;
}

impl<S: PartStore + ?Sized> PartStore for Arc<S> {
    fn load(&self, key: PartKey) -> MonsterResult<Arc<image::RgbaImage>> {
        (**self).load(key)
    }
}

/// Reads and decodes `{root}/{category}_{index}.png` on every lookup.
#[derive(Clone, Debug)]
pub struct DirPartStore {
    root: PathBuf,
    canvas: Canvas,
}

impl DirPartStore {
    /// Store rooted at `root`, expecting 120x120 parts.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            canvas: Canvas::MONSTER,
        }
    }

    /// Directory parts are read from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn read_bytes(&self, key: PartKey) -> MonsterResult<Vec<u8>> {
        let path = self.root.join(key.file_name());
        std::fs::read(&path)
            .with_context(|| format!("read part bytes from '{}'", path.display()))
            .map_err(MonsterError::from)
    }
}

impl PartStore for DirPartStore {
    fn load(&self, key: PartKey) -> MonsterResult<Arc<image::RgbaImage>> {
        let bytes = self.read_bytes(key)?;
        let img = decode_part(&bytes, self.canvas)
            .map_err(|e| MonsterError::decode(format!("{}: {e}", key.file_name())))?;
        Ok(Arc::new(img))
    }
}

/// Immutable in-memory store with every available part decoded up front.
#[derive(Clone, Debug, Default)]
pub struct PreparedPartStore {
    parts: HashMap<PartKey, Arc<image::RgbaImage>>,
    missing: BTreeMap<PartKey, String>,
}

impl PreparedPartStore {
    /// Decode every catalog entry found under `root`.
    ///
    /// Entries that fail to load are remembered and reported by [`PreparedPartStore::missing`]
    /// and on lookup; they do not fail preparation.
    pub fn load_dir(root: impl Into<PathBuf>) -> Self {
        let dir = DirPartStore::new(root);
        let mut out = Self::default();
        for key in PartKey::all() {
            match dir.load(key) {
                Ok(img) => {
                    out.parts.insert(key, img);
                }
                Err(err) => {
                    tracing::warn!(part = %key, error = %err, "part unavailable");
                    out.missing.insert(key, err.to_string());
                }
            }
        }
        out
    }

    /// Build a store from already decoded images. Every image must be 120x120.
    pub fn from_images(
        images: impl IntoIterator<Item = (PartKey, image::RgbaImage)>,
    ) -> MonsterResult<Self> {
        let mut out = Self::default();
        for (key, img) in images {
            check_dimensions(&img, Canvas::MONSTER)
                .map_err(|e| MonsterError::decode(format!("{}: {e}", key.file_name())))?;
            out.parts.insert(key, Arc::new(img));
        }
        Ok(out)
    }

    /// Number of parts held.
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Whether no part is held.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Parts that failed to load during [`PreparedPartStore::load_dir`], with the reason.
    pub fn missing(&self) -> &BTreeMap<PartKey, String> {
        &self.missing
    }
}

impl PartStore for PreparedPartStore {
    fn load(&self, key: PartKey) -> MonsterResult<Arc<image::RgbaImage>> {
        if let Some(img) = self.parts.get(&key) {
            return Ok(Arc::clone(img));
        }
        match self.missing.get(&key) {
            Some(reason) => Err(MonsterError::part_not_found(format!("{key}: {reason}"))),
            None => Err(MonsterError::part_not_found(key.to_string())),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
