use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::foundation::{
    core::Rgba8,
    error::{MonsterError, MonsterResult},
};

/// Rendering switches for one generation call.
///
/// Every field is optional in JSON; missing fields take the [`Default`] values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerateOptions {
    /// Recolor parts: body always, arms/legs sometimes. Default `true`.
    pub artistic: bool,
    /// In artistic mode, render every layer in grey instead of color. Default `false`.
    pub greyscale: bool,
    /// Canvas fill. Alpha zero starts from a fully transparent canvas. Default `#f0f0f0`.
    pub background: Rgba8,
    /// Recolor part rows on the rayon pool. Output is identical either way. Default `false`.
    pub parallel: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            artistic: true,
            greyscale: false,
            background: Rgba8::LIGHT_GREY,
            parallel: false,
        }
    }
}

impl GenerateOptions {
    /// Parse options from a JSON document.
    pub fn from_json_str(s: &str) -> MonsterResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| MonsterError::validation(format!("invalid options json: {e}")))
    }

    /// Read and parse an options JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> MonsterResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read options from '{}'", path.display()))?;
        Self::from_json_str(&text)
    }
}

#[cfg(test)]
#[path = "../tests/unit/options.rs"]
mod tests;
