use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::foundation::error::{MonsterError, MonsterResult};

/// Premultiplied RGBA8 pixel (r,g,b already multiplied by a).
pub type PremulRgba8 = [u8; 4];

/// Pixel dimensions shared by every part asset and the output image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// The fixed 120x120 monster canvas.
    pub const MONSTER: Canvas = Canvas {
        width: 120,
        height: 120,
    };

    /// Number of pixels covered by the canvas.
    pub fn pixel_count(self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Length of a tightly packed RGBA8 buffer of this size.
    pub fn rgba_len(self) -> usize {
        self.pixel_count() * 4
    }
}

/// Straight (non-premultiplied) RGBA8 color.
///
/// Serialized as `#RRGGBBAA`; deserialized from `#RRGGBB`, `#RRGGBBAA`, `"transparent"`,
/// or a `[r, g, b]` / `[r, g, b, a]` array of bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel. Zero means "start from a transparent canvas".
    pub a: u8,
}

impl Rgba8 {
    /// Fully transparent black.
    pub const TRANSPARENT: Rgba8 = Rgba8::new(0, 0, 0, 0);

    /// Opaque light grey used as the default background.
    pub const LIGHT_GREY: Rgba8 = Rgba8::new(240, 240, 240, 255);

    /// Build a color from its four channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Whether the color has any coverage at all.
    pub fn is_transparent(self) -> bool {
        self.a == 0
    }

    /// Convert to premultiplied form.
    pub fn to_premul(self) -> PremulRgba8 {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        [
            premul(self.r, self.a),
            premul(self.g, self.a),
            premul(self.b, self.a),
            self.a,
        ]
    }

    /// Recover a straight color from a premultiplied pixel.
    pub fn from_premul(px: PremulRgba8) -> Self {
        let a = px[3];
        if a == 0 {
            return Self::TRANSPARENT;
        }
        if a == 255 {
            return Self::new(px[0], px[1], px[2], 255);
        }
        let unpremul = |c: u8| -> u8 {
            let v = (u32::from(c) * 255 + u32::from(a) / 2) / u32::from(a);
            v.min(255) as u8
        };
        Self::new(unpremul(px[0]), unpremul(px[1]), unpremul(px[2]), a)
    }

    /// Format as `#RRGGBBAA`.
    pub fn to_hex(self) -> String {
        format!(
            "#{:02x}{:02x}{:02x}{:02x}",
            self.r, self.g, self.b, self.a
        )
    }
}

impl From<image::Rgba<u8>> for Rgba8 {
    fn from(px: image::Rgba<u8>) -> Self {
        let [r, g, b, a] = px.0;
        Self { r, g, b, a }
    }
}

impl From<Rgba8> for image::Rgba<u8> {
    fn from(c: Rgba8) -> Self {
        image::Rgba([c.r, c.g, c.b, c.a])
    }
}

impl FromStr for Rgba8 {
    type Err = MonsterError;

    fn from_str(s: &str) -> MonsterResult<Self> {
        parse_hex(s)
    }
}

impl std::fmt::Display for Rgba8 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Rgba8 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgba8 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            Arr(Vec<u8>),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Hex(s) => parse_hex(&s).map_err(serde::de::Error::custom),
            Repr::Arr(v) => match v.as_slice() {
                [r, g, b] => Ok(Self::new(*r, *g, *b, 255)),
                [r, g, b, a] => Ok(Self::new(*r, *g, *b, *a)),
                _ => Err(serde::de::Error::custom(
                    "rgba array must have len 3 ([r,g,b]) or 4 ([r,g,b,a])",
                )),
            },
        }
    }
}

fn parse_hex(s: &str) -> MonsterResult<Rgba8> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("transparent") {
        return Ok(Rgba8::TRANSPARENT);
    }
    let s = s.strip_prefix('#').unwrap_or(s);
    if !s.is_ascii() {
        return Err(MonsterError::validation(format!(
            "invalid hex color \"{s}\""
        )));
    }

    fn hex_byte(pair: &str) -> MonsterResult<u8> {
        let invalid = || MonsterError::validation(format!("invalid hex byte \"{pair}\""));
        if !pair.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        u8::from_str_radix(pair, 16).map_err(|_| invalid())
    }

    match s.len() {
        6 => Ok(Rgba8::new(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
            255,
        )),
        8 => Ok(Rgba8::new(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
            hex_byte(&s[6..8])?,
        )),
        _ => Err(MonsterError::validation(
            "hex color must be #RRGGBB or #RRGGBBAA (case-insensitive)",
        )),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
