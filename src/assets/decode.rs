use anyhow::Context;

use crate::foundation::{
    core::Canvas,
    error::{MonsterError, MonsterResult},
};

/// Decode encoded image bytes into a straight-alpha RGBA8 part image of exactly `canvas` size.
pub fn decode_part(bytes: &[u8], canvas: Canvas) -> MonsterResult<image::RgbaImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode part image from memory")?;
    let rgba = dyn_img.to_rgba8();
    check_dimensions(&rgba, canvas)?;
    Ok(rgba)
}

/// Reject part images whose size differs from the canvas.
pub fn check_dimensions(img: &image::RgbaImage, canvas: Canvas) -> MonsterResult<()> {
    let (width, height) = img.dimensions();
    if width != canvas.width || height != canvas.height {
        return Err(MonsterError::decode(format!(
            "part is {width}x{height}, expected {}x{}",
            canvas.width, canvas.height
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
