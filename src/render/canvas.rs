use crate::{
    assets::decode::check_dimensions,
    foundation::{
        core::{Canvas, PremulRgba8, Rgba8},
        error::MonsterResult,
    },
    render::composite::over_straight_in_place,
};

/// Premultiplied RGBA8 working surface owned by a single generation call.
///
/// Pixels no layer ever touched are exported as the exact background bytes, so a
/// semi-opaque background does not go through the lossy premultiply round trip.
#[derive(Clone, Debug)]
pub struct MonsterCanvas {
    size: Canvas,
    background: Rgba8,
    rgba8_premul: Vec<u8>,
    covered: Vec<bool>,
}

impl MonsterCanvas {
    /// Allocate a canvas and fill it with `background`, or leave it fully transparent when the
    /// background alpha is zero.
    pub fn new(size: Canvas, background: Rgba8) -> Self {
        let background = if background.is_transparent() {
            Rgba8::TRANSPARENT
        } else {
            background
        };
        Self {
            size,
            background,
            rgba8_premul: background.to_premul().repeat(size.pixel_count()),
            covered: vec![false; size.pixel_count()],
        }
    }

    /// Canvas dimensions.
    pub fn size(&self) -> Canvas {
        self.size
    }

    /// Premultiplied pixel at `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<PremulRgba8> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        let idx = ((y as usize) * (self.size.width as usize) + (x as usize)) * 4;
        let mut px = [0u8; 4];
        px.copy_from_slice(&self.rgba8_premul[idx..idx + 4]);
        Some(px)
    }

    /// Source-over a straight-alpha layer of the same size onto the canvas.
    pub fn draw(&mut self, layer: &image::RgbaImage) -> MonsterResult<()> {
        check_dimensions(layer, self.size)?;
        over_straight_in_place(&mut self.rgba8_premul, layer.as_raw())?;
        for (covered, px) in self.covered.iter_mut().zip(layer.as_raw().chunks_exact(4)) {
            *covered |= px[3] != 0;
        }
        Ok(())
    }

    /// Finish into a straight-alpha image.
    pub fn into_image(self) -> image::RgbaImage {
        let Canvas { width, height } = self.size;
        let bg = self.background;
        let mut data = self.rgba8_premul;
        for (px, &covered) in data.chunks_exact_mut(4).zip(&self.covered) {
            let c = if covered {
                Rgba8::from_premul([px[0], px[1], px[2], px[3]])
            } else {
                bg
            };
            px.copy_from_slice(&[c.r, c.g, c.b, c.a]);
        }
        image::RgbaImage::from_vec(width, height, data)
            .unwrap_or_else(|| image::RgbaImage::new(width, height))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/canvas.rs"]
mod tests;
