//! In-place recoloring of straight-alpha RGBA8 part images.
//!
//! Both transforms leave fully transparent pixels untouched so recoloring never bleeds into
//! the gaps between drawn strokes. Each pixel is independent, so rows may be processed in
//! parallel without changing the result.

use rayon::prelude::*;

use crate::{
    color::hsl::{hsl_to_rgb, rgb_to_hsl},
    foundation::math::unit_to_u8,
};

/// Pixels with straight alpha below this are skipped by every transform.
pub const MIN_ALPHA: u8 = 1;

/// Tint leaves pixels whose mean channel value exceeds this alone (highlights).
pub const HIGHLIGHT_LIGHTNESS: f64 = 0.85;

const LUMA_R: f64 = 0.299;
const LUMA_G: f64 = 0.587;
const LUMA_B: f64 = 0.114;

/// Replace hue and saturation of every drawn, non-highlight pixel while keeping its lightness.
pub fn tint(img: &mut image::RgbaImage, hue: f64, saturation: f64, parallel: bool) {
    for_each_pixel(img, parallel, |px| tint_pixel(px, hue, saturation));
}

/// Replace every drawn pixel with its weighted luminance.
pub fn desaturate(img: &mut image::RgbaImage, parallel: bool) {
    for_each_pixel(img, parallel, desaturate_pixel);
}

fn tint_pixel(px: &mut [u8], hue: f64, saturation: f64) {
    if px[3] < MIN_ALPHA {
        return;
    }

    let r = f64::from(px[0]) / 255.0;
    let g = f64::from(px[1]) / 255.0;
    let b = f64::from(px[2]) / 255.0;
    if (r + g + b) / 3.0 > HIGHLIGHT_LIGHTNESS {
        return;
    }

    let (_, _, l) = rgb_to_hsl(r, g, b);
    let (r, g, b) = hsl_to_rgb(hue, saturation, l);
    px[0] = unit_to_u8(r);
    px[1] = unit_to_u8(g);
    px[2] = unit_to_u8(b);
}

fn desaturate_pixel(px: &mut [u8]) {
    if px[3] < MIN_ALPHA {
        return;
    }

    let grey = luminance(px[0], px[1], px[2]);
    px[0] = grey;
    px[1] = grey;
    px[2] = grey;
}

/// Weighted luminance of an 8-bit RGB triple.
///
/// Computed on the 16-bit expansion of each channel (`c * 257`) and truncated back to 8 bits.
pub fn luminance(r: u8, g: u8, b: u8) -> u8 {
    let y = LUMA_R * f64::from(r) + LUMA_G * f64::from(g) + LUMA_B * f64::from(b);
    (y * 257.0 / 256.0).clamp(0.0, 255.0) as u8
}

fn for_each_pixel<F>(img: &mut image::RgbaImage, parallel: bool, f: F)
where
    F: Fn(&mut [u8]) + Sync,
{
    let row_len = img.width() as usize * 4;
    if row_len == 0 {
        return;
    }

    let buf: &mut [u8] = img;
    if parallel {
        buf.par_chunks_exact_mut(row_len)
            .for_each(|row| row.chunks_exact_mut(4).for_each(&f));
    } else {
        buf.chunks_exact_mut(4).for_each(f);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/color/transform.rs"]
mod tests;
