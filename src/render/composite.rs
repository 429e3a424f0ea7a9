use crate::foundation::{
    core::{PremulRgba8, Rgba8},
    error::{MonsterError, MonsterResult},
    math::mul_div255_u8,
};

/// Porter-Duff source-over on premultiplied pixels.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    let sa = src[3];
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return src;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = sa.saturating_add(mul_div255_u8(u16::from(dst[3]), inv));
    for i in 0..3 {
        let dc = mul_div255_u8(u16::from(dst[i]), inv);
        out[i] = src[i].saturating_add(dc);
    }
    out
}

/// Composite a straight-alpha RGBA8 layer over a premultiplied RGBA8 destination.
pub fn over_straight_in_place(dst: &mut [u8], src: &[u8]) -> MonsterResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(MonsterError::validation(
            "over_straight_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        if s[3] == 0 {
            continue;
        }
        let src_px = Rgba8::new(s[0], s[1], s[2], s[3]).to_premul();
        let out = over([d[0], d[1], d[2], d[3]], src_px);
        d.copy_from_slice(&out);
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
