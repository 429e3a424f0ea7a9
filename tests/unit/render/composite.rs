use super::*;

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = [10, 20, 30, 40];
    let src = [255, 255, 255, 0];
    assert_eq!(over(dst, src), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    let dst = [0, 0, 0, 255];
    let src = [255, 0, 0, 255];
    assert_eq!(over(dst, src), src);
}

#[test]
fn over_dst_transparent_returns_src() {
    let dst = [0, 0, 0, 0];
    let src = [100, 110, 120, 200];
    assert_eq!(over(dst, src), src);
}

#[test]
fn over_half_alpha_blends() {
    let dst = [0, 0, 255, 255];
    let src = Rgba8::new(255, 0, 0, 128).to_premul();
    let out = over(dst, src);
    assert_eq!(out[3], 255);
    assert_eq!(out[0], 128);
    assert_eq!(out[1], 0);
    assert_eq!(out[2], 127);
}

#[test]
fn straight_layer_over_buffer() {
    let mut dst = vec![0, 0, 0, 0, 10, 10, 10, 255];
    let src = vec![255, 0, 0, 255, 0, 0, 0, 0];
    over_straight_in_place(&mut dst, &src).unwrap();
    assert_eq!(dst, vec![255, 0, 0, 255, 10, 10, 10, 255]);
}

#[test]
fn straight_layer_length_mismatch_is_error() {
    let mut dst = vec![0u8; 8];
    assert!(over_straight_in_place(&mut dst, &[0u8; 4]).is_err());
    let mut odd = vec![0u8; 6];
    assert!(over_straight_in_place(&mut odd, &[0u8; 6]).is_err());
}
