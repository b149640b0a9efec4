use std::sync::Arc;

use super::*;

fn solid(width: u32, height: u32, px: [u8; 4]) -> PreparedImage {
    PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(px.repeat((width * height) as usize)),
    }
}

#[test]
fn over_transparent_src_is_noop_and_opaque_src_replaces() {
    let mut dst = vec![10, 20, 30, 255, 10, 20, 30, 255];
    premul_over_in_place(&mut dst, &[0, 0, 0, 0, 1, 2, 3, 255]).unwrap();
    assert_eq!(dst, vec![10, 20, 30, 255, 1, 2, 3, 255]);
}

#[test]
fn over_half_alpha_blends_onto_opaque() {
    let mut dst = vec![255, 255, 255, 255];
    premul_over_in_place(&mut dst, &[0, 0, 0, 128]).unwrap();
    assert_eq!(dst[3], 255);
    assert_eq!(dst[0], 127);
}

#[test]
fn over_rejects_mismatched_lengths() {
    let mut dst = vec![0; 8];
    assert!(premul_over_in_place(&mut dst, &[0; 4]).is_err());
}

#[test]
fn blit_clips_negative_and_overflowing_offsets() {
    let mut dst = vec![0u8; 4 * 4 * 4];
    let src = solid(3, 3, [9, 9, 9, 255]);
    blit_over(&mut dst, Canvas::new(4, 4).unwrap(), &src, -1, 2).unwrap();

    let painted = |x: usize, y: usize| dst[(y * 4 + x) * 4 + 3] == 255;
    assert!(painted(0, 2) && painted(1, 2) && painted(0, 3) && painted(1, 3));
    assert!(!painted(2, 2) && !painted(0, 1));

    let mut untouched = vec![0u8; 16];
    blit_over(&mut untouched, Canvas::new(2, 2).unwrap(), &src, 5, 5).unwrap();
    assert!(untouched.iter().all(|&b| b == 0));
}

#[test]
fn blit_rejects_buffers_not_matching_their_canvas() {
    let src = solid(2, 2, [1, 1, 1, 255]);
    let mut short = vec![0u8; 4 * 4 * 4 - 4];
    assert!(blit_over(&mut short, Canvas::new(4, 4).unwrap(), &src, 0, 0).is_err());

    let bad_src = PreparedImage {
        width: 3,
        height: 3,
        rgba8_premul: Arc::new(vec![0; 8]),
    };
    let mut dst = vec![0u8; 4 * 4 * 4];
    assert!(blit_over(&mut dst, Canvas::new(4, 4).unwrap(), &bad_src, 0, 0).is_err());
}

#[test]
fn bezpath_conversion_preserves_quad() {
    let mut p = BezPath::new();
    p.move_to((1.0, 2.0));
    p.quad_to((3.0, 4.0), (5.0, 6.0));
    let cpu = bezpath_to_cpu(&p);
    assert_eq!(cpu.elements().len(), 2);
}
