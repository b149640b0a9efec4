//! Premultiplied RGBA8 pixel operations shared by the compositor.

use crate::assets::decode::PreparedImage;
use crate::foundation::core::{BezPath, Canvas};
use crate::foundation::error::{SketchError, SketchResult};
use crate::foundation::math::mul_div255_u8;

pub(crate) fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap, rgba: [u8; 4]) {
    for px in pixmap.data_as_u8_slice_mut().chunks_exact_mut(4) {
        px.copy_from_slice(&rgba);
    }
}

pub(crate) fn clear_pixmap_to_transparent(pixmap: &mut vello_cpu::Pixmap) {
    pixmap.data_as_u8_slice_mut().fill(0);
}

/// Source-over of `src` onto `dst`, both premultiplied and the same size.
pub(crate) fn premul_over_in_place(dst: &mut [u8], src: &[u8]) -> SketchResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(SketchError::render(
            "premul_over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        over_px(d, s);
    }
    Ok(())
}

/// Source-over of `src` onto a buffer covering `dst_canvas`, with its top-left at `(x0, y0)`.
///
/// Pixels falling outside the destination are clipped.
pub(crate) fn blit_over(
    dst: &mut [u8],
    dst_canvas: Canvas,
    src: &PreparedImage,
    x0: i64,
    y0: i64,
) -> SketchResult<()> {
    if dst.len() != dst_canvas.byte_len() {
        return Err(SketchError::render("blit_over destination size mismatch"));
    }
    let src_canvas = Canvas {
        width: src.width,
        height: src.height,
    };
    if src.rgba8_premul.len() != src_canvas.byte_len() {
        return Err(SketchError::render("blit_over source size mismatch"));
    }

    let x_start = x0.max(0);
    let y_start = y0.max(0);
    let dst_w = dst_canvas.width;
    let x_end = (x0 + i64::from(src.width)).min(i64::from(dst_w));
    let y_end = (y0 + i64::from(src.height)).min(i64::from(dst_canvas.height));
    if x_start >= x_end || y_start >= y_end {
        return Ok(());
    }

    let run = ((x_end - x_start) as usize) * 4;
    for y in y_start..y_end {
        let sy = (y - y0) as usize;
        let sx = (x_start - x0) as usize;
        let s_off = (sy * src.width as usize + sx) * 4;
        let d_off = (y as usize * dst_w as usize + x_start as usize) * 4;
        let s_row = &src.rgba8_premul[s_off..s_off + run];
        let d_row = &mut dst[d_off..d_off + run];
        for (d, s) in d_row.chunks_exact_mut(4).zip(s_row.chunks_exact(4)) {
            over_px(d, s);
        }
    }
    Ok(())
}

fn over_px(d: &mut [u8], s: &[u8]) {
    let sa = s[3];
    if sa == 0 {
        return;
    }
    if sa == 255 {
        d.copy_from_slice(s);
        return;
    }
    let inv = 255u16 - u16::from(sa);
    d[3] = add_sat_u8(sa, mul_div255_u8(u16::from(d[3]), inv));
    for c in 0..3 {
        d[c] = add_sat_u8(s[c], mul_div255_u8(u16::from(d[c]), inv));
    }
}

fn add_sat_u8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

pub(crate) fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
