use std::io::Cursor;
use std::sync::Arc;

use anyhow::Context;

use crate::foundation::core::Canvas;
use crate::foundation::error::{SketchError, SketchResult};

/// Decoded raster ready for compositing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Premultiplied RGBA8, row-major, tightly packed.
    pub rgba8_premul: Arc<Vec<u8>>,
}

/// Decode encoded image bytes (any format the `image` crate recognizes) to premultiplied RGBA8.
pub fn decode_image(bytes: &[u8]) -> SketchResult<PreparedImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

/// Encode premultiplied RGBA8 pixels as PNG.
pub fn encode_png(rgba8_premul: &[u8], width: u32, height: u32) -> SketchResult<Vec<u8>> {
    let expected = Canvas { width, height }.byte_len();
    if rgba8_premul.len() != expected {
        return Err(SketchError::codec(format!(
            "png encode expects {expected} bytes for {width}x{height}, got {}",
            rgba8_premul.len()
        )));
    }
    let mut straight = rgba8_premul.to_vec();
    unpremultiply_rgba8_in_place(&mut straight);
    let img = image::RgbaImage::from_raw(width, height, straight)
        .ok_or_else(|| SketchError::codec("png encode buffer mismatch"))?;

    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .context("encode png")?;
    Ok(buf)
}

/// Size of `src_w x src_h` scaled to fit within `fit` of the canvas, aspect preserved.
///
/// Scales up as well as down. Never returns a zero side.
pub fn fit_within(src_w: u32, src_h: u32, canvas: Canvas, fit: f64) -> (u32, u32) {
    if src_w == 0 || src_h == 0 {
        return (1, 1);
    }
    let ratio = (f64::from(canvas.width) * fit / f64::from(src_w))
        .min(f64::from(canvas.height) * fit / f64::from(src_h));
    let w = (f64::from(src_w) * ratio).round().max(1.0) as u32;
    let h = (f64::from(src_h) * ratio).round().max(1.0) as u32;
    (w, h)
}

/// Resample to exactly `width x height`.
///
/// Filtering runs on premultiplied data so transparent edges do not bleed color.
pub fn resize_image(img: &PreparedImage, width: u32, height: u32) -> SketchResult<PreparedImage> {
    if img.width == width && img.height == height {
        return Ok(img.clone());
    }
    let src = image::RgbaImage::from_raw(img.width, img.height, img.rgba8_premul.to_vec())
        .ok_or_else(|| SketchError::codec("resize source buffer mismatch"))?;
    let out = image::imageops::resize(&src, width, height, image::imageops::FilterType::Triangle);
    Ok(PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(out.into_raw()),
    })
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        match a {
            0 => px[..3].fill(0),
            255 => {}
            _ => {
                for c in &mut px[..3] {
                    *c = ((*c as u16 * 255 + a / 2) / a).min(255) as u8;
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
