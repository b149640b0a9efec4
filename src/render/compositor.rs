use crate::assets::decode::{PreparedImage, encode_png, fit_within, resize_image};
use crate::foundation::core::{Canvas, Rgb8, Rgba8Premul};
use crate::foundation::error::SketchResult;
use crate::render::backend::FrameRGBA;
use crate::render::raster::{
    bezpath_to_cpu, blit_over, clear_pixmap, clear_pixmap_to_transparent, premul_over_in_place,
};
use crate::stroke::smooth::Segment;
use vello_cpu::kurbo::{Cap, Join, Stroke};

/// Visible + scratch raster pair.
///
/// `visible` persists across strokes and is the only layer that is exported or snapshotted.
/// `scratch` holds at most the one stroke currently being drawn.
pub struct Compositor {
    canvas: Canvas,
    background: Rgb8,
    visible: vello_cpu::Pixmap,
    scratch: vello_cpu::Pixmap,
    ctx: Option<vello_cpu::RenderContext>,
}

impl std::fmt::Debug for Compositor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Compositor")
            .field("canvas", &self.canvas)
            .field("background", &self.background)
            .finish_non_exhaustive()
    }
}

impl Compositor {
    /// Allocate both layers; `visible` starts filled with `background`.
    pub fn new(canvas: Canvas, background: Rgb8) -> SketchResult<Self> {
        canvas.validate()?;
        let (w, h) = canvas.dims_u16()?;
        let mut visible = vello_cpu::Pixmap::new(w, h);
        clear_pixmap(&mut visible, Rgba8Premul::opaque(background).to_array());
        Ok(Self {
            canvas,
            background,
            visible,
            scratch: vello_cpu::Pixmap::new(w, h),
            ctx: None,
        })
    }

    /// Current layer dimensions.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Paper color used by `clear`, `resize` and the eraser.
    pub fn background(&self) -> Rgb8 {
        self.background
    }

    /// Reallocate both layers at `canvas`, fill visible with background and drop scratch content.
    pub fn resize(&mut self, canvas: Canvas) -> SketchResult<()> {
        canvas.validate()?;
        let (w, h) = canvas.dims_u16()?;
        self.visible = vello_cpu::Pixmap::new(w, h);
        self.scratch = vello_cpu::Pixmap::new(w, h);
        self.ctx = None;
        self.canvas = canvas;
        self.fill_visible();
        Ok(())
    }

    /// Redraw the whole in-progress stroke onto a cleared scratch layer.
    pub fn paint_stroke(&mut self, segments: &[Segment]) -> SketchResult<()> {
        clear_pixmap_to_transparent(&mut self.scratch);
        if segments.is_empty() {
            return Ok(());
        }
        let (w, h) = self.canvas.dims_u16()?;
        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == w && ctx.height() == h => ctx,
            _ => vello_cpu::RenderContext::new(w, h),
        };
        ctx.reset();
        for seg in segments {
            let mut stroke = Stroke::new(seg.style.width);
            stroke.join = Join::Round;
            stroke.start_cap = Cap::Round;
            stroke.end_cap = Cap::Round;
            ctx.set_stroke(stroke);
            let c = seg.style.color;
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                c.r,
                c.g,
                c.b,
                seg.style.alpha_u8(),
            ));
            ctx.stroke_path(&bezpath_to_cpu(&seg.to_path()));
        }
        ctx.flush();
        ctx.render_to_pixmap(&mut self.scratch);
        self.ctx = Some(ctx);
        Ok(())
    }

    /// Scratch over visible, without modifying either layer.
    pub fn render_frame(&self) -> SketchResult<FrameRGBA> {
        let mut data = self.visible.data_as_u8_slice().to_vec();
        premul_over_in_place(&mut data, self.scratch.data_as_u8_slice())?;
        Ok(FrameRGBA {
            width: self.canvas.width,
            height: self.canvas.height,
            data,
            premultiplied: true,
        })
    }

    /// Merge scratch into visible permanently, then clear scratch.
    pub fn commit_stroke(&mut self) -> SketchResult<()> {
        premul_over_in_place(
            self.visible.data_as_u8_slice_mut(),
            self.scratch.data_as_u8_slice(),
        )?;
        clear_pixmap_to_transparent(&mut self.scratch);
        Ok(())
    }

    /// Fill visible with background and clear scratch.
    pub fn clear(&mut self) {
        self.fill_visible();
        clear_pixmap_to_transparent(&mut self.scratch);
    }

    /// Drop any in-progress stroke pixels.
    pub fn clear_scratch(&mut self) {
        clear_pixmap_to_transparent(&mut self.scratch);
    }

    /// Repaint visible from a decoded snapshot, unscaled at the origin over background.
    pub fn restore(&mut self, img: &PreparedImage) -> SketchResult<()> {
        self.fill_visible();
        blit_over(
            self.visible.data_as_u8_slice_mut(),
            self.canvas,
            img,
            0,
            0,
        )
    }

    /// Clear the canvas and place `img` centered, scaled to fit `fit` of each canvas side.
    pub fn place_image(&mut self, img: &PreparedImage, fit: f64) -> SketchResult<()> {
        let (w, h) = fit_within(img.width, img.height, self.canvas, fit);
        let scaled = resize_image(img, w, h)?;
        self.clear();
        let x0 = (i64::from(self.canvas.width) - i64::from(w)) / 2;
        let y0 = (i64::from(self.canvas.height) - i64::from(h)) / 2;
        blit_over(
            self.visible.data_as_u8_slice_mut(),
            self.canvas,
            &scaled,
            x0,
            y0,
        )
    }

    /// Premultiplied bytes of the visible layer.
    pub fn visible_rgba8_premul(&self) -> &[u8] {
        self.visible.data_as_u8_slice()
    }

    /// Premultiplied bytes of the scratch layer.
    pub fn scratch_rgba8_premul(&self) -> &[u8] {
        self.scratch.data_as_u8_slice()
    }

    /// PNG encoding of the visible layer.
    pub fn export_png(&self) -> SketchResult<Vec<u8>> {
        encode_png(
            self.visible.data_as_u8_slice(),
            self.canvas.width,
            self.canvas.height,
        )
    }

    fn fill_visible(&mut self) {
        clear_pixmap(
            &mut self.visible,
            Rgba8Premul::opaque(self.background).to_array(),
        );
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
