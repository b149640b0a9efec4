use std::sync::Arc;

use crate::assets::decode::decode_image;
use crate::bridge::file_bridge::{FileBridge, SaveReceipt};
use crate::foundation::core::Canvas;
use crate::foundation::error::SketchResult;
use crate::history::pending::{DecodeSlot, PaintJob};
use crate::history::undo::{Snapshot, UndoRing};
use crate::input::pointer::PointerEvent;
use crate::input::shortcut::Shortcut;
use crate::render::backend::FrameRGBA;
use crate::render::compositor::Compositor;
use crate::session::opts::SketchOpts;
use crate::stroke::smooth::Stroke;
use crate::tool::state::ToolState;

/// Prompt passed to the confirmation callback before clearing.
pub const CLEAR_PROMPT: &str = "Clear?";

/// One sketching surface and everything that edits it.
///
/// Owns the tool state, the two raster layers, the undo history, the pending decode slot and the
/// file bridge. All methods run on the host's single event thread.
///
/// Undo and image import are deferred: they queue a decode and return immediately. The host calls
/// [`Sketchpad::settle`] (typically once per frame) to decode and repaint. Every editing method
/// settles first, so deferred work never lands on top of newer edits.
pub struct Sketchpad {
    opts: SketchOpts,
    tool: ToolState,
    compositor: Compositor,
    history: UndoRing,
    pending: DecodeSlot,
    stroke: Option<Stroke>,
    bridge: Box<dyn FileBridge>,
    status: String,
}

impl std::fmt::Debug for Sketchpad {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sketchpad")
            .field("canvas", &self.compositor.canvas())
            .field("tool", &self.tool)
            .field("history_depth", &self.history.depth())
            .field("drawing", &self.stroke.is_some())
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

impl Sketchpad {
    /// Blank sketch of size `canvas`; the blank state is the first undo entry.
    pub fn new(canvas: Canvas, opts: SketchOpts, bridge: Box<dyn FileBridge>) -> SketchResult<Self> {
        opts.validate()?;
        let compositor = Compositor::new(canvas, opts.background)?;
        let blank = Snapshot::from_png(canvas.width, canvas.height, compositor.export_png()?);
        let tool = ToolState::with_base_width(opts.base_width);
        Ok(Self {
            history: UndoRing::new(opts.undo_capacity, blank),
            status: tool.tool.label().to_string(),
            opts,
            tool,
            compositor,
            pending: DecodeSlot::new(),
            stroke: None,
            bridge,
        })
    }

    /// Options this session was created with.
    pub fn opts(&self) -> &SketchOpts {
        &self.opts
    }

    /// Current tool state.
    pub fn tool(&self) -> &ToolState {
        &self.tool
    }

    /// Mutable tool state, for hosts with their own tool UI.
    pub fn tool_mut(&mut self) -> &mut ToolState {
        &mut self.tool
    }

    /// Current canvas size.
    pub fn canvas(&self) -> Canvas {
        self.compositor.canvas()
    }

    /// Read access to both raster layers.
    pub fn compositor(&self) -> &Compositor {
        &self.compositor
    }

    /// Number of undo snapshots held.
    pub fn history_depth(&self) -> usize {
        self.history.depth()
    }

    /// Undo history, oldest first.
    pub fn history(&self) -> &UndoRing {
        &self.history
    }

    /// Status text: the active tool/tone, or the result of the last save.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Whether a stroke is in progress.
    pub fn is_drawing(&self) -> bool {
        self.stroke.is_some()
    }

    /// Whether a deferred decode is waiting for [`Sketchpad::settle`].
    pub fn has_pending_paint(&self) -> bool {
        !self.pending.is_idle()
    }

    /// The file bridge chosen at startup.
    pub fn bridge(&self) -> &dyn FileBridge {
        self.bridge.as_ref()
    }

    /// Mutable file bridge, for hosts feeding picker results.
    pub fn bridge_mut(&mut self) -> &mut dyn FileBridge {
        self.bridge.as_mut()
    }

    /// Scratch composited over visible for display.
    pub fn frame(&self) -> SketchResult<FrameRGBA> {
        self.compositor.render_frame()
    }

    /// Reallocate layers for a new viewport size. Any stroke in progress is dropped.
    #[tracing::instrument(skip(self))]
    pub fn resize(&mut self, canvas: Canvas) -> SketchResult<()> {
        self.settle()?;
        self.stroke = None;
        self.compositor.resize(canvas)
    }

    /// Start a stroke at `ev` with the current tool.
    pub fn pointer_down(&mut self, ev: PointerEvent) -> SketchResult<()> {
        self.settle()?;
        self.stroke = Some(Stroke::begin(ev.sample(), self.tool));
        self.compositor.clear_scratch();
        Ok(())
    }

    /// Extend the active stroke and redraw it. Ignored when no stroke is active.
    pub fn pointer_move(&mut self, ev: PointerEvent) -> SketchResult<()> {
        let Some(stroke) = self.stroke.as_mut() else {
            return Ok(());
        };
        stroke.push(ev.sample());
        let segments = stroke.segments(self.compositor.background());
        self.compositor.paint_stroke(&segments)
    }

    /// Finish the active stroke: merge it into visible and record an undo point.
    ///
    /// A tap too short to draw anything still records an undo point.
    pub fn pointer_up(&mut self) -> SketchResult<()> {
        if self.stroke.is_none() {
            return Ok(());
        }
        self.settle()?;
        let Some(stroke) = self.stroke.take() else {
            return Ok(());
        };
        self.compositor.commit_stroke()?;
        self.record()?;
        tracing::debug!(
            samples = stroke.samples().len(),
            visible = stroke.is_visible(),
            depth = self.history.depth(),
            "stroke committed"
        );
        Ok(())
    }

    /// Fill the canvas with background and record an undo point.
    #[tracing::instrument(skip(self))]
    pub fn clear(&mut self) -> SketchResult<()> {
        self.settle()?;
        self.stroke = None;
        self.compositor.clear();
        self.record()
    }

    /// Step back one snapshot. Returns `false` at the initial state.
    ///
    /// The repaint is deferred until [`Sketchpad::settle`]. A pending import is placed and recorded
    /// first so the step back lands on the state before it.
    #[tracing::instrument(skip(self))]
    pub fn undo(&mut self) -> SketchResult<bool> {
        if matches!(self.pending.peek(), Some(PaintJob::Import(_))) {
            self.settle()?;
        }
        let Some(snapshot) = self.history.undo() else {
            tracing::debug!("undo at initial state ignored");
            return Ok(false);
        };
        self.queue(PaintJob::Restore(snapshot))?;
        Ok(true)
    }

    /// Queue encoded image bytes for placement on a cleared canvas.
    ///
    /// Decoding happens in [`Sketchpad::settle`]; undecodable data leaves the canvas unchanged and
    /// records nothing.
    pub fn load_image(&mut self, bytes: Vec<u8>) -> SketchResult<()> {
        self.settle()?;
        self.queue(PaintJob::Import(Arc::from(bytes)))
    }

    /// Run deferred decodes and repaint. Returns the number of jobs painted or dropped.
    #[tracing::instrument(skip(self))]
    pub fn settle(&mut self) -> SketchResult<usize> {
        let mut ran = 0;
        while let Some(job) = self.pending.take() {
            self.run_job(job)?;
            ran += 1;
        }
        Ok(ran)
    }

    /// PNG encoding of the visible layer, after settling deferred work.
    pub fn export_png(&mut self) -> SketchResult<Vec<u8>> {
        self.settle()?;
        self.compositor.export_png()
    }

    /// Save the visible layer through the file bridge.
    #[tracing::instrument(skip(self))]
    pub fn save(&mut self) -> SketchResult<SaveReceipt> {
        let png = self.export_png()?;
        let receipt = self.bridge.save_png(&png)?;
        self.status = receipt.status_label();
        tracing::info!(?receipt, bytes = png.len(), "sketch saved");
        Ok(receipt)
    }

    /// Ask the bridge for an image and queue it for import. Returns `false` if none was chosen.
    #[tracing::instrument(skip(self))]
    pub fn open(&mut self) -> SketchResult<bool> {
        self.settle()?;
        match self.bridge.open_image()? {
            Some(bytes) => {
                self.load_image(bytes)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Dispatch a keyboard shortcut. `confirm` is asked before clearing.
    pub fn handle_shortcut(
        &mut self,
        shortcut: Shortcut,
        confirm: &mut dyn FnMut(&str) -> bool,
    ) -> SketchResult<()> {
        match shortcut {
            Shortcut::Save => {
                self.save()?;
            }
            Shortcut::Open => {
                self.open()?;
            }
            Shortcut::Undo => {
                self.undo()?;
            }
            Shortcut::Tool(tool) => {
                self.tool.select(tool);
                self.status = tool.label().to_string();
            }
            Shortcut::Tone(tone) => {
                self.tool.select_tone(tone);
                self.status = tone.label().to_string();
            }
            Shortcut::Clear => {
                if confirm(CLEAR_PROMPT) {
                    self.clear()?;
                }
            }
            Shortcut::Narrow => {
                self.tool.narrow();
            }
            Shortcut::Widen => {
                self.tool.widen();
            }
        }
        Ok(())
    }

    fn queue(&mut self, job: PaintJob) -> SketchResult<()> {
        if let Some(displaced) = self.pending.submit(job) {
            self.run_job(displaced)?;
        }
        Ok(())
    }

    fn run_job(&mut self, job: PaintJob) -> SketchResult<()> {
        match job {
            PaintJob::Restore(snapshot) => match snapshot.decode() {
                Ok(img) => self.compositor.restore(&img),
                Err(e) => {
                    tracing::warn!(error = %e, "undo snapshot failed to decode; canvas unchanged");
                    Ok(())
                }
            },
            PaintJob::Import(bytes) => match decode_image(&bytes) {
                Ok(img) => {
                    self.compositor.place_image(&img, self.opts.import_fit)?;
                    self.record()?;
                    tracing::debug!(
                        width = img.width,
                        height = img.height,
                        "image imported"
                    );
                    Ok(())
                }
                Err(e) => {
                    tracing::warn!(error = %e, "image failed to decode; canvas unchanged");
                    Ok(())
                }
            },
        }
    }

    fn record(&mut self) -> SketchResult<()> {
        let canvas = self.compositor.canvas();
        let png = self.compositor.export_png()?;
        self.history
            .push(Snapshot::from_png(canvas.width, canvas.height, png));
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/sketch_session.rs"]
mod tests;
