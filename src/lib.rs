//! Sketchpad is a pointer-driven sketch canvas.
//!
//! Pointer samples are smoothed into quadratic curves and rasterized on the CPU into two layers:
//! a transient scratch layer for the stroke in progress and a persistent visible layer. Every
//! committed edit pushes a PNG snapshot onto a bounded undo ring. The public API is
//! session-oriented:
//!
//! - Pick a [`FileBridge`] with [`select_bridge`]
//! - Create a [`Sketchpad`] and feed it pointer events and [`Shortcut`]s
//! - Call [`Sketchpad::settle`] once per host frame and display [`Sketchpad::frame`]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod assets;
mod bridge;
mod foundation;
mod history;
mod input;
mod render;
mod session;
mod stroke;
mod tool;

pub use crate::foundation::core::{BezPath, Canvas, Point, Rgb8, Rgba8Premul};
pub use crate::foundation::error::{SketchError, SketchResult};

pub use crate::assets::decode::{
    PreparedImage, decode_image, encode_png, fit_within, resize_image,
};
pub use crate::bridge::direct_fs::{DirectFilesystemBridge, SKETCH_FILE_STEM, sketch_file_path};
pub use crate::bridge::file_bridge::{
    BridgeKind, FileBridge, SaveReceipt, default_save_dir, select_bridge,
};
pub use crate::bridge::sandboxed::{Download, SandboxedBridge};
pub use crate::history::pending::{DecodeSlot, PaintJob};
pub use crate::history::undo::{DEFAULT_UNDO_CAPACITY, MAX_UNDO_CAPACITY, Snapshot, UndoRing};
pub use crate::input::pointer::PointerEvent;
pub use crate::input::shortcut::Shortcut;
pub use crate::render::backend::FrameRGBA;
pub use crate::render::compositor::Compositor;
pub use crate::session::opts::{DEFAULT_IMPORT_FIT, SketchOpts};
pub use crate::session::script::{ReplayStats, ScriptEvent, SketchScript, replay};
pub use crate::session::sketch_session::{CLEAR_PROMPT, Sketchpad};
pub use crate::stroke::smooth::{
    DEFAULT_PRESSURE, ERASER_WIDTH_FACTOR, PENCIL_ALPHA_MAX, Sample, Segment, SegmentStyle, Stroke,
    normalize_pressure, segment_style, smooth_segments,
};
pub use crate::tool::state::{
    BASE_WIDTH_STEP, DEFAULT_BASE_WIDTH, MAX_BASE_WIDTH, MIN_BASE_WIDTH, Tone, ToolKind, ToolState,
};
