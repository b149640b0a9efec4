use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::foundation::core::Canvas;
use crate::foundation::error::{SketchError, SketchResult};
use crate::input::pointer::PointerEvent;
use crate::input::shortcut::Shortcut;
use crate::session::opts::SketchOpts;
use crate::session::sketch_session::Sketchpad;

/// A recorded sequence of host events, replayable without a window.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SketchScript {
    /// Initial canvas size.
    pub canvas: Canvas,
    /// Session options.
    #[serde(default)]
    pub opts: SketchOpts,
    /// Events in delivery order.
    pub events: Vec<ScriptEvent>,
}

/// One host event.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptEvent {
    /// Pointer pressed.
    Down {
        /// Horizontal position.
        x: f64,
        /// Vertical position.
        y: f64,
        /// Device pressure, if reported.
        #[serde(default)]
        pressure: Option<f32>,
    },
    /// Pointer moved.
    Move {
        /// Horizontal position.
        x: f64,
        /// Vertical position.
        y: f64,
        /// Device pressure, if reported.
        #[serde(default)]
        pressure: Option<f32>,
    },
    /// Pointer released.
    Up,
    /// Key pressed.
    Key {
        /// Key name as reported by the host, e.g. `"z"` or `"["`.
        key: String,
        /// Whether the platform command modifier was held.
        #[serde(default)]
        command: bool,
        /// Answer to the clear confirmation, if one is asked.
        #[serde(default = "default_confirm")]
        confirm: bool,
    },
    /// Viewport resized.
    Resize {
        /// New width.
        width: u32,
        /// New height.
        height: u32,
    },
    /// Image file dropped onto the canvas, relative to the script's assets root.
    Load {
        /// Path of the image file.
        path: PathBuf,
    },
    /// Host frame tick: run deferred decodes.
    Settle,
}

fn default_confirm() -> bool {
    true
}

/// Counts from one [`replay`] run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReplayStats {
    /// Events delivered.
    pub events: usize,
    /// Strokes committed, taps included.
    pub strokes: usize,
    /// Save shortcuts handled.
    pub saves: usize,
}

impl SketchScript {
    /// Parse a script from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> SketchResult<Self> {
        let script: Self = serde_json::from_reader(r)
            .map_err(|e| SketchError::validation(format!("parse sketch script JSON: {e}")))?;
        script.canvas.validate()?;
        script.opts.validate()?;
        Ok(script)
    }

    /// Parse a script from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> SketchResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            SketchError::validation(format!("open sketch script '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }
}

/// Deliver `events` to `pad` in order, then settle.
///
/// `Load` paths are resolved against `assets_root`.
#[tracing::instrument(skip(pad, events), fields(events = events.len()))]
pub fn replay(
    pad: &mut Sketchpad,
    events: &[ScriptEvent],
    assets_root: &Path,
) -> SketchResult<ReplayStats> {
    let mut stats = ReplayStats::default();
    for ev in events {
        match ev {
            ScriptEvent::Down { x, y, pressure } => {
                pad.pointer_down(PointerEvent {
                    x: *x,
                    y: *y,
                    pressure: *pressure,
                })?;
            }
            ScriptEvent::Move { x, y, pressure } => {
                pad.pointer_move(PointerEvent {
                    x: *x,
                    y: *y,
                    pressure: *pressure,
                })?;
            }
            ScriptEvent::Up => {
                if pad.is_drawing() {
                    stats.strokes += 1;
                }
                pad.pointer_up()?;
            }
            ScriptEvent::Key {
                key,
                command,
                confirm,
            } => {
                let Some(shortcut) = Shortcut::from_key(key, *command) else {
                    tracing::debug!(key = %key, command, "unbound key ignored");
                    stats.events += 1;
                    continue;
                };
                if shortcut == Shortcut::Save {
                    stats.saves += 1;
                }
                let answer = *confirm;
                pad.handle_shortcut(shortcut, &mut |_: &str| answer)?;
            }
            ScriptEvent::Resize { width, height } => {
                pad.resize(Canvas::new(*width, *height)?)?;
            }
            ScriptEvent::Load { path } => {
                let full = assets_root.join(path);
                let bytes = std::fs::read(&full).map_err(|e| {
                    SketchError::io(format!("read image '{}': {e}", full.display()))
                })?;
                pad.load_image(bytes)?;
            }
            ScriptEvent::Settle => {
                pad.settle()?;
            }
        }
        stats.events += 1;
    }
    pad.settle()?;
    tracing::info!(
        events = stats.events,
        strokes = stats.strokes,
        saves = stats.saves,
        "replay finished"
    );
    Ok(stats)
}

#[cfg(test)]
#[path = "../../tests/unit/session/script.rs"]
mod tests;
