use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::foundation::core::Rgb8;
use crate::foundation::error::{SketchError, SketchResult};
use crate::history::undo::{DEFAULT_UNDO_CAPACITY, MAX_UNDO_CAPACITY};
use crate::tool::state::{DEFAULT_BASE_WIDTH, MAX_BASE_WIDTH, MIN_BASE_WIDTH};

/// Fraction of canvas width/height an imported image may occupy by default.
pub const DEFAULT_IMPORT_FIT: f64 = 0.7;

/// Options controlling a [`crate::Sketchpad`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SketchOpts {
    /// Paper color, also painted by the eraser.
    pub background: Rgb8,
    /// Maximum retained undo snapshots, within `[1, 1024]`.
    pub undo_capacity: usize,
    /// Starting brush width, within `[1, 100]`.
    pub base_width: f64,
    /// Imported images are scaled to fit this fraction of each canvas side, within `(0, 1]`.
    pub import_fit: f64,
    /// Directory for direct file-system saves. `None` means `~/Downloads`.
    pub save_dir: Option<PathBuf>,
}

impl Default for SketchOpts {
    fn default() -> Self {
        Self {
            background: Rgb8::WHITE,
            undo_capacity: DEFAULT_UNDO_CAPACITY,
            base_width: DEFAULT_BASE_WIDTH,
            import_fit: DEFAULT_IMPORT_FIT,
            save_dir: None,
        }
    }
}

impl SketchOpts {
    /// Parse options from a JSON reader. Missing fields take their defaults.
    pub fn from_reader<R: std::io::Read>(r: R) -> SketchResult<Self> {
        let opts: Self = serde_json::from_reader(r)
            .map_err(|e| SketchError::validation(format!("parse sketch options JSON: {e}")))?;
        opts.validate()?;
        Ok(opts)
    }

    /// Parse options from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> SketchResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            SketchError::validation(format!("open sketch options '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check value ranges.
    pub fn validate(&self) -> SketchResult<()> {
        if !(1..=MAX_UNDO_CAPACITY).contains(&self.undo_capacity) {
            return Err(SketchError::validation(format!(
                "undo_capacity must be within [1, {MAX_UNDO_CAPACITY}], got {}",
                self.undo_capacity
            )));
        }
        if !(MIN_BASE_WIDTH..=MAX_BASE_WIDTH).contains(&self.base_width) {
            return Err(SketchError::validation(format!(
                "base_width must be within [{MIN_BASE_WIDTH}, {MAX_BASE_WIDTH}], got {}",
                self.base_width
            )));
        }
        if !(self.import_fit > 0.0 && self.import_fit <= 1.0) {
            return Err(SketchError::validation(format!(
                "import_fit must be within (0, 1], got {}",
                self.import_fit
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/opts.rs"]
mod tests;
