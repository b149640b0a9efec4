use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::bridge::file_bridge::{BridgeKind, FileBridge, SaveReceipt};
use crate::foundation::error::{SketchError, SketchResult};

/// Base name of files written by [`DirectFilesystemBridge`].
pub const SKETCH_FILE_STEM: &str = "concept sketch";

type Picker = Box<dyn FnMut() -> Option<PathBuf>>;

/// Bridge with direct disk access.
///
/// Saves go to `<dir>/concept sketch N.png` with the smallest unused `N >= 1`; opens read the path
/// returned by the host's file dialog.
pub struct DirectFilesystemBridge {
    dir: PathBuf,
    picker: Picker,
}

impl std::fmt::Debug for DirectFilesystemBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectFilesystemBridge")
            .field("dir", &self.dir)
            .finish_non_exhaustive()
    }
}

impl DirectFilesystemBridge {
    /// Bridge saving into `dir`, with a picker that never selects anything.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            picker: Box::new(|| None),
        }
    }

    /// Replace the open-file dialog.
    pub fn with_picker(mut self, picker: impl FnMut() -> Option<PathBuf> + 'static) -> Self {
        self.picker = Box::new(picker);
        self
    }

    /// Save directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

/// Path of `concept sketch {index}.png` inside `dir`.
pub fn sketch_file_path(dir: &Path, index: u32) -> PathBuf {
    dir.join(format!("{SKETCH_FILE_STEM} {index}.png"))
}

impl FileBridge for DirectFilesystemBridge {
    fn kind(&self) -> BridgeKind {
        BridgeKind::DirectFilesystem
    }

    fn save_png(&mut self, png: &[u8]) -> SketchResult<SaveReceipt> {
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            SketchError::io(format!("create save dir '{}': {e}", self.dir.display()))
        })?;

        let mut index = 1u32;
        loop {
            let path = sketch_file_path(&self.dir, index);
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(mut f) => {
                    f.write_all(png)
                        .map_err(|e| SketchError::io(format!("write '{}': {e}", path.display())))?;
                    tracing::debug!(path = %path.display(), bytes = png.len(), "sketch saved");
                    return Ok(SaveReceipt::Written { path, index });
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    index = index
                        .checked_add(1)
                        .ok_or_else(|| SketchError::io("no free sketch file index"))?;
                }
                Err(e) => {
                    return Err(SketchError::io(format!(
                        "create '{}': {e}",
                        path.display()
                    )));
                }
            }
        }
    }

    fn open_image(&mut self) -> SketchResult<Option<Vec<u8>>> {
        let Some(path) = (self.picker)() else {
            return Ok(None);
        };
        let bytes = std::fs::read(&path)
            .map_err(|e| SketchError::io(format!("read image '{}': {e}", path.display())))?;
        Ok(Some(bytes))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/bridge/direct_fs.rs"]
mod tests;
