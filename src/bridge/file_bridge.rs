use std::path::{Path, PathBuf};

use crate::bridge::direct_fs::DirectFilesystemBridge;
use crate::bridge::sandboxed::{Download, SandboxedBridge};
use crate::foundation::error::SketchResult;

/// Which host environment a bridge targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BridgeKind {
    /// No direct disk access: saves become downloads, opens come from a picker.
    Sandboxed,
    /// Direct disk access to a save directory.
    DirectFilesystem,
}

/// Where a saved PNG ended up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SaveReceipt {
    /// Queued as a browser-style download.
    Downloaded {
        /// Suggested file name, `sketch-<unix millis>.png`.
        file_name: String,
    },
    /// Written to disk.
    Written {
        /// Full path of the new file.
        path: PathBuf,
        /// `N` in `concept sketch N.png`.
        index: u32,
    },
}

impl SaveReceipt {
    /// Status text for the tool display.
    pub fn status_label(&self) -> String {
        match self {
            Self::Downloaded { .. } => "Saved".to_string(),
            Self::Written { index, .. } => format!("Saved #{index}"),
        }
    }
}

/// Save/load capability selected once at startup.
pub trait FileBridge {
    /// Environment this bridge serves.
    fn kind(&self) -> BridgeKind;

    /// Persist an encoded PNG of the visible layer.
    fn save_png(&mut self, png: &[u8]) -> SketchResult<SaveReceipt>;

    /// Fetch encoded image bytes chosen by the user, or `None` if nothing was chosen.
    fn open_image(&mut self) -> SketchResult<Option<Vec<u8>>>;

    /// Drain saves waiting to be delivered by the host as downloads.
    fn take_downloads(&mut self) -> Vec<Download> {
        Vec::new()
    }
}

/// Default save directory: `~/Downloads`.
pub fn default_save_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join("Downloads"))
}

/// Pick the bridge for this process.
///
/// Uses direct file-system access when `save_dir` (or the default save directory) is an existing,
/// writable directory; otherwise falls back to the sandboxed download flow. Nothing is created
/// on disk until the first save.
pub fn select_bridge(save_dir: Option<&Path>) -> Box<dyn FileBridge> {
    let dir = save_dir.map(Path::to_path_buf).or_else(default_save_dir);
    match dir {
        Some(dir) if is_writable_dir(&dir) => {
            tracing::info!(dir = %dir.display(), "using direct file-system bridge");
            Box::new(DirectFilesystemBridge::new(dir))
        }
        other => {
            tracing::info!(
                dir = ?other,
                "save directory unavailable, using sandboxed bridge"
            );
            Box::new(SandboxedBridge::new())
        }
    }
}

fn is_writable_dir(dir: &Path) -> bool {
    std::fs::metadata(dir)
        .map(|m| m.is_dir() && !m.permissions().readonly())
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "../../tests/unit/bridge/file_bridge.rs"]
mod tests;
