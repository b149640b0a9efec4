use std::collections::VecDeque;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::bridge::file_bridge::{BridgeKind, FileBridge, SaveReceipt};
use crate::foundation::error::SketchResult;

/// A PNG handed to the host as a download.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Download {
    /// Suggested file name.
    pub file_name: String,
    /// Encoded PNG bytes.
    pub png: Vec<u8>,
}

/// Bridge for hosts without disk access.
///
/// Saves are queued as downloads for the host to deliver; opens consume files the host offered
/// through its picker.
#[derive(Debug)]
pub struct SandboxedBridge {
    downloads: Vec<Download>,
    offered: VecDeque<Vec<u8>>,
    clock: fn() -> u128,
}

impl Default for SandboxedBridge {
    fn default() -> Self {
        Self {
            downloads: Vec::new(),
            offered: VecDeque::new(),
            clock: unix_millis,
        }
    }
}

impl SandboxedBridge {
    /// Empty bridge using the system clock for file names.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the millisecond clock used in download names.
    pub fn with_clock(mut self, clock: fn() -> u128) -> Self {
        self.clock = clock;
        self
    }

    /// Hand over a file the user picked; the next `open_image` returns it.
    pub fn offer_file(&mut self, bytes: Vec<u8>) {
        self.offered.push_back(bytes);
    }

    /// Downloads queued so far.
    pub fn downloads(&self) -> &[Download] {
        &self.downloads
    }
}

fn unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}

impl FileBridge for SandboxedBridge {
    fn kind(&self) -> BridgeKind {
        BridgeKind::Sandboxed
    }

    fn save_png(&mut self, png: &[u8]) -> SketchResult<SaveReceipt> {
        let file_name = format!("sketch-{}.png", (self.clock)());
        self.downloads.push(Download {
            file_name: file_name.clone(),
            png: png.to_vec(),
        });
        Ok(SaveReceipt::Downloaded { file_name })
    }

    fn open_image(&mut self) -> SketchResult<Option<Vec<u8>>> {
        Ok(self.offered.pop_front())
    }

    fn take_downloads(&mut self) -> Vec<Download> {
        std::mem::take(&mut self.downloads)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/bridge/sandboxed.rs"]
mod tests;
