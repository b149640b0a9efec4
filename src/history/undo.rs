use std::collections::VecDeque;
use std::sync::Arc;

use crate::assets::decode::{PreparedImage, decode_image};
use crate::foundation::error::{SketchError, SketchResult};

/// Number of snapshots kept by default.
pub const DEFAULT_UNDO_CAPACITY: usize = 30;
/// Largest capacity accepted from configuration.
pub const MAX_UNDO_CAPACITY: usize = 1024;

/// Immutable PNG encoding of the visible layer at one instant.
///
/// Clones share the encoded bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    width: u32,
    height: u32,
    png: Arc<[u8]>,
}

impl Snapshot {
    /// Wrap already-encoded PNG bytes of a `width x height` raster.
    pub fn from_png(width: u32, height: u32, png: Vec<u8>) -> Self {
        Self {
            width,
            height,
            png: png.into(),
        }
    }

    /// Width of the captured raster.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height of the captured raster.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Encoded bytes.
    pub fn png_bytes(&self) -> &[u8] {
        &self.png
    }

    /// Decode back into premultiplied pixels.
    pub fn decode(&self) -> SketchResult<PreparedImage> {
        let img = decode_image(&self.png)?;
        if img.width != self.width || img.height != self.height {
            return Err(SketchError::codec(format!(
                "snapshot decoded to {}x{}, expected {}x{}",
                img.width, img.height, self.width, self.height
            )));
        }
        Ok(img)
    }
}

/// Fixed-capacity FIFO of canvas snapshots.
///
/// Never empty: it is seeded with the initial blank canvas, and `undo` refuses to remove the last
/// entry.
#[derive(Clone, Debug)]
pub struct UndoRing {
    entries: VecDeque<Snapshot>,
    capacity: usize,
}

impl UndoRing {
    /// Create a ring holding `initial`. A zero capacity is raised to one.
    ///
    /// Storage grows with pushes, not with `capacity`.
    pub fn new(capacity: usize, initial: Snapshot) -> Self {
        let capacity = capacity.max(1);
        let mut entries = VecDeque::new();
        entries.push_back(initial);
        Self { entries, capacity }
    }

    /// Append `snapshot`, evicting the oldest entry first when full.
    pub fn push(&mut self, snapshot: Snapshot) {
        while self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(snapshot);
    }

    /// Drop the newest entry and return the one now on top.
    ///
    /// Returns `None` without changing anything when only one entry remains.
    pub fn undo(&mut self) -> Option<Snapshot> {
        if self.entries.len() <= 1 {
            return None;
        }
        self.entries.pop_back();
        self.entries.back().cloned()
    }

    /// Number of retained snapshots, always `>= 1`.
    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    /// Maximum number of retained snapshots.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Newest snapshot.
    pub fn latest(&self) -> Option<&Snapshot> {
        self.entries.back()
    }

    /// Oldest retained snapshot.
    pub fn oldest(&self) -> Option<&Snapshot> {
        self.entries.front()
    }

    /// Snapshots from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &Snapshot> {
        self.entries.iter()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/history/undo.rs"]
mod tests;
