use std::sync::Arc;

use crate::history::undo::Snapshot;

/// Deferred decode-and-paint work.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PaintJob {
    /// Repaint visible from an undo snapshot.
    Restore(Snapshot),
    /// Decode an external image, place it on a cleared canvas and record an undo point.
    Import(Arc<[u8]>),
}

/// Single-slot, latest-wins queue between "decode requested" and "decode painted".
///
/// A newer restore replaces an older pending restore, since each one repaints the whole visible
/// layer. Imports are never discarded: an import displaced by a newer job is handed back to the
/// caller to run immediately.
#[derive(Debug, Default)]
pub struct DecodeSlot {
    job: Option<PaintJob>,
    superseded: u64,
}

impl DecodeSlot {
    /// Create an idle slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `job`, returning a displaced import that must run before it.
    pub fn submit(&mut self, job: PaintJob) -> Option<PaintJob> {
        match self.job.replace(job) {
            Some(PaintJob::Restore(_)) => {
                self.superseded = self.superseded.saturating_add(1);
                tracing::debug!(superseded = self.superseded, "pending restore superseded");
                None
            }
            displaced => displaced,
        }
    }

    /// Take the pending job, leaving the slot idle.
    pub fn take(&mut self) -> Option<PaintJob> {
        self.job.take()
    }

    /// Peek at the pending job.
    pub fn peek(&self) -> Option<&PaintJob> {
        self.job.as_ref()
    }

    /// Whether nothing is waiting.
    pub fn is_idle(&self) -> bool {
        self.job.is_none()
    }

    /// Count of restores replaced before they were painted.
    pub fn superseded(&self) -> u64 {
        self.superseded
    }
}

#[cfg(test)]
#[path = "../../tests/unit/history/pending.rs"]
mod tests;
