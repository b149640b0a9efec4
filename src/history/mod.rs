//! Snapshot undo history and the deferred decode slot that repaints from it.

pub(crate) mod pending;
pub(crate) mod undo;
