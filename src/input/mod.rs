//! Host input events: pointer samples and keyboard shortcuts.

pub(crate) mod pointer;
pub(crate) mod shortcut;
