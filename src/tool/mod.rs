//! Drawing tool configuration shared by the smoother and the dispatch layer.

pub(crate) mod state;
