//! Two-layer CPU raster compositing.

pub(crate) mod backend;
pub(crate) mod compositor;
pub(crate) mod raster;
