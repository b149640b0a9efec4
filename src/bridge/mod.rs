//! Host file bridges: where exported PNGs go and where imported images come from.

pub(crate) mod direct_fs;
pub(crate) mod file_bridge;
pub(crate) mod sandboxed;
