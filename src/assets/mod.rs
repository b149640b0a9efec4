//! Encoded image handling for snapshots, export and import.

pub(crate) mod decode;
