//! Pointer samples to smoothed, styled curve segments.

pub(crate) mod smooth;
