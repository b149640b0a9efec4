//! Event-dispatch layer: configuration, the sketch session, and scripted replay.

pub(crate) mod opts;
pub(crate) mod script;
pub(crate) mod sketch_session;
