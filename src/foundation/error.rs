/// Convenience result type used across the sketchpad crate.
pub type SketchResult<T> = Result<T, SketchError>;

/// Top-level error taxonomy for canvas, history and file operations.
///
/// Decode failures during undo-restore or image import never reach callers as errors; they are
/// logged and the visible layer is left as it was.
#[derive(thiserror::Error, Debug)]
pub enum SketchError {
    /// Invalid caller-provided data (dimensions, options, scripts).
    #[error("validation error: {0}")]
    Validation(String),

    /// Encoded image data could not be decoded or encoded.
    #[error("codec error: {0}")]
    Codec(String),

    /// Raster surfaces disagree in size or cannot be allocated.
    #[error("render error: {0}")]
    Render(String),

    /// File-system access failed in a file bridge.
    #[error("io error: {0}")]
    Io(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SketchError {
    /// Build a [`SketchError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SketchError::Codec`] value.
    pub fn codec(msg: impl Into<String>) -> Self {
        Self::Codec(msg.into())
    }

    /// Build a [`SketchError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`SketchError::Io`] value.
    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
