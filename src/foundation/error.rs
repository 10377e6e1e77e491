/// Convenience result type used across the crate.
pub type LayerModeResult<T> = Result<T, LayerModeError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Numeric degeneracies inside kernels (zero alpha, zero-length edges, division by
/// zero) are never reported here; they are handled by well-defined fallbacks.
#[derive(thiserror::Error, Debug)]
pub enum LayerModeError {
    /// Invalid user-provided settings (opacity, immutable overrides, thread counts).
    #[error("validation error: {0}")]
    Validation(String),

    /// Pixel spans whose lengths disagree with the pixel count of a kernel call.
    #[error("buffer error: {0}")]
    Buffer(String),

    /// Degenerate geometry handed to the cage or path code.
    #[error("geometry error: {0}")]
    Geometry(String),

    /// Errors when serializing or deserializing settings.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LayerModeError {
    /// Build a [`LayerModeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`LayerModeError::Buffer`] value.
    pub fn buffer(msg: impl Into<String>) -> Self {
        Self::Buffer(msg.into())
    }

    /// Build a [`LayerModeError::Geometry`] value.
    pub fn geometry(msg: impl Into<String>) -> Self {
        Self::Geometry(msg.into())
    }

    /// Build a [`LayerModeError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for LayerModeError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
