use std::path::PathBuf;

/// Result alias used throughout the crate.
pub type LayerCardResult<T> = Result<T, LayerCardError>;

/// Error taxonomy for preset construction, rendering and output.
#[derive(thiserror::Error, Debug)]
pub enum LayerCardError {
    /// Malformed or incomplete preset, layer, font or configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// A supplied image cannot be resized or pasted.
    #[error("decode error: {0}")]
    Decode(String),

    /// Text shaping or glyph rasterization failed.
    #[error("text error: {0}")]
    Text(String),

    /// Output directory creation or file write failed.
    #[error("io error at '{}': {source}", path.display())]
    Io {
        /// Path that was being created or written.
        path: PathBuf,
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
    },

    /// The image encoder rejected the canvas.
    #[error("encode error: {0}")]
    Encode(String),

    /// Anything else, with context attached by the caller.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LayerCardError {
    /// Build a [`LayerCardError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`LayerCardError::Decode`].
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`LayerCardError::Text`].
    pub fn text(msg: impl Into<String>) -> Self {
        Self::Text(msg.into())
    }

    /// Build a [`LayerCardError::Encode`].
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`LayerCardError::Io`] for `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Return `true` for construction-time validation failures.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
