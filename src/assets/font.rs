use std::sync::Arc;

use crate::foundation::error::{LayerCardError, LayerCardResult};

/// A loaded font face at a fixed pixel size.
///
/// The font bytes are shared, so cloning a `Font` (for example to create a smaller size of the
/// same face) does not copy the file contents.
#[derive(Clone)]
pub struct Font {
    data: Arc<[u8]>,
    size_px: f32,
}

impl Font {
    /// Wrap raw TrueType/OpenType bytes rendered at `size_px`.
    pub fn new(data: impl Into<Arc<[u8]>>, size_px: f32) -> LayerCardResult<Self> {
        let data = data.into();
        if data.is_empty() {
            return Err(LayerCardError::validation("font data must be non-empty"));
        }
        validate_size(size_px)?;
        Ok(Self { data, size_px })
    }

    /// Same face at a different pixel size.
    pub fn with_size(&self, size_px: f32) -> LayerCardResult<Self> {
        validate_size(size_px)?;
        Ok(Self {
            data: Arc::clone(&self.data),
            size_px,
        })
    }

    /// Font size in pixels.
    pub fn size_px(&self) -> f32 {
        self.size_px
    }

    /// Raw font file bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Return `true` when both fonts share the same underlying bytes.
    pub(crate) fn same_face(&self, other: &Font) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }
}

impl std::fmt::Debug for Font {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Font")
            .field("bytes", &self.data.len())
            .field("size_px", &self.size_px)
            .finish()
    }
}

fn validate_size(size_px: f32) -> LayerCardResult<()> {
    if !size_px.is_finite() || size_px <= 0.0 {
        return Err(LayerCardError::validation(
            "font size_px must be finite and > 0",
        ));
    }
    Ok(())
}
