use std::collections::BTreeMap;

use image::DynamicImage;

use crate::{
    assets::font::Font,
    foundation::error::{LayerCardError, LayerCardResult},
};

/// Named, borrowed images and fonts referenced by the mapping form of a preset.
///
/// The registry never owns the resources; the caller keeps them alive for as long as the
/// resulting preset is used.
#[derive(Debug, Default, Clone)]
pub struct AssetRegistry<'a> {
    images: BTreeMap<String, &'a DynamicImage>,
    fonts: BTreeMap<String, &'a Font>,
}

impl<'a> AssetRegistry<'a> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an image under a unique key.
    pub fn image(mut self, key: impl Into<String>, image: &'a DynamicImage) -> LayerCardResult<Self> {
        let key = key.into();
        if self.images.contains_key(&key) {
            return Err(LayerCardError::validation(format!(
                "duplicate image key '{key}'"
            )));
        }
        self.images.insert(key, image);
        Ok(self)
    }

    /// Register a font under a unique key.
    pub fn font(mut self, key: impl Into<String>, font: &'a Font) -> LayerCardResult<Self> {
        let key = key.into();
        if self.fonts.contains_key(&key) {
            return Err(LayerCardError::validation(format!(
                "duplicate font key '{key}'"
            )));
        }
        self.fonts.insert(key, font);
        Ok(self)
    }

    /// Look up an image by key.
    pub fn get_image(&self, key: &str) -> LayerCardResult<&'a DynamicImage> {
        self.images.get(key).copied().ok_or_else(|| {
            LayerCardError::validation(format!("layer references unknown image key '{key}'"))
        })
    }

    /// Look up a font by key.
    pub fn get_font(&self, key: &str) -> LayerCardResult<&'a Font> {
        self.fonts.get(key).copied().ok_or_else(|| {
            LayerCardError::validation(format!("layer references unknown font key '{key}'"))
        })
    }
}
