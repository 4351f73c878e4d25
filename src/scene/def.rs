//! Mapping form of a preset.
//!
//! Pipelines that describe cards as JSON use these types. Images and fonts are referenced by
//! key and resolved against an [`AssetRegistry`] when the preset is built, so a definition
//! can be stored, diffed and sent around without any pixel data.

use serde::{Deserialize, Serialize};

use crate::{
    assets::registry::AssetRegistry,
    foundation::{
        color::Rgb8,
        error::{LayerCardError, LayerCardResult},
    },
    scene::model::{BgType, ImageLayer, Layer, Position, Preset, TextboxLayer},
};

/// Serializable preset description.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PresetDef {
    /// Canvas fill; white when omitted.
    #[serde(default)]
    pub bg_color: Rgb8,
    /// Ordered layers.
    #[serde(default)]
    pub layers: Vec<LayerDef>,
}

/// Serializable layer, tagged by `"type"`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LayerDef {
    /// `"type": "image"`.
    Image(ImageLayerDef),
    /// `"type": "textbox"`.
    Textbox(TextboxLayerDef),
}

/// Serializable image layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImageLayerDef {
    /// Free-form label for pipelines; not used for rendering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Registry key of the image.
    pub image: String,
    /// `[x, y]`, `y` may be `"auto"`.
    pub position: Position,
    /// Scale to the canvas height.
    #[serde(default)]
    pub resize_to_height: bool,
    /// Scale to the canvas width.
    #[serde(default)]
    pub resize_to_width: bool,
    /// Shrink to at most this width.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_width: Option<u32>,
    /// Shrink to at most this height.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_height: Option<u32>,
    /// Pin to the canvas bottom.
    #[serde(default)]
    pub from_bottom: bool,
}

/// Serializable text box layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextboxLayerDef {
    /// Free-form label for pipelines; not used for rendering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Text to draw.
    pub text: String,
    /// `[x, y]`, `y` may be `"auto"`.
    pub position: Position,
    /// Registry key of the font.
    pub font: String,
    /// Wrap boundary in pixels.
    pub max_width: u32,
    /// Glyph color.
    pub text_fill: Rgb8,
    /// Box color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg_fill: Option<Rgb8>,
    /// `"none"` or `"solid"`.
    #[serde(default)]
    pub bg_type: BgType,
    /// Inset between box and text.
    #[serde(default)]
    pub padding: u32,
    /// Gap above the box when auto-placed.
    #[serde(default)]
    pub auto_y_padding: u32,
    /// Pixels between wrapped lines.
    #[serde(default = "default_line_spacing")]
    pub line_spacing: u32,
    /// Uppercase before wrapping.
    #[serde(default)]
    pub uppercase: bool,
}

fn default_line_spacing() -> u32 {
    TextboxLayer::DEFAULT_LINE_SPACING
}

impl PresetDef {
    /// Parse a mapping value, turning any shape error into a validation error.
    pub fn from_value(value: &serde_json::Value) -> LayerCardResult<Self> {
        Self::deserialize(value)
            .map_err(|e| LayerCardError::validation(format!("invalid preset: {e}")))
    }

    /// Parse a JSON document.
    pub fn from_json_str(s: &str) -> LayerCardResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| LayerCardError::validation(format!("invalid preset: {e}")))
    }

    /// Mapping value form.
    pub fn to_value(&self) -> LayerCardResult<serde_json::Value> {
        serde_json::to_value(self).map_err(|e| LayerCardError::Other(e.into()))
    }

    /// Resolve asset keys and build a validated [`Preset`].
    pub fn resolve<'a>(&self, assets: &AssetRegistry<'a>) -> LayerCardResult<Preset<'a>> {
        let mut preset = Preset::new(self.bg_color);
        for (i, def) in self.layers.iter().enumerate() {
            let layer = def.resolve(assets).map_err(|e| match e {
                LayerCardError::Validation(msg) => {
                    LayerCardError::validation(format!("layer {i}: {msg}"))
                }
                other => other,
            })?;
            preset.layers.push(layer);
        }
        preset.validate()?;
        Ok(preset)
    }
}

impl LayerDef {
    fn resolve<'a>(&self, assets: &AssetRegistry<'a>) -> LayerCardResult<Layer<'a>> {
        Ok(match self {
            Self::Image(d) => Layer::Image(ImageLayer {
                image: assets.get_image(&d.image)?,
                position: d.position,
                resize_to_height: d.resize_to_height,
                resize_to_width: d.resize_to_width,
                max_width: d.max_width,
                max_height: d.max_height,
                from_bottom: d.from_bottom,
            }),
            Self::Textbox(d) => Layer::Textbox(TextboxLayer {
                text: d.text.clone(),
                position: d.position,
                font: assets.get_font(&d.font)?,
                max_width: d.max_width,
                text_fill: d.text_fill,
                bg_fill: d.bg_fill,
                bg_type: d.bg_type,
                padding: d.padding,
                auto_y_padding: d.auto_y_padding,
                line_spacing: d.line_spacing,
                uppercase: d.uppercase,
            }),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/def.rs"]
mod tests;
