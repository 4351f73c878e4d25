//! layercard composes card-style images from an ordered stack of layers.
//!
//! A [`Preset`] holds a background color and a list of image and text box layers. A
//! [`Composer`] draws them onto a fixed-size canvas, stacking layers whose `y` is
//! [`YPos::Auto`] directly below the previously drawn layer, and writes the result as JPEG or
//! PNG.
//!
//! - Build a [`Preset`] in code, or from a JSON mapping via [`Composer::from_preset_dict`]
//! - Call [`Composer::compose`] to get a [`Canvas`] with per-layer [`Placement`]s
//! - Call [`Composer::save`] to encode into the configured output directory
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod compose;
mod encode;
mod foundation;
mod layout;
mod render;
mod scene;
mod text;

pub use crate::assets::font::Font;
pub use crate::assets::image::ResizePolicy;
pub use crate::assets::registry::AssetRegistry;
pub use crate::compose::composer::{Composer, ComposerState};
pub use crate::compose::config::{ComposerConfig, DEFAULT_OUTPUT_DIR};
pub use crate::encode::file::{
    EncodeOptions, OutputFormat, PngCompression, encode_canvas, write_canvas,
};
pub use crate::foundation::color::Rgb8;
pub use crate::foundation::core::CanvasSize;
pub use crate::foundation::error::{LayerCardError, LayerCardResult};
pub use crate::layout::cursor::LayoutCursor;
pub use crate::render::canvas::{Canvas, LayerKind, Placement};
pub use crate::scene::def::{ImageLayerDef, LayerDef, PresetDef, TextboxLayerDef};
pub use crate::scene::model::{
    BgType, ImageLayer, Layer, Position, Preset, TextboxLayer, YPos,
};
pub use crate::text::wrap::{TextMeasure, wrap_text};
