use std::path::PathBuf;

use crate::{
    assets::registry::AssetRegistry,
    compose::config::ComposerConfig,
    encode::file::{EncodeOptions, OutputFormat, write_canvas},
    foundation::error::{LayerCardError, LayerCardResult},
    layout::cursor::LayoutCursor,
    render::canvas::Canvas,
    scene::{def::PresetDef, model::Preset},
    text::engine::TextLayoutEngine,
};

/// Lifecycle of a [`Composer`]. Transitions only move forward.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ComposerState {
    /// Constructed, nothing rendered yet.
    #[default]
    Initialized,
    /// At least one successful `compose`.
    Composed,
    /// At least one successful `save`.
    Saved,
}

/// Renders a [`Preset`] onto a fresh canvas and writes it out.
///
/// Every `compose` starts from a new canvas, a new layout cursor and new text contexts, so
/// repeated calls produce identical pixels.
#[derive(Debug)]
pub struct Composer<'a> {
    preset: Preset<'a>,
    config: ComposerConfig,
    state: ComposerState,
}

impl<'a> Composer<'a> {
    /// Validate `preset` and `config` and build a composer.
    pub fn new(preset: Preset<'a>, config: ComposerConfig) -> LayerCardResult<Self> {
        config.validate()?;
        preset.validate()?;
        Ok(Self {
            preset,
            config,
            state: ComposerState::Initialized,
        })
    }

    /// Build from the mapping form, resolving asset keys through `assets`.
    ///
    /// Nothing is rendered and the filesystem is not touched.
    pub fn from_preset_dict(
        value: &serde_json::Value,
        assets: &AssetRegistry<'a>,
        config: ComposerConfig,
    ) -> LayerCardResult<Self> {
        let preset = PresetDef::from_value(value)?.resolve(assets)?;
        Self::new(preset, config)
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ComposerState {
        self.state
    }

    /// The preset being composed.
    pub fn preset(&self) -> &Preset<'a> {
        &self.preset
    }

    /// Canvas and output configuration.
    pub fn config(&self) -> &ComposerConfig {
        &self.config
    }

    /// Draw every layer in order and return the finished canvas.
    ///
    /// Layers with an explicit `y` are placed there; `auto` layers are placed below the
    /// previously drawn layer. The first failing layer aborts the whole composition.
    #[tracing::instrument(skip(self), fields(layers = self.preset.layers.len()))]
    pub fn compose(&mut self) -> LayerCardResult<Canvas> {
        let canvas = self.render_canvas()?;
        self.state = self.state.max(ComposerState::Composed);
        Ok(canvas)
    }

    /// Compose and write `<output_dir>/<filename>`, returning the written path.
    #[tracing::instrument(skip(self, options), fields(output_dir = %self.config.output_dir.display()))]
    pub fn save(
        &mut self,
        filename: &str,
        format: OutputFormat,
        options: EncodeOptions,
    ) -> LayerCardResult<PathBuf> {
        let canvas = self.compose()?;
        let path = write_canvas(&canvas, &self.config.output_dir, filename, format, options)?;
        self.state = ComposerState::Saved;
        Ok(path)
    }

    fn render_canvas(&self) -> LayerCardResult<Canvas> {
        let mut canvas = Canvas::new(self.config.canvas_size, self.preset.bg_color)?;
        let mut cursor = LayoutCursor::new();
        let mut text = TextLayoutEngine::new();

        for (i, layer) in self.preset.layers.iter().enumerate() {
            let placement = layer
                .render(i, &mut canvas, &mut cursor, &mut text)
                .map_err(|e| annotate(i, e))?;
            tracing::debug!(
                index = i,
                kind = ?placement.kind,
                x = placement.x,
                y = placement.y,
                w = placement.width,
                h = placement.height,
                cursor = cursor.y(),
                "placed layer"
            );
            canvas.record(placement);
        }
        Ok(canvas)
    }
}

fn annotate(index: usize, err: LayerCardError) -> LayerCardError {
    match err {
        LayerCardError::Validation(m) => LayerCardError::validation(format!("layer {index}: {m}")),
        LayerCardError::Decode(m) => LayerCardError::decode(format!("layer {index}: {m}")),
        LayerCardError::Text(m) => LayerCardError::text(format!("layer {index}: {m}")),
        other => other,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/composer.rs"]
mod tests;
