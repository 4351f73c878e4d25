use std::path::PathBuf;

use crate::foundation::{
    core::CanvasSize,
    error::{LayerCardError, LayerCardResult},
};

/// Output directory used when none is configured.
pub const DEFAULT_OUTPUT_DIR: &str = "generated_templates";

/// Canvas dimensions and output destination for a [`Composer`](crate::Composer).
///
/// Deserializes with defaults for missing fields, so `{}` yields a 1080×1350 canvas writing to
/// `generated_templates/`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ComposerConfig {
    /// Canvas size in pixels.
    pub canvas_size: CanvasSize,
    /// Directory that `save` writes into; created on demand.
    pub output_dir: PathBuf,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            canvas_size: CanvasSize::PORTRAIT_CARD,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

impl ComposerConfig {
    /// Default config writing to `output_dir`.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }

    /// Replace the canvas size.
    pub fn with_canvas_size(mut self, canvas_size: CanvasSize) -> Self {
        self.canvas_size = canvas_size;
        self
    }

    /// Apply `LAYERCARD_OUTPUT_DIR`, `LAYERCARD_CANVAS_WIDTH` and `LAYERCARD_CANVAS_HEIGHT`.
    pub fn with_env_overrides(self) -> LayerCardResult<Self> {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Same as [`with_env_overrides`](Self::with_env_overrides) with an explicit variable source.
    pub fn with_overrides_from(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> LayerCardResult<Self> {
        if let Some(dir) = lookup("LAYERCARD_OUTPUT_DIR").filter(|v| !v.trim().is_empty()) {
            self.output_dir = PathBuf::from(dir);
        }
        if let Some(w) = parse_dim(&lookup, "LAYERCARD_CANVAS_WIDTH")? {
            self.canvas_size.width = w;
        }
        if let Some(h) = parse_dim(&lookup, "LAYERCARD_CANVAS_HEIGHT")? {
            self.canvas_size.height = h;
        }
        self.validate()?;
        Ok(self)
    }

    /// Reject empty canvases.
    pub fn validate(&self) -> LayerCardResult<()> {
        self.canvas_size.validate()
    }
}

fn parse_dim(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> LayerCardResult<Option<u32>> {
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    raw.trim()
        .parse::<u32>()
        .map(Some)
        .map_err(|e| LayerCardError::validation(format!("{key}='{raw}' is not a pixel count: {e}")))
}
