use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
    str::FromStr,
};

use image::{
    ExtendedColorType, ImageEncoder,
    codecs::{
        jpeg::JpegEncoder,
        png::{CompressionType, FilterType, PngEncoder},
    },
};

use crate::{
    foundation::error::{LayerCardError, LayerCardResult},
    render::canvas::Canvas,
};

/// Encoded output format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Lossy JPEG, the default for photographic cards.
    #[default]
    Jpeg,
    /// Lossless PNG.
    Png,
}

impl OutputFormat {
    /// Conventional file extension.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = LayerCardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "jpeg" | "jpg" => Ok(Self::Jpeg),
            "png" => Ok(Self::Png),
            other => Err(LayerCardError::validation(format!(
                "unsupported output format '{other}'"
            ))),
        }
    }
}

/// PNG compression effort.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PngCompression {
    /// Encoder default.
    #[default]
    Default,
    /// Fast, larger files.
    Fast,
    /// Slow, smaller files.
    Best,
}

impl From<PngCompression> for CompressionType {
    fn from(c: PngCompression) -> Self {
        match c {
            PngCompression::Default => CompressionType::Default,
            PngCompression::Fast => CompressionType::Fast,
            PngCompression::Best => CompressionType::Best,
        }
    }
}

/// Encoder knobs; each applies only to its format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EncodeOptions {
    /// JPEG quality, 1..=100.
    pub jpeg_quality: u8,
    /// PNG compression effort.
    pub png_compression: PngCompression,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            jpeg_quality: 75,
            png_compression: PngCompression::Default,
        }
    }
}

impl EncodeOptions {
    /// Reject out-of-range quality settings.
    pub fn validate(&self) -> LayerCardResult<()> {
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(LayerCardError::validation(format!(
                "jpeg_quality must be in 1..=100, got {}",
                self.jpeg_quality
            )));
        }
        Ok(())
    }
}

/// Encode `canvas` into `out`.
pub fn encode_canvas<W: Write>(
    canvas: &Canvas,
    format: OutputFormat,
    opts: EncodeOptions,
    out: W,
) -> LayerCardResult<()> {
    opts.validate()?;
    let rgb = canvas.to_rgb_image()?;
    let (w, h) = rgb.dimensions();

    let res = match format {
        OutputFormat::Jpeg => {
            JpegEncoder::new_with_quality(out, opts.jpeg_quality).write_image(
                rgb.as_raw(),
                w,
                h,
                ExtendedColorType::Rgb8,
            )
        }
        OutputFormat::Png => PngEncoder::new_with_quality(
            out,
            opts.png_compression.into(),
            FilterType::Adaptive,
        )
        .write_image(rgb.as_raw(), w, h, ExtendedColorType::Rgb8),
    };
    res.map_err(|e| LayerCardError::encode(format!("{format:?} encode failed: {e}")))
}

/// Encode `canvas` and write it to `dir/filename`, creating `dir` if needed.
pub fn write_canvas(
    canvas: &Canvas,
    dir: &Path,
    filename: &str,
    format: OutputFormat,
    opts: EncodeOptions,
) -> LayerCardResult<PathBuf> {
    if filename.trim().is_empty() {
        return Err(LayerCardError::validation("output filename must be non-empty"));
    }
    opts.validate()?;

    std::fs::create_dir_all(dir).map_err(|e| LayerCardError::io(dir, e))?;

    let path = dir.join(filename);
    let file = File::create(&path).map_err(|e| LayerCardError::io(&path, e))?;
    let mut writer = BufWriter::new(file);
    encode_canvas(canvas, format, opts, &mut writer)?;
    writer.flush().map_err(|e| LayerCardError::io(&path, e))?;

    tracing::info!(path = %path.display(), ?format, "wrote card image");
    Ok(path)
}
