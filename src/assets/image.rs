use image::{DynamicImage, imageops::FilterType};

use crate::foundation::{
    core::{CanvasSize, premultiply_rgba8_in_place},
    error::{LayerCardError, LayerCardResult},
};

/// Image layer pixels ready for compositing.
#[derive(Clone, Debug)]
pub(crate) struct PreparedImage {
    /// Width in pixels.
    pub(crate) width: u32,
    /// Height in pixels.
    pub(crate) height: u32,
    /// Premultiplied RGBA8, row-major, tightly packed.
    pub(crate) rgba8_premul: Vec<u8>,
}

/// How an image layer is scaled before it is pasted.
///
/// Every policy preserves the source aspect ratio.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResizePolicy {
    /// Paste at the source size.
    None,
    /// Scale so the height equals the canvas height.
    ToCanvasHeight,
    /// Scale so the width equals the canvas width.
    ToCanvasWidth,
    /// Shrink (never enlarge) to fit within the given bounds.
    Within {
        /// Optional width bound.
        max_width: Option<u32>,
        /// Optional height bound.
        max_height: Option<u32>,
    },
}

impl ResizePolicy {
    /// Target size for a `src_w × src_h` source on `canvas`.
    pub fn target_size(
        self,
        src_w: u32,
        src_h: u32,
        canvas: CanvasSize,
    ) -> LayerCardResult<(u32, u32)> {
        if src_w == 0 || src_h == 0 {
            return Err(LayerCardError::decode(format!(
                "image has zero-sized dimensions {src_w}x{src_h}"
            )));
        }

        let size = match self {
            Self::None => (src_w, src_h),
            Self::ToCanvasHeight => (scale_dim(src_w, canvas.height, src_h), canvas.height),
            Self::ToCanvasWidth => (canvas.width, scale_dim(src_h, canvas.width, src_w)),
            Self::Within {
                max_width,
                max_height,
            } => {
                let bound_w = max_width.unwrap_or(u32::MAX);
                let bound_h = max_height.unwrap_or(u32::MAX);
                if bound_w == 0 || bound_h == 0 {
                    return Err(LayerCardError::validation(
                        "image max_width/max_height must be > 0",
                    ));
                }
                if src_w <= bound_w && src_h <= bound_h {
                    (src_w, src_h)
                } else if u64::from(src_w) * u64::from(bound_h)
                    >= u64::from(src_h) * u64::from(bound_w)
                {
                    // Width is the binding constraint.
                    (bound_w, scale_dim(src_h, bound_w, src_w))
                } else {
                    (scale_dim(src_w, bound_h, src_h), bound_h)
                }
            }
        };
        Ok(size)
    }
}

/// `value * num / den`, floored and clamped to at least one pixel.
fn scale_dim(value: u32, num: u32, den: u32) -> u32 {
    let scaled = u64::from(value) * u64::from(num) / u64::from(den);
    scaled.clamp(1, u64::from(u32::MAX)) as u32
}

/// Resize `src` per `policy` and convert to premultiplied RGBA8.
pub(crate) fn prepare_image(
    src: &DynamicImage,
    policy: ResizePolicy,
    canvas: CanvasSize,
) -> LayerCardResult<PreparedImage> {
    let (width, height) = policy.target_size(src.width(), src.height(), canvas)?;

    let rgba = if (width, height) == (src.width(), src.height()) {
        src.to_rgba8()
    } else {
        src.resize_exact(width, height, FilterType::Lanczos3)
            .to_rgba8()
    };
    if rgba.dimensions() != (width, height) {
        return Err(LayerCardError::decode(format!(
            "resized image is {}x{}, expected {width}x{height}",
            rgba.width(),
            rgba.height()
        )));
    }

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(PreparedImage {
        width,
        height,
        rgba8_premul,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/image.rs"]
mod tests;
