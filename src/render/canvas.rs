use image::{RgbImage, RgbaImage};

use crate::{
    foundation::{
        color::Rgb8,
        core::{CanvasSize, unpremultiply_rgba8_in_place},
        error::{LayerCardError, LayerCardResult},
    },
    render::composite::{PremulView, blit_over},
};

/// Which layer variant produced a [`Placement`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayerKind {
    /// An image layer.
    Image,
    /// A text box layer.
    Textbox,
}

/// Resolved position and consumed size of one rendered layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    /// Index of the layer in the preset.
    pub index: usize,
    /// Layer variant.
    pub kind: LayerKind,
    /// Resolved left edge.
    pub x: i32,
    /// Resolved top edge.
    pub y: i32,
    /// Width of the drawn content.
    pub width: u32,
    /// Height consumed for layout purposes.
    pub height: u32,
}

impl Placement {
    /// Bottom edge (`y + height`), the value the layout cursor advances to.
    pub fn bottom(&self) -> i32 {
        self.y.saturating_add_unsigned(self.height)
    }
}

/// The pixel buffer one composition draws into.
///
/// Pixels are premultiplied RGBA8. The background is opaque, so every pixel of a finished
/// canvas is opaque as well.
#[derive(Clone, Debug)]
pub struct Canvas {
    size: CanvasSize,
    data: Vec<u8>,
    placements: Vec<Placement>,
}

impl Canvas {
    /// Allocate a canvas filled with `bg`.
    pub fn new(size: CanvasSize, bg: Rgb8) -> LayerCardResult<Self> {
        size.validate()?;
        let data = bg.to_rgba8_premul().to_array().repeat(size.area());
        Ok(Self {
            size,
            data,
            placements: Vec::new(),
        })
    }

    /// Canvas dimensions.
    pub fn size(&self) -> CanvasSize {
        self.size
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.size.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.size.height
    }

    /// Premultiplied RGBA8 bytes, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Pixel at `(x, y)`, if inside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        let i = (y as usize * self.size.width as usize + x as usize) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Placements recorded while composing, in layer order.
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    pub(crate) fn record(&mut self, placement: Placement) {
        self.placements.push(placement);
    }

    /// Composite a premultiplied pixel rectangle with its top-left at `(x, y)`.
    pub(crate) fn blit(&mut self, src: PremulView<'_>, x: i32, y: i32) -> LayerCardResult<usize> {
        blit_over(
            &mut self.data,
            self.size.width,
            self.size.height,
            src,
            x,
            y,
        )
    }

    /// Straight-alpha RGBA copy of the canvas.
    pub fn to_rgba_image(&self) -> LayerCardResult<RgbaImage> {
        let mut straight = self.data.clone();
        unpremultiply_rgba8_in_place(&mut straight);
        RgbaImage::from_raw(self.size.width, self.size.height, straight)
            .ok_or_else(|| LayerCardError::encode("canvas buffer does not match its size"))
    }

    /// Opaque RGB copy of the canvas, as written by lossy encoders.
    pub fn to_rgb_image(&self) -> LayerCardResult<RgbImage> {
        let rgb: Vec<u8> = self
            .data
            .chunks_exact(4)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect();
        RgbImage::from_raw(self.size.width, self.size.height, rgb)
            .ok_or_else(|| LayerCardError::encode("canvas buffer does not match its size"))
    }
}
