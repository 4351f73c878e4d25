use image::DynamicImage;
use serde::{Deserialize, Serialize};

use crate::{
    assets::{font::Font, image::ResizePolicy},
    foundation::{
        color::Rgb8,
        error::{LayerCardError, LayerCardResult},
    },
    layout::cursor::LayoutCursor,
    render::{
        canvas::{Canvas, Placement},
        image_layer, textbox,
    },
    text::engine::TextLayoutEngine,
};

/// Vertical component of a layer position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum YPos {
    /// Directly below the previously placed layer.
    Auto,
    /// Explicit pixel offset from the top of the canvas.
    At(i32),
}

impl Serialize for YPos {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Auto => serializer.serialize_str("auto"),
            Self::At(y) => serializer.serialize_i32(*y),
        }
    }
}

impl<'de> Deserialize<'de> for YPos {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Px(i32),
            Keyword(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Px(y) => Ok(Self::At(y)),
            Repr::Keyword(s) if s == "auto" => Ok(Self::Auto),
            Repr::Keyword(s) => Err(serde::de::Error::custom(format!(
                "position y must be an integer or \"auto\", got \"{s}\""
            ))),
        }
    }
}

/// Layer anchor: `[x, y]` where `y` may be `"auto"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(i32, YPos)", into = "(i32, YPos)")]
pub struct Position {
    /// Left edge in pixels.
    pub x: i32,
    /// Top edge, explicit or auto.
    pub y: YPos,
}

impl Position {
    /// Explicit `(x, y)`.
    pub const fn at(x: i32, y: i32) -> Self {
        Self { x, y: YPos::At(y) }
    }

    /// Auto-stacked y at column `x`.
    pub const fn auto(x: i32) -> Self {
        Self { x, y: YPos::Auto }
    }
}

impl From<(i32, YPos)> for Position {
    fn from((x, y): (i32, YPos)) -> Self {
        Self { x, y }
    }
}

impl From<Position> for (i32, YPos) {
    fn from(p: Position) -> Self {
        (p.x, p.y)
    }
}

/// Background behind a text box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BgType {
    /// No background; only glyph pixels change.
    #[default]
    None,
    /// Filled rectangle around the text, inset by padding.
    Solid,
}

/// A borrowed image pasted at a position, optionally resized.
#[derive(Clone, Debug)]
pub struct ImageLayer<'a> {
    /// Source pixels, owned by the caller.
    pub image: &'a DynamicImage,
    /// Anchor of the top-left corner.
    pub position: Position,
    /// Scale to the canvas height. Highest precedence.
    pub resize_to_height: bool,
    /// Scale to the canvas width.
    pub resize_to_width: bool,
    /// Shrink to at most this width.
    pub max_width: Option<u32>,
    /// Shrink to at most this height.
    pub max_height: Option<u32>,
    /// Align the bottom edge with the canvas bottom, overriding `position.y`.
    pub from_bottom: bool,
}

impl<'a> ImageLayer<'a> {
    /// Image at `position` with no resizing.
    pub fn new(image: &'a DynamicImage, position: Position) -> Self {
        Self {
            image,
            position,
            resize_to_height: false,
            resize_to_width: false,
            max_width: None,
            max_height: None,
            from_bottom: false,
        }
    }

    /// Scale to the canvas height.
    pub fn resize_to_height(mut self) -> Self {
        self.resize_to_height = true;
        self
    }

    /// Scale to the canvas width.
    pub fn resize_to_width(mut self) -> Self {
        self.resize_to_width = true;
        self
    }

    /// Shrink to at most `max_width`.
    pub fn max_width(mut self, max_width: u32) -> Self {
        self.max_width = Some(max_width);
        self
    }

    /// Shrink to at most `max_height`.
    pub fn max_height(mut self, max_height: u32) -> Self {
        self.max_height = Some(max_height);
        self
    }

    /// Pin the image to the canvas bottom.
    pub fn from_bottom(mut self) -> Self {
        self.from_bottom = true;
        self
    }

    /// Effective resize policy: height, then width, then max bounds.
    pub fn resize_policy(&self) -> ResizePolicy {
        if self.resize_to_height {
            ResizePolicy::ToCanvasHeight
        } else if self.resize_to_width {
            ResizePolicy::ToCanvasWidth
        } else if self.max_width.is_some() || self.max_height.is_some() {
            ResizePolicy::Within {
                max_width: self.max_width,
                max_height: self.max_height,
            }
        } else {
            ResizePolicy::None
        }
    }
}

/// Wrapped text with an optional solid background box.
#[derive(Clone, Debug)]
pub struct TextboxLayer<'a> {
    /// Text to draw; whitespace runs collapse when wrapping.
    pub text: String,
    /// Anchor of the box's top-left corner.
    pub position: Position,
    /// Face and size, owned by the caller.
    pub font: &'a Font,
    /// Wrap boundary in pixels.
    pub max_width: u32,
    /// Glyph color.
    pub text_fill: Rgb8,
    /// Box color; black when unset and `bg_type` is solid.
    pub bg_fill: Option<Rgb8>,
    /// Background style.
    pub bg_type: BgType,
    /// Inset between box edge and text, only with a solid background.
    pub padding: u32,
    /// Gap above the box when its y is auto.
    pub auto_y_padding: u32,
    /// Pixels between wrapped lines.
    pub line_spacing: u32,
    /// Uppercase the text before wrapping.
    pub uppercase: bool,
}

impl<'a> TextboxLayer<'a> {
    /// Default line spacing between wrapped lines.
    pub const DEFAULT_LINE_SPACING: u32 = 5;

    /// Text box without background.
    pub fn new(
        text: impl Into<String>,
        font: &'a Font,
        max_width: u32,
        text_fill: Rgb8,
        position: Position,
    ) -> Self {
        Self {
            text: text.into(),
            position,
            font,
            max_width,
            text_fill,
            bg_fill: None,
            bg_type: BgType::None,
            padding: 0,
            auto_y_padding: 0,
            line_spacing: Self::DEFAULT_LINE_SPACING,
            uppercase: false,
        }
    }

    /// Solid background of `fill` inset by `padding`.
    pub fn solid_background(mut self, fill: Rgb8, padding: u32) -> Self {
        self.bg_type = BgType::Solid;
        self.bg_fill = Some(fill);
        self.padding = padding;
        self
    }

    /// Gap above the box when auto-placed.
    pub fn auto_y_padding(mut self, gap: u32) -> Self {
        self.auto_y_padding = gap;
        self
    }

    /// Pixels between wrapped lines.
    pub fn line_spacing(mut self, spacing: u32) -> Self {
        self.line_spacing = spacing;
        self
    }

    /// Uppercase before wrapping.
    pub fn uppercase(mut self) -> Self {
        self.uppercase = true;
        self
    }

    /// Text as it will be wrapped and drawn.
    pub fn display_text(&self) -> std::borrow::Cow<'_, str> {
        if self.uppercase {
            std::borrow::Cow::Owned(self.text.to_uppercase())
        } else {
            std::borrow::Cow::Borrowed(&self.text)
        }
    }

    /// Background color, if a box is drawn.
    pub fn background(&self) -> Option<Rgb8> {
        match self.bg_type {
            BgType::None => None,
            BgType::Solid => Some(self.bg_fill.unwrap_or(Rgb8::BLACK)),
        }
    }
}

/// One drawable unit of a preset.
#[derive(Clone, Debug)]
pub enum Layer<'a> {
    /// Image layer.
    Image(ImageLayer<'a>),
    /// Text box layer.
    Textbox(TextboxLayer<'a>),
}

impl<'a> Layer<'a> {
    /// Declared position.
    pub fn position(&self) -> Position {
        match self {
            Self::Image(l) => l.position,
            Self::Textbox(l) => l.position,
        }
    }

    /// Reject layers that cannot be drawn regardless of canvas.
    pub fn validate(&self) -> LayerCardResult<()> {
        match self {
            Self::Image(l) => {
                if l.max_width == Some(0) || l.max_height == Some(0) {
                    return Err(LayerCardError::validation(
                        "image max_width/max_height must be > 0",
                    ));
                }
            }
            Self::Textbox(l) => {
                if l.max_width == 0 {
                    return Err(LayerCardError::validation("textbox max_width must be > 0"));
                }
            }
        }
        Ok(())
    }

    /// Resolve this layer's position against `cursor`, draw it and advance the cursor.
    pub(crate) fn render(
        &self,
        index: usize,
        canvas: &mut Canvas,
        cursor: &mut LayoutCursor,
        text: &mut TextLayoutEngine,
    ) -> LayerCardResult<Placement> {
        let placement = match self {
            Self::Image(l) => image_layer::render(l, index, canvas, cursor)?,
            Self::Textbox(l) => textbox::render(l, index, canvas, cursor, text)?,
        };
        cursor.advance(placement.y, placement.height);
        Ok(placement)
    }
}

impl<'a> From<ImageLayer<'a>> for Layer<'a> {
    fn from(l: ImageLayer<'a>) -> Self {
        Self::Image(l)
    }
}

impl<'a> From<TextboxLayer<'a>> for Layer<'a> {
    fn from(l: TextboxLayer<'a>) -> Self {
        Self::Textbox(l)
    }
}

/// Background color plus ordered layers.
#[derive(Clone, Debug, Default)]
pub struct Preset<'a> {
    /// Canvas fill.
    pub bg_color: Rgb8,
    /// Layers in draw order; also the order auto-layout walks.
    pub layers: Vec<Layer<'a>>,
}

impl<'a> Preset<'a> {
    /// Empty preset on `bg_color`.
    pub fn new(bg_color: Rgb8) -> Self {
        Self {
            bg_color,
            layers: Vec::new(),
        }
    }

    /// Append a layer.
    pub fn layer(mut self, layer: impl Into<Layer<'a>>) -> Self {
        self.layers.push(layer.into());
        self
    }

    /// Validate every layer.
    pub fn validate(&self) -> LayerCardResult<()> {
        for (i, layer) in self.layers.iter().enumerate() {
            layer.validate().map_err(|e| match e {
                LayerCardError::Validation(msg) => {
                    LayerCardError::validation(format!("layer {i}: {msg}"))
                }
                other => other,
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
