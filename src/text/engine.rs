use crate::{
    assets::font::Font,
    foundation::{
        color::Rgb8,
        error::{LayerCardError, LayerCardResult},
    },
    text::wrap::TextMeasure,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub(crate) struct TextBrushRgba8 {
    /// Red channel.
    pub(crate) r: u8,
    /// Green channel.
    pub(crate) g: u8,
    /// Blue channel.
    pub(crate) b: u8,
    /// Alpha channel.
    pub(crate) a: u8,
}

impl From<Rgb8> for TextBrushRgba8 {
    fn from(c: Rgb8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: 255,
        }
    }
}

/// One caller font with a parley collection holding only that face, so shaping never falls
/// through to a sibling weight of the same family.
struct RegisteredFace {
    font: Font,
    font_ctx: parley::FontContext,
    family_name: String,
    glyph_font: vello_cpu::peniko::FontData,
}

/// Stateful helper for shaping single lines of text from caller-supplied fonts.
///
/// Each face is registered with Parley once per engine; the engine lives for one composition.
pub(crate) struct TextLayoutEngine {
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    faces: Vec<RegisteredFace>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    /// Construct a new layout engine with fresh Parley contexts.
    pub(crate) fn new() -> Self {
        Self {
            layout_ctx: parley::LayoutContext::new(),
            faces: Vec::new(),
        }
    }

    fn face_index(&mut self, font: &Font) -> LayerCardResult<usize> {
        if let Some(i) = self.faces.iter().position(|f| f.font.same_face(font)) {
            return Ok(i);
        }

        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font.data().to_vec()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            LayerCardError::text("no font families registered from font bytes")
        })?;

        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| LayerCardError::text("registered font family has no name"))?
            .to_string();

        let glyph_font = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(font.data().to_vec()),
            0,
        );

        tracing::trace!(family = %family_name, "registered font face");
        self.faces.push(RegisteredFace {
            font: font.clone(),
            font_ctx,
            family_name,
            glyph_font,
        });
        Ok(self.faces.len() - 1)
    }

    /// Family name Parley resolved for `font`.
    pub(crate) fn family_name(&mut self, font: &Font) -> LayerCardResult<String> {
        let i = self.face_index(font)?;
        Ok(self.faces[i].family_name.clone())
    }

    /// Glyph source used when rasterizing runs shaped from `font`.
    pub(crate) fn glyph_font(
        &mut self,
        font: &Font,
    ) -> LayerCardResult<vello_cpu::peniko::FontData> {
        let i = self.face_index(font)?;
        Ok(self.faces[i].glyph_font.clone())
    }

    /// Shape `text` as a single unbroken line.
    pub(crate) fn layout_line(
        &mut self,
        text: &str,
        font: &Font,
        brush: TextBrushRgba8,
    ) -> LayerCardResult<parley::Layout<TextBrushRgba8>> {
        let i = self.face_index(font)?;
        let face = &mut self.faces[i];
        let family_name = face.family_name.clone();

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut face.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(font.size_px()));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }

    /// Advance width of `text` on one line.
    pub(crate) fn text_width(&mut self, text: &str, font: &Font) -> LayerCardResult<f32> {
        if text.is_empty() {
            return Ok(0.0);
        }
        let layout = self.layout_line(text, font, TextBrushRgba8::default())?;
        Ok(layout.width())
    }

    /// Height of one line of `font`: ascent + descent + leading, rounded up.
    pub(crate) fn line_height(&mut self, font: &Font) -> LayerCardResult<u32> {
        let layout = self.layout_line("Ag", font, TextBrushRgba8::default())?;
        let m = layout
            .lines()
            .next()
            .map(|line| {
                let m = line.metrics();
                m.ascent + m.descent + m.leading
            })
            .ok_or_else(|| LayerCardError::text("font produced no line metrics"))?;
        if !m.is_finite() || m < 0.0 {
            return Err(LayerCardError::text(format!("invalid line height {m}")));
        }
        Ok(m.ceil() as u32)
    }

    /// Measure adapter bound to one font.
    pub(crate) fn measure<'e>(&'e mut self, font: &'e Font) -> FontMeasure<'e> {
        FontMeasure { engine: self, font }
    }
}

/// [`TextMeasure`] over a [`TextLayoutEngine`] and a fixed font.
pub(crate) struct FontMeasure<'e> {
    engine: &'e mut TextLayoutEngine,
    font: &'e Font,
}

impl TextMeasure for FontMeasure<'_> {
    fn text_width(&mut self, text: &str) -> LayerCardResult<f32> {
        self.engine.text_width(text, self.font)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/engine.rs"]
mod tests;
