use crate::{
    assets::font::Font,
    foundation::color::Rgb8,
    foundation::error::{LayerCardError, LayerCardResult},
    layout::cursor::LayoutCursor,
    render::{
        canvas::{Canvas, LayerKind, Placement},
        composite::PremulView,
    },
    scene::model::TextboxLayer,
    text::{
        engine::{TextBrushRgba8, TextLayoutEngine},
        wrap::{block_height, wrap_text},
    },
};

/// Wrapped lines and the metrics needed to place them.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct TextBlock {
    pub(crate) lines: Vec<String>,
    pub(crate) line_height: u32,
    pub(crate) line_spacing: u32,
    /// Widest line, rounded up.
    pub(crate) width: u32,
}

impl TextBlock {
    pub(crate) fn height(&self) -> u32 {
        block_height(self.lines.len(), self.line_height, self.line_spacing)
    }

    fn line_top(&self, i: usize) -> u32 {
        let i = u32::try_from(i).unwrap_or(u32::MAX);
        (self.line_height.saturating_add(self.line_spacing)).saturating_mul(i)
    }
}

/// Wrap and measure `text` without drawing.
pub(crate) fn measure_block(
    engine: &mut TextLayoutEngine,
    text: &str,
    font: &Font,
    max_width: u32,
    line_spacing: u32,
) -> LayerCardResult<TextBlock> {
    let lines = wrap_text(&mut engine.measure(font), text, max_width)?;
    if lines.is_empty() {
        return Ok(TextBlock {
            lines,
            line_height: 0,
            line_spacing,
            width: 0,
        });
    }

    let line_height = engine.line_height(font)?;
    let mut widest = 0.0f32;
    for line in &lines {
        widest = widest.max(engine.text_width(line, font)?);
    }

    Ok(TextBlock {
        lines,
        line_height,
        line_spacing,
        width: widest.ceil() as u32,
    })
}

/// Wrap, position and draw a text box. Consumes the block height, plus twice the padding when a
/// background box is drawn.
pub(crate) fn render(
    layer: &TextboxLayer<'_>,
    index: usize,
    canvas: &mut Canvas,
    cursor: &LayoutCursor,
    engine: &mut TextLayoutEngine,
) -> LayerCardResult<Placement> {
    let text = layer.display_text();
    let block = measure_block(
        engine,
        &text,
        layer.font,
        layer.max_width,
        layer.line_spacing,
    )?;

    let background = layer.background();
    let pad = if background.is_some() { layer.padding } else { 0 };
    let box_w = block.width.saturating_add(pad.saturating_mul(2));
    let box_h = block.height().saturating_add(pad.saturating_mul(2));

    let (x, y) = cursor.resolve(layer.position, layer.auto_y_padding);
    tracing::debug!(
        index,
        lines = block.lines.len(),
        line_height = block.line_height,
        box_w,
        box_h,
        "laid out text box"
    );

    match visible_region(x, y, box_w, box_h, canvas.width(), canvas.height()) {
        Some(region) => draw_region(layer, &block, background, pad, region, canvas, engine)?,
        None if box_w > 0 && box_h > 0 => {
            tracing::warn!(index, x, y, "text box lies entirely outside the canvas");
        }
        None => {}
    }

    Ok(Placement {
        index,
        kind: LayerKind::Textbox,
        x,
        y,
        width: box_w,
        height: box_h,
    })
}

/// Part of a placed box that overlaps the canvas, in box-local pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Region {
    /// Box-local left edge.
    left: u32,
    /// Box-local top edge.
    top: u32,
    width: u32,
    height: u32,
    /// Canvas position of the region's top-left corner.
    canvas_x: i32,
    canvas_y: i32,
}

fn visible_region(
    x: i32,
    y: i32,
    box_w: u32,
    box_h: u32,
    canvas_w: u32,
    canvas_h: u32,
) -> Option<Region> {
    let span = |origin: i32, len: u32, limit: u32| -> Option<(u32, u32)> {
        let origin = i64::from(origin);
        let start = (-origin).max(0);
        let end = i64::from(len).min(i64::from(limit) - origin);
        (start < end).then(|| (start as u32, (end - start) as u32))
    };
    let (left, width) = span(x, box_w, canvas_w)?;
    let (top, height) = span(y, box_h, canvas_h)?;
    Some(Region {
        left,
        top,
        width,
        height,
        canvas_x: (i64::from(x) + i64::from(left)) as i32,
        canvas_y: (i64::from(y) + i64::from(top)) as i32,
    })
}

/// Rasterize the visible part of the box into a region-sized pixmap and blit it.
fn draw_region(
    layer: &TextboxLayer<'_>,
    block: &TextBlock,
    background: Option<Rgb8>,
    pad: u32,
    region: Region,
    canvas: &mut Canvas,
    engine: &mut TextLayoutEngine,
) -> LayerCardResult<()> {
    let w = to_u16(region.width, "visible text box width")?;
    let h = to_u16(region.height, "visible text box height")?;
    let mut ctx = vello_cpu::RenderContext::new(w, h);

    if let Some(bg) = background {
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(bg.r, bg.g, bg.b, 255));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(w),
            f64::from(h),
        ));
    }

    let brush = TextBrushRgba8::from(layer.text_fill);
    let glyph_font = engine.glyph_font(layer.font)?;
    let (shift_x, shift_y) = (f64::from(region.left), f64::from(region.top));
    // Glyph ink may reach past the line box, so keep one extra line on each side.
    let keep_from = i64::from(region.top) - i64::from(block.line_height);
    let keep_to = i64::from(region.top + region.height) + i64::from(block.line_height);

    for (i, line) in block.lines.iter().enumerate() {
        let top = pad.saturating_add(block.line_top(i));
        let line_bottom = i64::from(top) + i64::from(block.line_height);
        if line_bottom < keep_from || i64::from(top) > keep_to {
            continue;
        }

        let layout = engine.layout_line(line, layer.font, brush)?;
        ctx.set_transform(vello_cpu::kurbo::Affine::translate((
            f64::from(pad) - shift_x,
            f64::from(top) - shift_y,
        )));

        for layout_line in layout.lines() {
            for item in layout_line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };

                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));

                let mut pen_x = run.offset();
                let baseline = run.baseline();
                let glyphs = run.glyphs().map(|g| {
                    let glyph = vello_cpu::Glyph {
                        id: u32::from(g.id),
                        x: pen_x + g.x,
                        y: baseline - g.y,
                    };
                    pen_x += g.advance;
                    glyph
                });
                ctx.glyph_run(&glyph_font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
    }

    ctx.flush();
    let mut pixmap = vello_cpu::Pixmap::new(w, h);
    ctx.render_to_pixmap(&mut pixmap);

    canvas.blit(
        PremulView {
            width: region.width,
            height: region.height,
            data: pixmap.data_as_u8_slice(),
        },
        region.canvas_x,
        region.canvas_y,
    )?;
    Ok(())
}

fn to_u16(v: u32, what: &str) -> LayerCardResult<u16> {
    u16::try_from(v).map_err(|_| LayerCardError::text(format!("{what} {v}px exceeds u16")))
}

#[cfg(test)]
#[path = "../../tests/unit/render/textbox.rs"]
mod tests;
