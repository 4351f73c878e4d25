use super::*;
use crate::foundation::{color::Rgb8, core::CanvasSize};
use crate::scene::model::Position;

const BG: [u8; 4] = [244, 244, 244, 255];

fn dejavu(size_px: f32) -> Font {
    let bytes = std::fs::read("tests/data/fonts/DejaVuSans.ttf").unwrap();
    Font::new(bytes, size_px).unwrap()
}

fn canvas(w: u32, h: u32) -> Canvas {
    Canvas::new(CanvasSize::new(w, h).unwrap(), Rgb8::new(244, 244, 244)).unwrap()
}

#[test]
fn empty_text_consumes_nothing_without_background() {
    let font = dejavu(24.0);
    let mut engine = TextLayoutEngine::new();
    let mut c = canvas(50, 50);
    let layer = TextboxLayer::new("", &font, 100, Rgb8::BLACK, Position::at(5, 5));
    let p = render(&layer, 0, &mut c, &LayoutCursor::new(), &mut engine).unwrap();
    assert_eq!((p.width, p.height), (0, 0));
    assert!(c.data().chunks_exact(4).all(|px| px == BG));
}

#[test]
fn empty_text_with_solid_background_is_a_padding_square() {
    let font = dejavu(24.0);
    let mut engine = TextLayoutEngine::new();
    let mut c = canvas(50, 50);
    let layer = TextboxLayer::new("  ", &font, 100, Rgb8::WHITE, Position::at(5, 5))
        .solid_background(Rgb8::new(0, 45, 98), 7);
    let p = render(&layer, 0, &mut c, &LayoutCursor::new(), &mut engine).unwrap();
    assert_eq!((p.width, p.height), (14, 14));

    for y in 0..50 {
        for x in 0..50 {
            let inside = (5..19).contains(&x) && (5..19).contains(&y);
            let expected = if inside { [0, 45, 98, 255] } else { BG };
            assert_eq!(c.pixel(x, y), Some(expected), "pixel ({x},{y})");
        }
    }
}

#[test]
fn block_height_matches_line_formula() {
    let font = dejavu(20.0);
    let mut engine = TextLayoutEngine::new();
    let text = "one two three four five six seven eight nine ten";
    let block = measure_block(&mut engine, text, &font, 120, 5).unwrap();
    let n = block.lines.len() as u32;
    assert!(n > 1);
    assert_eq!(block.height(), (block.line_height + 5) * n - 5);
    assert!(block.width <= 120 || block.lines.iter().any(|l| !l.contains(' ')));
}

#[test]
fn solid_background_fills_exact_box_and_nothing_else() {
    let font = dejavu(18.0);
    let mut engine = TextLayoutEngine::new();
    let mut c = canvas(400, 200);
    let pad = 10;
    let layer = TextboxLayer::new(
        "Founders raise funding for a new tool",
        &font,
        150,
        Rgb8::WHITE,
        Position::at(20, 30),
    )
    .solid_background(Rgb8::new(0, 71, 171), pad);
    let p = render(&layer, 0, &mut c, &LayoutCursor::new(), &mut engine).unwrap();

    let block = measure_block(&mut engine, &layer.text, &font, 150, 5).unwrap();
    assert_eq!(p.width, block.width + 2 * pad);
    assert_eq!(p.height, block.height() + 2 * pad);

    let (x0, y0) = (20u32, 30u32);
    let (x1, y1) = (x0 + p.width, y0 + p.height);
    for y in 0..200 {
        for x in 0..400 {
            let px = c.pixel(x, y).unwrap();
            let inside = (x0..x1).contains(&x) && (y0..y1).contains(&y);
            let in_padding_ring = inside
                && (x < x0 + pad || x >= x1 - pad || y < y0 + pad || y >= y1 - pad);
            if !inside {
                assert_eq!(px, BG, "outside pixel ({x},{y}) changed");
            } else if in_padding_ring {
                assert_eq!(px, [0, 71, 171, 255], "padding pixel ({x},{y})");
            } else {
                assert_eq!(px[3], 255);
            }
        }
    }
}

#[test]
fn no_background_only_touches_glyph_pixels() {
    let font = dejavu(24.0);
    let mut engine = TextLayoutEngine::new();
    let mut c = canvas(300, 120);
    let layer = TextboxLayer::new("Hello card", &font, 280, Rgb8::BLACK, Position::at(10, 10));
    let p = render(&layer, 0, &mut c, &LayoutCursor::new(), &mut engine).unwrap();
    assert!(p.height > 0);

    let mut changed = 0usize;
    for y in 0..120 {
        for x in 0..300 {
            let px = c.pixel(x, y).unwrap();
            if px != BG {
                changed += 1;
                assert!(
                    (10..10 + p.width).contains(&x) && (10..10 + p.height).contains(&y),
                    "pixel ({x},{y}) outside the text box changed"
                );
                // Black ink over a light background only darkens.
                assert!(px[0] < BG[0]);
            }
        }
    }
    assert!(changed > 0);
    let box_area = (p.width * p.height) as usize;
    assert!(changed < box_area);
}

#[test]
fn auto_textbox_adds_gap_to_cursor() {
    let font = dejavu(16.0);
    let mut engine = TextLayoutEngine::new();
    let mut c = canvas(200, 200);
    let mut cursor = LayoutCursor::new();
    cursor.advance(60, 150);
    let layer =
        TextboxLayer::new("Source", &font, 180, Rgb8::BLACK, Position::auto(80)).auto_y_padding(10);
    let p = render(&layer, 0, &mut c, &cursor, &mut engine).unwrap();
    assert_eq!((p.x, p.y), (80, 220));
}

#[test]
fn uppercase_changes_wrapped_text() {
    let font = dejavu(16.0);
    let mut engine = TextLayoutEngine::new();
    let layer = TextboxLayer::new("abc", &font, 500, Rgb8::BLACK, Position::at(0, 0)).uppercase();
    let block = measure_block(&mut engine, &layer.display_text(), &font, 500, 5).unwrap();
    assert_eq!(block.lines, vec!["ABC".to_string()]);
}

#[test]
fn box_taller_than_pixmap_limit_is_clipped_not_rejected() {
    let font = dejavu(16.0);
    let mut engine = TextLayoutEngine::new();
    let mut c = canvas(100, 100);
    let mut cursor = LayoutCursor::new();
    let layer = TextboxLayer::new("word ".repeat(4000), &font, 10, Rgb8::BLACK, Position::auto(5));

    let p = render(&layer, 0, &mut c, &cursor, &mut engine).unwrap();
    assert!(p.height > u32::from(u16::MAX), "height {}", p.height);
    cursor.advance(p.y, p.height);
    assert_eq!(i64::from(cursor.y()), i64::from(p.height));
    assert!(c.data().chunks_exact(4).any(|px| px != BG));
}

#[test]
fn padding_beyond_canvas_fills_visible_part() {
    let font = dejavu(16.0);
    let mut engine = TextLayoutEngine::new();
    let mut c = canvas(10, 10);
    let layer = TextboxLayer::new("x", &font, 100, Rgb8::WHITE, Position::at(-5, -5))
        .solid_background(Rgb8::new(0, 45, 98), 40_000);
    let p = render(&layer, 0, &mut c, &LayoutCursor::new(), &mut engine).unwrap();
    assert!(p.width > 80_000 && p.height > 80_000);
    assert!(c.data().chunks_exact(4).all(|px| px == [0, 45, 98, 255]));
}

#[test]
fn visible_region_clips_each_edge() {
    assert_eq!(
        visible_region(-3, 4, 10, 10, 20, 8),
        Some(Region {
            left: 3,
            top: 0,
            width: 7,
            height: 4,
            canvas_x: 0,
            canvas_y: 4,
        })
    );
    assert_eq!(visible_region(20, 0, 5, 5, 20, 20), None);
    assert_eq!(visible_region(0, -5, 5, 5, 20, 20), None);
    assert_eq!(visible_region(0, 0, 0, 0, 20, 20), None);
}
