use serde_json::json;

use super::*;

fn font() -> Font {
    Font::new(vec![0u8; 8], 24.0).unwrap()
}

#[test]
fn position_serde_accepts_int_and_auto() {
    let p: Position = serde_json::from_value(json!([70, 60])).unwrap();
    assert_eq!(p, Position::at(70, 60));
    let p: Position = serde_json::from_value(json!([80, "auto"])).unwrap();
    assert_eq!(p, Position::auto(80));

    assert!(serde_json::from_value::<Position>(json!([80, "top"])).is_err());
    assert!(serde_json::from_value::<Position>(json!([80])).is_err());
    assert!(serde_json::from_value::<Position>(json!({"x": 1, "y": 2})).is_err());

    assert_eq!(
        serde_json::to_value(Position::auto(5)).unwrap(),
        json!([5, "auto"])
    );
}

#[test]
fn bg_type_serde_is_lowercase() {
    assert_eq!(
        serde_json::from_value::<BgType>(json!("solid")).unwrap(),
        BgType::Solid
    );
    assert_eq!(BgType::default(), BgType::None);
    assert!(serde_json::from_value::<BgType>(json!("gradient")).is_err());
}

#[test]
fn resize_precedence_height_then_width_then_bounds() {
    let img = DynamicImage::new_rgb8(4, 4);
    let base = ImageLayer::new(&img, Position::at(0, 0));
    assert_eq!(base.resize_policy(), ResizePolicy::None);

    let all = base
        .clone()
        .max_width(10)
        .max_height(20)
        .resize_to_width()
        .resize_to_height();
    assert_eq!(all.resize_policy(), ResizePolicy::ToCanvasHeight);

    let width = base.clone().max_width(10).resize_to_width();
    assert_eq!(width.resize_policy(), ResizePolicy::ToCanvasWidth);

    let bounded = base.max_height(20);
    assert_eq!(
        bounded.resize_policy(),
        ResizePolicy::Within {
            max_width: None,
            max_height: Some(20)
        }
    );
}

#[test]
fn textbox_defaults_and_background() {
    let f = font();
    let t = TextboxLayer::new("hi", &f, 100, Rgb8::BLACK, Position::auto(0));
    assert_eq!(t.bg_type, BgType::None);
    assert_eq!(t.padding, 0);
    assert_eq!(t.line_spacing, 5);
    assert_eq!(t.auto_y_padding, 0);
    assert_eq!(t.background(), None);

    let mut solid = t.clone().solid_background(Rgb8::new(0, 45, 98), 10);
    assert_eq!(solid.background(), Some(Rgb8::new(0, 45, 98)));
    solid.bg_fill = None;
    assert_eq!(solid.background(), Some(Rgb8::BLACK));

    assert_eq!(t.uppercase().display_text(), "HI");
}

#[test]
fn preset_validation_reports_layer_index() {
    let f = font();
    let img = DynamicImage::new_rgb8(1, 1);
    let preset = Preset::new(Rgb8::WHITE)
        .layer(ImageLayer::new(&img, Position::at(0, 0)))
        .layer(TextboxLayer::new("x", &f, 0, Rgb8::BLACK, Position::auto(0)));
    let err = preset.validate().unwrap_err();
    assert!(err.is_validation());
    assert!(err.to_string().contains("layer 1"));

    let ok = Preset::default().layer(ImageLayer::new(&img, Position::at(0, 0)));
    assert_eq!(ok.bg_color, Rgb8::WHITE);
    assert!(ok.validate().is_ok());
}
