use image::DynamicImage;
use serde_json::json;

use super::*;
use crate::assets::font::Font;

fn card_json() -> serde_json::Value {
    json!({
        "bg_color": [244, 244, 244],
        "layers": [
            {"type": "image", "id": "logo", "image": "logo", "position": [70, 60]},
            {
                "type": "textbox",
                "font": "title",
                "text": "Founders raise $26M",
                "position": [80, 220],
                "max_width": 920,
                "bg_fill": "#002d62",
                "text_fill": [255, 255, 255],
                "padding": 10,
                "bg_type": "solid"
            },
            {
                "type": "textbox",
                "font": "title",
                "text": "Source: Example | July 10th, 2025",
                "position": [70, "auto"],
                "max_width": 960,
                "text_fill": [128, 128, 128],
                "auto_y_padding": 10
            }
        ]
    })
}

#[test]
fn parses_full_card_with_defaults() {
    let def = PresetDef::from_value(&card_json()).unwrap();
    assert_eq!(def.bg_color, Rgb8::new(244, 244, 244));
    assert_eq!(def.layers.len(), 3);

    let LayerDef::Image(img) = &def.layers[0] else {
        panic!("expected image layer");
    };
    assert_eq!(img.id.as_deref(), Some("logo"));
    assert!(!img.resize_to_height);
    assert!(img.max_width.is_none());

    let LayerDef::Textbox(sub) = &def.layers[2] else {
        panic!("expected textbox layer");
    };
    assert_eq!(sub.bg_type, BgType::None);
    assert_eq!(sub.padding, 0);
    assert_eq!(sub.line_spacing, 5);
    assert_eq!(sub.auto_y_padding, 10);
    assert_eq!(sub.position, Position::auto(70));
}

#[test]
fn empty_mapping_is_white_and_empty() {
    let def = PresetDef::from_value(&json!({})).unwrap();
    assert_eq!(def.bg_color, Rgb8::WHITE);
    assert!(def.layers.is_empty());
}

#[test]
fn missing_required_fields_are_validation_errors() {
    let cases = [
        json!({"layers": [{"type": "image", "image": "logo"}]}),
        json!({"layers": [{"type": "image", "position": [0, 0]}]}),
        json!({"layers": [{"type": "textbox", "font": "f", "position": [0, 0], "max_width": 10, "text_fill": [0, 0, 0]}]}),
        json!({"layers": [{"type": "textbox", "text": "t", "position": [0, 0], "max_width": 10, "text_fill": [0, 0, 0]}]}),
        json!({"layers": [{"type": "textbox", "text": "t", "font": "f", "position": [0, 0], "text_fill": [0, 0, 0]}]}),
        json!({"layers": [{"image": "logo", "position": [0, 0]}]}),
        json!({"layers": [{"type": "shape", "position": [0, 0]}]}),
        json!({"layers": [{"type": "textbox", "text": "t", "font": "f", "position": [0, 0], "max_width": 10, "text_fill": [0, 0, 0], "bg_type": "gradient"}]}),
        json!({"bg_color": [300, 0, 0]}),
    ];
    for case in cases {
        let err = PresetDef::from_value(&case).unwrap_err();
        assert!(err.is_validation(), "{case} -> {err}");
    }
}

#[test]
fn resolve_looks_up_assets() {
    let logo = DynamicImage::new_rgba8(150, 150);
    let title = Font::new(vec![0u8; 8], 48.0).unwrap();
    let assets = AssetRegistry::new()
        .image("logo", &logo)
        .unwrap()
        .font("title", &title)
        .unwrap();

    let preset = PresetDef::from_value(&card_json())
        .unwrap()
        .resolve(&assets)
        .unwrap();
    assert_eq!(preset.layers.len(), 3);
    let Layer::Textbox(t) = &preset.layers[1] else {
        panic!("expected textbox layer");
    };
    assert_eq!(t.background(), Some(Rgb8::new(0, 45, 98)));
    assert!(std::ptr::eq(t.font, &title));
}

#[test]
fn resolve_reports_unknown_keys_with_layer_index() {
    let assets = AssetRegistry::new();
    let err = PresetDef::from_value(&card_json())
        .unwrap()
        .resolve(&assets)
        .unwrap_err();
    assert!(err.is_validation());
    assert!(err.to_string().contains("layer 0"));
    assert!(err.to_string().contains("logo"));
}

#[test]
fn value_form_round_trips() {
    let def = PresetDef::from_value(&card_json()).unwrap();
    let back = PresetDef::from_value(&def.to_value().unwrap()).unwrap();
    assert_eq!(back, def);

    let text = serde_json::to_string(&def).unwrap();
    assert_eq!(PresetDef::from_json_str(&text).unwrap(), def);
}
