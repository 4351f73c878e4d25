use image::{Rgba, RgbaImage};

use super::*;

const CARD: CanvasSize = CanvasSize::PORTRAIT_CARD;

#[test]
fn to_canvas_height_preserves_aspect() {
    assert_eq!(
        ResizePolicy::ToCanvasHeight
            .target_size(800, 800, CARD)
            .unwrap(),
        (1350, 1350)
    );
    assert_eq!(
        ResizePolicy::ToCanvasHeight
            .target_size(1600, 900, CARD)
            .unwrap(),
        (2400, 1350)
    );
}

#[test]
fn to_canvas_width_preserves_aspect() {
    assert_eq!(
        ResizePolicy::ToCanvasWidth
            .target_size(1600, 900, CARD)
            .unwrap(),
        (1080, 607)
    );
}

#[test]
fn within_never_upscales() {
    let policy = ResizePolicy::Within {
        max_width: Some(100),
        max_height: Some(100),
    };
    assert_eq!(policy.target_size(50, 20, CARD).unwrap(), (50, 20));
    assert_eq!(policy.target_size(400, 200, CARD).unwrap(), (100, 50));
    assert_eq!(policy.target_size(200, 400, CARD).unwrap(), (50, 100));

    let width_only = ResizePolicy::Within {
        max_width: Some(300),
        max_height: None,
    };
    assert_eq!(width_only.target_size(600, 1000, CARD).unwrap(), (300, 500));

    let height_only = ResizePolicy::Within {
        max_width: None,
        max_height: Some(10),
    };
    assert_eq!(height_only.target_size(1000, 20, CARD).unwrap(), (500, 10));
}

#[test]
fn scaled_dims_never_collapse_to_zero() {
    assert_eq!(
        ResizePolicy::ToCanvasWidth
            .target_size(100_000, 1, CARD)
            .unwrap(),
        (1080, 1)
    );
}

#[test]
fn zero_sized_source_is_decode_error() {
    let err = ResizePolicy::None.target_size(0, 10, CARD).unwrap_err();
    assert!(matches!(err, LayerCardError::Decode(_)));

    let empty = DynamicImage::new_rgba8(0, 0);
    assert!(matches!(
        prepare_image(&empty, ResizePolicy::None, CARD),
        Err(LayerCardError::Decode(_))
    ));
}

#[test]
fn zero_bound_is_validation_error() {
    let policy = ResizePolicy::Within {
        max_width: Some(0),
        max_height: None,
    };
    assert!(policy.target_size(10, 10, CARD).unwrap_err().is_validation());
}

#[test]
fn prepare_image_premultiplies() {
    let img = RgbaImage::from_pixel(2, 1, Rgba([100, 50, 200, 128]));
    let prepared = prepare_image(&DynamicImage::ImageRgba8(img), ResizePolicy::None, CARD).unwrap();
    assert_eq!((prepared.width, prepared.height), (2, 1));
    assert_eq!(
        &prepared.rgba8_premul[..4],
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn prepare_image_resizes_rgb_sources() {
    let img = DynamicImage::new_rgb8(40, 20);
    let prepared = prepare_image(
        &img,
        ResizePolicy::Within {
            max_width: Some(10),
            max_height: None,
        },
        CARD,
    )
    .unwrap();
    assert_eq!((prepared.width, prepared.height), (10, 5));
    assert_eq!(prepared.rgba8_premul.len(), 10 * 5 * 4);
    assert!(prepared.rgba8_premul.chunks_exact(4).all(|px| px[3] == 255));
}
