use crate::{
    assets::image::prepare_image,
    foundation::error::LayerCardResult,
    layout::cursor::LayoutCursor,
    render::{
        canvas::{Canvas, LayerKind, Placement},
        composite::PremulView,
    },
    scene::model::ImageLayer,
};

/// Resize, position and paste an image layer. Consumes the final image height.
pub(crate) fn render(
    layer: &ImageLayer<'_>,
    index: usize,
    canvas: &mut Canvas,
    cursor: &LayoutCursor,
) -> LayerCardResult<Placement> {
    let prepared = prepare_image(layer.image, layer.resize_policy(), canvas.size())?;

    let (x, mut y) = cursor.resolve(layer.position, 0);
    if layer.from_bottom {
        y = i32::try_from(i64::from(canvas.height()) - i64::from(prepared.height))
            .unwrap_or(i32::MIN);
    }

    let covered = canvas.blit(
        PremulView {
            width: prepared.width,
            height: prepared.height,
            data: &prepared.rgba8_premul,
        },
        x,
        y,
    )?;
    if covered == 0 {
        tracing::warn!(index, x, y, "image layer lies entirely outside the canvas");
    }

    Ok(Placement {
        index,
        kind: LayerKind::Image,
        x,
        y,
        width: prepared.width,
        height: prepared.height,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/image_layer.rs"]
mod tests;
