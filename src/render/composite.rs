use crate::foundation::error::{LayerCardError, LayerCardResult};

pub(crate) type PremulRgba8 = [u8; 4];

/// Source-over for one premultiplied pixel.
pub(crate) fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    match src[3] {
        0 => return dst,
        255 => return src,
        _ => {}
    }

    let inv = 255u16 - u16::from(src[3]);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255(u16::from(dst[i]), inv));
    }
    out
}

/// Borrowed premultiplied RGBA8 pixel rectangle.
#[derive(Clone, Copy, Debug)]
pub(crate) struct PremulView<'a> {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) data: &'a [u8],
}

/// Composite `src` over the `dst_w × dst_h` buffer `dst` with its top-left corner at `(x, y)`.
///
/// Parts of `src` outside the destination are clipped. Returns the number of destination
/// pixels covered by `src`.
pub(crate) fn blit_over(
    dst: &mut [u8],
    dst_w: u32,
    dst_h: u32,
    src: PremulView<'_>,
    x: i32,
    y: i32,
) -> LayerCardResult<usize> {
    if dst.len() != dst_w as usize * dst_h as usize * 4 {
        return Err(LayerCardError::Other(anyhow::anyhow!(
            "blit destination buffer size mismatch"
        )));
    }
    if src.data.len() != src.width as usize * src.height as usize * 4 {
        return Err(LayerCardError::Other(anyhow::anyhow!(
            "blit source buffer size mismatch"
        )));
    }

    let x0 = i64::from(x).max(0);
    let y0 = i64::from(y).max(0);
    let x1 = (i64::from(x) + i64::from(src.width)).min(i64::from(dst_w));
    let y1 = (i64::from(y) + i64::from(src.height)).min(i64::from(dst_h));
    if x0 >= x1 || y0 >= y1 {
        return Ok(0);
    }

    let span = (x1 - x0) as usize;
    for dy in y0..y1 {
        let sy = (dy - i64::from(y)) as usize;
        let sx = (x0 - i64::from(x)) as usize;
        let s_row = (sy * src.width as usize + sx) * 4;
        let d_row = (dy as usize * dst_w as usize + x0 as usize) * 4;

        let s = &src.data[s_row..s_row + span * 4];
        let d = &mut dst[d_row..d_row + span * 4];
        for (d, s) in d.chunks_exact_mut(4).zip(s.chunks_exact(4)) {
            let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
            d.copy_from_slice(&out);
        }
    }

    Ok(span * (y1 - y0) as usize)
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}
