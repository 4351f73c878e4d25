use crate::foundation::error::LayerCardResult;

/// Measures the rendered pixel width of a single line of text.
pub trait TextMeasure {
    /// Advance width of `text` laid out on one line, in pixels.
    fn text_width(&mut self, text: &str) -> LayerCardResult<f32>;
}

/// Greedily wrap `text` on whitespace so no line is wider than `max_width`.
///
/// Runs of whitespace collapse to a single space. A word that is wider than `max_width` on its
/// own is kept whole on a line of its own.
pub fn wrap_text<M>(measure: &mut M, text: &str, max_width: u32) -> LayerCardResult<Vec<String>>
where
    M: TextMeasure + ?Sized,
{
    let limit = max_width as f32;
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let candidate = if line.is_empty() {
            word.to_owned()
        } else {
            format!("{line} {word}")
        };

        if measure.text_width(&candidate)? <= limit {
            line = candidate;
        } else {
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            line = word.to_owned();
        }
    }

    if !line.is_empty() {
        lines.push(line);
    }
    Ok(lines)
}

/// Total height of `line_count` lines separated by `line_spacing`, without trailing spacing.
pub fn block_height(line_count: usize, line_height: u32, line_spacing: u32) -> u32 {
    if line_count == 0 {
        return 0;
    }
    let n = u32::try_from(line_count).unwrap_or(u32::MAX);
    (line_height.saturating_add(line_spacing))
        .saturating_mul(n)
        .saturating_sub(line_spacing)
}

#[cfg(test)]
#[path = "../../tests/unit/text/wrap.rs"]
mod tests;
