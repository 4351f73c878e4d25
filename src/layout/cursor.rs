use crate::scene::model::{Position, YPos};

/// Running vertical offset used to resolve `auto` positions.
///
/// A cursor is created fresh for every composition and threaded through the layer loop in
/// order. Explicit positions never read it but always move it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LayoutCursor {
    y: i32,
}

impl LayoutCursor {
    /// Cursor at the top of the canvas.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current cursor value.
    pub fn y(&self) -> i32 {
        self.y
    }

    /// Concrete `(x, y)` for `position`; `auto_gap` only applies to `auto` y.
    pub fn resolve(&self, position: Position, auto_gap: u32) -> (i32, i32) {
        let y = match position.y {
            YPos::Auto => self.y.saturating_add_unsigned(auto_gap),
            YPos::At(y) => y,
        };
        (position.x, y)
    }

    /// Move the cursor to the bottom of a layer placed at `resolved_y` with `height`.
    pub fn advance(&mut self, resolved_y: i32, height: u32) {
        self.y = resolved_y.saturating_add_unsigned(height);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/cursor.rs"]
mod tests;
