//! Geometry for canvas text boxes: measuring, hit-testing, caret and selection shapes.
//!
//! Nothing here draws. The `gfx` crate turns these rectangles into egui shapes.

pub mod geometry;
pub mod hit_test;
mod text;

pub use geometry::{
    CaretGeometry, LineLayout, caret_geometry, layout_lines, line_origin_x, selection_rects,
    text_bounds, text_height,
};
pub use hit_test::{TextHit, hit_test_text, offset_from_point};
pub use text::{FixedAdvance, TextMeasurer};

/// A rectangle in canvas px.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rectangle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rectangle {
    pub fn translate(self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    pub fn contains(&self, p: (f32, f32)) -> bool {
        let (x, y) = p;
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}
