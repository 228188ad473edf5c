use core_types::TextElement;
use egui::{Color32, Rect, Vec2};
use layout::caret_geometry;

use super::PaintCtx;

/// Screen rect of the caret bar for `offset`, centred on the insertion point.
pub fn caret_rect(ctx: PaintCtx<'_>, element: &TextElement, offset: usize, width: f32) -> Rect {
    let geom = caret_geometry(element, offset, ctx.measurer);
    let width = width.max(1.0);
    let min = ctx.to_screen(element.x + geom.x - width * 0.5, element.y + geom.y);
    Rect::from_min_size(min, Vec2::new(width, geom.height))
}

pub fn paint_caret(
    ctx: PaintCtx<'_>,
    element: &TextElement,
    offset: usize,
    color: Color32,
    width: f32,
) {
    ctx.painter
        .rect_filled(caret_rect(ctx, element, offset, width), 0.0, color);
}
