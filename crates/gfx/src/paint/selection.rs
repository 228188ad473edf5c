use caret_core::SelectionRange;
use core_types::TextElement;
use egui::{Color32, Rect, Vec2};
use layout::selection_rects;

use super::PaintCtx;

pub fn paint_selection(
    ctx: PaintCtx<'_>,
    element: &TextElement,
    sel: SelectionRange,
    fill: Color32,
) {
    for r in selection_rects(element, sel, ctx.measurer) {
        let min = ctx.to_screen(element.x + r.x, element.y + r.y);
        ctx.painter
            .rect_filled(Rect::from_min_size(min, Vec2::new(r.width, r.height)), 0.0, fill);
    }
}
