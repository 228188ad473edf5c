use caret_core::slice_chars;
use core_types::TextElement;
use layout::layout_lines;

use super::{PaintCtx, element_color};

/// Paint each line of `element` at its aligned position.
///
/// Galleys are vertically centred in the line pitch so glyphs line up with the caret bar.
pub fn paint_text_element(ctx: PaintCtx<'_>, element: &TextElement) {
    let color = element_color(element);
    if color.a() == 0 {
        return;
    }

    let font = element.font();
    let pitch = element.line_pitch();
    for line in layout_lines(element, ctx.measurer) {
        if line.range.is_empty() {
            continue;
        }
        let text = slice_chars(&element.text, line.range.start, line.range.end);
        let galley = ctx.measurer.layout_line(text, &font, color);
        let pad_y = (pitch - galley.size().y) * 0.5;
        let pos = ctx.to_screen(element.x + line.x, element.y + line.y + pad_y);
        ctx.painter.galley(pos, galley, color);
    }
}
