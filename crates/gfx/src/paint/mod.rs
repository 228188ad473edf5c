//! Painting canvas text elements and the editing overlay with an egui [`Painter`].

mod caret;
mod selection;
mod text;

use core_types::{Rgba, TextElement};
use egui::{Color32, Painter, Pos2, Rect, Stroke, StrokeKind, Vec2};
use layout::text_bounds;

use crate::EguiTextMeasurer;
use crate::input::TextEditor;

pub use caret::{caret_rect, paint_caret};
pub use selection::paint_selection;
pub use text::paint_text_element;

#[derive(Clone, Copy)]
pub struct PaintCtx<'a> {
    pub painter: &'a Painter,
    /// Screen position of canvas point (0, 0).
    pub origin: Pos2,
    pub measurer: &'a EguiTextMeasurer,
}

impl PaintCtx<'_> {
    pub(crate) fn to_screen(&self, x: f32, y: f32) -> Pos2 {
        self.origin + Vec2::new(x, y)
    }
}

pub(crate) fn color32(rgba: Rgba) -> Color32 {
    let (r, g, b, a) = rgba;
    Color32::from_rgba_unmultiplied(r, g, b, a)
}

/// Element text color with its opacity folded into alpha.
pub fn element_color(element: &TextElement) -> Color32 {
    let (r, g, b, a) = element.color;
    let opacity = if element.opacity.is_finite() {
        element.opacity.clamp(0.0, 1.0)
    } else {
        1.0
    };
    let a = (a as f32 * opacity).round() as u8;
    Color32::from_rgba_unmultiplied(r, g, b, a)
}

/// Screen rect of the element box, as tall as its wrapped text.
pub fn element_rect(ctx: PaintCtx<'_>, element: &TextElement) -> Rect {
    let bounds = text_bounds(element, ctx.measurer);
    Rect::from_min_size(
        ctx.to_screen(bounds.x, bounds.y),
        Vec2::new(bounds.width, bounds.height),
    )
}

/// Paint `element`, with selection, caret and an edit frame when `editor` is editing it.
///
/// Selection goes under the glyphs; the caret is only drawn for a collapsed selection and only
/// during the visible blink phase.
pub fn paint_element(ctx: PaintCtx<'_>, element: &TextElement, editor: &TextEditor, now: f64) {
    let caret = editor
        .session()
        .filter(|s| s.element() == element.id)
        .map(|s| s.caret().clamped(caret_core::char_len(&element.text)));

    let Some(caret) = caret else {
        paint_text_element(ctx, element);
        return;
    };

    let config = editor.config();
    let frame_color = color32(config.selection_color).to_opaque();
    ctx.painter.rect_stroke(
        element_rect(ctx, element).expand(2.0),
        0.0,
        Stroke::new(1.0, frame_color),
        StrokeKind::Outside,
    );

    if let Some(sel) = caret.selection() {
        paint_selection(ctx, element, sel, color32(config.selection_color));
    }

    paint_text_element(ctx, element);

    if caret.selection().is_none() && editor.caret_visible(now) {
        let color = config
            .caret_color
            .map(color32)
            .unwrap_or_else(|| element_color(element).to_opaque());
        paint_caret(ctx, element, caret.offset, color, config.caret_width);
    }
}
