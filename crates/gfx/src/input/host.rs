use core_types::{ElementId, TextElement};
use layout::TextMeasurer;

/// What the editor needs from whoever owns the canvas elements.
///
/// The host stays the single owner of element data. The editor reads through
/// [`text_element`](Self::text_element) and writes back only through
/// [`on_change`](Self::on_change).
pub trait TextElementHost {
    fn text_element(&self, id: ElementId) -> Option<&TextElement>;

    /// Topmost text element under a canvas point, or `None` when the point is over empty
    /// canvas or over a non-text element. Text boxes are as tall as their wrapped text, which
    /// `measurer` lays out.
    fn text_element_at(&self, point: (f32, f32), measurer: &dyn TextMeasurer)
    -> Option<ElementId>;

    /// One committed text edit; `updated` replaces the element with the same id.
    fn on_change(&mut self, updated: TextElement);

    /// The element being edited changed (`None` once editing stops).
    fn on_focus_changed(&mut self, _focused: Option<ElementId>) {}
}
