use caret_core::{caret_from_x, char_len, slice_chars};
use core_types::{ElementId, TextElement};

use crate::TextMeasurer;
use crate::geometry::{layout_lines, text_bounds};

/// A pointer landing on a text element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextHit {
    pub id: ElementId,
    /// Caret offset closest to the pointer.
    pub offset: usize,
    /// point - element origin
    pub local_pos: (f32, f32),
}

/// Char offset closest to an element-local point.
///
/// Points above the first line clamp to 0, below the last line to the text length. Within a
/// visual line the prefix whose width is nearest to `x` wins; ties go to the shorter prefix.
/// A point past the end of a wrapped line lands before its last char, so the caret stays on
/// the line that was clicked.
pub fn offset_from_point(
    element: &TextElement,
    local: (f32, f32),
    measurer: &dyn TextMeasurer,
) -> usize {
    let (x, y) = local;
    let text = &element.text;

    if y < 0.0 {
        return 0;
    }

    let lines = layout_lines(element, measurer);
    let pitch = element.line_pitch().max(f32::EPSILON);
    let index = (y / pitch).floor() as usize;
    let Some(line) = lines.get(index) else {
        return char_len(text);
    };

    let font = element.font();
    let line_text = slice_chars(text, line.range.start, line.range.end);
    let col = caret_from_x(line_text, x - line.x, |prefix| measurer.measure(prefix, &font));
    let offset = line.range.start + col;
    if line.soft_wrapped && offset == line.range.end && !line.range.is_empty() {
        offset - 1
    } else {
        offset
    }
}

/// Hit-test a canvas point against one element's wrapped box.
pub fn hit_test_text(
    element: &TextElement,
    point: (f32, f32),
    measurer: &dyn TextMeasurer,
) -> Option<TextHit> {
    if !text_bounds(element, measurer).contains(point) {
        return None;
    }
    let local_pos = element.to_local(point);
    Some(TextHit {
        id: element.id,
        offset: offset_from_point(element, local_pos, measurer),
        local_pos,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FixedAdvance;
    use core_types::TextAlign;

    fn element(text: &str) -> TextElement {
        TextElement::new(ElementId::from_raw(3), text)
            .at(100.0, 200.0)
            .with_font("test", 10.0)
            .with_width(120.0)
    }

    #[test]
    fn click_on_second_line_start() {
        let el = element("Hello\nWorld");
        let pitch = el.line_pitch();
        assert_eq!(offset_from_point(&el, (0.0, pitch + 2.0), &FixedAdvance(10.0)), 6);
    }

    #[test]
    fn nearest_prefix_wins_and_ties_go_left() {
        let el = element("Hello");
        let m = FixedAdvance(10.0);
        assert_eq!(offset_from_point(&el, (14.0, 1.0), &m), 1);
        assert_eq!(offset_from_point(&el, (15.0, 1.0), &m), 1);
        assert_eq!(offset_from_point(&el, (16.0, 1.0), &m), 2);
        assert_eq!(offset_from_point(&el, (500.0, 1.0), &m), 5);
        assert_eq!(offset_from_point(&el, (-20.0, 1.0), &m), 0);
    }

    #[test]
    fn above_and_below_clamp_to_text_edges() {
        let el = element("ab\ncd");
        let m = FixedAdvance(10.0);
        assert_eq!(offset_from_point(&el, (15.0, -3.0), &m), 0);
        assert_eq!(offset_from_point(&el, (0.0, 1000.0), &m), 5);
    }

    #[test]
    fn empty_text_hits_zero() {
        let el = element("");
        assert_eq!(offset_from_point(&el, (30.0, 5.0), &FixedAdvance(10.0)), 0);
    }

    #[test]
    fn alignment_is_respected() {
        let el = element("ab").with_align(TextAlign::Center);
        let m = FixedAdvance(10.0);
        // Line spans 50..70.
        assert_eq!(offset_from_point(&el, (40.0, 1.0), &m), 0);
        assert_eq!(offset_from_point(&el, (61.0, 1.0), &m), 1);
        assert_eq!(offset_from_point(&el, (100.0, 1.0), &m), 2);
    }

    #[test]
    fn hit_test_text_reports_local_position() {
        let el = element("Hello");
        let m = FixedAdvance(10.0);
        let hit = hit_test_text(&el, (121.0, 205.0), &m).unwrap();
        assert_eq!(hit.id, el.id);
        assert_eq!(hit.offset, 2);
        assert_eq!(hit.local_pos, (21.0, 5.0));

        assert!(hit_test_text(&el, (90.0, 205.0), &m).is_none());
    }

    #[test]
    fn wrapped_lines_are_hit_by_their_row() {
        let el = element("hello world again").with_width(60.0);
        let m = FixedAdvance(10.0);
        let pitch = el.line_pitch();

        assert_eq!(offset_from_point(&el, (0.0, pitch + 1.0), &m), 6);
        assert_eq!(offset_from_point(&el, (21.0, 2.0 * pitch + 1.0), &m), 14);
        // Past the end of a wrapped row: before the hanging space.
        assert_eq!(offset_from_point(&el, (59.0, 1.0), &m), 5);
        assert_eq!(offset_from_point(&el, (59.0, 2.0 * pitch + 1.0), &m), 17);
    }

    #[test]
    fn glyphs_on_wrapped_rows_can_be_hit() {
        let el = element("hello world again").with_width(60.0);
        let m = FixedAdvance(10.0);
        let hit = hit_test_text(&el, (125.0, 200.0 + 2.5 * el.line_pitch()), &m).unwrap();
        assert_eq!(hit.offset, 14);
        assert!(hit_test_text(&el, (125.0, 200.0 + 3.5 * el.line_pitch()), &m).is_none());
    }
}
