//! Per-line placement of a text element, and the caret/selection shapes derived from it.
//!
//! All coordinates are element-local (origin at the element's top-left corner).

use caret_core::{LineRange, SelectionRange, line_index_for_offset, line_ranges, slice_chars};
use core_types::{FontSpec, TextAlign, TextElement};

use crate::{Rectangle, TextMeasurer};

/// One visual line, positioned inside the element box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineLayout {
    pub range: LineRange,
    /// Left edge after alignment.
    pub x: f32,
    /// Top of the line box.
    pub y: f32,
    /// Width of the line's glyphs, not counting whitespace hanging at a wrap point.
    pub width: f32,
    /// Broken to fit the box; the next line continues the same paragraph.
    pub soft_wrapped: bool,
}

/// Caret bar position: `x` is the insertion point, `y..y + height` the vertical extent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CaretGeometry {
    pub x: f32,
    pub y: f32,
    pub height: f32,
}

/// Horizontal offset of a line of `line_width` inside a box of `box_width`.
///
/// Justify is laid out like Left; lines never get extra inter-word space.
pub fn line_origin_x(align: TextAlign, box_width: f32, line_width: f32) -> f32 {
    match align {
        TextAlign::Left | TextAlign::Justify => 0.0,
        TextAlign::Center => (box_width - line_width) * 0.5,
        TextAlign::Right => box_width - line_width,
    }
}

/// Lay out every visual line of `element`, wrapping each `\n` line to the box width.
/// Always returns at least one line.
pub fn layout_lines(element: &TextElement, measurer: &dyn TextMeasurer) -> Vec<LineLayout> {
    let font = element.font();
    let pitch = element.line_pitch();
    let max_width = element.width.max(0.0);

    let mut out = Vec::new();
    for paragraph in line_ranges(&element.text) {
        let pieces = wrap_line(&element.text, paragraph, max_width, measurer, &font);
        let last = pieces.len() - 1;
        for (j, range) in pieces.into_iter().enumerate() {
            let width = measure_range(
                &element.text,
                range.start,
                visible_end(&element.text, range),
                measurer,
                &font,
            );
            let y = out.len() as f32 * pitch;
            out.push(LineLayout {
                range,
                x: line_origin_x(element.text_align, element.width, width),
                y,
                width,
                soft_wrapped: j < last,
            });
        }
    }
    out
}

/// Height of the wrapped text block, in canvas px.
pub fn text_height(element: &TextElement, measurer: &dyn TextMeasurer) -> f32 {
    layout_lines(element, measurer).len() as f32 * element.line_pitch()
}

/// The element's box in canvas px. The height follows the wrapped text.
pub fn text_bounds(element: &TextElement, measurer: &dyn TextMeasurer) -> Rectangle {
    Rectangle {
        x: 0.0,
        y: 0.0,
        width: element.width,
        height: text_height(element, measurer),
    }
    .translate(element.x, element.y)
}

/// Split one `\n`-free line into pieces no wider than `max_width`.
///
/// Breaks go after a whitespace run, which stays on the earlier piece and does not count
/// against the width. A word wider than the box is split between chars, keeping at least one
/// char per piece.
fn wrap_line(
    text: &str,
    line: LineRange,
    max_width: f32,
    measurer: &dyn TextMeasurer,
    font: &FontSpec,
) -> Vec<LineRange> {
    let chars: Vec<char> = slice_chars(text, line.start, line.end).chars().collect();
    let fits = |start: usize, mut end: usize| {
        while end > start && chars[end - 1].is_whitespace() {
            end -= 1;
        }
        let w = measure_range(text, line.start + start, line.start + end, measurer, font);
        w <= max_width + WRAP_EPSILON
    };

    let mut out = Vec::new();
    let mut start = 0;
    while !fits(start, chars.len()) {
        let mut end = None;
        for i in start + 1..chars.len() {
            if chars[i - 1].is_whitespace() && !chars[i].is_whitespace() {
                if !fits(start, i) {
                    break;
                }
                end = Some(i);
            }
        }
        let end = end.unwrap_or_else(|| {
            (start + 2..chars.len())
                .take_while(|&i| fits(start, i))
                .last()
                .unwrap_or(start + 1)
        });
        out.push(LineRange {
            start: line.start + start,
            end: line.start + end,
        });
        start = end;
    }
    out.push(LineRange {
        start: line.start + start,
        end: line.end,
    });
    out
}

const WRAP_EPSILON: f32 = 1e-3;

/// End of `range` with trailing whitespace dropped.
fn visible_end(text: &str, range: LineRange) -> usize {
    let trailing = slice_chars(text, range.start, range.end)
        .chars()
        .rev()
        .take_while(|c| c.is_whitespace())
        .count();
    range.end - trailing
}

fn measure_range(
    text: &str,
    start: usize,
    end: usize,
    measurer: &dyn TextMeasurer,
    font: &FontSpec,
) -> f32 {
    if start >= end {
        return 0.0;
    }
    measurer.measure(slice_chars(text, start, end), font).max(0.0)
}

/// x of the caret slot at `offset`, which must lie within `line`.
fn x_in_line(
    text: &str,
    line: &LineLayout,
    offset: usize,
    measurer: &dyn TextMeasurer,
    font: &FontSpec,
) -> f32 {
    let offset = offset.clamp(line.range.start, line.range.end);
    line.x + measure_range(text, line.range.start, offset, measurer, font)
}

/// Where to draw the caret for `offset`. The bar is `font_size` tall, centred in the line box.
pub fn caret_geometry(
    element: &TextElement,
    offset: usize,
    measurer: &dyn TextMeasurer,
) -> CaretGeometry {
    let lines = layout_lines(element, measurer);
    let font = element.font();

    let i = line_index_for_offset(&lines.iter().map(|l| l.range).collect::<Vec<_>>(), offset);
    let line = &lines[i];

    let height = element.font_size;
    CaretGeometry {
        x: x_in_line(&element.text, line, offset, measurer, &font),
        y: line.y + (element.line_pitch() - height).max(0.0) * 0.5,
        height,
    }
}

/// One highlight rectangle per line the selection touches.
///
/// When the selection runs past a line's end and takes its `\n`, the rectangle is widened by a
/// space so that empty lines inside a selection stay visible. Wrap points get no extra width.
pub fn selection_rects(
    element: &TextElement,
    sel: SelectionRange,
    measurer: &dyn TextMeasurer,
) -> Vec<Rectangle> {
    if sel.is_empty() {
        return Vec::new();
    }

    let lines = layout_lines(element, measurer);
    let font = element.font();
    let pitch = element.line_pitch();
    let newline_w = measurer.measure(" ", &font).max(1.0);

    let mut out = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        let a = sel.start.clamp(line.range.start, line.range.end);
        let b = sel.end.clamp(line.range.start, line.range.end);
        let takes_newline = !line.soft_wrapped
            && i + 1 < lines.len()
            && sel.start <= line.range.end
            && sel.end > line.range.end;

        if a >= b && !takes_newline {
            continue;
        }

        let x0 = x_in_line(&element.text, line, a, measurer, &font);
        let mut x1 = x_in_line(&element.text, line, b, measurer, &font);
        if takes_newline {
            x1 += newline_w;
        }

        out.push(Rectangle {
            x: x0,
            y: line.y,
            width: x1 - x0,
            height: pitch,
        });
    }
    out
}
