//! Text utilities for caret handling.
//!
//! Every offset in this module counts Unicode scalar values (`char`s), not bytes. Byte
//! indices only appear at the boundary where a `&str` has to be sliced, via [`byte_index`].

use std::borrow::Cow;

/// Number of chars in `s`; the largest valid caret offset.
#[inline]
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Byte index of the char at `offset`, or `s.len()` when `offset` is at or past the end.
///
/// # Examples
///
/// ```
/// use caret_core::byte_index;
///
/// let s = "a€b"; // '€' is 3 bytes
/// assert_eq!(byte_index(s, 0), 0);
/// assert_eq!(byte_index(s, 1), 1);
/// assert_eq!(byte_index(s, 2), 4);
/// assert_eq!(byte_index(s, 3), 5);
/// assert_eq!(byte_index(s, 99), 5);
/// ```
pub fn byte_index(s: &str, offset: usize) -> usize {
    s.char_indices()
        .nth(offset)
        .map(|(idx, _)| idx)
        .unwrap_or(s.len())
}

/// Substring covering chars `start..end` (both clamped to the text).
pub fn slice_chars(s: &str, start: usize, end: usize) -> &str {
    let a = byte_index(s, start);
    let b = byte_index(s, end.max(start));
    &s[a..b]
}

/// Normalize newlines in a string (CRLF/CR → LF).
///
/// Returns a `Cow::Borrowed` if no normalization is needed.
///
/// # Examples
///
/// ```
/// use caret_core::normalize_newlines;
///
/// assert_eq!(normalize_newlines("hello\nworld"), "hello\nworld");
/// assert_eq!(normalize_newlines("hello\r\nworld"), "hello\nworld");
/// assert_eq!(normalize_newlines("hello\rworld"), "hello\nworld");
/// ```
pub fn normalize_newlines(s: &str) -> Cow<'_, str> {
    if !s.contains('\r') {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut it = s.chars().peekable();
    while let Some(ch) = it.next() {
        match ch {
            '\r' => {
                if it.peek() == Some(&'\n') {
                    let _ = it.next();
                }
                out.push('\n');
            }
            _ => out.push(ch),
        }
    }
    Cow::Owned(out)
}

/// A `\n`-delimited line as a char range; `end` excludes the newline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineRange {
    pub start: usize,
    pub end: usize,
}

impl LineRange {
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// All lines of `s`. Always returns at least one (possibly empty) line.
///
/// # Examples
///
/// ```
/// use caret_core::{LineRange, line_ranges};
///
/// assert_eq!(
///     line_ranges("a\nbb\n"),
///     vec![
///         LineRange { start: 0, end: 1 },
///         LineRange { start: 2, end: 4 },
///         LineRange { start: 5, end: 5 },
///     ]
/// );
/// ```
pub fn line_ranges(s: &str) -> Vec<LineRange> {
    let mut out = Vec::new();
    let mut start = 0usize;
    let mut i = 0usize;
    for ch in s.chars() {
        if ch == '\n' {
            out.push(LineRange { start, end: i });
            start = i + 1;
        }
        i += 1;
    }
    out.push(LineRange { start, end: i });
    out
}

/// Index into [`line_ranges`] of the line containing `offset`.
///
/// An offset sitting right after a `\n` belongs to the following line.
pub fn line_index_for_offset(lines: &[LineRange], offset: usize) -> usize {
    if lines.is_empty() {
        return 0;
    }
    let i = lines.partition_point(|l| l.start <= offset);
    i.saturating_sub(1).min(lines.len() - 1)
}

/// Chars that form words for word jumps and double-click selection.
#[inline]
pub fn is_word_char(ch: char) -> bool {
    !ch.is_whitespace()
}

/// Next whitespace/non-whitespace boundary strictly after `offset`, or the text end.
///
/// # Examples
///
/// ```
/// use caret_core::next_word_boundary;
///
/// let s = "hello  world";
/// assert_eq!(next_word_boundary(s, 0), 5);
/// assert_eq!(next_word_boundary(s, 5), 7);
/// assert_eq!(next_word_boundary(s, 7), 12);
/// assert_eq!(next_word_boundary(s, 12), 12);
/// ```
pub fn next_word_boundary(s: &str, offset: usize) -> usize {
    let chars: Vec<char> = s.chars().collect();
    let len = chars.len();
    if offset >= len {
        return len;
    }

    let mut i = offset + 1;
    while i < len && is_word_char(chars[i]) == is_word_char(chars[i - 1]) {
        i += 1;
    }
    i
}

/// Previous whitespace/non-whitespace boundary strictly before `offset`, or 0.
///
/// # Examples
///
/// ```
/// use caret_core::prev_word_boundary;
///
/// let s = "hello  world";
/// assert_eq!(prev_word_boundary(s, 12), 7);
/// assert_eq!(prev_word_boundary(s, 7), 5);
/// assert_eq!(prev_word_boundary(s, 5), 0);
/// assert_eq!(prev_word_boundary(s, 0), 0);
/// ```
pub fn prev_word_boundary(s: &str, offset: usize) -> usize {
    let chars: Vec<char> = s.chars().collect();
    let offset = offset.min(chars.len());
    if offset == 0 {
        return 0;
    }

    let mut i = offset - 1;
    while i > 0 && is_word_char(chars[i - 1]) == is_word_char(chars[i]) {
        i -= 1;
    }
    i
}

/// Maximal run of word chars touching `pos`, as `(start, end)`.
///
/// Expands left over word chars before `pos` and right over word chars from `pos`. When
/// `pos` sits inside whitespace the range is empty (`start == end == pos`).
pub fn word_range_at(s: &str, pos: usize) -> (usize, usize) {
    let chars: Vec<char> = s.chars().collect();
    let pos = pos.min(chars.len());

    let mut start = pos;
    while start > 0 && is_word_char(chars[start - 1]) {
        start -= 1;
    }

    let mut end = pos;
    while end < chars.len() && is_word_char(chars[end]) {
        end += 1;
    }

    (start, end)
}

/// Rebuild the list of byte indices where a caret can be placed, including 0 and `len`.
///
/// # Examples
///
/// ```
/// use caret_core::rebuild_cursor_boundaries;
///
/// let mut boundaries = Vec::new();
/// rebuild_cursor_boundaries("a€b", &mut boundaries);
/// assert_eq!(boundaries, vec![0, 1, 4, 5]);
/// ```
pub fn rebuild_cursor_boundaries(value: &str, out: &mut Vec<usize>) {
    out.clear();
    out.extend(value.char_indices().map(|(i, _)| i));

    if out.first().copied() != Some(0) {
        out.insert(0, 0);
    }
    if out.last().copied() != Some(value.len()) {
        out.push(value.len());
    }
}

/// Char offset within `line` whose prefix width is closest to `x`.
///
/// Binary-searches the caret boundaries (prefix widths grow monotonically), then snaps to the
/// nearer neighbour. Ties go to the shorter prefix.
///
/// # Examples
///
/// ```
/// use caret_core::caret_from_x;
///
/// let measure = |s: &str| s.chars().count() as f32 * 10.0;
/// assert_eq!(caret_from_x("hello", 4.0, measure), 0);
/// assert_eq!(caret_from_x("hello", 5.0, measure), 0);
/// assert_eq!(caret_from_x("hello", 6.0, measure), 1);
/// assert_eq!(caret_from_x("hello", 999.0, measure), 5);
/// ```
pub fn caret_from_x(line: &str, x: f32, mut measure_prefix: impl FnMut(&str) -> f32) -> usize {
    if line.is_empty() {
        return 0;
    }

    let mut boundaries = Vec::new();
    rebuild_cursor_boundaries(line, &mut boundaries);

    let x = x.max(0.0);

    // Largest boundary whose prefix width <= x.
    let mut lo = 0usize;
    let mut hi = boundaries.len() - 1;
    while lo < hi {
        let mid = lo + (hi - lo).div_ceil(2);
        let w = measure_prefix(&line[..boundaries[mid]]).max(0.0);
        if w <= x {
            lo = mid;
        } else {
            hi = mid - 1;
        }
    }

    let left_w = measure_prefix(&line[..boundaries[lo]]).max(0.0);

    if lo + 1 < boundaries.len() {
        let right_w = measure_prefix(&line[..boundaries[lo + 1]]).max(0.0);
        if x - left_w > right_w - x {
            return lo + 1;
        }
    }

    // Index into `boundaries` equals the char count of that prefix.
    lo
}
