//! Text selection representation.

use crate::text::slice_chars;

/// A text selection as a char range.
///
/// Always normalized so that `start <= end`. Both ends count chars, not bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectionRange {
    /// Start char offset (inclusive).
    pub start: usize,
    /// End char offset (exclusive).
    pub end: usize,
}

impl SelectionRange {
    /// Create a new selection range; the ends may be given in either order.
    #[inline]
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Length of the selection in chars.
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// The selected substring of `value`. Out-of-range ends are clamped.
    #[inline]
    pub fn slice<'a>(&self, value: &'a str) -> &'a str {
        slice_chars(value, self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_range_normalizes() {
        let range = SelectionRange::new(10, 5);
        assert_eq!(range.start, 5);
        assert_eq!(range.end, 10);
        assert_eq!(range.len(), 5);
    }

    #[test]
    fn selection_range_is_empty() {
        assert!(SelectionRange::new(3, 3).is_empty());
        assert!(!SelectionRange::new(3, 5).is_empty());
    }

    #[test]
    fn selection_range_slice_counts_chars() {
        assert_eq!(SelectionRange::new(0, 5).slice("hello world"), "hello");
        assert_eq!(SelectionRange::new(1, 3).slice("aßçd"), "ßç");
        assert_eq!(SelectionRange::new(2, 40).slice("abc"), "c");
    }
}
