//! Caret and selection anchor for the focused text box.

use crate::selection::SelectionRange;

/// Caret position plus optional selection anchor, both as char offsets.
///
/// When `selection_anchor` is `Some(anchor)`, the selection is
/// `min(anchor, offset)..max(anchor, offset)`; an anchor equal to the offset is an empty
/// selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CaretState {
    pub offset: usize,
    pub selection_anchor: Option<usize>,
}

impl CaretState {
    /// Collapsed caret at `offset`.
    #[inline]
    pub fn at(offset: usize) -> Self {
        Self {
            offset,
            selection_anchor: None,
        }
    }

    /// Selection from `anchor` to `offset` (caret sits at `offset`).
    #[inline]
    pub fn selecting(anchor: usize, offset: usize) -> Self {
        Self {
            offset,
            selection_anchor: Some(anchor),
        }
    }

    /// Re-clamp both ends into `0..=len`.
    pub fn clamped(self, len: usize) -> Self {
        Self {
            offset: self.offset.min(len),
            selection_anchor: self.selection_anchor.map(|a| a.min(len)),
        }
    }

    /// The effective selection, or `None` when absent or collapsed.
    pub fn selection(&self) -> Option<SelectionRange> {
        let anchor = self.selection_anchor?;
        let range = SelectionRange::new(anchor, self.offset);
        (!range.is_empty()).then_some(range)
    }

    #[inline]
    pub fn has_selection(&self) -> bool {
        self.selection().is_some()
    }

    /// Drop an anchor that equals the offset.
    pub fn normalize_anchor(self) -> Self {
        match self.selection_anchor {
            Some(a) if a == self.offset => Self::at(self.offset),
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_pulls_both_ends_into_range() {
        let s = CaretState::selecting(10, 7).clamped(4);
        assert_eq!(s, CaretState::selecting(4, 4));
    }

    #[test]
    fn collapsed_anchor_is_no_selection() {
        let s = CaretState::selecting(3, 3);
        assert_eq!(s.selection(), None);
        assert_eq!(s.normalize_anchor(), CaretState::at(3));
    }

    #[test]
    fn selection_is_ordered() {
        let s = CaretState::selecting(5, 1);
        assert_eq!(s.selection(), Some(SelectionRange::new(1, 5)));
        assert!(s.has_selection());
    }
}
