//! Pure caret/text transitions.
//!
//! [`apply`] never mutates its inputs: it returns the next [`CaretState`] and the next text,
//! borrowing the old text when the action only moved the caret.

use std::borrow::Cow;

use crate::selection::SelectionRange;
use crate::state::CaretState;
use crate::text::{
    byte_index, char_len, line_index_for_offset, line_ranges, next_word_boundary,
    normalize_newlines, prev_word_boundary, word_range_at,
};

/// One editing step, as produced by the input router.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditAction {
    /// Replace the selection (or splice at the caret) with the given text.
    InsertText(String),
    DeleteBackward,
    DeleteForward,
    /// Delete the selection if there is one; used by cut.
    DeleteSelection,
    MoveLeft { extend: bool, word: bool },
    MoveRight { extend: bool, word: bool },
    MoveUp { extend: bool },
    MoveDown { extend: bool },
    /// Start of the current line.
    MoveHome { extend: bool },
    /// End of the current line, before any `\n`.
    MoveEnd { extend: bool },
    MoveTextStart { extend: bool },
    MoveTextEnd { extend: bool },
    SelectAll,
    /// Place the caret at a hit-tested offset.
    SetOffset { pos: usize, extend: bool },
    SelectWord(usize),
    SelectLine(usize),
}

/// Result of [`apply`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Edit<'a> {
    pub state: CaretState,
    pub text: Cow<'a, str>,
}

impl<'a> Edit<'a> {
    fn unchanged(state: CaretState, text: &'a str) -> Self {
        Self {
            state,
            text: Cow::Borrowed(text),
        }
    }

    /// Whether the action produced new text (and so needs committing to the host).
    #[inline]
    pub fn text_changed(&self) -> bool {
        matches!(self.text, Cow::Owned(_))
    }
}

/// Apply `action` to `state` over `text`.
///
/// The incoming state is clamped against `text` first, and every returned state is valid for
/// the returned text.
pub fn apply<'a>(state: CaretState, text: &'a str, action: &EditAction) -> Edit<'a> {
    let len = char_len(text);
    let state = state.clamped(len);

    match action {
        EditAction::InsertText(s) => insert(state, text, s),

        EditAction::DeleteBackward => match state.selection() {
            Some(sel) => remove(text, sel),
            None if state.offset == 0 => Edit::unchanged(state, text),
            None => remove(text, SelectionRange::new(state.offset - 1, state.offset)),
        },

        EditAction::DeleteForward => match state.selection() {
            Some(sel) => remove(text, sel),
            None if state.offset >= len => Edit::unchanged(state, text),
            None => remove(text, SelectionRange::new(state.offset, state.offset + 1)),
        },

        EditAction::DeleteSelection => match state.selection() {
            Some(sel) => remove(text, sel),
            None => Edit::unchanged(state, text),
        },

        EditAction::MoveLeft { extend, word } => {
            let target = if *word {
                prev_word_boundary(text, state.offset)
            } else {
                state.offset.saturating_sub(1)
            };
            Edit::unchanged(move_to(state, target, *extend), text)
        }

        EditAction::MoveRight { extend, word } => {
            let target = if *word {
                next_word_boundary(text, state.offset)
            } else {
                (state.offset + 1).min(len)
            };
            Edit::unchanged(move_to(state, target, *extend), text)
        }

        EditAction::MoveUp { extend } => {
            let lines = line_ranges(text);
            let li = line_index_for_offset(&lines, state.offset);
            let target = if li == 0 {
                0
            } else {
                let col = state.offset - lines[li].start;
                let above = lines[li - 1];
                above.start + col.min(above.len())
            };
            Edit::unchanged(move_to(state, target, *extend), text)
        }

        EditAction::MoveDown { extend } => {
            let lines = line_ranges(text);
            let li = line_index_for_offset(&lines, state.offset);
            let target = if li + 1 >= lines.len() {
                len
            } else {
                let col = state.offset - lines[li].start;
                let below = lines[li + 1];
                below.start + col.min(below.len())
            };
            Edit::unchanged(move_to(state, target, *extend), text)
        }

        EditAction::MoveHome { extend } => {
            let lines = line_ranges(text);
            let target = lines[line_index_for_offset(&lines, state.offset)].start;
            Edit::unchanged(move_to(state, target, *extend), text)
        }

        EditAction::MoveEnd { extend } => {
            let lines = line_ranges(text);
            let target = lines[line_index_for_offset(&lines, state.offset)].end;
            Edit::unchanged(move_to(state, target, *extend), text)
        }

        EditAction::MoveTextStart { extend } => Edit::unchanged(move_to(state, 0, *extend), text),

        EditAction::MoveTextEnd { extend } => Edit::unchanged(move_to(state, len, *extend), text),

        EditAction::SelectAll => Edit::unchanged(CaretState::selecting(0, len), text),

        EditAction::SetOffset { pos, extend } => {
            Edit::unchanged(move_to(state, (*pos).min(len), *extend), text)
        }

        EditAction::SelectWord(pos) => {
            let (start, end) = word_range_at(text, *pos);
            Edit::unchanged(CaretState::selecting(start, end), text)
        }

        EditAction::SelectLine(pos) => {
            let lines = line_ranges(text);
            let line = lines[line_index_for_offset(&lines, (*pos).min(len))];
            Edit::unchanged(CaretState::selecting(line.start, line.end), text)
        }
    }
}

/// Keep (or create) the anchor when extending, otherwise collapse onto `target`.
fn move_to(state: CaretState, target: usize, extend: bool) -> CaretState {
    if extend {
        CaretState {
            offset: target,
            selection_anchor: Some(state.selection_anchor.unwrap_or(state.offset)),
        }
    } else {
        CaretState::at(target)
    }
}

fn insert<'a>(state: CaretState, text: &'a str, s: &str) -> Edit<'a> {
    let s = normalize_newlines(s);
    let (start, end) = match state.selection() {
        Some(sel) => (sel.start, sel.end),
        None if s.is_empty() => return Edit::unchanged(CaretState::at(state.offset), text),
        None => (state.offset, state.offset),
    };

    let a = byte_index(text, start);
    let b = byte_index(text, end);
    let mut out = String::with_capacity(text.len() - (b - a) + s.len());
    out.push_str(&text[..a]);
    out.push_str(&s);
    out.push_str(&text[b..]);

    Edit {
        state: CaretState::at(start + char_len(&s)),
        text: Cow::Owned(out),
    }
}

fn remove(text: &str, sel: SelectionRange) -> Edit<'_> {
    let a = byte_index(text, sel.start);
    let b = byte_index(text, sel.end);
    let mut out = String::with_capacity(text.len() - (b - a));
    out.push_str(&text[..a]);
    out.push_str(&text[b..]);

    Edit {
        state: CaretState::at(sel.start),
        text: Cow::Owned(out),
    }
}
