//! # caret_core
//!
//! UI-agnostic editing layer for canvas text boxes.
//!
//! - [`CaretState`]: caret offset plus optional selection anchor
//! - [`SelectionRange`]: normalized selection as a char range
//! - [`apply`]: the pure `(state, text, action) -> (state', text')` transition
//! - [`ClickTracker`] and [`BlinkTimer`]: timing helpers owned by an editing session
//!
//! Offsets everywhere count Unicode scalar values. Nothing here knows about egui, fonts or
//! pixels; hit-testing and painting live in the `layout` and `gfx` crates.
//!
//! ```
//! use caret_core::{CaretState, EditAction, apply};
//!
//! let edit = apply(CaretState::at(0), "", &EditAction::InsertText("A".into()));
//! assert_eq!(edit.text, "A");
//! assert_eq!(edit.state.offset, 1);
//! ```

mod blink;
mod click;
mod engine;
mod selection;
mod state;
mod text;

pub use blink::BlinkTimer;
pub use click::{ClickKind, ClickTracker};
pub use engine::{Edit, EditAction, apply};
pub use selection::SelectionRange;
pub use state::CaretState;

pub use text::{
    LineRange, byte_index, caret_from_x, char_len, is_word_char, line_index_for_offset,
    line_ranges, next_word_boundary, normalize_newlines, prev_word_boundary,
    rebuild_cursor_boundaries, slice_chars, word_range_at,
};
