//! The editing state machine: `Idle` when `session` is `None`, `Editing` otherwise.

use std::time::Duration;

use caret_core::{CaretState, ClickKind, EditAction, apply, char_len};
use core_types::ElementId;
use layout::{TextMeasurer, hit_test_text, offset_from_point};

use super::clipboard::ClipboardBridge;
use super::host::TextElementHost;
use super::keymap::KeyCommand;
use super::session::EditingSession;
use crate::EditorConfig;

/// Turns pointer/keyboard/clipboard input into caret and text changes for at most one text
/// element at a time.
///
/// Timestamps (`now`) are seconds on egui's input clock.
pub struct TextEditor {
    config: EditorConfig,
    clipboard: ClipboardBridge,
    session: Option<EditingSession>,
    next_session_id: u64,
}

impl TextEditor {
    pub fn new(config: EditorConfig, clipboard: ClipboardBridge) -> Self {
        Self {
            config,
            clipboard,
            session: None,
            next_session_id: 1,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn session(&self) -> Option<&EditingSession> {
        self.session.as_ref()
    }

    /// Element currently being edited.
    pub fn editing(&self) -> Option<ElementId> {
        self.session.as_ref().map(EditingSession::element)
    }

    pub fn caret(&self) -> Option<CaretState> {
        self.session.as_ref().map(EditingSession::caret)
    }

    /// Start editing `id` with the caret at the end of its text.
    pub fn select<H: TextElementHost + ?Sized>(&mut self, host: &mut H, id: ElementId, now: f64) {
        if self.editing() == Some(id) {
            return;
        }
        let Some(len) = host.text_element(id).map(|el| char_len(&el.text)) else {
            log::debug!("select: no text element {id}");
            return;
        };
        self.deselect(host);
        self.begin(host, id, CaretState::at(len), now);
    }

    /// Stop editing, if editing.
    pub fn deselect<H: TextElementHost + ?Sized>(&mut self, host: &mut H) {
        if let Some(session) = self.session.take() {
            log::debug!(
                "editing session {} on {} ended",
                session.id(),
                session.element()
            );
            host.on_focus_changed(None);
        }
    }

    /// The host deleted `id`; end its session if it is the one being edited.
    pub fn element_removed<H: TextElementHost + ?Sized>(&mut self, host: &mut H, id: ElementId) {
        if self.editing() == Some(id) {
            self.deselect(host);
        }
    }

    fn begin<H: TextElementHost + ?Sized>(
        &mut self,
        host: &mut H,
        id: ElementId,
        caret: CaretState,
        now: f64,
    ) {
        let session_id = self.next_session_id;
        self.next_session_id += 1;
        self.session = Some(EditingSession::new(session_id, id, caret, now, &self.config));
        log::debug!("editing session {session_id} started on {id}");
        host.on_focus_changed(Some(id));
    }

    /// Primary button pressed at a canvas point.
    pub fn pointer_down<H: TextElementHost + ?Sized>(
        &mut self,
        host: &mut H,
        measurer: &dyn TextMeasurer,
        point: (f32, f32),
        shift: bool,
        now: f64,
    ) {
        let Some(id) = host.text_element_at(point, measurer) else {
            self.deselect(host);
            return;
        };

        let fresh = self.editing() != Some(id);
        if fresh {
            self.deselect(host);
            self.begin(host, id, CaretState::at(0), now);
        }

        let Some(element) = host.text_element(id) else {
            self.deselect(host);
            return;
        };
        let Some(session) = self.session.as_mut() else {
            return;
        };

        let pos = match hit_test_text(element, point, measurer) {
            Some(hit) => hit.offset,
            None => offset_from_point(element, element.to_local(point), measurer),
        };
        let kind = session.clicks.register(now);
        let extend = shift && !fresh && kind == ClickKind::Single;

        let action = match kind {
            ClickKind::Single => EditAction::SetOffset { pos, extend },
            ClickKind::Double => EditAction::SelectWord(pos),
            ClickKind::Triple => EditAction::SelectLine(pos),
        };
        let mut caret = apply(session.caret(), &element.text, &action).state;

        session.dragging = kind == ClickKind::Single;
        if session.dragging && !extend {
            caret.selection_anchor = Some(caret.offset);
        }
        log::trace!("pointer down on {id}: {kind:?} at {pos}");
        session.set_caret(caret, now);
    }

    /// Pointer moved; extends the selection while a drag is in progress.
    pub fn pointer_moved<H: TextElementHost + ?Sized>(
        &mut self,
        host: &mut H,
        measurer: &dyn TextMeasurer,
        point: (f32, f32),
        now: f64,
    ) {
        let Some(session) = self.session.as_mut().filter(|s| s.is_dragging()) else {
            return;
        };
        let Some(element) = host.text_element(session.element()) else {
            return;
        };

        let pos = offset_from_point(element, element.to_local(point), measurer);
        let edit = apply(
            session.caret(),
            &element.text,
            &EditAction::SetOffset { pos, extend: true },
        );
        session.set_caret(edit.state, now);
    }

    /// Primary button released at a canvas point (or anywhere, when `point` is `None`).
    pub fn pointer_up<H: TextElementHost + ?Sized>(
        &mut self,
        host: &mut H,
        measurer: &dyn TextMeasurer,
        point: Option<(f32, f32)>,
        now: f64,
    ) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        let on_element = point.is_some_and(|p| {
            host.text_element(session.element())
                .is_some_and(|el| hit_test_text(el, p, measurer).is_some())
        });
        if !on_element {
            session.clicks.reset();
        }

        if session.dragging {
            session.dragging = false;
            let caret = session.caret().normalize_anchor();
            session.set_caret(caret, now);
        }
    }

    /// Run one caret/text transition on the edited element. Returns whether anything changed.
    pub fn apply_action<H: TextElementHost + ?Sized>(
        &mut self,
        host: &mut H,
        action: &EditAction,
        now: f64,
    ) -> bool {
        let Some(id) = self.editing() else {
            return false;
        };
        let Some(element) = host.text_element(id) else {
            log::debug!("edited element {id} disappeared");
            self.deselect(host);
            return false;
        };
        let Some(session) = self.session.as_mut() else {
            return false;
        };

        let before = session.caret();
        let edit = apply(before, &element.text, action);
        let state = edit.state;
        let updated = edit
            .text_changed()
            .then(|| element.with_text(edit.text.into_owned()));

        log::trace!("{action:?} on {id}: {before:?} -> {state:?}");
        session.set_caret(state, now);

        match updated {
            Some(updated) => {
                host.on_change(updated);
                true
            }
            None => state != before,
        }
    }

    pub fn insert_text<H: TextElementHost + ?Sized>(
        &mut self,
        host: &mut H,
        text: &str,
        now: f64,
    ) -> bool {
        self.apply_action(host, &EditAction::InsertText(text.to_owned()), now)
    }

    /// Dispatch a key command. Returns whether it changed editor or element state.
    pub fn handle_command<H: TextElementHost + ?Sized>(
        &mut self,
        host: &mut H,
        command: KeyCommand,
        now: f64,
    ) -> bool {
        match command {
            KeyCommand::Edit(action) => self.apply_action(host, &action, now),
            KeyCommand::Copy => {
                self.copy(host);
                false
            }
            KeyCommand::Cut => self.cut(host, now),
            KeyCommand::Paste => {
                self.request_paste();
                false
            }
            KeyCommand::Exit => {
                let was_editing = self.session.is_some();
                self.deselect(host);
                was_editing
            }
        }
    }

    fn selected_text<H: TextElementHost + ?Sized>(&self, host: &H) -> Option<String> {
        let session = self.session.as_ref()?;
        let sel = session.caret().selection()?;
        let element = host.text_element(session.element())?;
        Some(sel.slice(&element.text).to_owned())
    }

    /// Copy the selection, if any.
    pub fn copy<H: TextElementHost + ?Sized>(&self, host: &H) {
        if let Some(text) = self.selected_text(host) {
            self.clipboard.copy(&text);
        }
    }

    /// Copy the selection, then delete it.
    pub fn cut<H: TextElementHost + ?Sized>(&mut self, host: &mut H, now: f64) -> bool {
        let Some(text) = self.selected_text(host) else {
            return false;
        };
        self.clipboard.cut(&text);
        self.apply_action(host, &EditAction::DeleteSelection, now)
    }

    /// Ask the clipboard backend for text; it is inserted by a later
    /// [`resolve_pastes`](Self::resolve_pastes) if this session is still active.
    pub fn request_paste(&self) {
        if let Some(session) = &self.session {
            self.clipboard.request_paste(session.ticket());
        }
    }

    /// Text delivered by the platform (egui `Event::Paste`) for the current session.
    pub fn paste_delivered(&self, text: String) {
        if let Some(session) = &self.session {
            self.clipboard.deliver(session.ticket(), text);
        }
    }

    /// Apply every paste that resolved since the last call. Replies for a session that has
    /// ended are dropped. Returns whether any text changed.
    pub fn resolve_pastes<H: TextElementHost + ?Sized>(&mut self, host: &mut H, now: f64) -> bool {
        let mut changed = false;
        for reply in self.clipboard.drain_replies() {
            let live = self
                .session
                .as_ref()
                .is_some_and(|s| s.accepts(reply.ticket));
            if !live {
                log::debug!(
                    "dropping paste for {} (session {} has ended)",
                    reply.ticket.element,
                    reply.ticket.session
                );
                continue;
            }
            if reply.text.is_empty() {
                continue;
            }
            changed |= self.insert_text(host, &reply.text, now);
        }
        changed
    }

    pub fn caret_visible(&self, now: f64) -> bool {
        self.session.as_ref().is_some_and(|s| s.caret_visible(now))
    }

    /// Time until the caret blinks next, for scheduling a repaint.
    pub fn until_next_blink(&self, now: f64) -> Option<Duration> {
        let secs = self.session.as_ref()?.until_next_blink(now)?;
        Some(Duration::from_secs_f64(secs.max(0.0)))
    }
}
