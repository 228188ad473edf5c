use caret_core::{BlinkTimer, CaretState, ClickTracker};
use core_types::ElementId;

use super::clipboard::PasteTicket;
use crate::EditorConfig;

/// Everything that lives exactly as long as one element is being edited.
///
/// Dropping the session drops its caret, click history, blink phase and drag state, and makes
/// any in-flight paste for it stale.
#[derive(Debug)]
pub struct EditingSession {
    id: u64,
    element: ElementId,
    caret: CaretState,
    pub(crate) clicks: ClickTracker,
    blink: BlinkTimer,
    pub(crate) dragging: bool,
}

impl EditingSession {
    pub(crate) fn new(
        id: u64,
        element: ElementId,
        caret: CaretState,
        now: f64,
        config: &EditorConfig,
    ) -> Self {
        Self {
            id,
            element,
            caret,
            clicks: ClickTracker::new(config.multi_click_window_secs()),
            blink: BlinkTimer::new(now, config.blink_interval_secs()),
            dragging: false,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn caret(&self) -> CaretState {
        self.caret
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Move the caret; the blink phase restarts whenever it actually changes.
    pub(crate) fn set_caret(&mut self, caret: CaretState, now: f64) {
        if caret != self.caret {
            self.caret = caret;
            self.blink.reset(now);
        }
    }

    pub fn caret_visible(&self, now: f64) -> bool {
        self.blink.is_visible(now)
    }

    pub fn until_next_blink(&self, now: f64) -> Option<f64> {
        self.blink.until_next_toggle(now)
    }

    pub fn ticket(&self) -> PasteTicket {
        PasteTicket {
            element: self.element,
            session: self.id,
        }
    }

    /// Whether a paste issued under `ticket` still belongs to this session.
    pub fn accepts(&self, ticket: PasteTicket) -> bool {
        ticket.session == self.id && ticket.element == self.element
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> EditingSession {
        EditingSession::new(
            7,
            ElementId::from_raw(2),
            CaretState::at(0),
            10.0,
            &EditorConfig::default(),
        )
    }

    #[test]
    fn caret_change_restarts_blink() {
        let mut s = session();
        assert!(!s.caret_visible(10.6));
        s.set_caret(CaretState::at(1), 10.6);
        assert!(s.caret_visible(10.6));
    }

    #[test]
    fn unchanged_caret_keeps_blink_phase() {
        let mut s = session();
        s.set_caret(CaretState::at(0), 10.6);
        assert!(!s.caret_visible(10.6));
    }

    #[test]
    fn tickets_match_only_their_session() {
        let s = session();
        assert!(s.accepts(s.ticket()));
        assert!(!s.accepts(PasteTicket {
            element: ElementId::from_raw(2),
            session: 8,
        }));
        assert!(!s.accepts(PasteTicket {
            element: ElementId::from_raw(3),
            session: 7,
        }));
    }
}
