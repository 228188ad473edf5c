//! Single/double/triple click classification.

/// What a pointer-down means once classified against the previous ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickKind {
    Single,
    Double,
    Triple,
}

/// Counts consecutive pointer-downs on one element.
///
/// Timestamps are seconds on a monotonic clock (egui's `InputState::time`). A press within
/// `window` of the previous one advances the count 1 → 2 → 3 → 1; anything slower starts
/// over at 1.
#[derive(Clone, Debug)]
pub struct ClickTracker {
    window: f64,
    last_time: Option<f64>,
    count: u8,
}

impl ClickTracker {
    pub fn new(window_secs: f64) -> Self {
        Self {
            window: window_secs.max(0.0),
            last_time: None,
            count: 0,
        }
    }

    /// Record a pointer-down at `time` and classify it.
    pub fn register(&mut self, time: f64) -> ClickKind {
        let chained = self
            .last_time
            .is_some_and(|last| time >= last && time - last <= self.window);

        self.count = if chained { self.count % 3 + 1 } else { 1 };
        self.last_time = Some(time);

        match self.count {
            1 => ClickKind::Single,
            2 => ClickKind::Double,
            _ => ClickKind::Triple,
        }
    }

    /// Forget the previous press, e.g. after a pointer-up outside the element.
    pub fn reset(&mut self) {
        self.last_time = None;
        self.count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_cycle_within_window() {
        let mut t = ClickTracker::new(0.3);
        assert_eq!(t.register(1.0), ClickKind::Single);
        assert_eq!(t.register(1.2), ClickKind::Double);
        assert_eq!(t.register(1.4), ClickKind::Triple);
        assert_eq!(t.register(1.5), ClickKind::Single);
        assert_eq!(t.register(1.6), ClickKind::Double);
    }

    #[test]
    fn slow_clicks_start_over() {
        let mut t = ClickTracker::new(0.3);
        assert_eq!(t.register(1.0), ClickKind::Single);
        assert_eq!(t.register(1.31), ClickKind::Single);
        assert_eq!(t.register(1.5), ClickKind::Double);
    }

    #[test]
    fn reset_breaks_the_chain() {
        let mut t = ClickTracker::new(0.3);
        t.register(1.0);
        t.reset();
        assert_eq!(t.register(1.1), ClickKind::Single);
    }

    #[test]
    fn time_going_backwards_is_a_fresh_click() {
        let mut t = ClickTracker::new(0.3);
        t.register(5.0);
        assert_eq!(t.register(4.9), ClickKind::Single);
    }
}
