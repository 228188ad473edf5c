//! Caret blink timing.

/// Square-wave blink: visible for one interval, hidden for the next.
///
/// The phase restarts at [`BlinkTimer::reset`] so the caret is solid right after it moves.
#[derive(Clone, Copy, Debug)]
pub struct BlinkTimer {
    started: f64,
    interval: f64,
}

impl BlinkTimer {
    /// `interval_secs <= 0` disables blinking (always visible).
    pub fn new(now: f64, interval_secs: f64) -> Self {
        Self {
            started: now,
            interval: interval_secs,
        }
    }

    pub fn reset(&mut self, now: f64) {
        self.started = now;
    }

    pub fn is_visible(&self, now: f64) -> bool {
        if self.interval <= 0.0 {
            return true;
        }
        let elapsed = (now - self.started).max(0.0);
        (elapsed / self.interval).floor() as u64 % 2 == 0
    }

    /// Seconds until the visibility next flips, or `None` when not blinking.
    pub fn until_next_toggle(&self, now: f64) -> Option<f64> {
        if self.interval <= 0.0 {
            return None;
        }
        let elapsed = (now - self.started).max(0.0);
        let into_phase = elapsed % self.interval;
        Some(self.interval - into_phase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alternates_each_interval() {
        let t = BlinkTimer::new(10.0, 0.5);
        assert!(t.is_visible(10.0));
        assert!(t.is_visible(10.49));
        assert!(!t.is_visible(10.5));
        assert!(!t.is_visible(10.99));
        assert!(t.is_visible(11.0));
    }

    #[test]
    fn reset_makes_caret_solid_again() {
        let mut t = BlinkTimer::new(0.0, 0.5);
        assert!(!t.is_visible(0.7));
        t.reset(0.7);
        assert!(t.is_visible(0.7));
    }

    #[test]
    fn next_toggle_is_the_remaining_phase() {
        let t = BlinkTimer::new(0.0, 0.5);
        let dt = t.until_next_toggle(0.2).unwrap();
        assert!((dt - 0.3).abs() < 1e-9);
    }

    #[test]
    fn zero_interval_disables_blinking() {
        let t = BlinkTimer::new(0.0, 0.0);
        assert!(t.is_visible(123.4));
        assert_eq!(t.until_next_toggle(1.0), None);
    }
}
