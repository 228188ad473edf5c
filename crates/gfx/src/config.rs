use core_types::Rgba;
use serde::Deserialize;

/// Tunables for the canvas text editor. Every field has a default, so a partial file is fine.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Length of one caret on/off phase.
    pub blink_interval_ms: u64,
    /// Max gap between presses for them to count as a double/triple click.
    pub multi_click_window_ms: u64,
    /// Caret bar width in canvas px.
    pub caret_width: f32,
    pub selection_color: Rgba,
    /// `None` paints the caret in the element's text color.
    pub caret_color: Option<Rgba>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            blink_interval_ms: 530,
            multi_click_window_ms: 300,
            caret_width: 2.0,
            selection_color: (0, 120, 215, 90),
            caret_color: None,
        }
    }
}

impl EditorConfig {
    pub fn blink_interval_secs(&self) -> f64 {
        self.blink_interval_ms as f64 / 1000.0
    }

    pub fn multi_click_window_secs(&self) -> f64 {
        self.multi_click_window_ms as f64 / 1000.0
    }
}
