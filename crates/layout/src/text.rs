use core_types::FontSpec;

/// Hit-testing and caret geometry can depend on this without knowing about egui, wgpu, etc.
pub trait TextMeasurer {
    /// Return the advance width of `text` in canvas px when rendered with `font`.
    fn measure(&self, text: &str, font: &FontSpec) -> f32;
}

/// Every char advances by the same width, regardless of font. Handy for tests and headless use.
#[derive(Clone, Copy, Debug)]
pub struct FixedAdvance(pub f32);

impl TextMeasurer for FixedAdvance {
    fn measure(&self, text: &str, _font: &FontSpec) -> f32 {
        text.chars().count() as f32 * self.0
    }
}
