//! # core_types
//!
//! Shared data model for the template designer canvas.
//!
//! A [`TextElement`] is immutable-by-replacement: editing code never mutates an element owned
//! by the host, it builds a new one (see [`TextElement::with_text`]) and hands it back.

mod id;

pub use id::ElementId;

/// Smallest width a text box may have, in canvas px.
pub const MIN_WIDTH: f32 = 20.0;

/// Default line-height multiplier applied to the font size.
pub const DEFAULT_LINE_HEIGHT: f32 = 1.2;

/// Straight (non-premultiplied) RGBA color.
pub type Rgba = (u8, u8, u8, u8);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
    /// Rendered as `Left`; per-word spacing is not distributed.
    Justify,
}

/// Everything needed to measure a run of text in an element's font.
#[derive(Clone, Debug, PartialEq)]
pub struct FontSpec {
    pub family: String,
    pub size: f32,
    pub weight: FontWeight,
    pub style: FontStyle,
}

/// One text box on the designer canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct TextElement {
    pub id: ElementId,
    /// May contain `\n` as explicit line breaks.
    pub text: String,
    /// Canvas position of the top-left corner.
    pub x: f32,
    pub y: f32,
    /// Always `>= MIN_WIDTH`.
    pub width: f32,
    pub font_size: f32,
    pub font_family: String,
    pub font_weight: FontWeight,
    pub font_style: FontStyle,
    pub color: Rgba,
    pub text_align: TextAlign,
    /// Multiplier on `font_size` giving the distance between baselines.
    pub line_height: f32,
    /// 0.0 (transparent) ..= 1.0 (opaque).
    pub opacity: f32,
}

impl TextElement {
    pub fn new(id: ElementId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            x: 0.0,
            y: 0.0,
            width: 200.0,
            font_size: 16.0,
            font_family: String::from("sans-serif"),
            font_weight: FontWeight::Normal,
            font_style: FontStyle::Normal,
            color: (0, 0, 0, 255),
            text_align: TextAlign::Left,
            line_height: DEFAULT_LINE_HEIGHT,
            opacity: 1.0,
        }
    }

    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Set the wrap width, clamped to [`MIN_WIDTH`].
    pub fn with_width(mut self, width: f32) -> Self {
        self.width = clamp_width(width);
        self
    }

    pub fn with_font(mut self, family: impl Into<String>, size: f32) -> Self {
        self.font_family = family.into();
        self.font_size = size.max(1.0);
        self
    }

    pub fn with_align(mut self, align: TextAlign) -> Self {
        self.text_align = align;
        self
    }

    /// Replacement element carrying `text` and every other attribute unchanged.
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..self.clone()
        }
    }

    pub fn font(&self) -> FontSpec {
        FontSpec {
            family: self.font_family.clone(),
            size: self.font_size,
            weight: self.font_weight,
            style: self.font_style,
        }
    }

    /// Distance between consecutive line tops, in canvas px.
    pub fn line_pitch(&self) -> f32 {
        let factor = if self.line_height.is_finite() && self.line_height > 0.0 {
            self.line_height
        } else {
            DEFAULT_LINE_HEIGHT
        };
        self.font_size * factor
    }

    /// Convert a canvas point into element-local coordinates.
    pub fn to_local(&self, point: (f32, f32)) -> (f32, f32) {
        (point.0 - self.x, point.1 - self.y)
    }
}

pub fn clamp_width(width: f32) -> f32 {
    if width.is_finite() {
        width.max(MIN_WIDTH)
    } else {
        MIN_WIDTH
    }
}
