use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use core_types::{FontSpec, FontStyle, FontWeight};
use egui::text::{LayoutJob, TextFormat};
use egui::{Color32, Context, FontFamily, FontId, Galley};
use layout::TextMeasurer;

/// Family, rounded size, weight and style: everything that picks a face and its metrics.
type SpaceKey = (String, u32, FontWeight, FontStyle);

/// `egui`-backed adapter for measuring and shaping element text.
///
/// Family names resolve against the fonts registered with egui. `"sans-serif"` maps to the
/// proportional family and `"monospace"` to the monospace one; anything unknown falls back to
/// proportional, logged once per family.
pub struct EguiTextMeasurer {
    ctx: Context,
    space_width_cache: RefCell<HashMap<SpaceKey, f32>>,
    warned_families: RefCell<HashSet<String>>,
}

impl EguiTextMeasurer {
    pub fn new(ctx: &Context) -> Self {
        Self {
            ctx: ctx.clone(),
            space_width_cache: RefCell::new(HashMap::new()),
            warned_families: RefCell::new(HashSet::new()),
        }
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// The egui family used for `font`. Bold prefers a registered `"<family> Bold"` face.
    pub fn font_family(&self, font: &FontSpec) -> FontFamily {
        match font.family.as_str() {
            "" | "sans-serif" | "proportional" => return FontFamily::Proportional,
            "monospace" => return FontFamily::Monospace,
            _ => {}
        }

        let families = self.ctx.fonts(|f| f.families());

        if font.weight == FontWeight::Bold {
            let bold = FontFamily::Name(format!("{} Bold", font.family).into());
            if families.contains(&bold) {
                return bold;
            }
        }

        let named = FontFamily::Name(font.family.as_str().into());
        if families.contains(&named) {
            return named;
        }

        if self.warned_families.borrow_mut().insert(font.family.clone()) {
            log::warn!(
                "font family {:?} is not registered; using the proportional family",
                font.family
            );
        }
        FontFamily::Proportional
    }

    pub fn font_id(&self, font: &FontSpec) -> FontId {
        FontId::new(font.size.max(1.0), self.font_family(font))
    }

    pub fn text_format(&self, font: &FontSpec, color: Color32) -> TextFormat {
        TextFormat {
            font_id: self.font_id(font),
            color,
            italics: font.style == FontStyle::Italic,
            ..Default::default()
        }
    }

    /// Shape one line of text without wrapping.
    pub fn layout_line(&self, text: &str, font: &FontSpec, color: Color32) -> Arc<Galley> {
        let job = LayoutJob::single_section(text.to_owned(), self.text_format(font, color));
        self.ctx.fonts(|f| f.layout_job(job))
    }

    fn space_width(&self, font: &FontSpec) -> f32 {
        // Color does not affect metrics.
        let key = (
            font.family.clone(),
            font.size.round().max(0.0) as u32,
            font.weight,
            font.style,
        );
        if let Some(w) = self.space_width_cache.borrow().get(&key).copied() {
            return w;
        }

        // NBSP is the most stable in egui; a bare space shapes to an empty rect.
        let nbsp = "\u{00A0}";
        let w_nbsp = self.layout_line(nbsp, font, Color32::BLACK).rect.width();

        let w = if w_nbsp.is_finite() && w_nbsp > 0.0 {
            w_nbsp
        } else {
            let w_with = self
                .layout_line(&format!("x{nbsp}x"), font, Color32::BLACK)
                .rect
                .width();
            let w_without = self.layout_line("xx", font, Color32::BLACK).rect.width();
            let w = (w_with - w_without).max(0.0);
            if w.is_finite() && w > 0.0 {
                w
            } else {
                (font.size * 0.33).max(1.0)
            }
        };

        self.space_width_cache.borrow_mut().insert(key, w);
        w
    }
}

impl TextMeasurer for EguiTextMeasurer {
    fn measure(&self, text: &str, font: &FontSpec) -> f32 {
        if text.is_empty() {
            return 0.0;
        }
        if text == " " {
            return self.space_width(font);
        }
        self.layout_line(text, font, Color32::BLACK).rect.width()
    }
}
