//! A small template designer: a canvas of text boxes and plain shapes, a toolbar, and a
//! properties panel for the selected text box.

use std::sync::Arc;

use core_types::{ElementId, FontStyle, FontWeight, Rgba, TextAlign, TextElement, clamp_width};
use egui::{
    Button, CentralPanel, Color32, ComboBox, Context, DragValue, Frame, Pos2, Rect, Sense,
    SidePanel, Slider, TextEdit, TopBottomPanel, Ui, Vec2,
};
use gfx::{
    ClipboardBridge, ClipboardProvider, EditorConfig, EguiTextMeasurer, FrameInputCtx, PaintCtx,
    SystemClipboard, TextEditor, TextElementHost, paint_element, route_frame_input,
};
use layout::{TextMeasurer, text_bounds};

use crate::UiApp;

/// Gap between the canvas panel edge and canvas point (0, 0).
const CANVAS_MARGIN: Vec2 = Vec2::new(16.0, 16.0);

const FONT_FAMILIES: [&str; 3] = ["sans-serif", "monospace", "Georgia"];

/// A filled rectangle; never editable, but it hides text boxes underneath it from clicks.
#[derive(Clone, Debug, PartialEq)]
pub struct BoxElement {
    pub id: ElementId,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub fill: Rgba,
}

#[derive(Clone, Debug, PartialEq)]
pub enum CanvasElement {
    Text(TextElement),
    Box(BoxElement),
}

impl CanvasElement {
    pub fn id(&self) -> ElementId {
        match self {
            CanvasElement::Text(t) => t.id,
            CanvasElement::Box(b) => b.id,
        }
    }

    fn contains(&self, point: (f32, f32), measurer: &dyn TextMeasurer) -> bool {
        match self {
            CanvasElement::Text(t) => text_bounds(t, measurer).contains(point),
            CanvasElement::Box(b) => {
                let (x, y) = point;
                x >= b.x && x <= b.x + b.width && y >= b.y && y <= b.y + b.height
            }
        }
    }
}

/// Elements in paint order (last is topmost) plus the text box the editor is working on.
#[derive(Debug, Default)]
pub struct DesignerDocument {
    elements: Vec<CanvasElement>,
    selected: Option<ElementId>,
    next_id: u64,
}

impl DesignerDocument {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            ..Default::default()
        }
    }

    /// A certificate-like template to play with.
    pub fn sample() -> Self {
        let mut doc = Self::new();
        doc.add_box(20.0, 20.0, 600.0, 380.0, (252, 248, 235, 255));

        let title = doc.add_text("Certificate of Completion", 60.0, 50.0);
        doc.update_text(title, |t| {
            t.width = 520.0;
            t.font_size = 32.0;
            t.font_weight = FontWeight::Bold;
            t.text_align = TextAlign::Center;
            t.color = (40, 40, 90, 255);
        });

        let body_text = "This certifies that\nJane Doe\nhas completed the course";
        let body = doc.add_text(body_text, 60.0, 130.0);
        doc.update_text(body, |t| {
            t.width = 520.0;
            t.font_size = 20.0;
            t.text_align = TextAlign::Center;
        });

        let signature = doc.add_text("Signed:\n____________", 60.0, 290.0);
        doc.update_text(signature, |t| {
            t.width = 220.0;
            t.font_family = String::from("monospace");
            t.font_size = 14.0;
        });

        let date = doc.add_text("Issued October 2026", 320.0, 350.0);
        doc.update_text(date, |t| {
            t.width = 280.0;
            t.font_size = 14.0;
            t.font_style = FontStyle::Italic;
            t.text_align = TextAlign::Right;
            t.opacity = 0.7;
        });

        doc.add_box(470.0, 240.0, 80.0, 80.0, (212, 175, 55, 230));
        doc
    }

    pub fn elements(&self) -> &[CanvasElement] {
        &self.elements
    }

    /// Text box currently being edited, as last reported by the editor.
    pub fn selected(&self) -> Option<ElementId> {
        self.selected
    }

    fn alloc_id(&mut self) -> ElementId {
        let id = ElementId::from_raw(self.next_id.max(1));
        self.next_id = id.as_raw() + 1;
        id
    }

    pub fn add_text(&mut self, text: &str, x: f32, y: f32) -> ElementId {
        let id = self.alloc_id();
        self.elements
            .push(CanvasElement::Text(TextElement::new(id, text).at(x, y)));
        id
    }

    pub fn add_box(&mut self, x: f32, y: f32, width: f32, height: f32, fill: Rgba) -> ElementId {
        let id = self.alloc_id();
        self.elements.push(CanvasElement::Box(BoxElement {
            id,
            x,
            y,
            width,
            height,
            fill,
        }));
        id
    }

    fn update_text(&mut self, id: ElementId, f: impl FnOnce(&mut TextElement)) {
        if let Some(CanvasElement::Text(t)) = self.elements.iter_mut().find(|e| e.id() == id) {
            f(t);
        }
    }

    /// Replace a text element with the same id. Unknown ids are ignored.
    pub fn replace_text(&mut self, updated: TextElement) {
        let id = updated.id;
        self.update_text(id, |t| *t = updated);
    }

    pub fn remove(&mut self, id: ElementId) -> bool {
        let before = self.elements.len();
        self.elements.retain(|e| e.id() != id);
        self.elements.len() != before
    }
}

impl TextElementHost for DesignerDocument {
    fn text_element(&self, id: ElementId) -> Option<&TextElement> {
        self.elements.iter().find_map(|e| match e {
            CanvasElement::Text(t) if t.id == id => Some(t),
            _ => None,
        })
    }

    fn text_element_at(
        &self,
        point: (f32, f32),
        measurer: &dyn TextMeasurer,
    ) -> Option<ElementId> {
        let topmost = self
            .elements
            .iter()
            .rev()
            .find(|e| e.contains(point, measurer))?;
        match topmost {
            CanvasElement::Text(t) => Some(t.id),
            CanvasElement::Box(_) => None,
        }
    }

    fn on_change(&mut self, updated: TextElement) {
        self.replace_text(updated);
    }

    fn on_focus_changed(&mut self, focused: Option<ElementId>) {
        self.selected = focused;
    }
}

pub struct DesignerApp {
    doc: DesignerDocument,
    editor: TextEditor,
    measurer: EguiTextMeasurer,
    canvas_origin: Option<Pos2>,
}

impl DesignerApp {
    pub fn new(ctx: &Context, config: EditorConfig) -> Self {
        Self::with_clipboard(ctx, config, Arc::new(SystemClipboard::new(ctx)))
    }

    pub fn with_clipboard(
        ctx: &Context,
        config: EditorConfig,
        clipboard: Arc<dyn ClipboardProvider>,
    ) -> Self {
        let repaint_ctx = ctx.clone();
        let bridge =
            ClipboardBridge::new(clipboard).with_waker(move || repaint_ctx.request_repaint());
        Self {
            doc: DesignerDocument::sample(),
            editor: TextEditor::new(config, bridge),
            measurer: EguiTextMeasurer::new(ctx),
            canvas_origin: None,
        }
    }

    pub fn document(&self) -> &DesignerDocument {
        &self.doc
    }

    pub fn editor(&self) -> &TextEditor {
        &self.editor
    }

    /// Screen position of canvas point (0, 0) in the last frame.
    pub fn canvas_origin(&self) -> Option<Pos2> {
        self.canvas_origin
    }

    pub fn add_text_box(&mut self, now: f64) -> ElementId {
        let offset = 24.0 * (self.doc.elements.len() % 8) as f32;
        let id = self.doc.add_text("New text", 40.0 + offset, 40.0 + offset);
        self.editor.select(&mut self.doc, id, now);
        id
    }

    /// Delete the text box being edited.
    pub fn delete_selected(&mut self) -> Option<ElementId> {
        let id = self.doc.selected()?;
        self.doc.remove(id);
        self.editor.element_removed(&mut self.doc, id);
        log::info!("deleted element {id}");
        Some(id)
    }

    fn toolbar(&mut self, ui: &mut Ui, now: f64) {
        ui.horizontal(|ui| {
            let add = ui.button("Add text");
            if add.clicked() {
                add.surrender_focus();
                self.add_text_box(now);
            }

            let editing = self.editor.editing().is_some();
            let paste = ui.add_enabled(editing, Button::new("Paste"));
            if paste.clicked() {
                paste.surrender_focus();
                self.editor.request_paste();
            }

            let delete = ui.add_enabled(self.doc.selected().is_some(), Button::new("Delete"));
            if delete.clicked() {
                delete.surrender_focus();
                self.delete_selected();
            }

            ui.separator();
            ui.label(self.status());
        });
    }

    fn status(&self) -> String {
        let (Some(id), Some(caret)) = (self.editor.editing(), self.editor.caret()) else {
            return String::from("Click a text box to edit it");
        };
        match caret.selection() {
            Some(sel) => format!("Editing {id}: selection {}..{}", sel.start, sel.end),
            None => format!("Editing {id}: caret at {}", caret.offset),
        }
    }

    fn properties(&mut self, ui: &mut Ui) {
        ui.heading("Properties");
        ui.separator();

        let Some(id) = self.doc.selected() else {
            ui.label("No text box selected.");
            return;
        };
        let Some(before) = self.doc.text_element(id).cloned() else {
            return;
        };
        let mut el = before.clone();

        ui.label("Text");
        ui.add(
            TextEdit::multiline(&mut el.text)
                .id_salt("properties-text")
                .desired_rows(4),
        );

        ui.horizontal(|ui| {
            ui.label("Size");
            ui.add(DragValue::new(&mut el.font_size).range(6.0..=96.0));
            ui.label("Width");
            ui.add(DragValue::new(&mut el.width).range(core_types::MIN_WIDTH..=1200.0));
        });

        ComboBox::from_label("Font")
            .selected_text(el.font_family.clone())
            .show_ui(ui, |ui| {
                for family in FONT_FAMILIES {
                    ui.selectable_value(&mut el.font_family, family.to_owned(), family);
                }
            });

        ComboBox::from_label("Align")
            .selected_text(format!("{:?}", el.text_align))
            .show_ui(ui, |ui| {
                for align in [
                    TextAlign::Left,
                    TextAlign::Center,
                    TextAlign::Right,
                    TextAlign::Justify,
                ] {
                    ui.selectable_value(&mut el.text_align, align, format!("{align:?}"));
                }
            });

        ui.horizontal(|ui| {
            let mut bold = el.font_weight == FontWeight::Bold;
            if ui.checkbox(&mut bold, "Bold").changed() {
                el.font_weight = if bold {
                    FontWeight::Bold
                } else {
                    FontWeight::Normal
                };
            }
            let mut italic = el.font_style == FontStyle::Italic;
            if ui.checkbox(&mut italic, "Italic").changed() {
                el.font_style = if italic {
                    FontStyle::Italic
                } else {
                    FontStyle::Normal
                };
            }
        });

        ui.horizontal(|ui| {
            ui.label("Color");
            let (r, g, b, a) = el.color;
            let mut rgba = [r, g, b, a];
            if ui.color_edit_button_srgba_unmultiplied(&mut rgba).changed() {
                el.color = (rgba[0], rgba[1], rgba[2], rgba[3]);
            }
        });
        ui.add(Slider::new(&mut el.opacity, 0.0..=1.0).text("Opacity"));

        if el != before {
            el.width = clamp_width(el.width);
            self.doc.replace_text(el);
        }
    }

    fn canvas(&mut self, ui: &mut Ui) {
        let (canvas_rect, _resp) =
            ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(canvas_rect);
        painter.rect_filled(canvas_rect, 0.0, Color32::from_gray(225));

        let origin = canvas_rect.min + CANVAS_MARGIN;
        self.canvas_origin = Some(origin);

        let now = ui.input(|i| i.time);
        route_frame_input(FrameInputCtx {
            ui,
            canvas_rect,
            origin,
            host: &mut self.doc,
            measurer: &self.measurer,
            editor: &mut self.editor,
        });

        let pctx = PaintCtx {
            painter: &painter,
            origin,
            measurer: &self.measurer,
        };
        for element in self.doc.elements() {
            match element {
                CanvasElement::Text(t) => paint_element(pctx, t, &self.editor, now),
                CanvasElement::Box(b) => {
                    let (r, g, bl, a) = b.fill;
                    let rect = Rect::from_min_size(
                        origin + Vec2::new(b.x, b.y),
                        Vec2::new(b.width, b.height),
                    );
                    painter.rect_filled(rect, 4.0, Color32::from_rgba_unmultiplied(r, g, bl, a));
                }
            }
        }
    }
}

impl UiApp for DesignerApp {
    fn ui(&mut self, ctx: &Context) {
        let now = ctx.input(|i| i.time);

        TopBottomPanel::top("toolbar").show(ctx, |ui| self.toolbar(ui, now));
        SidePanel::right("properties")
            .default_width(260.0)
            .show(ctx, |ui| self.properties(ui));
        CentralPanel::default()
            .frame(Frame::NONE)
            .show(ctx, |ui| self.canvas(ui));
    }
}
