use egui::{Event, EventFilter, PointerButton, Pos2, Rect, Sense, Ui};
use layout::TextMeasurer;

use super::editor::TextEditor;
use super::host::TextElementHost;
use super::keymap::{KeyCommand, command_for_key};

pub struct FrameInputCtx<'a, H: TextElementHost + ?Sized> {
    pub ui: &'a mut Ui,
    /// Screen rect of the canvas; presses outside it are ignored.
    pub canvas_rect: Rect,
    /// Screen position of canvas point (0, 0).
    pub origin: Pos2,
    pub host: &'a mut H,
    pub measurer: &'a dyn TextMeasurer,
    pub editor: &'a mut TextEditor,
}

/// Feed one frame of egui input to the editor.
///
/// Pointer presses on the canvas drive selection and focus. While an element is being edited
/// and the canvas owns keyboard focus, text/key/clipboard events are taken out of the frame's
/// input and dispatched to the editor. Returns whether editor or element state changed.
pub fn route_frame_input<H: TextElementHost + ?Sized>(ctx: FrameInputCtx<'_, H>) -> bool {
    let FrameInputCtx {
        ui,
        canvas_rect,
        origin,
        host,
        measurer,
        editor,
    } = ctx;

    let now = ui.input(|i| i.time);
    let to_canvas = |p: Pos2| (p.x - origin.x, p.y - origin.y);
    let mut changed = false;

    // --- pointer
    let pointer_events: Vec<Event> = ui.input(|i| {
        i.events
            .iter()
            .filter(|e| {
                matches!(
                    e,
                    Event::PointerMoved(_)
                        | Event::PointerButton {
                            button: PointerButton::Primary,
                            ..
                        }
                )
            })
            .cloned()
            .collect()
    });

    // Popups and windows floating over the canvas own the presses that land on them.
    let canvas_layer = ui.layer_id();
    let egui_ctx = ui.ctx().clone();
    let on_canvas = |pos: Pos2| {
        canvas_rect.contains(pos)
            && egui_ctx
                .layer_id_at(pos)
                .is_none_or(|layer| layer == canvas_layer)
    };

    let mut pressed_on_canvas = false;
    for evt in pointer_events {
        match evt {
            Event::PointerButton {
                pos,
                pressed: true,
                modifiers,
                ..
            } => {
                // Presses outside the canvas (panels, toolbars, popups) leave editing alone.
                if on_canvas(pos) {
                    editor.pointer_down(host, measurer, to_canvas(pos), modifiers.shift, now);
                    pressed_on_canvas = true;
                    changed = true;
                }
            }
            Event::PointerButton {
                pos,
                pressed: false,
                ..
            } => {
                let point = on_canvas(pos).then(|| to_canvas(pos));
                editor.pointer_up(host, measurer, point, now);
            }
            Event::PointerMoved(pos) => {
                if editor.session().is_some_and(|s| s.is_dragging()) {
                    editor.pointer_moved(host, measurer, to_canvas(pos), now);
                    changed = true;
                }
            }
            _ => {}
        }
    }

    // --- keep an egui focus target alive for the edited element (MUST be before key handling)
    if let Some(editing) = editor.editing() {
        let egui_focus_id = ui.make_persistent_id(("canvas-text", editing));
        ui.interact(canvas_rect, egui_focus_id, Sense::focusable_noninteractive());

        // Take focus on a canvas press, or when nothing else holds it. A form field that owns
        // focus keeps it until the canvas is clicked again.
        ui.memory_mut(|mem| {
            if pressed_on_canvas || mem.focused().is_none() {
                mem.request_focus(egui_focus_id);
            }
            if mem.has_focus(egui_focus_id) {
                mem.set_focus_lock_filter(
                    egui_focus_id,
                    EventFilter {
                        tab: true,
                        horizontal_arrows: true,
                        vertical_arrows: true,
                        escape: true,
                    },
                );
            }
        });

        if ui.memory(|mem| mem.has_focus(egui_focus_id)) {
            let events = ui.input_mut(|i| {
                let mut taken = Vec::new();
                i.events.retain(|evt| {
                    if is_editor_event(evt) {
                        taken.push(evt.clone());
                        false
                    } else {
                        true
                    }
                });
                taken
            });

            // egui-winit reports Ctrl+C/X/V both as a clipboard event and as a key press.
            let has_event = |want: fn(&Event) -> bool| events.iter().any(want);
            let platform_copy = has_event(|e| matches!(e, Event::Copy));
            let platform_cut = has_event(|e| matches!(e, Event::Cut));
            let platform_paste = has_event(|e| matches!(e, Event::Paste(_)));

            for evt in events {
                match evt {
                    Event::Text(text) => changed |= editor.insert_text(host, &text, now),
                    Event::Copy => editor.copy(host),
                    Event::Cut => changed |= editor.cut(host, now),
                    Event::Paste(text) => editor.paste_delivered(text),
                    Event::Key { key, modifiers, .. } => {
                        let Some(command) = command_for_key(key, modifiers) else {
                            continue;
                        };
                        let duplicate = match command {
                            KeyCommand::Copy => platform_copy,
                            KeyCommand::Cut => platform_cut,
                            KeyCommand::Paste => platform_paste,
                            _ => false,
                        };
                        if duplicate {
                            continue;
                        }
                        log::trace!("key {key:?} -> {command:?}");
                        changed |= editor.handle_command(host, command, now);
                    }
                    _ => {}
                }
            }
        }
    }

    changed |= editor.resolve_pastes(host, now);

    if changed {
        ui.ctx().request_repaint();
    }
    if let Some(wait) = editor.until_next_blink(now) {
        ui.ctx().request_repaint_after(wait);
    }
    changed
}

fn is_editor_event(evt: &Event) -> bool {
    match evt {
        Event::Text(_) | Event::Copy | Event::Cut | Event::Paste(_) => true,
        Event::Key {
            key,
            pressed: true,
            modifiers,
            ..
        } => command_for_key(*key, *modifiers).is_some(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EditorConfig;
    use crate::input::clipboard::{ClipboardBridge, MemoryClipboard};
    use caret_core::{CaretState, SelectionRange};
    use core_types::{ElementId, TextElement};
    use egui::{Area, CentralPanel, Context, Id, Key, Modifiers, Order, RawInput, Vec2};
    use layout::{FixedAdvance, text_bounds};
    use std::cell::RefCell;
    use std::sync::Arc;

    struct Canvas {
        elements: Vec<TextElement>,
    }

    impl TextElementHost for Canvas {
        fn text_element(&self, id: ElementId) -> Option<&TextElement> {
            self.elements.iter().find(|e| e.id == id)
        }

        fn text_element_at(
            &self,
            point: (f32, f32),
            measurer: &dyn TextMeasurer,
        ) -> Option<ElementId> {
            self.elements
                .iter()
                .rev()
                .find(|e| text_bounds(e, measurer).contains(point))
                .map(|e| e.id)
        }

        fn on_change(&mut self, updated: TextElement) {
            if let Some(slot) = self.elements.iter_mut().find(|e| e.id == updated.id) {
                *slot = updated;
            }
        }
    }

    const CANVAS: Vec2 = Vec2::new(400.0, 300.0);
    const M: FixedAdvance = FixedAdvance(10.0);

    fn canvas(text: &str) -> Canvas {
        Canvas {
            elements: vec![
                TextElement::new(ElementId::from_raw(1), text)
                    .at(20.0, 20.0)
                    .with_width(200.0)
                    .with_font("test", 10.0),
            ],
        }
    }

    fn editor() -> (TextEditor, MemoryClipboard) {
        let mem = MemoryClipboard::new();
        let bridge = ClipboardBridge::new(Arc::new(mem.clone()));
        (TextEditor::new(EditorConfig::default(), bridge), mem)
    }

    fn raw_input(time: f64, events: Vec<Event>) -> RawInput {
        RawInput {
            events,
            time: Some(time),
            screen_rect: Some(Rect::from_min_size(Pos2::ZERO, Vec2::new(800.0, 600.0))),
            ..Default::default()
        }
    }

    fn canvas_origin(ctx: &Context) -> Pos2 {
        let origin = RefCell::new(None);
        let _ = ctx.run(raw_input(0.0, Vec::new()), |ctx| {
            CentralPanel::default().show(ctx, |ui| {
                let (rect, _resp) = ui.allocate_exact_size(CANVAS, Sense::hover());
                *origin.borrow_mut() = Some(rect.min);
            });
        });
        origin.into_inner().unwrap()
    }

    struct Frame {
        changed: bool,
        /// Events still in the input after routing.
        left_over: usize,
    }

    fn run_frame(
        ctx: &Context,
        input: RawInput,
        host: &mut Canvas,
        editor: &mut TextEditor,
        form_field_focused: bool,
    ) -> Frame {
        let out = RefCell::new(None);
        let _ = ctx.run(input, |ctx| {
            CentralPanel::default().show(ctx, |ui| {
                let (canvas_rect, _resp) = ui.allocate_exact_size(CANVAS, Sense::click_and_drag());

                if form_field_focused {
                    let field = ui.make_persistent_id("form-field");
                    ui.interact(
                        Rect::from_min_size(Pos2::ZERO, Vec2::splat(5.0)),
                        field,
                        Sense::focusable_noninteractive(),
                    );
                    ui.memory_mut(|m| m.request_focus(field));
                }

                let changed = route_frame_input(FrameInputCtx {
                    ui: &mut *ui,
                    canvas_rect,
                    origin: canvas_rect.min,
                    host: &mut *host,
                    measurer: &M,
                    editor: &mut *editor,
                });
                let left_over = ui.input(|i| i.events.len());
                *out.borrow_mut() = Some(Frame { changed, left_over });
            });
        });
        out.into_inner().unwrap()
    }

    /// A frame with a foreground popup covering `popup` .. `popup + (120, 60)`.
    fn run_frame_with_popup(
        ctx: &Context,
        input: RawInput,
        host: &mut Canvas,
        editor: &mut TextEditor,
        popup: Pos2,
    ) {
        let _ = ctx.run(input, |ctx| {
            CentralPanel::default().show(ctx, |ui| {
                let (canvas_rect, _resp) = ui.allocate_exact_size(CANVAS, Sense::click_and_drag());
                route_frame_input(FrameInputCtx {
                    ui: &mut *ui,
                    canvas_rect,
                    origin: canvas_rect.min,
                    host: &mut *host,
                    measurer: &M,
                    editor: &mut *editor,
                });
            });
            Area::new(Id::new("popup"))
                .order(Order::Foreground)
                .fixed_pos(popup)
                .show(ctx, |ui| {
                    let _ = ui.allocate_exact_size(Vec2::new(120.0, 60.0), Sense::click());
                });
        });
    }

    fn press(pos: Pos2, modifiers: Modifiers) -> Event {
        Event::PointerButton {
            pos,
            button: PointerButton::Primary,
            pressed: true,
            modifiers,
        }
    }

    fn release(pos: Pos2) -> Event {
        Event::PointerButton {
            pos,
            button: PointerButton::Primary,
            pressed: false,
            modifiers: Modifiers::NONE,
        }
    }

    fn key(key: Key, modifiers: Modifiers) -> Event {
        Event::Key {
            key,
            physical_key: None,
            pressed: true,
            repeat: false,
            modifiers,
        }
    }

    fn click_at(pos: Pos2) -> Vec<Event> {
        vec![Event::PointerMoved(pos), press(pos, Modifiers::NONE), release(pos)]
    }

    #[test]
    fn click_focuses_and_typing_edits_element() {
        let ctx = Context::default();
        let origin = canvas_origin(&ctx);
        let mut host = canvas("Hello\nWorld");
        let (mut ed, _) = editor();

        // Start of the second line: canvas (20, 20 + pitch + 2).
        let p = origin + Vec2::new(20.0, 20.0 + 12.0 + 2.0);
        let frame = run_frame(&ctx, raw_input(1.0, click_at(p)), &mut host, &mut ed, false);
        assert!(frame.changed);
        assert_eq!(ed.caret(), Some(CaretState::at(6)));
        assert!(ctx.memory(|m| m.focused().is_some()));

        let frame = run_frame(
            &ctx,
            raw_input(1.5, vec![Event::Text("X".into()), key(Key::End, Modifiers::NONE)]),
            &mut host,
            &mut ed,
            false,
        );
        assert!(frame.changed);
        assert_eq!(frame.left_over, 0);
        assert_eq!(host.elements[0].text, "Hello\nXWorld");
        assert_eq!(ed.caret(), Some(CaretState::at(12)));
    }

    #[test]
    fn double_click_in_one_frame_selects_word() {
        let ctx = Context::default();
        let origin = canvas_origin(&ctx);
        let mut host = canvas("hello world");
        let (mut ed, _) = editor();

        let p = origin + Vec2::new(20.0 + 22.0, 25.0);
        let mut events = click_at(p);
        events.extend(click_at(p));
        run_frame(&ctx, raw_input(1.0, events), &mut host, &mut ed, false);

        assert_eq!(
            ed.caret().unwrap().selection(),
            Some(SelectionRange::new(0, 5))
        );
    }

    #[test]
    fn drag_across_frames_selects_range() {
        let ctx = Context::default();
        let origin = canvas_origin(&ctx);
        let mut host = canvas("hello world");
        let (mut ed, _) = editor();

        let start = origin + Vec2::new(20.0 + 10.0, 25.0);
        let end = origin + Vec2::new(20.0 + 52.0, 25.0);
        run_frame(
            &ctx,
            raw_input(1.0, vec![Event::PointerMoved(start), press(start, Modifiers::NONE)]),
            &mut host,
            &mut ed,
            false,
        );
        run_frame(
            &ctx,
            raw_input(1.05, vec![Event::PointerMoved(end)]),
            &mut host,
            &mut ed,
            false,
        );
        run_frame(&ctx, raw_input(1.1, vec![release(end)]), &mut host, &mut ed, false);

        assert_eq!(ed.caret(), Some(CaretState::selecting(1, 5)));
    }

    #[test]
    fn form_field_focus_blocks_key_dispatch() {
        let ctx = Context::default();
        let origin = canvas_origin(&ctx);
        let mut host = canvas("abc");
        let (mut ed, _) = editor();

        let p = origin + Vec2::new(25.0, 25.0);
        run_frame(&ctx, raw_input(1.0, click_at(p)), &mut host, &mut ed, false);
        assert!(ed.editing().is_some());

        let frame = run_frame(
            &ctx,
            raw_input(1.2, vec![Event::Text("zz".into())]),
            &mut host,
            &mut ed,
            true,
        );
        assert_eq!(host.elements[0].text, "abc");
        assert_eq!(frame.left_over, 1);
        assert!(ed.editing().is_some());
    }

    #[test]
    fn clipboard_events_route_through_bridge() {
        let ctx = Context::default();
        let origin = canvas_origin(&ctx);
        let mut host = canvas("copy me");
        let (mut ed, mem) = editor();

        let p = origin + Vec2::new(25.0, 25.0);
        run_frame(&ctx, raw_input(1.0, click_at(p)), &mut host, &mut ed, false);

        run_frame(
            &ctx,
            raw_input(1.5, vec![key(Key::A, Modifiers::COMMAND), Event::Copy]),
            &mut host,
            &mut ed,
            false,
        );
        assert_eq!(mem.contents().as_deref(), Some("copy me"));

        run_frame(
            &ctx,
            raw_input(2.0, vec![Event::Paste("pasted".into())]),
            &mut host,
            &mut ed,
            false,
        );
        assert_eq!(host.elements[0].text, "pasted");

        run_frame(
            &ctx,
            raw_input(2.5, vec![key(Key::A, Modifiers::COMMAND), Event::Cut]),
            &mut host,
            &mut ed,
            false,
        );
        assert_eq!(mem.contents().as_deref(), Some("pasted"));
        assert_eq!(host.elements[0].text, "");
    }

    #[test]
    fn platform_paste_and_shortcut_paste_once() {
        let ctx = Context::default();
        let origin = canvas_origin(&ctx);
        let mut host = canvas("");
        let (mut ed, mem) = editor();
        crate::input::ClipboardProvider::write_text(&mem, "stale").unwrap();

        let p = origin + Vec2::new(25.0, 25.0);
        run_frame(&ctx, raw_input(1.0, click_at(p)), &mut host, &mut ed, false);
        run_frame(
            &ctx,
            raw_input(
                1.5,
                vec![Event::Paste("evt".into()), key(Key::V, Modifiers::COMMAND)],
            ),
            &mut host,
            &mut ed,
            false,
        );
        assert_eq!(host.elements[0].text, "evt");

        // No worker read was started, so nothing else shows up later.
        std::thread::sleep(std::time::Duration::from_millis(50));
        run_frame(&ctx, raw_input(2.0, Vec::new()), &mut host, &mut ed, false);
        assert_eq!(host.elements[0].text, "evt");
    }

    #[test]
    fn press_on_popup_over_canvas_keeps_editing() {
        let ctx = Context::default();
        let origin = canvas_origin(&ctx);
        let mut host = canvas("abc");
        let (mut ed, _) = editor();
        let popup = origin + Vec2::new(200.0, 150.0);
        let under_popup = popup + Vec2::new(10.0, 10.0);

        let text = click_at(origin + Vec2::new(25.0, 25.0));
        run_frame_with_popup(&ctx, raw_input(1.0, text), &mut host, &mut ed, popup);
        run_frame_with_popup(&ctx, raw_input(1.1, Vec::new()), &mut host, &mut ed, popup);
        assert_eq!(ed.editing(), Some(ElementId::from_raw(1)));

        let press = click_at(under_popup);
        run_frame_with_popup(&ctx, raw_input(2.0, press), &mut host, &mut ed, popup);
        assert_eq!(ed.editing(), Some(ElementId::from_raw(1)));

        // Once the popup is gone the same spot is empty canvas.
        run_frame(&ctx, raw_input(2.5, Vec::new()), &mut host, &mut ed, false);
        run_frame(&ctx, raw_input(3.0, click_at(under_popup)), &mut host, &mut ed, false);
        assert_eq!(ed.editing(), None);
    }

    #[test]
    fn click_on_empty_canvas_ends_editing() {
        let ctx = Context::default();
        let origin = canvas_origin(&ctx);
        let mut host = canvas("abc");
        let (mut ed, _) = editor();

        run_frame(
            &ctx,
            raw_input(1.0, click_at(origin + Vec2::new(25.0, 25.0))),
            &mut host,
            &mut ed,
            false,
        );
        run_frame(
            &ctx,
            raw_input(2.0, click_at(origin + Vec2::new(300.0, 250.0))),
            &mut host,
            &mut ed,
            false,
        );
        assert_eq!(ed.editing(), None);
    }

    #[test]
    fn press_outside_canvas_keeps_editing() {
        let ctx = Context::default();
        let origin = canvas_origin(&ctx);
        let mut host = canvas("abc");
        let (mut ed, _) = editor();

        run_frame(
            &ctx,
            raw_input(1.0, click_at(origin + Vec2::new(25.0, 25.0))),
            &mut host,
            &mut ed,
            false,
        );
        run_frame(
            &ctx,
            raw_input(2.0, click_at(origin + Vec2::new(CANVAS.x + 50.0, 10.0))),
            &mut host,
            &mut ed,
            false,
        );
        assert_eq!(ed.editing(), Some(ElementId::from_raw(1)));
    }

    #[test]
    fn escape_exits_and_later_keys_are_left_alone() {
        let ctx = Context::default();
        let origin = canvas_origin(&ctx);
        let mut host = canvas("abc");
        let (mut ed, _) = editor();

        run_frame(
            &ctx,
            raw_input(1.0, click_at(origin + Vec2::new(25.0, 25.0))),
            &mut host,
            &mut ed,
            false,
        );
        run_frame(
            &ctx,
            raw_input(1.5, vec![key(Key::Escape, Modifiers::NONE)]),
            &mut host,
            &mut ed,
            false,
        );
        assert_eq!(ed.editing(), None);

        let frame = run_frame(
            &ctx,
            raw_input(2.0, vec![Event::Text("q".into())]),
            &mut host,
            &mut ed,
            false,
        );
        assert_eq!(frame.left_over, 1);
        assert_eq!(host.elements[0].text, "abc");
    }
}
