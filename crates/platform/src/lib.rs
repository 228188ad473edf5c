//! Desktop shell: winit event loop, the wgpu/egui renderer, and the designer canvas.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use egui::Context as EguiContext;
use gfx::{Renderer, RendererError};
use thiserror::Error;
use winit::{
    application::ApplicationHandler,
    error::EventLoopError,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop, EventLoopProxy},
    window::{Window, WindowId},
};

pub mod config;
mod designer;

pub use config::{ConfigError, load_from_path};
pub use designer::{BoxElement, CanvasElement, DesignerApp, DesignerDocument};

/// Something that builds an egui UI once per frame.
pub trait UiApp {
    fn ui(&mut self, ctx: &EguiContext);
}

type AppFactory = Box<dyn FnOnce(&EguiContext) -> Box<dyn UiApp>>;

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error(transparent)]
    EventLoop(#[from] EventLoopError),
    #[error(transparent)]
    Renderer(#[from] RendererError),
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
}

enum UserEvent {
    /// egui asked for a repaint after the given delay.
    Repaint(Duration),
}

/// Open a window and drive `make_app`'s UI until the window closes.
///
/// `make_app` runs once the egui context exists, on the first `resumed`.
pub fn run<F>(title: &str, make_app: F) -> Result<(), PlatformError>
where
    F: FnOnce(&EguiContext) -> Box<dyn UiApp> + 'static,
{
    let event_loop = EventLoop::<UserEvent>::with_user_event().build()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = PlatformApp {
        title: title.to_owned(),
        proxy: event_loop.create_proxy(),
        make_app: Some(Box::new(make_app)),
        window: None,
        renderer: None,
        ui_app: None,
        next_repaint: None,
        fatal: None,
    };
    event_loop.run_app(&mut app)?;

    match app.fatal.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

struct PlatformApp {
    title: String,
    proxy: EventLoopProxy<UserEvent>,
    make_app: Option<AppFactory>,
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    ui_app: Option<Box<dyn UiApp>>,
    next_repaint: Option<Instant>,
    fatal: Option<PlatformError>,
}

impl PlatformApp {
    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), PlatformError> {
        let window = match &self.window {
            Some(window) => window.clone(),
            None => {
                let window = Arc::new(event_loop.create_window(
                    Window::default_attributes().with_title(self.title.as_str()),
                )?);
                self.window = Some(window.clone());
                window
            }
        };

        if self.renderer.is_none() {
            let renderer = Renderer::new(window.clone())?;

            // egui may ask for repaints from other threads (clipboard worker).
            let proxy = Mutex::new(self.proxy.clone());
            renderer.context().set_request_repaint_callback(move |info| {
                if let Ok(proxy) = proxy.lock() {
                    let _ = proxy.send_event(UserEvent::Repaint(info.delay));
                }
            });

            if let Some(make_app) = self.make_app.take() {
                self.ui_app = Some(make_app(renderer.context()));
            }
            self.renderer = Some(renderer);
        }

        window.request_redraw();
        Ok(())
    }

    fn schedule_repaint(&mut self, delay: Duration) {
        let Some(window) = self.window.as_ref() else {
            return;
        };
        if delay.is_zero() {
            window.request_redraw();
            return;
        }
        if let Some(at) = Instant::now().checked_add(delay) {
            self.next_repaint = Some(self.next_repaint.map_or(at, |cur| cur.min(at)));
        }
    }
}

impl ApplicationHandler<UserEvent> for PlatformApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if let Err(err) = self.init(event_loop) {
            log::error!("start-up failed: {err}");
            self.fatal = Some(err);
            event_loop.exit();
        }
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: UserEvent) {
        match event {
            UserEvent::Repaint(delay) => self.schedule_repaint(delay),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        match self.next_repaint {
            Some(at) if at <= Instant::now() => {
                self.next_repaint = None;
                if let Some(window) = self.window.as_ref() {
                    window.request_redraw();
                }
                event_loop.set_control_flow(ControlFlow::Wait);
            }
            Some(at) => event_loop.set_control_flow(ControlFlow::WaitUntil(at)),
            None => event_loop.set_control_flow(ControlFlow::Wait),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let (Some(window), Some(renderer)) = (self.window.clone(), self.renderer.as_mut()) else {
            return;
        };

        if renderer.on_window_event(&window, &event) {
            window.request_redraw();
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(new_size) => {
                renderer.resize(new_size);
                window.request_redraw();
            }
            WindowEvent::RedrawRequested => {
                let Some(ui_app) = self.ui_app.as_mut() else {
                    return;
                };
                renderer.render(&window, |ctx| ui_app.ui(ctx));
            }
            _ => {}
        }
    }
}
