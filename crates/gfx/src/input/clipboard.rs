//! Copy/cut/paste plumbing between the editor and a clipboard backend.
//!
//! Writes are synchronous. Reads are not: [`ClipboardBridge::request_paste`] reads on a worker
//! thread and the result comes back as a [`PasteReply`] on a channel that the router drains
//! once per frame. Platform paste events (egui's `Event::Paste`) are fed into the same channel
//! so both paths share the staleness check.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread;

use core_types::ElementId;
use egui::Context;

#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    #[error("clipboard backend does not support this operation")]
    Unsupported,
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
    #[error("clipboard holds no text")]
    Empty,
}

/// A text clipboard backend. Reads may be called from a worker thread.
pub trait ClipboardProvider: Send + Sync {
    fn read_text(&self) -> Result<String, ClipboardError>;
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// The desktop clipboard: writes go out through egui's platform output, reads through
/// `arboard`.
pub struct SystemClipboard {
    ctx: Context,
}

impl SystemClipboard {
    pub fn new(ctx: &Context) -> Self {
        Self { ctx: ctx.clone() }
    }
}

impl ClipboardProvider for SystemClipboard {
    fn read_text(&self) -> Result<String, ClipboardError> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
        match clipboard.get_text() {
            Ok(text) if text.is_empty() => Err(ClipboardError::Empty),
            Ok(text) => Ok(text),
            Err(arboard::Error::ContentNotAvailable) => Err(ClipboardError::Empty),
            Err(e) => Err(ClipboardError::Unavailable(e.to_string())),
        }
    }

    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        self.ctx.copy_text(text.to_owned());
        Ok(())
    }
}

/// Process-local clipboard, shared between clones.
#[derive(Clone, Default)]
pub struct MemoryClipboard {
    text: Arc<Mutex<Option<String>>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<String> {
        self.text.lock().ok().and_then(|t| t.clone())
    }
}

impl ClipboardProvider for MemoryClipboard {
    fn read_text(&self) -> Result<String, ClipboardError> {
        let guard = self
            .text
            .lock()
            .map_err(|_| ClipboardError::Unavailable("clipboard lock poisoned".into()))?;
        match guard.as_deref() {
            Some(t) if !t.is_empty() => Ok(t.to_owned()),
            _ => Err(ClipboardError::Empty),
        }
    }

    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut guard = self
            .text
            .lock()
            .map_err(|_| ClipboardError::Unavailable("clipboard lock poisoned".into()))?;
        *guard = Some(text.to_owned());
        Ok(())
    }
}

/// Which editing session asked for a paste.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PasteTicket {
    pub element: ElementId,
    pub session: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PasteReply {
    pub ticket: PasteTicket,
    /// Empty when the clipboard could not be read.
    pub text: String,
}

type Waker = Arc<dyn Fn() + Send + Sync>;

pub struct ClipboardBridge {
    provider: Arc<dyn ClipboardProvider>,
    replies_tx: Sender<PasteReply>,
    replies_rx: Receiver<PasteReply>,
    waker: Option<Waker>,
}

impl ClipboardBridge {
    pub fn new(provider: Arc<dyn ClipboardProvider>) -> Self {
        let (replies_tx, replies_rx) = mpsc::channel();
        Self {
            provider,
            replies_tx,
            replies_rx,
            waker: None,
        }
    }

    /// Called from the worker thread after a reply is queued, e.g. to request a repaint.
    pub fn with_waker(mut self, wake: impl Fn() + Send + Sync + 'static) -> Self {
        self.waker = Some(Arc::new(wake));
        self
    }

    pub fn copy(&self, text: &str) {
        if let Err(e) = self.provider.write_text(text) {
            log::warn!("clipboard write failed: {e}");
        }
    }

    /// Same as [`copy`](Self::copy); the caller deletes the selection afterwards.
    pub fn cut(&self, text: &str) {
        self.copy(text);
    }

    /// Read the clipboard off-thread and queue the result for `ticket`.
    pub fn request_paste(&self, ticket: PasteTicket) {
        let provider = Arc::clone(&self.provider);
        let tx = self.replies_tx.clone();
        let waker = self.waker.clone();

        let spawned = thread::Builder::new()
            .name("clipboard-paste".into())
            .spawn(move || {
                let text = read_or_empty(provider.as_ref());
                if tx.send(PasteReply { ticket, text }).is_ok()
                    && let Some(wake) = waker
                {
                    wake();
                }
            });

        if let Err(e) = spawned {
            log::warn!("could not start clipboard reader: {e}");
            self.deliver(ticket, String::new());
        }
    }

    /// Queue text that already arrived from the platform (e.g. an egui paste event).
    pub fn deliver(&self, ticket: PasteTicket, text: String) {
        let _ = self.replies_tx.send(PasteReply { ticket, text });
    }

    /// Everything that has resolved since the last call.
    pub fn drain_replies(&self) -> Vec<PasteReply> {
        self.replies_rx.try_iter().collect()
    }
}

fn read_or_empty(provider: &dyn ClipboardProvider) -> String {
    match provider.read_text() {
        Ok(text) => text,
        Err(ClipboardError::Empty) => {
            log::debug!("paste requested but the clipboard holds no text");
            String::new()
        }
        Err(e) => {
            log::warn!("clipboard read failed: {e}");
            String::new()
        }
    }
}
