mod clipboard;
mod editor;
mod host;
mod keymap;
mod route;
mod session;

pub use clipboard::{
    ClipboardBridge, ClipboardError, ClipboardProvider, MemoryClipboard, PasteReply, PasteTicket,
    SystemClipboard,
};
pub use editor::TextEditor;
pub use host::TextElementHost;
pub use keymap::{KeyCommand, command_for_key};
pub use route::{FrameInputCtx, route_frame_input};
pub use session::EditingSession;
