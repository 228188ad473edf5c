use caret_core::EditAction;
use egui::{Key, Modifiers};

/// What a key press asks the editor to do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyCommand {
    Edit(EditAction),
    Copy,
    Cut,
    Paste,
    /// Leave editing mode.
    Exit,
}

/// Map a pressed key to an editor command. Printable characters arrive as `Event::Text` and
/// are not handled here.
pub fn command_for_key(key: Key, modifiers: Modifiers) -> Option<KeyCommand> {
    use EditAction::*;

    let extend = modifiers.shift;
    // Ctrl on Windows/Linux, Cmd on macOS.
    let jump = modifiers.command || modifiers.ctrl;

    let edit = match key {
        Key::ArrowLeft => MoveLeft { extend, word: jump },
        Key::ArrowRight => MoveRight { extend, word: jump },
        Key::ArrowUp if jump => MoveHome { extend },
        Key::ArrowUp => MoveUp { extend },
        Key::ArrowDown if jump => MoveEnd { extend },
        Key::ArrowDown => MoveDown { extend },
        Key::Home if jump => MoveTextStart { extend },
        Key::Home => MoveHome { extend },
        Key::End if jump => MoveTextEnd { extend },
        Key::End => MoveEnd { extend },
        Key::Backspace => DeleteBackward,
        Key::Delete => DeleteForward,
        Key::Enter => InsertText("\n".to_owned()),
        Key::A if jump => SelectAll,
        Key::C if jump => return Some(KeyCommand::Copy),
        Key::X if jump => return Some(KeyCommand::Cut),
        Key::V if jump => return Some(KeyCommand::Paste),
        Key::Escape => return Some(KeyCommand::Exit),
        _ => return None,
    };
    Some(KeyCommand::Edit(edit))
}
