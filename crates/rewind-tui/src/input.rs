use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Mode};
use crate::keymap::{KeyBinding, Keymap};

/// Input action that can be performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    Start,
    Reset,
    NextField,
    PrevField,
    Increase,
    Decrease,
    IncreaseMore,
    DecreaseMore,
    Edit,
    ToggleHelp,
    ExitMode,
    Confirm,
    Cancel,
    InputChar(char),
    Backspace,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App, keymap: &Keymap) -> Action {
    match &app.mode {
        Mode::Editing(_) => return handle_input_mode(key),
        Mode::Help => {
            // Any key exits help, except Ctrl+C which still quits
            if key.code == KeyCode::Char('c') && key.modifiers == KeyModifiers::CONTROL {
                return Action::Quit;
            }
            return Action::ExitMode;
        }
        Mode::Normal => {}
    }

    let binding = KeyBinding::from_event(&key);
    keymap.get(&binding).cloned().unwrap_or(Action::None)
}

/// Handle key events while a field is being typed into
fn handle_input_mode(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,
        (KeyCode::Enter, _) => Action::Confirm,
        (KeyCode::Esc, _) => Action::Cancel,
        (KeyCode::Backspace, _) => Action::Backspace,
        (KeyCode::Char(c), _) => Action::InputChar(c),
        _ => Action::None,
    }
}
