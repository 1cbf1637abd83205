//! Key mapping from terminal events to game actions.
//!
//! | Keys | Action |
//! |------|--------|
//! | `←` `h` `a` | move left |
//! | `→` `l` `d` | move right |
//! | `↓` `j` `s` | soft drop |
//! | `↑` `k` `w` | rotate |
//! | space | hard drop |
//! | `c` | hold |
//! | `r` | restart |
//! | `q`, Ctrl-C | quit |
//!
//! Letters match in either case.

use crate::types::GameAction;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What the host should do with a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Quit,
    Action(GameAction),
}

/// Map keyboard input to game actions.
///
/// Control chords never map to an action (Ctrl-C is quit, not hold).
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }
    let code = match key.code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    };
    match code {
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('a') => Some(GameAction::MoveLeft),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('d') => Some(GameAction::MoveRight),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('s') => Some(GameAction::SoftDrop),
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('w') => Some(GameAction::Rotate),

        KeyCode::Char(' ') => Some(GameAction::HardDrop),
        KeyCode::Char('c') => Some(GameAction::Hold),
        KeyCode::Char('r') => Some(GameAction::Restart),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
            && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Full mapping for the host loop. Key releases are ignored; presses and
/// auto-repeats both count.
pub fn map_key(key: KeyEvent) -> Option<KeyCommand> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if should_quit(key) {
        return Some(KeyCommand::Quit);
    }
    handle_key_event(key).map(KeyCommand::Action)
}
