//! Key mapping from terminal events to game actions.

use crate::types::GameAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to game actions.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('h' | 'H' | 'a' | 'A') => Some(GameAction::MoveLeft),
        KeyCode::Right | KeyCode::Char('l' | 'L' | 'd' | 'D') => Some(GameAction::MoveRight),
        KeyCode::Down | KeyCode::Char('j' | 'J' | 's' | 'S') => Some(GameAction::MoveDown),

        // Rotation
        KeyCode::Up | KeyCode::Char('k' | 'K' | 'w' | 'W' | 'x' | 'X') => Some(GameAction::Rotate),

        // Actions
        KeyCode::Char(' ') => Some(GameAction::HardDrop),
        KeyCode::Char('p' | 'P') | KeyCode::Esc => Some(GameAction::TogglePause),
        KeyCode::Char('r' | 'R') | KeyCode::Enter => Some(GameAction::Start),

        _ => None,
    }
}

/// Actions that may follow terminal auto-repeat.
pub fn is_repeatable(action: GameAction) -> bool {
    matches!(
        action,
        GameAction::MoveLeft | GameAction::MoveRight | GameAction::MoveDown
    )
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
