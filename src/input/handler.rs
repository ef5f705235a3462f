use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::Direction;

/// What a key press asks the game to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Move(Direction),
    Start,
    Restart,
    Quit,
    None,
}

/// Maps terminal key presses to [`KeyAction`]s. Letter keys ignore case.
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        match key.code {
            KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) => {
                if c.eq_ignore_ascii_case(&'c') {
                    KeyAction::Quit
                } else {
                    KeyAction::None
                }
            }
            KeyCode::Char(c) => Self::char_action(c.to_ascii_lowercase()),
            KeyCode::Up => KeyAction::Move(Direction::Up),
            KeyCode::Down => KeyAction::Move(Direction::Down),
            KeyCode::Left => KeyAction::Move(Direction::Left),
            KeyCode::Right => KeyAction::Move(Direction::Right),
            KeyCode::Enter => KeyAction::Start,
            KeyCode::Esc => KeyAction::Quit,
            _ => KeyAction::None,
        }
    }

    fn char_action(c: char) -> KeyAction {
        match c {
            'w' => KeyAction::Move(Direction::Up),
            's' => KeyAction::Move(Direction::Down),
            'a' => KeyAction::Move(Direction::Left),
            'd' => KeyAction::Move(Direction::Right),
            ' ' => KeyAction::Start,
            'r' => KeyAction::Restart,
            'q' => KeyAction::Quit,
            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
