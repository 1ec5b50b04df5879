use blockfall_engine::Command;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::ui::widgets::KeyBinding;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Game(Command),
    Quit,
}

pub const KEY_BINDINGS: &[KeyBinding] = &[
    (&["←", "→"], "Move"),
    (&["↓"], "Soft Drop"),
    (&["↑"], "Rotate"),
    (&["Space"], "Hard Drop"),
    (&["P"], "Pause"),
    (&["B"], "Random Blocks"),
    (&["R"], "Restart"),
    (&["Q"], "Quit"),
];

pub fn action_for_key(key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return (key.code == KeyCode::Char('c')).then_some(Action::Quit);
    }
    let command = match key.code {
        KeyCode::Left => Command::MoveLeft,
        KeyCode::Right => Command::MoveRight,
        KeyCode::Down => Command::SoftDrop,
        KeyCode::Up => Command::RotateClockwise,
        KeyCode::Char(' ') => Command::HardDrop,
        KeyCode::Esc => return Some(Action::Quit),
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'p' => Command::TogglePause,
            'b' => Command::ToggleRandomBlocks,
            'r' => Command::Restart,
            'q' => return Some(Action::Quit),
            _ => return None,
        },
        _ => return None,
    };
    Some(Action::Game(command))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_arrow_and_space_keys() {
        assert_eq!(
            action_for_key(key(KeyCode::Left)),
            Some(Action::Game(Command::MoveLeft))
        );
        assert_eq!(
            action_for_key(key(KeyCode::Up)),
            Some(Action::Game(Command::RotateClockwise))
        );
        assert_eq!(
            action_for_key(key(KeyCode::Char(' '))),
            Some(Action::Game(Command::HardDrop))
        );
    }

    #[test]
    fn test_letter_keys_ignore_case() {
        for c in ['p', 'P'] {
            assert_eq!(
                action_for_key(key(KeyCode::Char(c))),
                Some(Action::Game(Command::TogglePause))
            );
        }
        assert_eq!(
            action_for_key(KeyEvent::new(KeyCode::Char('B'), KeyModifiers::SHIFT)),
            Some(Action::Game(Command::ToggleRandomBlocks))
        );
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(action_for_key(key(KeyCode::Char('q'))), Some(Action::Quit));
        assert_eq!(action_for_key(key(KeyCode::Esc)), Some(Action::Quit));
        assert_eq!(
            action_for_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        );
    }

    #[test]
    fn test_unbound_keys() {
        assert_eq!(action_for_key(key(KeyCode::Char('x'))), None);
        assert_eq!(action_for_key(key(KeyCode::Enter)), None);
        assert_eq!(
            action_for_key(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL)),
            None
        );
    }
}
