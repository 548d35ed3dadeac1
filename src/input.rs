use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::direction::Heading::{self, *};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Input {
    Turn(Heading),
    Launch,
    TogglePause,
    Stop,
    Quit,
}

/// Unmapped keys give `None` and are dropped by the caller.
pub fn map_key(ev: &KeyEvent) -> Option<Input> {
    if is_ctrl_c(ev) {
        return Some(Input::Quit);
    }

    let input = match ev.code {
        KeyCode::Char('w') | KeyCode::Up => Input::Turn(Up),
        KeyCode::Char('a') | KeyCode::Left => Input::Turn(Left),
        KeyCode::Char('s') | KeyCode::Down => Input::Turn(Down),
        KeyCode::Char('d') | KeyCode::Right => Input::Turn(Right),
        KeyCode::Enter | KeyCode::Char(' ') => Input::Launch,
        KeyCode::Esc | KeyCode::Char('p') => Input::TogglePause,
        KeyCode::Char('x') => Input::Stop,
        KeyCode::Char('q') => Input::Quit,
        _ => return None,
    };
    Some(input)
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent { code, modifiers: KeyModifiers::NONE }
    }

    #[test]
    fn test_arrows_and_wasd() {
        assert_eq!(map_key(&key(KeyCode::Up)), Some(Input::Turn(Up)));
        assert_eq!(map_key(&key(KeyCode::Char('s'))), Some(Input::Turn(Down)));
        assert_eq!(map_key(&key(KeyCode::Left)), Some(Input::Turn(Left)));
        assert_eq!(map_key(&key(KeyCode::Char('d'))), Some(Input::Turn(Right)));
    }

    #[test]
    fn test_controls() {
        assert_eq!(map_key(&key(KeyCode::Enter)), Some(Input::Launch));
        assert_eq!(map_key(&key(KeyCode::Char(' '))), Some(Input::Launch));
        assert_eq!(map_key(&key(KeyCode::Esc)), Some(Input::TogglePause));
        assert_eq!(map_key(&key(KeyCode::Char('x'))), Some(Input::Stop));
        assert_eq!(map_key(&key(KeyCode::Char('q'))), Some(Input::Quit));
        let ctrl_c = KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL };
        assert_eq!(map_key(&ctrl_c), Some(Input::Quit));
    }

    #[test]
    fn test_unmapped_keys_are_swallowed() {
        assert_eq!(map_key(&key(KeyCode::Char('z'))), None);
        assert_eq!(map_key(&key(KeyCode::Tab)), None);
        assert_eq!(map_key(&key(KeyCode::Char('c'))), None);
    }
}
