//! Key mapping from terminal events to engine inputs.

use crossterm::event::KeyCode;
use quadris_engine::Input;

/// Maps a key to an engine input.
///
/// Unmapped keys yield `None` and must never reach the engine: a call to
/// `advance` counts as a turn, so an unrecognized key is not a no-op input,
/// it is no input at all.
pub fn map_key(code: KeyCode) -> Option<Input> {
    match code {
        KeyCode::Left | KeyCode::Char('h') => Some(Input::Left),
        KeyCode::Right | KeyCode::Char('l') => Some(Input::Right),
        KeyCode::Down | KeyCode::Char('j') => Some(Input::Down),
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('z') => Some(Input::Rotate),
        KeyCode::Char(' ') => Some(Input::Drop),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_keys() {
        assert_eq!(map_key(KeyCode::Left), Some(Input::Left));
        assert_eq!(map_key(KeyCode::Right), Some(Input::Right));
        assert_eq!(map_key(KeyCode::Down), Some(Input::Down));
        assert_eq!(map_key(KeyCode::Char('h')), Some(Input::Left));
        assert_eq!(map_key(KeyCode::Char('l')), Some(Input::Right));
        assert_eq!(map_key(KeyCode::Char('j')), Some(Input::Down));
    }

    #[test]
    fn test_rotate_and_drop_keys() {
        assert_eq!(map_key(KeyCode::Up), Some(Input::Rotate));
        assert_eq!(map_key(KeyCode::Char('k')), Some(Input::Rotate));
        assert_eq!(map_key(KeyCode::Char('z')), Some(Input::Rotate));
        assert_eq!(map_key(KeyCode::Char(' ')), Some(Input::Drop));
    }

    #[test]
    fn test_unrecognized_keys_produce_no_input() {
        assert_eq!(map_key(KeyCode::Char('x')), None);
        assert_eq!(map_key(KeyCode::Enter), None);
        assert_eq!(map_key(KeyCode::Esc), None);
        assert_eq!(map_key(KeyCode::Tab), None);
    }
}
