//! Keyboard mapping
//!
//! Vim keys (hjkl), arrow keys and WASD all steer the player; space starts,
//! pauses and resumes; `r` restarts.

use crate::sim::Direction;

/// A player intent decoded from a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    Toggle,
    Restart,
}

/// Map a `KeyboardEvent.key` value to a command
pub fn command_for_key(key: &str) -> Option<Command> {
    let command = match key {
        " " | "Spacebar" => Command::Toggle,
        "ArrowUp" => Command::Move(Direction::Up),
        "ArrowDown" => Command::Move(Direction::Down),
        "ArrowLeft" => Command::Move(Direction::Left),
        "ArrowRight" => Command::Move(Direction::Right),
        _ => match key.to_ascii_lowercase().as_str() {
            "k" | "w" => Command::Move(Direction::Up),
            "j" | "s" => Command::Move(Direction::Down),
            "h" | "a" => Command::Move(Direction::Left),
            "l" | "d" => Command::Move(Direction::Right),
            "r" => Command::Restart,
            _ => return None,
        },
    };
    Some(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vim_keys() {
        assert_eq!(command_for_key("k"), Some(Command::Move(Direction::Up)));
        assert_eq!(command_for_key("j"), Some(Command::Move(Direction::Down)));
        assert_eq!(command_for_key("h"), Some(Command::Move(Direction::Left)));
        assert_eq!(command_for_key("l"), Some(Command::Move(Direction::Right)));
    }

    #[test]
    fn test_arrows_wasd_and_case() {
        assert_eq!(command_for_key("ArrowLeft"), Some(Command::Move(Direction::Left)));
        assert_eq!(command_for_key("W"), Some(Command::Move(Direction::Up)));
        assert_eq!(command_for_key("D"), Some(Command::Move(Direction::Right)));
    }

    #[test]
    fn test_control_keys() {
        assert_eq!(command_for_key(" "), Some(Command::Toggle));
        assert_eq!(command_for_key("R"), Some(Command::Restart));
        assert_eq!(command_for_key("Enter"), None);
        assert_eq!(command_for_key("x"), None);
    }
}
