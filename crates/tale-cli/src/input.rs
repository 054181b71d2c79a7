//! Input handling - convert typed lines to commands
//!
//! A line is either a command slot (by number or by label) or one of the
//! built-in words:
//!
//! | input            | meaning                          |
//! |------------------|----------------------------------|
//! | `0`..`7`, label  | queue that command slot          |
//! | `attack`, `a`    | start fighting the training dummy|
//! | `move <code>`    | move by raw direction code       |
//! | `status`         | show the character summary       |
//! | `dump`           | print the character as JSON      |
//! | `help`, `?`      | list commands                    |
//! | `quit`, `q`      | leave                            |

use tale_core::action::commands::CommandTable;
use thiserror::Error;

/// One parsed line of player input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Slot(usize),
    Attack,
    Move(i32),
    Status,
    Dump,
    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("nothing entered")]
    Empty,

    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),

    #[error("'{0}' is not a direction code")]
    BadDirection(String),

    #[error("move needs a direction code (1-10)")]
    MissingDirection,
}

/// Parse a line of input. Labels are looked up in `table`.
pub fn parse_input(line: &str, table: &CommandTable) -> Result<Input, InputError> {
    let mut words = line.split_whitespace();
    let Some(word) = words.next() else {
        return Err(InputError::Empty);
    };

    if let Ok(slot) = word.parse::<usize>() {
        return Ok(Input::Slot(slot));
    }

    match word.to_ascii_lowercase().as_str() {
        "attack" | "a" => Ok(Input::Attack),
        "move" | "m" => {
            let code = words.next().ok_or(InputError::MissingDirection)?;
            code.parse::<i32>()
                .map(Input::Move)
                .map_err(|_| InputError::BadDirection(code.to_string()))
        }
        "status" | "st" => Ok(Input::Status),
        "dump" => Ok(Input::Dump),
        "help" | "?" => Ok(Input::Help),
        "quit" | "q" | "exit" => Ok(Input::Quit),
        _ => table
            .slot_for_label(word)
            .map(Input::Slot)
            .ok_or_else(|| InputError::Unknown(word.to_string())),
    }
}

/// Help text listing the built-in words and the bound slots
pub fn help_text(table: &CommandTable) -> String {
    let mut lines = vec!["Commands:".to_string()];
    for (slot, label) in table.labels().into_iter().enumerate() {
        if let Some(label) = label {
            lines.push(format!("  {}  {}", slot, label));
        }
    }
    lines.push("  attack        fight the training dummy".to_string());
    lines.push("  move <code>   move by direction code (1-10)".to_string());
    lines.push("  status        show your character".to_string());
    lines.push("  dump          print your character as JSON".to_string());
    lines.push("  quit          leave the game".to_string());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tale_core::output::MessageLog;

    fn table() -> CommandTable {
        let mut table = CommandTable::new();
        table.install_defaults(&mut MessageLog::new()).unwrap();
        table
    }

    #[test]
    fn test_slot_numbers() {
        let table = table();
        assert_eq!(parse_input("3", &table), Ok(Input::Slot(3)));
        // Range is checked by the engine
        assert_eq!(parse_input("42", &table), Ok(Input::Slot(42)));
    }

    #[test]
    fn test_labels() {
        let table = table();
        assert_eq!(parse_input("north", &table), Ok(Input::Slot(1)));
        assert_eq!(parse_input("  Inventory ", &table), Ok(Input::Slot(7)));
    }

    #[test]
    fn test_words() {
        let table = table();
        assert_eq!(parse_input("attack", &table), Ok(Input::Attack));
        assert_eq!(parse_input("A", &table), Ok(Input::Attack));
        assert_eq!(parse_input("status", &table), Ok(Input::Status));
        assert_eq!(parse_input("dump", &table), Ok(Input::Dump));
        assert_eq!(parse_input("?", &table), Ok(Input::Help));
        assert_eq!(parse_input("q", &table), Ok(Input::Quit));
    }

    #[test]
    fn test_move_codes() {
        let table = table();
        assert_eq!(parse_input("move 9", &table), Ok(Input::Move(9)));
        assert_eq!(parse_input("m 999", &table), Ok(Input::Move(999)));
        assert_eq!(parse_input("move", &table), Err(InputError::MissingDirection));
        assert_eq!(
            parse_input("move up", &table),
            Err(InputError::BadDirection("up".to_string()))
        );
    }

    #[test]
    fn test_errors() {
        let table = table();
        assert_eq!(parse_input("   ", &table), Err(InputError::Empty));
        assert_eq!(
            parse_input("dance", &table),
            Err(InputError::Unknown("dance".to_string()))
        );
        // Labels are unknown until the table is bound
        assert_eq!(
            parse_input("north", &CommandTable::new()),
            Err(InputError::Unknown("north".to_string()))
        );
    }

    #[test]
    fn test_help_lists_labels() {
        let help = help_text(&table());
        assert!(help.contains("  0  Look"));
        assert!(help.contains("  7  Inventory"));
    }
}
