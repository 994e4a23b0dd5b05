use anyhow::Result;

use crate::console::Console;

/// Menu shown before every choice
pub const MENU: [&str; 5] = [
    "Birthday Dictionary",
    "   P) Print the birthdays",
    "   A) Add a birthday",
    "   U) Update a birthday",
    "   Q) Quit",
];

pub const CHOICE_PROMPT: &str = "Choice: ";

/// A decoded menu choice
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// P: print every birthday
    List,
    /// A: add a person
    Add,
    /// U: change a birthday
    Update,
    /// Q: save and exit
    Quit,
    /// Anything else, kept for logging
    Invalid(String),
}

impl Command {
    /// Decode raw input. Surrounding whitespace and case are ignored.
    pub fn parse(input: &str) -> Self {
        match input.trim().to_lowercase().as_str() {
            "p" => Command::List,
            "a" => Command::Add,
            "u" => Command::Update,
            "q" => Command::Quit,
            _ => Command::Invalid(input.to_string()),
        }
    }
}

/// Show the menu and read the next command. End of input counts as Quit.
pub fn read_command<C: Console>(console: &mut C) -> Result<Command> {
    for line in MENU {
        console.println(line)?;
    }

    Ok(match console.prompt(CHOICE_PROMPT)? {
        Some(input) => Command::parse(&input),
        None => Command::Quit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::IoConsole;
    use std::io::Cursor;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("p"), Command::List);
        assert_eq!(Command::parse(" A "), Command::Add);
        assert_eq!(Command::parse("U\n"), Command::Update);
        assert_eq!(Command::parse("Q"), Command::Quit);
        assert_eq!(Command::parse("x"), Command::Invalid("x".to_string()));
        assert_eq!(Command::parse("print"), Command::Invalid("print".to_string()));
        assert_eq!(Command::parse(""), Command::Invalid(String::new()));
    }

    #[test]
    fn test_read_command_shows_menu() {
        let mut console = IoConsole::new(Cursor::new("a\n"), Vec::new());

        assert_eq!(read_command(&mut console).unwrap(), Command::Add);

        let output = String::from_utf8_lossy(console.output()).to_string();
        assert!(output.starts_with("Birthday Dictionary\n   P) Print the birthdays\n"));
        assert!(output.ends_with("   Q) Quit\nChoice: "));
    }

    #[test]
    fn test_read_command_eof_quits() {
        let mut console = IoConsole::new(Cursor::new(""), Vec::new());
        assert_eq!(read_command(&mut console).unwrap(), Command::Quit);
    }
}
