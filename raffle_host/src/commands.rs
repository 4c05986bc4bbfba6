//! Operator commands for interactive sessions.

use std::path::PathBuf;

/// One line typed by the operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Draw,
    Next,
    Add { first_name: String, last_name: String },
    Import(PathBuf),
    Reset,
    Status,
    Help,
    Quit,
}

/// Why a line couldn't be turned into a [`Command`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command '{0}', type 'help' for a list")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),
}

impl Command {
    /// Parse one input line; blank lines yield `None`
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(None);
        };

        let command = match verb.to_lowercase().as_str() {
            "draw" | "d" => Command::Draw,
            "next" | "n" => Command::Next,
            "add" => {
                let (Some(first_name), Some(last_name)) = (words.next(), words.next()) else {
                    return Err(CommandError::Usage("add FIRST LAST"));
                };
                // Remaining words belong to compound last names
                let rest: Vec<&str> = words.collect();
                let last_name = if rest.is_empty() {
                    last_name.to_string()
                } else {
                    format!("{last_name} {}", rest.join(" "))
                };
                Command::Add {
                    first_name: first_name.to_string(),
                    last_name,
                }
            }
            "import" => match words.next() {
                Some(path) => Command::Import(PathBuf::from(path)),
                None => return Err(CommandError::Usage("import PATH")),
            },
            "reset" => Command::Reset,
            "status" | "s" => Command::Status,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };

        Ok(Some(command))
    }
}

pub const INTERACTIVE_HELP: &str = "\
Commands:
  draw                 Spin the reel and reveal a winner
  next                 Remove the shown winner and start the next round
  add FIRST LAST       Register a participant
  import PATH          Import approved participants from a CSV file
  reset                Make every registered participant eligible again
  status               Print the session snapshot as JSON
  help                 Show this list
  quit                 Close the session
";
