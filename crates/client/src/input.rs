//! Stdin command parsing.

/// A line typed by the player.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Anything that is not a keyword is treated as a spell name; the
    /// runtime decides whether it names a real spell.
    Cast(String),
    Reset,
    Status,
    Help,
    Quit,
}

impl Command {
    /// Parse one input line; `None` for blank lines.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        Some(match line.to_ascii_lowercase().as_str() {
            "reset" | "restart" => Self::Reset,
            "status" | "s" => Self::Status,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            _ => Self::Cast(line.to_owned()),
        })
    }
}

pub const HELP: &str = "commands: <spell> (fireball, zap, poison, heal), status, reset, help, quit";
