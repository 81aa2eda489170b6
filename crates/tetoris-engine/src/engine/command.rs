use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Discrete inputs accepted by [`GameEngine::apply`](crate::GameEngine::apply).
///
/// Keyboard or timer events are translated into commands by the front end; the engine
/// never sees raw input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Command {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
    HardDrop,
    TogglePause,
    /// Gravity step delivered by the drop scheduler.
    Tick,
    Restart,
}

impl Command {
    pub const ALL: [Self; 8] = [
        Self::MoveLeft,
        Self::MoveRight,
        Self::SoftDrop,
        Self::Rotate,
        Self::HardDrop,
        Self::TogglePause,
        Self::Tick,
        Self::Restart,
    ];

    /// Kebab-case name, as used in scripts and JSON.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::MoveLeft => "move-left",
            Self::MoveRight => "move-right",
            Self::SoftDrop => "soft-drop",
            Self::Rotate => "rotate",
            Self::HardDrop => "hard-drop",
            Self::TogglePause => "toggle-pause",
            Self::Tick => "tick",
            Self::Restart => "restart",
        }
    }

    /// Maps a single key to a command.
    ///
    /// | key            | command       |
    /// |----------------|---------------|
    /// | `<` `h`        | `MoveLeft`    |
    /// | `>` `l`        | `MoveRight`   |
    /// | `v` `j`        | `SoftDrop`    |
    /// | `^` `k`        | `Rotate`      |
    /// | space `_`      | `HardDrop`    |
    /// | `p` `P`        | `TogglePause` |
    /// | `.`            | `Tick`        |
    /// | `r`            | `Restart`     |
    #[must_use]
    pub const fn from_key(key: char) -> Option<Self> {
        let command = match key {
            '<' | 'h' => Self::MoveLeft,
            '>' | 'l' => Self::MoveRight,
            'v' | 'j' => Self::SoftDrop,
            '^' | 'k' => Self::Rotate,
            ' ' | '_' => Self::HardDrop,
            'p' | 'P' => Self::TogglePause,
            '.' => Self::Tick,
            'r' => Self::Restart,
            _ => return None,
        };
        Some(command)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseCommandError {
    #[display("unknown command {name:?}")]
    UnknownCommand { name: String },
    #[display("unknown key {key:?} at position {position}")]
    UnknownKey { key: char, position: usize },
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|command| command.name() == s)
            .ok_or_else(|| ParseCommandError::UnknownCommand { name: s.to_owned() })
    }
}

/// Parses whitespace- or comma-separated command names.
///
/// # Example
///
/// ```
/// use tetoris_engine::{Command, parse_script};
///
/// let commands = parse_script("move-left, rotate hard-drop").unwrap();
/// assert_eq!(commands, [Command::MoveLeft, Command::Rotate, Command::HardDrop]);
/// ```
pub fn parse_script(script: &str) -> Result<Vec<Command>, ParseCommandError> {
    script
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|word| !word.is_empty())
        .map(str::parse)
        .collect()
}

/// Parses a string of single-key commands (see [`Command::from_key`]).
///
/// Line breaks are ignored so key strings can span several lines.
pub fn parse_keys(keys: &str) -> Result<Vec<Command>, ParseCommandError> {
    keys.chars()
        .enumerate()
        .filter(|(_, key)| !matches!(key, '\n' | '\r'))
        .map(|(position, key)| {
            Command::from_key(key).ok_or(ParseCommandError::UnknownKey { key, position })
        })
        .collect()
}
