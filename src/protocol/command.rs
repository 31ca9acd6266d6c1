//! Command definitions
//!
//! Represents commands from clients.

use std::fmt;
use std::str::FromStr;

/// Command names as they appear on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandType {
    Random,
    Top,
    Worst,
    Platform,
    Platforms,
    Search,
}

impl CommandType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandType::Random => "random",
            CommandType::Top => "top",
            CommandType::Worst => "worst",
            CommandType::Platform => "platform",
            CommandType::Platforms => "platforms",
            CommandType::Search => "search",
        }
    }
}

impl FromStr for CommandType {
    type Err = ();

    /// Case-sensitive lookup
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "random" => Ok(CommandType::Random),
            "top" => Ok(CommandType::Top),
            "worst" => Ok(CommandType::Worst),
            "platform" => Ok(CommandType::Platform),
            "platforms" => Ok(CommandType::Platforms),
            "search" => Ok(CommandType::Search),
            _ => Err(()),
        }
    }
}

/// A parsed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Sample `count` games with replacement
    Random { count: i32 },

    /// Best `count` ranked games
    Top { count: i32 },

    /// Worst `count` ranked games
    Worst { count: i32 },

    /// Set the platform filter (`null` clears it)
    Platform { name: String },

    /// List distinct platforms
    Platforms,

    /// Case-insensitive title substring search
    Search { title: String },
}

impl Command {
    /// Get the command type
    pub fn command_type(&self) -> CommandType {
        match self {
            Command::Random { .. } => CommandType::Random,
            Command::Top { .. } => CommandType::Top,
            Command::Worst { .. } => CommandType::Worst,
            Command::Platform { .. } => CommandType::Platform,
            Command::Platforms => CommandType::Platforms,
            Command::Search { .. } => CommandType::Search,
        }
    }
}

/// Renders the request line that parses back to this command
impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.command_type().as_str();
        match self {
            Command::Random { count } | Command::Top { count } | Command::Worst { count } => {
                write!(f, "{} {}", name, count)
            }
            Command::Platform { name: platform } => write!(f, "{} {}", name, platform),
            Command::Platforms => f.write_str(name),
            Command::Search { title } => write!(f, "{} {}", name, title),
        }
    }
}
