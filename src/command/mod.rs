//! Chat command recognition
//!
//! Turns a raw chat message into a typed [`Command`]. Recognition is pure;
//! acting on the command is up to the bot.

mod grammar;

pub use grammar::{recognize, recognize_roll};

use crate::roll::ParsedRoll;
use crate::stats::StatName;

/// A recognized chat command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `!ping`
    Ping,
    /// `!help`
    Help,
    /// `!version [history]`
    Version { history: bool },
    /// `!roll ...`
    Roll(ParsedRoll),
    /// `!stat <name> <value>`
    Stat(StatAssignment),
    /// `!macro <name> [<body>]`
    Macro(MacroCommand),
}

/// Record a value on the player's sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatAssignment {
    pub stat: StatName,
    pub value: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MacroCommand {
    /// Store `body` under `name`
    Define { name: String, body: String },
    /// Expand and roll a stored macro
    Invoke { name: String },
}
