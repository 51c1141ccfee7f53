//! User-facing command errors
//!
//! Every variant is recoverable: the chat layer turns it into a reply and
//! carries on. Unrecognized input is not an error at all, `recognize`
//! simply returns `None`.

use thiserror::Error;

use crate::stats::Ability;

/// Errors raised while resolving a recognized command
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("You must roll either a stat or a die of a certain size, but not both.")]
    AmbiguousRollKind,

    #[error("Advantage only applies to single die rolls.")]
    AdvantageConflict,

    #[error("You must set {stat} first (`!stat {stat} <value>`).")]
    MissingStat { stat: Ability },

    #[error("No macro named **{name}** is stored (`!macro {name} <roll>` to define it).")]
    MacroLookupMiss { name: String },

    #[error("Macro **{name}** does not contain a valid roll command.")]
    MalformedMacro { name: String },

    #[error("The {what} must be between {min} and {max} (got {value}).")]
    ValidationOutOfRange {
        what: &'static str,
        value: u64,
        min: u64,
        max: u64,
    },
}
