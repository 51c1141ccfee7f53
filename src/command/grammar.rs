//! Command grammar
//!
//! Each command form is one anchored pattern. Roll commands look like:
//!
//! ```text
//! !roll 1d20+2
//! !roll 1 d 6
//! !roll str
//! !roll cha+1 ++
//! !roll int+1-- <5
//! !roll int+1++ < 1 >= 2
//! ```

use regex::{Captures, Regex};
use std::sync::LazyLock;

use super::{Command, MacroCommand, StatAssignment};
use crate::roll::{BoundSpec, Direction, ParsedRoll};

static PING_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^!ping(?:\s|$)").unwrap());

static HELP_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^!help(?:\s|$)").unwrap());

static VERSION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^!version(?: (.+))?$").unwrap());

/// Groups: 1 count, 2 sides, 3 stat, 4 modifier, 5 advantage, 6 upper, 7 lower
static ROLL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^!roll (?:([0-9]+)?\s?[dD]\s?([0-9]{1,4})|(str|dex|wis|cha|int|con))",
        r"\s?([+-]\s?[0-9]{1,2})?",
        r"\s?(\+{1,2}|-{1,2})?",
        r"\s?(<=?\s?[0-9]{1,4})?",
        r"\s?(>=?\s?[0-9]{1,4})?$",
    ))
    .unwrap()
});

static STAT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^!stat (str|dex|con|int|wis|cha|av|ac|hp) ([0-9]{1,2})\s*$").unwrap()
});

static MACRO_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^!macro ([a-zA-Z0-9]+)(?:\s+(.*))?$").unwrap());

/// Classify a raw chat message.
///
/// Returns `None` for anything that is not a recognized command; callers
/// should ignore such messages without replying.
pub fn recognize(raw: &str) -> Option<Command> {
    if PING_REGEX.is_match(raw) {
        Some(Command::Ping)
    } else if let Some(caps) = VERSION_REGEX.captures(raw) {
        Some(Command::Version {
            history: caps.get(1).is_some(),
        })
    } else if HELP_REGEX.is_match(raw) {
        Some(Command::Help)
    } else if let Some(parsed) = recognize_roll(raw) {
        Some(Command::Roll(parsed))
    } else if let Some(caps) = STAT_REGEX.captures(raw) {
        Some(Command::Stat(StatAssignment {
            stat: caps[1].parse().ok()?,
            value: caps[2].parse().ok()?,
        }))
    } else if let Some(caps) = MACRO_REGEX.captures(raw) {
        let name = caps[1].to_string();
        let body = caps.get(2).map(|m| m.as_str().trim()).unwrap_or("");
        Some(Command::Macro(if body.is_empty() {
            MacroCommand::Invoke { name }
        } else {
            MacroCommand::Define {
                name,
                body: body.to_string(),
            }
        }))
    } else {
        None
    }
}

/// Apply only the roll grammar to `raw`.
///
/// Used directly for macro expansion so a stored macro can never expand
/// into another macro.
pub fn recognize_roll(raw: &str) -> Option<ParsedRoll> {
    let caps = ROLL_REGEX.captures(raw)?;

    // A count too large for u32 is kept as u32::MAX so validation can
    // report it as out of range instead of the command being ignored.
    let num_dice = match caps.get(1) {
        Some(m) => m.as_str().parse().unwrap_or(u32::MAX),
        None => 1,
    };

    let mut parsed = ParsedRoll {
        num_dice,
        die_size: parse_group(&caps, 2)?,
        stat: parse_group(&caps, 3)?,
        modifier: parse_group(&caps, 4)?,
        advantage: parse_group(&caps, 5)?,
        ..ParsedRoll::default()
    };

    if let Some(spec) = parse_group::<BoundSpec>(&caps, 6)? {
        debug_assert_eq!(spec.direction, Direction::Upper);
        parsed.less_than = Some(spec.bound);
    }
    if let Some(spec) = parse_group::<BoundSpec>(&caps, 7)? {
        debug_assert_eq!(spec.direction, Direction::Lower);
        parsed.greater_than = Some(spec.bound);
    }

    Some(parsed)
}

/// Parse an optional capture group. The outer `Option` is `None` only when
/// the group matched but failed to parse, which the patterns rule out.
fn parse_group<T: std::str::FromStr>(caps: &Captures<'_>, index: usize) -> Option<Option<T>> {
    match caps.get(index) {
        Some(m) => m.as_str().parse().ok().map(Some),
        None => Some(None),
    }
}
