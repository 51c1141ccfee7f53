//! Roll request validation
//!
//! Turns the fields pulled out of a `!roll` command into a request that is
//! safe to evaluate, or explains to the player why it is not.

use super::bounds::Bound;
use super::dice::DiceRoll;
use super::modifier::{Advantage, Modifier};
use crate::error::CommandError;
use crate::stats::{Ability, StatSnapshot};

/// Most dice a single command may roll
pub const MAX_DICE: u32 = 100;
/// Largest die a command may roll
pub const MAX_SIDES: u32 = 10_000;
/// Stat checks always roll one of these
pub const STAT_DIE: u32 = 20;

/// Fields recognized in a `!roll` command, before validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRoll {
    pub num_dice: u32,
    pub die_size: Option<u32>,
    pub stat: Option<Ability>,
    pub modifier: Option<Modifier>,
    pub advantage: Option<Advantage>,
    pub less_than: Option<Bound>,
    pub greater_than: Option<Bound>,
}

impl Default for ParsedRoll {
    fn default() -> Self {
        Self {
            num_dice: 1,
            die_size: None,
            stat: None,
            modifier: None,
            advantage: None,
            less_than: None,
            greater_than: None,
        }
    }
}

impl ParsedRoll {
    /// `<count>d<sides>`
    pub fn dice(count: u32, sides: u32) -> Self {
        Self {
            num_dice: count,
            die_size: Some(sides),
            ..Self::default()
        }
    }

    /// A stat check against `ability`
    pub fn stat(ability: Ability) -> Self {
        Self {
            stat: Some(ability),
            ..Self::default()
        }
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifier = Some(modifier);
        self
    }

    pub fn with_advantage(mut self, advantage: Advantage) -> Self {
        self.advantage = Some(advantage);
        self
    }

    pub fn with_less_than(mut self, bound: Bound) -> Self {
        self.less_than = Some(bound);
        self
    }

    pub fn with_greater_than(mut self, bound: Bound) -> Self {
        self.greater_than = Some(bound);
        self
    }
}

/// What is being rolled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollKind {
    /// A plain die roll
    Die { sides: u32 },
    /// A d20 check against a recorded ability score
    Stat { ability: Ability, value: i32 },
}

/// A validated roll, ready for evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollRequest {
    pub dice: DiceRoll,
    pub kind: RollKind,
    pub modifier: Option<Modifier>,
    pub advantage: Option<Advantage>,
    pub less_than: Option<Bound>,
    pub greater_than: Option<Bound>,
}

impl RollRequest {
    /// Validate `parsed`, looking up the ability score in `stats` for stat
    /// checks. `stats` is `None` when the player has no sheet at all.
    pub fn resolve(parsed: &ParsedRoll, stats: Option<&StatSnapshot>) -> Result<Self, CommandError> {
        let (sides, ability) = match (parsed.die_size, parsed.stat) {
            (Some(sides), None) => (sides, None),
            (None, Some(ability)) => (STAT_DIE, Some(ability)),
            _ => return Err(CommandError::AmbiguousRollKind),
        };

        check_range("number of dice", parsed.num_dice, MAX_DICE)?;
        check_range("die size", sides, MAX_SIDES)?;

        if parsed.advantage.is_some() && parsed.num_dice > 1 {
            return Err(CommandError::AdvantageConflict);
        }

        let kind = match ability {
            None => RollKind::Die { sides },
            Some(ability) => {
                let value = stats
                    .and_then(|s| s.ability(ability))
                    .ok_or(CommandError::MissingStat { stat: ability })?;
                RollKind::Stat { ability, value }
            }
        };

        Ok(Self {
            dice: DiceRoll::new(parsed.num_dice, sides),
            kind,
            modifier: parsed.modifier,
            advantage: parsed.advantage,
            less_than: parsed.less_than,
            greater_than: parsed.greater_than,
        })
    }

    /// The ability rolled against, for stat checks
    pub fn ability(&self) -> Option<Ability> {
        match self.kind {
            RollKind::Stat { ability, .. } => Some(ability),
            RollKind::Die { .. } => None,
        }
    }
}

fn check_range(what: &'static str, value: u32, max: u32) -> Result<(), CommandError> {
    if value == 0 || value > max {
        return Err(CommandError::ValidationOutOfRange {
            what,
            value: value.into(),
            min: 1,
            max: max.into(),
        });
    }
    Ok(())
}
