//! The result of a fully evaluated roll

use super::bounds::Verdict;
use super::dice::{DiceResult, DiceRoll};
use super::modifier::{Adjusted, Advantage, Modifier};
use super::request::RollRequest;
use crate::stats::Ability;

/// Everything the chat layer needs to report a roll
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollOutcome {
    pub dice: DiceRoll,
    pub ability: Option<Ability>,
    pub modifier: Option<Modifier>,
    pub advantage: Option<Advantage>,
    /// Individual die results, in roll order
    pub raw_rolls: Vec<u32>,
    pub total: i32,
    /// What a stat check was compared against
    pub target: Option<i32>,
    pub is_critical: bool,
    /// Present when at least one bound applied
    pub verdict: Option<Verdict>,
}

impl RollOutcome {
    pub fn assemble(
        request: &RollRequest,
        result: DiceResult,
        adjusted: Adjusted,
        verdict: Option<Verdict>,
    ) -> Self {
        Self {
            dice: request.dice,
            ability: request.ability(),
            modifier: request.modifier,
            advantage: request.advantage,
            raw_rolls: result.rolls,
            total: adjusted.total,
            target: adjusted.target,
            is_critical: adjusted.is_critical,
            verdict,
        }
    }

    pub fn is_stat_check(&self) -> bool {
        self.ability.is_some()
    }

    pub fn passed(&self) -> Option<bool> {
        self.verdict.as_ref().map(|v| v.passed)
    }
}
