//! Roll resolution
//!
//! Pipeline for a `!roll` command once the grammar has recognized it:
//! - Request validation (die vs stat, advantage, ranges, stat lookup)
//! - Dice evaluation against an injected random source
//! - Modifier and target adjustment
//! - Bound comparison
//! - Outcome assembly
//!
//! Everything here is synchronous and holds no state between calls.

mod bounds;
mod dice;
mod modifier;
mod outcome;
mod request;

pub use bounds::{compare, effective_upper, Bound, BoundSpec, Direction, Verdict};
pub use dice::{DiceResult, DiceRoll, RandomSource, RngSource, ScriptedRolls};
pub use modifier::{adjust, Adjusted, Advantage, Modifier, Sign};
pub use outcome::RollOutcome;
pub use request::{ParsedRoll, RollKind, RollRequest, MAX_DICE, MAX_SIDES, STAT_DIE};

use crate::error::CommandError;
use crate::stats::StatSnapshot;

/// Evaluate a validated request.
///
/// The advantage marker is validated during resolution but does not change
/// how many dice are drawn.
pub fn evaluate<S: RandomSource + ?Sized>(request: &RollRequest, source: &mut S) -> RollOutcome {
    let result = request.dice.roll(source);
    let adjusted = adjust(&request.kind, result.base, request.modifier);

    let upper = effective_upper(request.less_than, adjusted.target);
    let verdict = compare(adjusted.total, upper, request.greater_than);

    RollOutcome::assemble(request, result, adjusted, verdict)
}

/// Validate and evaluate a parsed roll in one step.
///
/// No randomness is consumed when validation fails.
pub fn roll<S: RandomSource + ?Sized>(
    parsed: &ParsedRoll,
    stats: Option<&StatSnapshot>,
    source: &mut S,
) -> Result<RollOutcome, CommandError> {
    let request = RollRequest::resolve(parsed, stats)?;
    Ok(evaluate(&request, source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{Ability, StatName};

    fn stats() -> StatSnapshot {
        StatSnapshot::default()
            .with(StatName::Str, 12)
            .with(StatName::Int, 10)
    }

    #[test]
    fn test_plain_roll_with_modifier() {
        let parsed = ParsedRoll::dice(1, 20).with_modifier(Modifier::plus(2));
        let mut source = ScriptedRolls::new([15]);

        let outcome = roll(&parsed, None, &mut source).unwrap();
        assert_eq!(outcome.raw_rolls, vec![15]);
        assert_eq!(outcome.total, 17);
        assert_eq!(outcome.target, None);
        assert!(!outcome.is_critical);
        assert_eq!(outcome.verdict, None);
    }

    #[test]
    fn test_stat_roll_default_bound() {
        let parsed = ParsedRoll::stat(Ability::Str);

        let outcome = roll(&parsed, Some(&stats()), &mut ScriptedRolls::new([12])).unwrap();
        assert_eq!(outcome.dice, DiceRoll::new(1, 20));
        assert_eq!(outcome.target, Some(12));
        assert!(outcome.is_critical);
        let verdict = outcome.verdict.unwrap();
        assert!(verdict.passed);
        assert_eq!(verdict.display, "[12]<=12");

        let outcome = roll(&parsed, Some(&stats()), &mut ScriptedRolls::new([13])).unwrap();
        assert!(!outcome.is_critical);
        assert_eq!(outcome.passed(), Some(false));
    }

    #[test]
    fn test_stat_roll_positive_modifier() {
        let parsed = ParsedRoll::stat(Ability::Int).with_modifier(Modifier::plus(1));

        let outcome = roll(&parsed, Some(&stats()), &mut ScriptedRolls::new([11])).unwrap();
        assert_eq!(outcome.target, Some(11));
        assert_eq!(outcome.total, 11);
        assert!(outcome.is_critical);
        assert_eq!(outcome.passed(), Some(true));
    }

    #[test]
    fn test_stat_roll_negative_modifier_uses_roll() {
        let parsed = ParsedRoll::stat(Ability::Int).with_modifier(Modifier::minus(1));

        let outcome = roll(&parsed, Some(&stats()), &mut ScriptedRolls::new([4])).unwrap();
        assert_eq!(outcome.target, Some(3));
        assert!(!outcome.is_critical);
        assert_eq!(outcome.passed(), Some(false));
    }

    #[test]
    fn test_explicit_bound_replaces_implicit() {
        let parsed = ParsedRoll::stat(Ability::Int).with_less_than(Bound::exclusive(5));

        let outcome = roll(&parsed, Some(&stats()), &mut ScriptedRolls::new([7])).unwrap();
        assert_eq!(outcome.passed(), Some(false));
        assert_eq!(outcome.verdict.unwrap().display, "[7]<5");
    }

    #[test]
    fn test_lower_bound_keeps_implicit_upper() {
        let parsed = ParsedRoll::stat(Ability::Int).with_greater_than(Bound::inclusive(5));

        let outcome = roll(&parsed, Some(&stats()), &mut ScriptedRolls::new([7])).unwrap();
        let verdict = outcome.verdict.unwrap();
        assert!(verdict.passed);
        assert_eq!(verdict.display, "5<=[7]<=10");

        let outcome = roll(&parsed, Some(&stats()), &mut ScriptedRolls::new([3])).unwrap();
        let verdict = outcome.verdict.unwrap();
        assert!(!verdict.passed);
        assert_eq!(verdict.display, "5<=[3]<=10");

        let outcome = roll(&parsed, Some(&stats()), &mut ScriptedRolls::new([14])).unwrap();
        assert_eq!(outcome.passed(), Some(false));
    }

    #[test]
    fn test_die_roll_bounds_use_modified_total() {
        let parsed = ParsedRoll::dice(1, 20)
            .with_modifier(Modifier::plus(3))
            .with_less_than(Bound::inclusive(20))
            .with_greater_than(Bound::inclusive(2));

        let outcome = roll(&parsed, None, &mut ScriptedRolls::new([12])).unwrap();
        let verdict = outcome.verdict.unwrap();
        assert!(verdict.passed);
        assert_eq!(verdict.display, "2<=[15]<=20");
    }

    #[test]
    fn test_validation_failure_consumes_no_randomness() {
        let parsed = ParsedRoll {
            stat: Some(Ability::Str),
            ..ParsedRoll::dice(1, 6)
        };
        let mut source = ScriptedRolls::new([3]);

        assert_eq!(
            roll(&parsed, Some(&stats()), &mut source),
            Err(CommandError::AmbiguousRollKind)
        );
        assert_eq!(source.consumed(), 0);

        let parsed = ParsedRoll::dice(2, 6).with_advantage(Advantage::Advantage);
        assert_eq!(
            roll(&parsed, None, &mut source),
            Err(CommandError::AdvantageConflict)
        );
        assert_eq!(source.consumed(), 0);
    }

    #[test]
    fn test_advantage_does_not_add_dice() {
        let parsed = ParsedRoll::dice(1, 6).with_advantage(Advantage::SuperAdvantage);
        let outcome = roll(&parsed, None, &mut ScriptedRolls::new([5, 2])).unwrap();
        assert_eq!(outcome.raw_rolls, vec![5]);
        assert_eq!(outcome.advantage, Some(Advantage::SuperAdvantage));
    }

    #[test]
    fn test_many_dice_sum() {
        let parsed = ParsedRoll::dice(4, 6).with_modifier(Modifier::minus(2));
        let outcome = roll(&parsed, None, &mut ScriptedRolls::new([1, 2, 3, 4])).unwrap();
        assert_eq!(outcome.raw_rolls, vec![1, 2, 3, 4]);
        assert_eq!(outcome.total, 8);
    }
}
