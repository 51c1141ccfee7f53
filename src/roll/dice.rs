//! Dice evaluation
//!
//! Draws uniform die results from an injected random source. This is the
//! only non-deterministic step of a roll.

use rand::Rng;
use std::fmt;

/// Source of uniform die results
pub trait RandomSource {
    /// Draw one integer uniformly from `1..=sides`
    fn roll_die(&mut self, sides: u32) -> u32;
}

/// Adapter turning any `rand` generator into a [`RandomSource`]
#[derive(Debug, Clone)]
pub struct RngSource<R>(pub R);

impl<R: Rng> RandomSource for RngSource<R> {
    fn roll_die(&mut self, sides: u32) -> u32 {
        self.0.random_range(1..=sides)
    }
}

/// A number of identical dice to roll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiceRoll {
    /// Number of dice to roll
    pub count: u32,
    /// Number of sides per die
    pub sides: u32,
}

/// Individual die results plus their sum
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiceResult {
    pub rolls: Vec<u32>,
    pub base: i32,
}

impl DiceRoll {
    pub fn new(count: u32, sides: u32) -> Self {
        Self { count, sides }
    }

    /// Roll every die once, in order
    pub fn roll<S: RandomSource + ?Sized>(&self, source: &mut S) -> DiceResult {
        let rolls: Vec<u32> = (0..self.count).map(|_| source.roll_die(self.sides)).collect();
        let base = rolls.iter().map(|&r| r as i32).sum();

        DiceResult { rolls, base }
    }
}

impl fmt::Display for DiceRoll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)
    }
}

/// Replays a fixed sequence of die results. Used by tests and by anything
/// that needs a reproducible roll.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRolls {
    values: Vec<u32>,
    next: usize,
}

impl ScriptedRolls {
    pub fn new(values: impl Into<Vec<u32>>) -> Self {
        Self {
            values: values.into(),
            next: 0,
        }
    }

    /// Number of values handed out so far
    pub fn consumed(&self) -> usize {
        self.next
    }
}

impl RandomSource for ScriptedRolls {
    /// Returns the next scripted value clamped into `1..=sides`; wraps around
    /// when the script runs out.
    fn roll_die(&mut self, sides: u32) -> u32 {
        let value = if self.values.is_empty() {
            1
        } else {
            self.values[self.next % self.values.len()]
        };
        self.next += 1;
        value.clamp(1, sides.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_roll_bounds() {
        let mut source = RngSource(StdRng::seed_from_u64(7));
        let dice = DiceRoll::new(3, 6);

        for _ in 0..200 {
            let result = dice.roll(&mut source);
            assert_eq!(result.rolls.len(), 3);
            for r in &result.rolls {
                assert!((1..=6).contains(r), "die {} out of range", r);
            }
            let sum: u32 = result.rolls.iter().sum();
            assert_eq!(result.base, sum as i32);
            assert!((3..=18).contains(&result.base));
        }
    }

    #[test]
    fn test_single_sided_die() {
        let mut source = RngSource(StdRng::seed_from_u64(1));
        let result = DiceRoll::new(4, 1).roll(&mut source);
        assert_eq!(result.rolls, vec![1, 1, 1, 1]);
        assert_eq!(result.base, 4);
    }

    #[test]
    fn test_scripted_rolls() {
        let mut source = ScriptedRolls::new([4, 2]);
        let result = DiceRoll::new(2, 6).roll(&mut source);
        assert_eq!(result.rolls, vec![4, 2]);
        assert_eq!(result.base, 6);
        assert_eq!(source.consumed(), 2);
    }

    #[test]
    fn test_scripted_rolls_clamp_to_die() {
        let mut source = ScriptedRolls::new([15]);
        assert_eq!(source.roll_die(6), 6);
    }

    #[test]
    fn test_display() {
        assert_eq!(DiceRoll::new(1, 20).to_string(), "1d20");
        assert_eq!(DiceRoll::new(3, 8).to_string(), "3d8");
    }
}
