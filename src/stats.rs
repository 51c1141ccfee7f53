//! Character statistics
//!
//! A player sheet holds the six ability scores plus armour value, armour
//! class and hit points. Only the abilities can be rolled against; the rest
//! are stored for reference.

use std::fmt;
use std::str::FromStr;

/// An ability score that can be used for a stat check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ability {
    Str,
    Dex,
    Con,
    Int,
    Wis,
    Cha,
}

impl Ability {
    pub const ALL: [Ability; 6] = [
        Ability::Str,
        Ability::Dex,
        Ability::Con,
        Ability::Int,
        Ability::Wis,
        Ability::Cha,
    ];

    /// Short name as typed in commands
    pub fn as_str(&self) -> &'static str {
        match self {
            Ability::Str => "str",
            Ability::Dex => "dex",
            Ability::Con => "con",
            Ability::Int => "int",
            Ability::Wis => "wis",
            Ability::Cha => "cha",
        }
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Ability {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ability::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| format!("Unknown ability: {}", s))
    }
}

/// Any stat a player can record with `!stat`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatName {
    Str,
    Dex,
    Con,
    Int,
    Wis,
    Cha,
    Av,
    Ac,
    Hp,
}

impl StatName {
    pub const ALL: [StatName; 9] = [
        StatName::Str,
        StatName::Dex,
        StatName::Con,
        StatName::Int,
        StatName::Wis,
        StatName::Cha,
        StatName::Av,
        StatName::Ac,
        StatName::Hp,
    ];

    /// Short name as typed in commands
    pub fn as_str(&self) -> &'static str {
        match self {
            StatName::Str => "str",
            StatName::Dex => "dex",
            StatName::Con => "con",
            StatName::Int => "int",
            StatName::Wis => "wis",
            StatName::Cha => "cha",
            StatName::Av => "av",
            StatName::Ac => "ac",
            StatName::Hp => "hp",
        }
    }

    /// Column in the `player_stats` table
    pub fn column(&self) -> &'static str {
        match self {
            StatName::Str => "strength",
            StatName::Dex => "dexterity",
            StatName::Con => "constitution",
            StatName::Int => "intelligence",
            StatName::Wis => "wisdom",
            StatName::Cha => "charisma",
            StatName::Av => "av",
            StatName::Ac => "ac",
            StatName::Hp => "hp",
        }
    }
}

impl From<Ability> for StatName {
    fn from(ability: Ability) -> Self {
        match ability {
            Ability::Str => StatName::Str,
            Ability::Dex => StatName::Dex,
            Ability::Con => StatName::Con,
            Ability::Int => StatName::Int,
            Ability::Wis => StatName::Wis,
            Ability::Cha => StatName::Cha,
        }
    }
}

impl fmt::Display for StatName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StatName::ALL
            .into_iter()
            .find(|n| n.as_str() == s)
            .ok_or_else(|| format!("Unknown stat: {}", s))
    }
}

/// A player's recorded stats; any of them may be unset
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatSnapshot {
    pub strength: Option<i32>,
    pub dexterity: Option<i32>,
    pub constitution: Option<i32>,
    pub intelligence: Option<i32>,
    pub wisdom: Option<i32>,
    pub charisma: Option<i32>,
    pub av: Option<i32>,
    pub ac: Option<i32>,
    pub hp: Option<i32>,
}

impl StatSnapshot {
    /// Look up a stat value
    pub fn get(&self, stat: StatName) -> Option<i32> {
        match stat {
            StatName::Str => self.strength,
            StatName::Dex => self.dexterity,
            StatName::Con => self.constitution,
            StatName::Int => self.intelligence,
            StatName::Wis => self.wisdom,
            StatName::Cha => self.charisma,
            StatName::Av => self.av,
            StatName::Ac => self.ac,
            StatName::Hp => self.hp,
        }
    }

    /// Record a stat value
    pub fn set(&mut self, stat: StatName, value: i32) {
        let slot = match stat {
            StatName::Str => &mut self.strength,
            StatName::Dex => &mut self.dexterity,
            StatName::Con => &mut self.constitution,
            StatName::Int => &mut self.intelligence,
            StatName::Wis => &mut self.wisdom,
            StatName::Cha => &mut self.charisma,
            StatName::Av => &mut self.av,
            StatName::Ac => &mut self.ac,
            StatName::Hp => &mut self.hp,
        };
        *slot = Some(value);
    }

    /// Builder-style variant of [`StatSnapshot::set`]
    pub fn with(mut self, stat: StatName, value: i32) -> Self {
        self.set(stat, value);
        self
    }

    pub fn ability(&self, ability: Ability) -> Option<i32> {
        self.get(ability.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        assert_eq!("wis".parse::<Ability>().unwrap(), Ability::Wis);
        assert!("av".parse::<Ability>().is_err());
        assert_eq!("av".parse::<StatName>().unwrap(), StatName::Av);
        assert!("STR".parse::<StatName>().is_err());
    }

    #[test]
    fn test_columns() {
        assert_eq!(StatName::Str.column(), "strength");
        assert_eq!(StatName::from(Ability::Cha).column(), "charisma");
        assert_eq!(StatName::Hp.column(), "hp");
    }

    #[test]
    fn test_snapshot_get_set() {
        let stats = StatSnapshot::default()
            .with(StatName::Int, 10)
            .with(StatName::Ac, 4);

        assert_eq!(stats.ability(Ability::Int), Some(10));
        assert_eq!(stats.get(StatName::Ac), Some(4));
        assert_eq!(stats.ability(Ability::Str), None);
    }
}
