//! Modifier and target adjustment
//!
//! A modifier means different things depending on what is being rolled:
//! on a plain die roll it shifts the total, on a stat check it shifts the
//! target the d20 is compared against.

use std::fmt;
use std::str::FromStr;

use super::request::RollKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Plus,
    Minus,
}

/// A signed numeric modifier as written by the player (`+2`, `- 3`)
///
/// The sign is kept separately from the magnitude so that `-0` is not
/// confused with `+0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Modifier {
    pub sign: Sign,
    pub magnitude: u32,
}

impl Modifier {
    pub fn plus(magnitude: u32) -> Self {
        Self {
            sign: Sign::Plus,
            magnitude,
        }
    }

    pub fn minus(magnitude: u32) -> Self {
        Self {
            sign: Sign::Minus,
            magnitude,
        }
    }

    /// Signed value of the modifier
    pub fn value(&self) -> i32 {
        match self.sign {
            Sign::Plus => self.magnitude as i32,
            Sign::Minus => -(self.magnitude as i32),
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.sign {
            Sign::Plus => write!(f, "+{}", self.magnitude),
            Sign::Minus => write!(f, "-{}", self.magnitude),
        }
    }
}

impl FromStr for Modifier {
    type Err = String;

    /// Parse `+2`, `-13` or `+ 4`; whitespace between sign and digits is ignored
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        let (sign, digits) = match compact.split_at_checked(1) {
            Some(("+", rest)) => (Sign::Plus, rest),
            Some(("-", rest)) => (Sign::Minus, rest),
            _ => return Err(format!("Modifier must start with + or -: {}", s)),
        };
        let magnitude = digits
            .parse()
            .map_err(|_| format!("Invalid modifier: {}", s))?;

        Ok(Self { sign, magnitude })
    }
}

/// Advantage / disadvantage marker (`+`, `++`, `-`, `--`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advantage {
    Advantage,
    SuperAdvantage,
    Disadvantage,
    SuperDisadvantage,
}

impl Advantage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Advantage::Advantage => "+",
            Advantage::SuperAdvantage => "++",
            Advantage::Disadvantage => "-",
            Advantage::SuperDisadvantage => "--",
        }
    }
}

impl fmt::Display for Advantage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Advantage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Advantage::Advantage),
            "++" => Ok(Advantage::SuperAdvantage),
            "-" => Ok(Advantage::Disadvantage),
            "--" => Ok(Advantage::SuperDisadvantage),
            other => Err(format!("Invalid advantage marker: {}", other)),
        }
    }
}

/// Total and target after the modifier has been applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Adjusted {
    pub total: i32,
    /// Value a stat check is compared against; `None` for die rolls
    pub target: Option<i32>,
    pub is_critical: bool,
}

/// Apply `modifier` to a rolled `base` value.
///
/// - Die roll: `total = base + modifier`.
/// - Stat check with `+m`: `target = stat + m`.
/// - Stat check with `-m`: `target = base - m`. This derives the target from
///   the roll rather than the stat, so a subtractive stat check can never be
///   critical and fails its implicit bound unless `m` is zero. Kept as the
///   bot has always behaved; see DESIGN.md.
///
/// A stat check is critical when the unmodified roll equals the target.
pub fn adjust(kind: &RollKind, base: i32, modifier: Option<Modifier>) -> Adjusted {
    match *kind {
        RollKind::Die { .. } => Adjusted {
            total: base + modifier.map_or(0, |m| m.value()),
            target: None,
            is_critical: false,
        },
        RollKind::Stat { value, .. } => {
            let target = match modifier {
                None => value,
                Some(Modifier {
                    sign: Sign::Plus,
                    magnitude,
                }) => value + magnitude as i32,
                Some(Modifier {
                    sign: Sign::Minus,
                    magnitude,
                }) => base - magnitude as i32,
            };

            Adjusted {
                total: base,
                target: Some(target),
                is_critical: base == target,
            }
        }
    }
}
