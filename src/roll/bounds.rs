//! Bound comparison
//!
//! A roll passes when its total satisfies every bound present. Upper and
//! lower bounds are independent and each may be inclusive or exclusive.

use std::fmt;
use std::str::FromStr;

/// Which side of the total a bound sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// `<n` / `<=n`
    Upper,
    /// `>n` / `>=n`
    Lower,
}

/// An inclusive or exclusive threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bound {
    pub inclusive: bool,
    pub value: i32,
}

impl Bound {
    pub fn inclusive(value: i32) -> Self {
        Self {
            inclusive: true,
            value,
        }
    }

    pub fn exclusive(value: i32) -> Self {
        Self {
            inclusive: false,
            value,
        }
    }

    /// Does `total` satisfy this bound used as an upper bound?
    pub fn admits_below(&self, total: i32) -> bool {
        if self.inclusive {
            total <= self.value
        } else {
            total < self.value
        }
    }

    /// Does `total` satisfy this bound used as a lower bound?
    pub fn admits_above(&self, total: i32) -> bool {
        if self.inclusive {
            total >= self.value
        } else {
            total > self.value
        }
    }

    fn relation(&self) -> &'static str {
        if self.inclusive {
            "<="
        } else {
            "<"
        }
    }
}

/// A bound together with its direction, as written in a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundSpec {
    pub direction: Direction,
    pub bound: Bound,
}

impl FromStr for BoundSpec {
    type Err = String;

    /// Parse `<13`, `<= 13`, `>2` or `>=2`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();

        let (direction, rest) = if let Some(rest) = compact.strip_prefix('<') {
            (Direction::Upper, rest)
        } else if let Some(rest) = compact.strip_prefix('>') {
            (Direction::Lower, rest)
        } else {
            return Err(format!("Bound must start with < or >: {}", s));
        };

        let (inclusive, digits) = match rest.strip_prefix('=') {
            Some(digits) => (true, digits),
            None => (false, rest),
        };

        let value = digits
            .parse()
            .map_err(|_| format!("Invalid bound: {}", s))?;

        Ok(Self {
            direction,
            bound: Bound { inclusive, value },
        })
    }
}

/// Pass/fail result of comparing a total against its bounds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub passed: bool,
    /// Composed range, e.g. `2<=[15]<=20`
    pub display: String,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Within bounds `{}` --> {}!",
            self.display,
            if self.passed { "PASS" } else { "FAIL" }
        )
    }
}

/// The upper bound that actually applies to a roll.
///
/// A stat check without an explicit upper bound succeeds at or under its
/// target; a plain die roll gets no implicit bound.
pub fn effective_upper(explicit: Option<Bound>, target: Option<i32>) -> Option<Bound> {
    explicit.or_else(|| target.map(Bound::inclusive))
}

/// Compare `total` against whichever bounds are present.
///
/// Returns `None` when there is nothing to compare against.
pub fn compare(total: i32, upper: Option<Bound>, lower: Option<Bound>) -> Option<Verdict> {
    if upper.is_none() && lower.is_none() {
        return None;
    }

    let upper_ok = upper.is_none_or(|b| b.admits_below(total));
    let lower_ok = lower.is_none_or(|b| b.admits_above(total));

    let mut display = String::new();
    if let Some(b) = lower {
        display.push_str(&format!("{}{}", b.value, b.relation()));
    }
    display.push_str(&format!("[{}]", total));
    if let Some(b) = upper {
        display.push_str(&format!("{}{}", b.relation(), b.value));
    }

    Some(Verdict {
        passed: upper_ok && lower_ok,
        display,
    })
}
