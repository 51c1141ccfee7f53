//! Chat formatting for roll results

use crate::roll::RollOutcome;

/// Render a roll the way it is posted to the channel:
///
/// ```text
/// Rolling 1d20 +2 ...
/// `[15]`
/// TOTAL: **17**!
/// Within bounds `[17]<=20` --> PASS!
/// ```
///
/// The modifier is echoed only for plain die rolls; on a stat check it
/// already shows up in the bound.
pub fn format_outcome(outcome: &RollOutcome) -> String {
    let modifier = match outcome.modifier {
        Some(m) if !outcome.is_stat_check() => format!(" {} ", m),
        _ => " ".to_string(),
    };

    let raw = outcome
        .raw_rolls
        .iter()
        .map(|r| format!("[{}]", r))
        .collect::<Vec<_>>()
        .join(" ");

    let compared = outcome
        .verdict
        .as_ref()
        .map(|v| v.to_string())
        .unwrap_or_default();

    let critical = if outcome.is_critical {
        " **CRITICAL!!**"
    } else {
        ""
    };

    let text = format!(
        "Rolling {}{}...\n`{}`\nTOTAL: **{}**!\n{}{}",
        outcome.dice, modifier, raw, outcome.total, compared, critical
    );
    text.trim_end().to_string()
}
