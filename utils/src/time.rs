//! Time formatting helpers.

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;

/// Render a span of seconds for reports, largest unit first.
///
/// Voting periods and vesting countdowns run in days, so at most the two
/// largest non-zero units are shown and a zero remainder is dropped
/// (`7d`, `7d 1h`, `3h 20m`). Anything under a minute is shown in seconds.
pub fn format_duration(secs: u64) -> String {
    let units = [
        (secs / DAY, "d"),
        (secs % DAY / HOUR, "h"),
        (secs % HOUR / MINUTE, "m"),
        (secs % MINUTE, "s"),
    ];
    let Some(lead) = units.iter().position(|(n, _)| *n > 0) else {
        return "0s".to_string();
    };
    units[lead..]
        .iter()
        .take(2)
        .filter(|(n, _)| *n > 0)
        .map(|(n, unit)| format!("{n}{unit}"))
        .collect::<Vec<_>>()
        .join(" ")
}
