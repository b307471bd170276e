//! Countdown text for the live display.

use crate::domain::time::Instant;
use chrono::TimeDelta;

/// Shown once the target instant has been reached.
pub const NOW_MARKER: &str = "Now";

/// Render `remaining` as `H:MM:SS` (hours unpadded). Zero or negative
/// durations render as [`NOW_MARKER`]; anything positive is truncated to whole
/// seconds, so the last second before the target shows `0:00:00`.
pub fn format_remaining(remaining: TimeDelta) -> String {
    if remaining <= TimeDelta::zero() {
        return NOW_MARKER.to_string();
    }
    let total = remaining.num_seconds();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    format!("{}:{:02}:{:02}", hours, minutes, seconds)
}

/// Wall-clock form of a target instant, e.g. `6:15 AM`.
pub fn format_clock(instant: Instant) -> String {
    instant.format("%-I:%M %p").to_string()
}
