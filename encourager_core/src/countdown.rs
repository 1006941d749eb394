//! Countdown to the next local midnight.

use chrono::{DateTime, Duration, FixedOffset, TimeZone};

/// Time remaining until the next local midnight after `now`
///
/// Never negative. At exactly midnight the full day remains.
///
/// Midnight is taken in `now`'s fixed offset. If a daylight saving change
/// falls before that midnight, the result is off by the size of the shift
/// until the clock passes the change and reports the new offset.
pub fn until_next_midnight(now: DateTime<FixedOffset>) -> Duration {
    let tz = now.timezone();
    let next_midnight = now
        .date_naive()
        .succ_opt()
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .and_then(|naive| tz.from_local_datetime(&naive).single());

    match next_midnight {
        Some(midnight) => (midnight - now).max(Duration::zero()),
        None => Duration::zero(),
    }
}

/// Format a duration as `HH:MM:SS`, flooring to whole seconds
///
/// Negative durations display as `00:00:00`.
pub fn format_countdown(remaining: Duration) -> String {
    let total_seconds = remaining.num_seconds().max(0);
    let h = total_seconds / 3600;
    let m = (total_seconds % 3600) / 60;
    let s = total_seconds % 60;
    format!("{:02}:{:02}:{:02}", h, m, s)
}
