//! Relative time text for activity feeds.

use chrono::NaiveDateTime;

/// "N unit(s) ago" for an elapsed number of seconds. Negative input (clock
/// skew) reads as just now.
#[must_use]
pub fn humanize(seconds: i64) -> String {
    match seconds {
        i64::MIN..60 => "less than a minute ago".to_string(),
        60..3_600 => plural(seconds / 60, "minute"),
        3_600..86_400 => plural(seconds / 3_600, "hour"),
        _ => plural(seconds / 86_400, "day"),
    }
}

/// Elapsed text between two local timestamps.
#[must_use]
pub fn since(then: NaiveDateTime, now: NaiveDateTime) -> String {
    humanize((now - then).num_seconds())
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{n} {unit}s ago")
    }
}
