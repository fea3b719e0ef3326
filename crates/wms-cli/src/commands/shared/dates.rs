use chrono::{Local, NaiveDate};

use crate::cli::subcommands::DateRangeArgs;

/// Local calendar date; the warehouse schema stores local times.
#[must_use]
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Fill missing range ends with `today`.
#[must_use]
pub fn resolve_range(range: &DateRangeArgs, today: NaiveDate) -> (NaiveDate, NaiveDate) {
    (range.from.unwrap_or(today), range.to.unwrap_or(today))
}
