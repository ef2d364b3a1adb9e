//! Calendar bucketing: maps an event instant to its day and week windows.
//!
//! Pure and deterministic. Every bucket key in the system, on both the
//! write path and the read path, comes from these two functions.

use chrono::{DateTime, Datelike, Utc};

/// UTC calendar day of the instant, formatted `YYYY-MM-DD`.
pub fn day_bucket(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d").to_string()
}

/// Week of year of the instant, formatted `YYYY-Www` with a two-digit
/// week number.
///
/// Computed as `ceil((days since Jan 1 + weekday + 1) / 7)` where
/// `weekday` is the instant's own UTC day-of-week with Sunday = 0. This
/// is not ISO-8601 week numbering: dates late in December can land in
/// W53. Keys stay consistent because reads and writes share this one
/// formula.
pub fn week_bucket(ts: DateTime<Utc>) -> String {
    let days_since_jan1 = ts.ordinal0();
    let weekday = ts.weekday().num_days_from_sunday();
    let week = (days_since_jan1 + weekday + 1).div_ceil(7);
    format!("{}-W{:02}", ts.year(), week)
}
