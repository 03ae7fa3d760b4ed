//! Calendar primitives: date arithmetic, day-of-week classification, minute
//! math. Every other component builds on these rather than touching
//! `chrono` weekday/hour arithmetic directly, so the "ambient local
//! timezone, no conversion" rule has exactly one place it's
//! expressed.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};

/// Midnight of the local day containing `instant`.
pub fn start_of_local_day(instant: NaiveDateTime) -> NaiveDateTime {
    instant.date().and_hms_opt(0, 0, 0).expect("midnight is always valid")
}

/// `h + m/60`, ignoring seconds. Used for family-time/deep-work window
/// comparisons, which are expressed as decimal hours in `SchedulerConfig`.
pub fn decimal_hour(instant: NaiveDateTime) -> f64 {
    instant.hour() as f64 + instant.minute() as f64 / 60.0
}

pub fn is_sunday(date: NaiveDate) -> bool {
    date.weekday() == Weekday::Sun
}

pub fn is_friday(date: NaiveDate) -> bool {
    date.weekday() == Weekday::Fri
}

/// Builds a `NaiveDateTime` on `date` at a (possibly fractional) decimal
/// hour, e.g. `at_decimal_hour(date, 17.5)` → 17:30.
pub fn at_decimal_hour(date: NaiveDate, decimal_hour: f64) -> NaiveDateTime {
    let whole_hour = decimal_hour.floor() as u32;
    let minute = ((decimal_hour - decimal_hour.floor()) * 60.0).round() as u32;
    let time = NaiveTime::from_hms_opt(whole_hour.min(23), minute.min(59), 0)
        .unwrap_or_else(|| NaiveTime::from_hms_opt(23, 59, 0).unwrap());
    date.and_time(time)
}

pub fn add_minutes(instant: NaiveDateTime, minutes: i64) -> NaiveDateTime {
    instant + Duration::minutes(minutes)
}

pub fn minutes_between(start: NaiveDateTime, end: NaiveDateTime) -> i64 {
    (end - start).num_minutes()
}

/// Ceiling of the fractional number of days between `from` and `deadline`.
/// `days_until(deadline, from) <= 0` means the deadline has already passed
/// (or is today) relative to `from`. Works for deadlines in the past too
/// (negative results), using Euclidean division so the rounding direction
/// stays "ceiling" on both sides of zero.
pub fn days_until(deadline: NaiveDateTime, from: NaiveDateTime) -> i64 {
    let minutes = minutes_between(from, deadline);
    let minutes_per_day = 24 * 60;
    (minutes + minutes_per_day - 1).div_euclid(minutes_per_day)
}

pub fn is_same_local_day(a: NaiveDateTime, b: NaiveDateTime) -> bool {
    a.date() == b.date()
}
