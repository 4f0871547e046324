//! Calendar utilities: day counts, day-of-week, and the weekday predicates
//! the generator consults when deciding night eligibility and coverage
//! floors.

use chrono::{Datelike, NaiveDate, Weekday};

/// Number of days in `(year, month)`, 1-based month. Falls back to 30 for an
/// out-of-range month rather than panicking — invalid input is handled
/// defensively throughout this crate.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    if !(1..=12).contains(&month) {
        return 30;
    }
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let first_of_next = NaiveDate::from_ymd_opt(next_year, next_month, 1);
    let first_of_this = NaiveDate::from_ymd_opt(year, month, 1);
    match (first_of_this, first_of_next) {
        (Some(this), Some(next)) => (next - this).num_days() as u32,
        _ => 30,
    }
}

/// Weekday of the given 1-based day-of-month, or `None` if the day is out of
/// range for the month.
pub fn weekday_of(year: i32, month: u32, day: u32) -> Option<Weekday> {
    NaiveDate::from_ymd_opt(year, month as i32, day).map(|d| d.weekday())
}

pub fn is_sunday(year: i32, month: u32, day: u32) -> bool {
    weekday_of(year, month, day) == Some(Weekday::Sun)
}

/// Friday, Saturday, or Sunday — the window `weekday_only` night staff are
/// never assigned on.
pub fn is_fri_sat_sun(year: i32, month: u32, day: u32) -> bool {
    matches!(
        weekday_of(year, month, day),
        Some(Weekday::Fri) | Some(Weekday::Sat) | Some(Weekday::Sun)
    )
}
