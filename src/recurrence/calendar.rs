//! Calendar arithmetic for recurrence stepping.
//!
//! Month and year increments respect variable month lengths and leap
//! years: stepping from Jan 31 by one month lands on Feb 28 (or 29),
//! never on a fabricated Feb 31 or a fixed 30-day offset.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Number of days in the given month, leap-year aware.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => unreachable!("invalid month {}", month),
    }
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Add `months` calendar months to `date`, clamping the day of month
/// to the length of the target month.
pub fn add_months(date: NaiveDate, months: i32) -> NaiveDate {
    let zero_based = date.year() * 12 + date.month() as i32 - 1 + months;
    let year = zero_based.div_euclid(12);
    let month = zero_based.rem_euclid(12) as u32 + 1;
    let day = date.day().min(days_in_month(year, month));
    // Day is clamped to the target month, so this cannot fail.
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(date)
}

/// Add `years` calendar years to `date` (Feb 29 clamps to Feb 28 in
/// non-leap targets).
pub fn add_years(date: NaiveDate, years: i32) -> NaiveDate {
    add_months(date, years * 12)
}

/// The next date on or after `from` that falls on `weekday`,
/// computed via modulo-7 arithmetic from the current weekday.
pub fn next_matching_weekday(from: NaiveDate, weekday: Weekday) -> NaiveDate {
    let current = from.weekday().num_days_from_monday() as i64;
    let target = weekday.num_days_from_monday() as i64;
    let offset = (target - current).rem_euclid(7);
    from + Duration::days(offset)
}

/// Number of whole calendar months from `a` to `b` (month-index
/// difference, ignoring the day of month).
pub fn months_between(a: NaiveDate, b: NaiveDate) -> i32 {
    (b.year() * 12 + b.month() as i32) - (a.year() * 12 + a.month() as i32)
}
