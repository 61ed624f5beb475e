//! Pure calendar arithmetic in the proleptic Gregorian calendar.
//!
//! Every function works on `NaiveDate` values that are understood to be UTC
//! calendar days. Host locale and host time zone never enter the picture, so
//! a given instant always lands on the same day cell.

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};

/// First column of every week row. Fixed for the whole crate.
pub const WEEK_START: Weekday = Weekday::Mon;

pub const DAYS_IN_WEEK: usize = 7;
pub const MAX_WEEK_ROWS: usize = 6;

/// Cells in one month page (6 rows x 7 columns).
pub const CELLS_PER_MONTH: usize = DAYS_IN_WEEK * MAX_WEEK_ROWS;

/// Component-wise distance between two days: whole months, then leftover days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthDayDistance {
    pub months: i32,
    pub days: i64,
}

/// Calendar-month difference from `a` to `b`, ignoring the day of month.
///
/// `2021-01-15 -> 2021-03-10` is 2 months; two days in the same month are 0
/// months apart. Negative when `b` lies in an earlier month than `a`.
pub fn months_between(a: NaiveDate, b: NaiveDate) -> i32 {
    (b.year() - a.year()) * 12 + b.month() as i32 - a.month() as i32
}

/// Day 1 of the month containing `d`.
pub fn first_of_month(d: NaiveDate) -> NaiveDate {
    d - Days::new(u64::from(d.day0()))
}

/// Add `n` calendar months (negative subtracts). A day of month that does not
/// exist in the target month is clamped to its last day (Jan 31 + 1 = Feb 28).
///
/// Returns `None` if the result is outside chrono's supported range.
pub fn add_months(d: NaiveDate, n: i32) -> Option<NaiveDate> {
    let months = Months::new(n.unsigned_abs());
    if n >= 0 {
        d.checked_add_months(months)
    } else {
        d.checked_sub_months(months)
    }
}

/// Number of days (28..=31) in the month containing `d`.
pub fn days_in_month(d: NaiveDate) -> u32 {
    let first = first_of_month(d);
    match first.checked_add_months(Months::new(1)) {
        Some(next) => (next - first).num_days() as u32,
        // Only the last month chrono can represent, which is a December.
        None => 31,
    }
}

/// Column of `d` in a week row that starts on [`WEEK_START`].
///
/// Calendar APIs commonly number weekdays Sunday = 1 ..= Saturday = 7. That
/// host value is re-based as `((host - 1) + 6) % 7`, giving Monday = 0 ..=
/// Sunday = 6.
pub fn weekday_index_monday_based(d: NaiveDate) -> u32 {
    weekday_index(d, WEEK_START)
}

fn weekday_index(d: NaiveDate, week_start: Weekday) -> u32 {
    let host = d.weekday().number_from_sunday();
    let shift = 7 - week_start.num_days_from_sunday();
    ((host - 1) + shift) % 7
}

/// Distance from `from` to `to` as (whole months, remaining days).
///
/// `months` is the largest `m` with `add_months(from, m) <= to`, so the
/// remaining `days` is never negative.
pub fn month_day_distance(from: NaiveDate, to: NaiveDate) -> Option<MonthDayDistance> {
    let mut months = months_between(from, to);
    let mut pivot = add_months(from, months)?;
    if pivot > to {
        months -= 1;
        pivot = add_months(from, months)?;
    }
    Some(MonthDayDistance {
        months,
        days: (to - pivot).num_days(),
    })
}

/// Header text for a month page, e.g. `"February 2021"`.
pub fn month_title(d: NaiveDate) -> String {
    d.format("%B %Y").to_string()
}
