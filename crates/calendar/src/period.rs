use crate::error::CalendarError;
use chrono::{Datelike, Days, NaiveDate};

/// Months in a planning year.
pub const MONTHS_PER_YEAR: u32 = 12;
/// Weeks in a planning year. A flat 52, not the ISO week count of any given year.
pub const WEEKS_PER_YEAR: u32 = 52;

const MONTH_SHORT_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Number of days in `month` (1-12) of `year`.
pub fn days_in_month(year: i32, month: u32) -> Result<u32, CalendarError> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or(CalendarError::InvalidMonth { year, month })?;

    let (next_month_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };

    let first_of_next = NaiveDate::from_ymd_opt(next_month_year, next_month, 1)
        .ok_or(CalendarError::OutOfRange(first))?;

    Ok((first_of_next - first).num_days() as u32)
}

/// Number of days in `year` (365 or 366).
pub fn days_in_year(year: i32) -> Result<u32, CalendarError> {
    NaiveDate::from_ymd_opt(year, 12, 31)
        .map(|d| d.ordinal())
        .ok_or(CalendarError::InvalidMonth { year, month: 12 })
}

/// The 1st of the month `date` falls in.
pub fn first_day_of_month(date: NaiveDate) -> NaiveDate {
    // Stepping back within the same month can never leave the supported range.
    date - Days::new(u64::from(date.day0()))
}

/// The last day of the month `date` falls in.
pub fn last_day_of_month(date: NaiveDate) -> Result<NaiveDate, CalendarError> {
    let days = days_in_month(date.year(), date.month())?;
    date.with_day(days).ok_or(CalendarError::OutOfRange(date))
}

/// The Monday starting the ISO week that contains `date`.
pub fn start_of_iso_week(date: NaiveDate) -> Result<NaiveDate, CalendarError> {
    let offset = u64::from(date.weekday().num_days_from_monday());
    date.checked_sub_days(Days::new(offset))
        .ok_or(CalendarError::OutOfRange(date))
}

/// Days in `[start, end]`, counting both ends.
pub fn inclusive_day_count(start: NaiveDate, end: NaiveDate) -> Result<i64, CalendarError> {
    if end < start {
        return Err(CalendarError::InvertedRange { start, end });
    }
    Ok((end - start).num_days() + 1)
}

/// Three-letter English month abbreviation ("Jan".."Dec") for `month` in 1-12.
pub fn month_short_name(month: u32) -> Result<&'static str, CalendarError> {
    month
        .checked_sub(1)
        .and_then(|idx| MONTH_SHORT_NAMES.get(idx as usize))
        .copied()
        .ok_or(CalendarError::MonthOutOfRange(month))
}
