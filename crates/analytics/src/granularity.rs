use crate::error::AnalyticsError;
use calendar::{inclusive_day_count, last_day_of_month};
use chrono::{Datelike, NaiveDate};
use core_types::Granularity;

/// Picks the bucketing rule for `[start, end]`. First match wins:
///
/// 1. exactly one calendar month -> `CalendarMonth`
/// 2. up to 7 days -> `Day`
/// 3. 8 to 30 days -> `NumberedWeek`
/// 4. 31 to 90 days -> `DatedWeek`
/// 5. 91 to 365 days -> `Month`
/// 6. anything longer -> `Year`
pub fn select_granularity(start: NaiveDate, end: NaiveDate) -> Result<Granularity, AnalyticsError> {
    if end < start {
        return Err(AnalyticsError::InvalidRange { start, end });
    }

    if start.day() == 1 && end == last_day_of_month(start)? {
        return Ok(Granularity::CalendarMonth);
    }

    let granularity = match inclusive_day_count(start, end)? {
        ..=7 => Granularity::Day,
        8..=30 => Granularity::NumberedWeek,
        31..=90 => Granularity::DatedWeek,
        91..=365 => Granularity::Month,
        _ => Granularity::Year,
    };
    Ok(granularity)
}
