use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    #[error("Invalid month {month} in year {year}")]
    InvalidMonth { year: i32, month: u32 },

    #[error("Month number {0} is outside 1-12")]
    MonthOutOfRange(u32),

    #[error("Date arithmetic left the supported calendar range near {0}")]
    OutOfRange(NaiveDate),

    #[error("Range end {end} is before range start {start}")]
    InvertedRange { start: NaiveDate, end: NaiveDate },
}
