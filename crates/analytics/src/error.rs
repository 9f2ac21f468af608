use calendar::CalendarError;
use chrono::NaiveDate;
use core_types::CoreError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyticsError {
    #[error("Invalid date range: end {end} is before start {start}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("Calendar error: {0}")]
    Calendar(#[from] CalendarError),

    #[error("Invalid bucket: {0}")]
    Bucket(#[from] CoreError),

    #[error("Calculation error: Decimal overflow while summing '{0}'")]
    Overflow(String),
}
