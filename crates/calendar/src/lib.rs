//! # Period Arithmetic
//!
//! Calendar helpers shared by the planner and the time-series aggregator: month and
//! year lengths, month/ISO-week boundaries and inclusive day iteration.
//!
//! Every function works on timezone-naive `chrono::NaiveDate` values. Callers are
//! expected to have normalized timestamps to calendar days already.

pub mod error;
pub mod period;
pub mod range;

pub use error::CalendarError;
pub use period::{
    days_in_month, days_in_year, first_day_of_month, inclusive_day_count, last_day_of_month,
    month_short_name, start_of_iso_week, MONTHS_PER_YEAR, WEEKS_PER_YEAR,
};
pub use range::{month_spans, year_spans, DateRange};
