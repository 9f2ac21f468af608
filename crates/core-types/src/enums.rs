use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The bucket size the aggregator picked for a date range.
///
/// Variants are listed in rule priority order: an exact calendar month wins over
/// everything else, then the range length decides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    /// The range is exactly one calendar month. One bucket, labelled "Mar".
    CalendarMonth,
    /// 1 to 7 days. One bucket per day, labelled "Mon".
    Day,
    /// 8 to 30 days. Seven-day buckets labelled "Week 1", "Week 2", ...
    NumberedWeek,
    /// 31 to 90 days. Seven-day buckets labelled by their first day, "Mar 4".
    DatedWeek,
    /// 91 to 365 days. Calendar-month buckets labelled "Mar".
    Month,
    /// More than 365 days. Calendar-year buckets labelled "2024".
    Year,
}

impl Granularity {
    /// Whether buckets are laid out over the whole range regardless of data
    /// (`true`) or only where non-zero records exist (`false`, unless the caller
    /// asks for gaps to be filled).
    pub fn is_grid_driven(&self) -> bool {
        matches!(
            self,
            Granularity::CalendarMonth
                | Granularity::Day
                | Granularity::NumberedWeek
                | Granularity::DatedWeek
        )
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Granularity::CalendarMonth => "calendar month",
            Granularity::Day => "day",
            Granularity::NumberedWeek => "week",
            Granularity::DatedWeek => "week (dated)",
            Granularity::Month => "month",
            Granularity::Year => "year",
        };
        f.write_str(name)
    }
}

/// How month buckets are labelled when a range crosses a year boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonthLabelStyle {
    /// "Dec", even if two buckets in the same series are both December.
    #[default]
    MonthOnly,
    /// "Dec 2023" / "Dec 2024", but only when the range spans more than one year.
    WithYearAcrossYears,
}

impl FromStr for MonthLabelStyle {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "month_only" | "month-only" => Ok(MonthLabelStyle::MonthOnly),
            "with_year_across_years" | "with-year-across-years" => {
                Ok(MonthLabelStyle::WithYearAcrossYears)
            }
            other => Err(CoreError::InvalidInput(
                "month_labels".to_string(),
                format!("unknown style '{other}'"),
            )),
        }
    }
}

/// What to do with months/years inside the range that have no non-zero records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyPeriodPolicy {
    /// Emit buckets only for periods that carry data.
    #[default]
    Skip,
    /// Emit a zero-total bucket for every period the range touches.
    Fill,
}

impl FromStr for EmptyPeriodPolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "skip" => Ok(EmptyPeriodPolicy::Skip),
            "fill" => Ok(EmptyPeriodPolicy::Fill),
            other => Err(CoreError::InvalidInput(
                "long_range_gaps".to_string(),
                format!("unknown policy '{other}'"),
            )),
        }
    }
}
