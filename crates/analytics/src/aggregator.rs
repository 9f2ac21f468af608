use crate::error::AnalyticsError;
use crate::granularity::select_granularity;
use calendar::{month_short_name, month_spans, year_spans, DateRange};
use chrono::{Datelike, Days, NaiveDate};
use core_types::{Bucket, DatedAmount, EmptyPeriodPolicy, Granularity, MonthLabelStyle};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const WEEK_LEN: u64 = 7;

/// Display and gap-handling choices for the month and year rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationOptions {
    #[serde(default)]
    pub month_labels: MonthLabelStyle,
    #[serde(default)]
    pub long_range_gaps: EmptyPeriodPolicy,
}

/// A stateless bucketing engine for dated amounts.
#[derive(Debug, Default)]
pub struct TimeSeriesAggregator {
    options: AggregationOptions,
}

/// Buckets `records` over `[start, end]` with the default options.
pub fn aggregate_time_series(
    records: &[DatedAmount],
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<Bucket>, AnalyticsError> {
    TimeSeriesAggregator::new().aggregate(records, start, end)
}

impl TimeSeriesAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: AggregationOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> AggregationOptions {
        self.options
    }

    /// The main entry point for bucketing.
    ///
    /// # Arguments
    ///
    /// * `records` - Dated amounts in any order. Records outside the range are ignored
    ///   and records sharing a date are summed.
    /// * `start`, `end` - The inclusive range to chart.
    ///
    /// # Returns
    ///
    /// Buckets in chronological order, each with the exact dates it covers.
    pub fn aggregate(
        &self,
        records: &[DatedAmount],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Bucket>, AnalyticsError> {
        let granularity = select_granularity(start, end)?;
        let daily = daily_totals(records, start, end)?;

        let buckets = match granularity {
            Granularity::CalendarMonth => {
                let label = month_short_name(start.month())?;
                vec![Bucket::new(label, start, end, sum_between(&daily, start, end)?)?]
            }
            Granularity::Day => day_buckets(&daily, start, end)?,
            Granularity::NumberedWeek | Granularity::DatedWeek => {
                week_buckets(&daily, start, end, granularity)?
            }
            Granularity::Month => self.month_buckets(&daily, start, end)?,
            Granularity::Year => self.year_buckets(&daily, start, end)?,
        };

        tracing::debug!(
            %start,
            %end,
            %granularity,
            records = records.len(),
            buckets = buckets.len(),
            "Aggregated time series"
        );
        Ok(buckets)
    }

    fn month_buckets(
        &self,
        daily: &BTreeMap<NaiveDate, Decimal>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Bucket>, AnalyticsError> {
        let with_year = self.options.month_labels == MonthLabelStyle::WithYearAcrossYears
            && start.year() != end.year();

        let mut buckets = Vec::new();
        for (from, to) in month_spans(start, end)? {
            if !self.keep_period(daily, from, to) {
                continue;
            }
            let month = month_short_name(from.month())?;
            let label = if with_year {
                format!("{month} {}", from.year())
            } else {
                month.to_string()
            };
            buckets.push(Bucket::new(label, from, to, sum_between(daily, from, to)?)?);
        }
        Ok(buckets)
    }

    fn year_buckets(
        &self,
        daily: &BTreeMap<NaiveDate, Decimal>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Bucket>, AnalyticsError> {
        let mut buckets = Vec::new();
        for (from, to) in year_spans(start, end)? {
            if !self.keep_period(daily, from, to) {
                continue;
            }
            let label = format!("{:04}", from.year());
            buckets.push(Bucket::new(label, from, to, sum_between(daily, from, to)?)?);
        }
        Ok(buckets)
    }

    /// Month and year buckets only exist where some non-zero amount was recorded,
    /// unless the caller asked for gaps to be filled.
    fn keep_period(&self, daily: &BTreeMap<NaiveDate, Decimal>, from: NaiveDate, to: NaiveDate) -> bool {
        match self.options.long_range_gaps {
            EmptyPeriodPolicy::Fill => true,
            EmptyPeriodPolicy::Skip => daily.range(from..=to).next().is_some(),
        }
    }
}

/// Sums in-range records per date and drops dates that net to zero.
fn daily_totals(
    records: &[DatedAmount],
    start: NaiveDate,
    end: NaiveDate,
) -> Result<BTreeMap<NaiveDate, Decimal>, AnalyticsError> {
    let mut daily: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for record in records.iter().filter(|r| start <= r.date && r.date <= end) {
        let total = daily.entry(record.date).or_insert(Decimal::ZERO);
        *total = total
            .checked_add(record.amount)
            .ok_or_else(|| AnalyticsError::Overflow(record.date.to_string()))?;
    }
    daily.retain(|_, total| !total.is_zero());
    Ok(daily)
}

fn sum_between(
    daily: &BTreeMap<NaiveDate, Decimal>,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Decimal, AnalyticsError> {
    daily
        .range(from..=to)
        .try_fold(Decimal::ZERO, |acc, (_, amount)| acc.checked_add(*amount))
        .ok_or_else(|| AnalyticsError::Overflow(format!("{from}..{to}")))
}

fn day_buckets(
    daily: &BTreeMap<NaiveDate, Decimal>,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<Bucket>, AnalyticsError> {
    DateRange::new(start, end)
        .map(|day| {
            let total = daily.get(&day).copied().unwrap_or(Decimal::ZERO);
            Bucket::new(day.format("%a").to_string(), day, day, total).map_err(AnalyticsError::from)
        })
        .collect()
}

/// Seven-day buckets counted from `start`; the last one may be shorter.
fn week_buckets(
    daily: &BTreeMap<NaiveDate, Decimal>,
    start: NaiveDate,
    end: NaiveDate,
    granularity: Granularity,
) -> Result<Vec<Bucket>, AnalyticsError> {
    let mut buckets = Vec::new();
    let mut from = start;
    let mut week = 1;

    loop {
        let week_end = from
            .checked_add_days(Days::new(WEEK_LEN - 1))
            .map_or(end, |d| d.min(end));
        let label = match granularity {
            Granularity::NumberedWeek => format!("Week {week}"),
            _ => from.format("%b %-d").to_string(),
        };
        buckets.push(Bucket::new(label, from, week_end, sum_between(daily, from, week_end)?)?);

        if week_end == end {
            break;
        }
        from = week_end
            .succ_opt()
            .ok_or(calendar::CalendarError::OutOfRange(week_end))?;
        week += 1;
    }

    Ok(buckets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(y: i32, m: u32, d: u32, amount: Decimal) -> DatedAmount {
        DatedAmount::new(date(y, m, d), amount)
    }

    fn labels(buckets: &[Bucket]) -> Vec<&str> {
        buckets.iter().map(|b| b.label.as_str()).collect()
    }

    #[test]
    fn test_exact_month_is_one_bucket() {
        let records = vec![
            record(2024, 3, 1, dec!(100)),
            record(2024, 3, 31, dec!(50)),
            record(2024, 4, 1, dec!(999)),
        ];
        let buckets = aggregate_time_series(&records, date(2024, 3, 1), date(2024, 3, 31)).unwrap();
        assert_eq!(
            buckets,
            vec![Bucket::new("Mar", date(2024, 3, 1), date(2024, 3, 31), dec!(150)).unwrap()]
        );
    }

    #[test]
    fn test_exact_month_without_data_still_has_its_bucket() {
        let buckets = aggregate_time_series(&[], date(2023, 2, 1), date(2023, 2, 28)).unwrap();
        assert_eq!(labels(&buckets), vec!["Feb"]);
        assert_eq!(buckets[0].total, Decimal::ZERO);
    }

    #[test]
    fn test_week_of_days_labels_weekdays() {
        // 2024-03-04 is a Monday.
        let records = vec![
            record(2024, 3, 5, dec!(10)),
            record(2024, 3, 5, dec!(15)),
            record(2024, 3, 10, dec!(7)),
        ];
        let buckets = aggregate_time_series(&records, date(2024, 3, 4), date(2024, 3, 10)).unwrap();
        assert_eq!(labels(&buckets), vec!["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]);
        assert_eq!(buckets[1].total, dec!(25));
        assert_eq!(buckets[6].total, dec!(7));
        assert_eq!(buckets[0].total, Decimal::ZERO);
    }

    #[test]
    fn test_short_range_uses_numbered_weeks() {
        let records = vec![record(2024, 3, 2, dec!(1)), record(2024, 3, 16, dec!(2))];
        let buckets = aggregate_time_series(&records, date(2024, 3, 2), date(2024, 3, 17)).unwrap();
        assert_eq!(labels(&buckets), vec!["Week 1", "Week 2", "Week 3"]);
        assert_eq!(buckets[0].start_date, date(2024, 3, 2));
        assert_eq!(buckets[0].end_date, date(2024, 3, 8));
        // Trailing partial week keeps its real, shorter end.
        assert_eq!(buckets[2].start_date, date(2024, 3, 16));
        assert_eq!(buckets[2].end_date, date(2024, 3, 17));
        assert_eq!(buckets[2].total, dec!(2));
    }

    #[test]
    fn test_medium_range_labels_weeks_by_start_date() {
        let buckets = aggregate_time_series(&[], date(2024, 1, 10), date(2024, 2, 29)).unwrap();
        assert_eq!(buckets.len(), 8);
        assert_eq!(buckets[0].label, "Jan 10");
        assert_eq!(buckets[3].label, "Jan 31");
        assert_eq!(buckets[7].label, "Feb 28");
        assert_eq!(buckets[7].end_date, date(2024, 2, 29));
    }

    #[test]
    fn test_long_range_groups_by_calendar_month() {
        let records = vec![
            record(2024, 1, 20, dec!(100)),
            record(2024, 1, 31, dec!(50)),
            record(2024, 3, 1, dec!(25)),
            record(2024, 4, 30, dec!(0)),
        ];
        let buckets = aggregate_time_series(&records, date(2024, 1, 15), date(2024, 5, 15)).unwrap();
        // February has no data and April only a zero-amount record.
        assert_eq!(labels(&buckets), vec!["Jan", "Mar"]);
        assert_eq!(buckets[0].start_date, date(2024, 1, 15));
        assert_eq!(buckets[0].end_date, date(2024, 1, 31));
        assert_eq!(buckets[0].total, dec!(150));
        assert_eq!(buckets[1].start_date, date(2024, 3, 1));
        assert_eq!(buckets[1].end_date, date(2024, 3, 31));
    }

    #[test]
    fn test_fill_policy_keeps_empty_months() {
        let aggregator = TimeSeriesAggregator::with_options(AggregationOptions {
            long_range_gaps: EmptyPeriodPolicy::Fill,
            ..AggregationOptions::default()
        });
        let records = vec![record(2024, 3, 1, dec!(25))];
        let buckets = aggregator.aggregate(&records, date(2024, 1, 15), date(2024, 5, 15)).unwrap();
        assert_eq!(labels(&buckets), vec!["Jan", "Feb", "Mar", "Apr", "May"]);
        assert_eq!(buckets[4].end_date, date(2024, 5, 15));
        assert_eq!(buckets[1].total, Decimal::ZERO);
    }

    #[test]
    fn test_month_labels_across_years() {
        let records = vec![record(2023, 12, 5, dec!(1)), record(2024, 12, 5, dec!(2))];
        let (start, end) = (date(2023, 12, 1), date(2024, 3, 31));

        let plain = aggregate_time_series(&records, start, end).unwrap();
        assert_eq!(labels(&plain), vec!["Dec"]);

        let aggregator = TimeSeriesAggregator::with_options(AggregationOptions {
            month_labels: MonthLabelStyle::WithYearAcrossYears,
            long_range_gaps: EmptyPeriodPolicy::Fill,
        });
        let labelled = aggregator.aggregate(&records, start, end).unwrap();
        assert_eq!(labels(&labelled), vec!["Dec 2023", "Jan 2024", "Feb 2024", "Mar 2024"]);
    }

    #[test]
    fn test_year_buckets_across_years() {
        let records = vec![record(2023, 12, 5, dec!(1)), record(2024, 12, 5, dec!(2))];
        // Dec 2023 through Dec 2024 is 397 days and buckets by year.
        let buckets = aggregate_time_series(&records, date(2023, 12, 1), date(2024, 12, 31)).unwrap();
        assert_eq!(labels(&buckets), vec!["2023", "2024"]);
        assert_eq!(buckets[0].end_date, date(2023, 12, 31));
        assert_eq!(buckets[1].start_date, date(2024, 1, 1));
    }

    #[test]
    fn test_repeated_month_names_without_year() {
        let records = vec![record(2023, 1, 20, dec!(1)), record(2024, 1, 5, dec!(2))];
        let buckets = aggregate_time_series(&records, date(2023, 1, 15), date(2024, 1, 14)).unwrap();
        assert_eq!(labels(&buckets), vec!["Jan", "Jan"]);
        assert_eq!(buckets[0].start_date, date(2023, 1, 15));
        assert_eq!(buckets[1].start_date, date(2024, 1, 1));
        assert_eq!(buckets[1].end_date, date(2024, 1, 14));
    }

    #[test]
    fn test_year_buckets_are_data_driven() {
        let records = vec![record(2021, 6, 1, dec!(10)), record(2023, 2, 1, dec!(30))];
        let buckets = aggregate_time_series(&records, date(2021, 1, 1), date(2023, 12, 31)).unwrap();
        assert_eq!(labels(&buckets), vec!["2021", "2023"]);
        assert_eq!(buckets[1].total, dec!(30));
    }

    #[test]
    fn test_offsetting_amounts_on_one_day_are_dropped() {
        let records = vec![record(2024, 2, 10, dec!(40)), record(2024, 2, 10, dec!(-40))];
        let buckets = aggregate_time_series(&records, date(2024, 1, 1), date(2024, 6, 30)).unwrap();
        assert!(buckets.is_empty());
    }

    #[test]
    fn test_input_order_does_not_matter() {
        let records = vec![
            record(2024, 3, 20, dec!(3)),
            record(2024, 3, 2, dec!(1)),
            record(2024, 3, 11, dec!(2)),
        ];
        let mut reversed = records.clone();
        reversed.reverse();
        let range = (date(2024, 3, 1), date(2024, 3, 25));
        assert_eq!(
            aggregate_time_series(&records, range.0, range.1).unwrap(),
            aggregate_time_series(&reversed, range.0, range.1).unwrap()
        );
    }

    #[test]
    fn test_inverted_range_is_an_error() {
        assert!(matches!(
            aggregate_time_series(&[], date(2024, 3, 2), date(2024, 3, 1)),
            Err(AnalyticsError::InvalidRange { .. })
        ));
    }
}
