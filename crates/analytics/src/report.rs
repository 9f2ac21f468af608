use crate::error::AnalyticsError;
use calendar::days_in_year;
use chrono::{Datelike, NaiveDate};
use core_types::Bucket;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// One bucket's actual total next to its share of the annual revenue goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketPace {
    pub label: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub actual: Decimal,
    pub target: Decimal,
    pub attainment_pct: Option<Decimal>, // None when the target rounds to zero
}

/// Goal pace for a whole bucket series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaceReport {
    pub buckets: Vec<BucketPace>,
    pub total_actual: Decimal,
    pub total_target: Decimal,
    pub attainment_pct: Option<Decimal>,
}

/// Compares each bucket with the slice of `annual_goal` its days account for.
///
/// A bucket's target is `annual_goal * days / days_in_year`, using the year the
/// bucket starts in, rounded to whole currency units.
pub fn revenue_pace(buckets: &[Bucket], annual_goal: Decimal) -> Result<PaceReport, AnalyticsError> {
    let mut rows = Vec::with_capacity(buckets.len());
    let mut total_actual = Decimal::ZERO;
    let mut total_target = Decimal::ZERO;

    for bucket in buckets {
        let year_days = Decimal::from(days_in_year(bucket.start_date.year())?);
        let target = annual_goal
            .checked_mul(Decimal::from(bucket.day_count()))
            .and_then(|share| share.checked_div(year_days))
            .ok_or_else(|| AnalyticsError::Overflow(bucket.label.clone()))?
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

        total_actual = total_actual
            .checked_add(bucket.total)
            .ok_or_else(|| AnalyticsError::Overflow("total_actual".to_string()))?;
        total_target = total_target
            .checked_add(target)
            .ok_or_else(|| AnalyticsError::Overflow("total_target".to_string()))?;

        rows.push(BucketPace {
            label: bucket.label.clone(),
            start_date: bucket.start_date,
            end_date: bucket.end_date,
            actual: bucket.total,
            target,
            attainment_pct: attainment(bucket.total, target),
        });
    }

    Ok(PaceReport {
        buckets: rows,
        total_actual,
        total_target,
        attainment_pct: attainment(total_actual, total_target),
    })
}

fn attainment(actual: Decimal, target: Decimal) -> Option<Decimal> {
    if target.is_zero() {
        return None;
    }
    actual
        .checked_div(target)
        .and_then(|ratio| ratio.checked_mul(dec!(100)))
        .map(|pct| pct.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_month_targets_are_prorated_by_days() {
        let buckets = vec![
            Bucket::new("Jan", date(2023, 1, 1), date(2023, 1, 31), dec!(40000)).unwrap(),
            Bucket::new("Feb", date(2023, 2, 1), date(2023, 2, 28), dec!(45000)).unwrap(),
        ];
        let report = revenue_pace(&buckets, dec!(365000)).unwrap();

        assert_eq!(report.buckets[0].target, dec!(31000));
        assert_eq!(report.buckets[1].target, dec!(28000));
        // 40000 / 31000 = 129.03%
        assert_eq!(report.buckets[0].attainment_pct, Some(dec!(129.0)));
        assert_eq!(report.total_actual, dec!(85000));
        assert_eq!(report.total_target, dec!(59000));
        assert_eq!(report.attainment_pct, Some(dec!(144.1)));
    }

    #[test]
    fn test_leap_year_uses_366_days() {
        let buckets = vec![Bucket::new("Mon", date(2024, 1, 1), date(2024, 1, 1), dec!(0)).unwrap()];
        let report = revenue_pace(&buckets, dec!(366000)).unwrap();
        assert_eq!(report.buckets[0].target, dec!(1000));
        assert_eq!(report.buckets[0].attainment_pct, Some(dec!(0)));
    }

    #[test]
    fn test_zero_target_has_no_attainment() {
        let buckets = vec![Bucket::new("Mon", date(2024, 1, 1), date(2024, 1, 1), dec!(10)).unwrap()];
        let report = revenue_pace(&buckets, dec!(100)).unwrap();
        assert_eq!(report.buckets[0].target, dec!(0));
        assert_eq!(report.buckets[0].attainment_pct, None);
    }

    #[test]
    fn test_empty_series() {
        let report = revenue_pace(&[], dec!(100000)).unwrap();
        assert!(report.buckets.is_empty());
        assert_eq!(report.attainment_pct, None);
    }
}
