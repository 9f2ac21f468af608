use crate::error::CoreError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Everything the planner needs to turn a revenue goal into activity targets.
///
/// Rates are stored as percentages in `0..=100` (e.g. `25` means 25%) and are only
/// converted to a fraction inside the calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunnelInputs {
    /// Target revenue for the year.
    pub annual_revenue_goal: Decimal,
    /// Revenue per won deal.
    pub average_deal_size: Decimal,
    pub working_days_per_year: u32,
    /// Average days from opportunity to close.
    pub sales_cycle_days: u32,
    pub lead_to_opportunity_rate: Decimal,
    pub opportunity_to_close_rate: Decimal,
    /// Touches required per lead.
    pub calls_per_lead: Decimal,
    pub emails_per_lead: Decimal,
    pub texts_per_lead: Decimal,
}

/// Funnel counts and revenue for one period (annual, monthly or weekly).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodTargets {
    pub deals: Decimal,
    pub opportunities: Decimal,
    pub leads: Decimal,
    pub revenue: Decimal,
}

/// Per-working-day targets, including the touches a rep has to make.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTargets {
    /// Kept as a two-decimal fraction; usually below one.
    pub deals: Decimal,
    pub opportunities: Decimal,
    pub leads: Decimal,
    pub revenue: Decimal,
    pub calls: Decimal,
    pub emails: Decimal,
    pub texts: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineHealth {
    /// Multiple of the goal that must sit in open pipeline. One decimal place.
    pub coverage_ratio: Decimal,
    pub required_pipeline_value: Decimal,
    /// Expected revenue per day from the pipeline.
    pub sales_velocity: Decimal,
}

/// The full target hierarchy derived from a `FunnelInputs`.
///
/// Computed fresh on every call and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatedTargets {
    pub annual: PeriodTargets,
    pub monthly: PeriodTargets,
    pub weekly: PeriodTargets,
    pub daily: DailyTargets,
    pub pipeline: PipelineHealth,
}

/// A single dated amount fed to the aggregator, e.g. one logged sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatedAmount {
    pub date: NaiveDate,
    pub amount: Decimal,
}

impl DatedAmount {
    pub fn new(date: NaiveDate, amount: Decimal) -> Self {
        Self { date, amount }
    }
}

/// A contiguous, inclusive date range with the summed amount of the records in it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    pub label: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total: Decimal,
}

impl Bucket {
    /// Creates a bucket, rejecting one whose end precedes its start.
    pub fn new(
        label: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        total: Decimal,
    ) -> Result<Self, CoreError> {
        let label = label.into();
        if end_date < start_date {
            return Err(CoreError::InvertedBucket {
                label,
                start: start_date,
                end: end_date,
            });
        }
        Ok(Self {
            label,
            start_date,
            end_date,
            total,
        })
    }

    /// Returns true if `date` falls inside this bucket (both ends inclusive).
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// Number of calendar days covered, counting both ends.
    pub fn day_count(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_bucket_rejects_inverted_range() {
        let err = Bucket::new("Mar", date(2024, 3, 31), date(2024, 3, 1), dec!(0)).unwrap_err();
        assert!(matches!(err, CoreError::InvertedBucket { .. }));
    }

    #[test]
    fn test_bucket_contains_both_ends() {
        let bucket = Bucket::new("Week 1", date(2024, 3, 1), date(2024, 3, 7), dec!(10)).unwrap();
        assert!(bucket.contains(date(2024, 3, 1)));
        assert!(bucket.contains(date(2024, 3, 7)));
        assert!(!bucket.contains(date(2024, 3, 8)));
        assert_eq!(bucket.day_count(), 7);
    }

    #[test]
    fn test_funnel_inputs_accept_numbers_and_strings() {
        let json = r#"{
            "annual_revenue_goal": 500000,
            "average_deal_size": "5000",
            "working_days_per_year": 250,
            "sales_cycle_days": 30,
            "lead_to_opportunity_rate": 25,
            "opportunity_to_close_rate": 25.5,
            "calls_per_lead": 3,
            "emails_per_lead": 5,
            "texts_per_lead": 2
        }"#;
        let inputs: FunnelInputs = serde_json::from_str(json).unwrap();
        assert_eq!(inputs.annual_revenue_goal, dec!(500000));
        assert_eq!(inputs.average_deal_size, dec!(5000));
        assert_eq!(inputs.opportunity_to_close_rate, dec!(25.5));
    }
}
