use core_types::FunnelInputs;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use thiserror::Error;

/// A single problem found in a `FunnelInputs`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputIssue {
    #[error("Annual revenue goal must be greater than 0")]
    NonPositiveRevenueGoal,

    #[error("Average deal size must be greater than 0")]
    NonPositiveDealSize,

    #[error("Working days per year must be between 1 and 365 (got {0})")]
    WorkingDaysOutOfRange(u32),

    #[error("Sales cycle must be at least 1 day")]
    SalesCycleTooShort,

    #[error("{label} must be greater than 0 and at most 100 (got {value})")]
    RateOutOfRange { label: &'static str, value: Decimal },

    #[error("{label} cannot be negative (got {value})")]
    NegativeTouches { label: &'static str, value: Decimal },
}

/// Checks every field and collects all issues. An empty list means the inputs can be
/// handed to `calculate_targets`.
pub fn validate_funnel_inputs(inputs: &FunnelInputs) -> Vec<String> {
    collect_issues(inputs)
        .iter()
        .map(ToString::to_string)
        .collect()
}

pub(crate) fn collect_issues(inputs: &FunnelInputs) -> Vec<InputIssue> {
    let mut issues = Vec::new();

    if inputs.annual_revenue_goal <= Decimal::ZERO {
        issues.push(InputIssue::NonPositiveRevenueGoal);
    }
    if inputs.average_deal_size <= Decimal::ZERO {
        issues.push(InputIssue::NonPositiveDealSize);
    }
    if !(1..=365).contains(&inputs.working_days_per_year) {
        issues.push(InputIssue::WorkingDaysOutOfRange(inputs.working_days_per_year));
    }
    if inputs.sales_cycle_days < 1 {
        issues.push(InputIssue::SalesCycleTooShort);
    }

    let rates = [
        ("Lead to opportunity rate", inputs.lead_to_opportunity_rate),
        ("Opportunity to close rate", inputs.opportunity_to_close_rate),
    ];
    for (label, value) in rates {
        if value <= Decimal::ZERO || value > dec!(100) {
            issues.push(InputIssue::RateOutOfRange { label, value });
        }
    }

    let touches = [
        ("Calls per lead", inputs.calls_per_lead),
        ("Emails per lead", inputs.emails_per_lead),
        ("Texts per lead", inputs.texts_per_lead),
    ];
    for (label, value) in touches {
        if value < Decimal::ZERO {
            issues.push(InputIssue::NegativeTouches { label, value });
        }
    }

    issues
}
