use crate::error::PlannerError;
use crate::validation::validate_funnel_inputs;
use calendar::{MONTHS_PER_YEAR, WEEKS_PER_YEAR};
use core_types::{CalculatedTargets, DailyTargets, FunnelInputs, PeriodTargets, PipelineHealth};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Unrounded funnel quotients for a whole year.
#[derive(Debug, Clone, Copy)]
struct AnnualFunnel {
    deals: Decimal,
    opportunities: Decimal,
    leads: Decimal,
    revenue: Decimal,
}

/// A stateless calculator that turns a revenue goal into activity targets.
#[derive(Debug, Default)]
pub struct PlannerEngine {}

impl PlannerEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every validation problem as a human-readable string.
    pub fn validate(&self, inputs: &FunnelInputs) -> Vec<String> {
        validate_funnel_inputs(inputs)
    }

    /// Calculates targets for already validated inputs.
    pub fn calculate(&self, inputs: &FunnelInputs) -> Result<CalculatedTargets, PlannerError> {
        calculate_targets(inputs)
    }

    /// Validates, and only if that passes, calculates.
    ///
    /// # Returns
    ///
    /// `PlannerError::InvalidInput` carrying every validation message when the inputs
    /// are rejected. Nothing is calculated in that case.
    pub fn plan(&self, inputs: &FunnelInputs) -> Result<CalculatedTargets, PlannerError> {
        let errors = self.validate(inputs);
        if !errors.is_empty() {
            return Err(PlannerError::InvalidInput(errors));
        }
        self.calculate(inputs)
    }
}

/// The main entry point for the inverse-funnel calculation.
///
/// Expects input that `validate_funnel_inputs` accepted. A zero or negative rate,
/// deal size or day count is reported as a `PlannerError` rather than producing a
/// meaningless figure.
#[tracing::instrument(name = "calculate_targets", skip_all, fields(goal = %inputs.annual_revenue_goal))]
pub fn calculate_targets(inputs: &FunnelInputs) -> Result<CalculatedTargets, PlannerError> {
    let close_rate = rate_fraction(inputs.opportunity_to_close_rate, "opportunity_to_close_rate")?;
    let lead_rate = rate_fraction(inputs.lead_to_opportunity_rate, "lead_to_opportunity_rate")?;

    // --- 1. Walk the funnel backwards from revenue ---
    let deals = divide(inputs.annual_revenue_goal, inputs.average_deal_size, "average_deal_size")?;
    let opportunities = divide(deals, close_rate, "opportunity_to_close_rate")?;
    let leads = divide(opportunities, lead_rate, "lead_to_opportunity_rate")?;

    let funnel = AnnualFunnel {
        deals,
        opportunities,
        leads,
        revenue: inputs.annual_revenue_goal,
    };
    tracing::debug!(%deals, %opportunities, %leads, "Annual funnel quotients");

    // --- 2. Split each annual figure directly into periods ---
    let annual = PeriodTargets {
        deals: ceil_count(funnel.deals),
        opportunities: ceil_count(funnel.opportunities),
        leads: ceil_count(funnel.leads),
        revenue: funnel.revenue,
    };
    let monthly = period_targets(&funnel, Decimal::from(MONTHS_PER_YEAR), "months_per_year")?;
    let weekly = period_targets(&funnel, Decimal::from(WEEKS_PER_YEAR), "weeks_per_year")?;
    let daily = daily_targets(&funnel, inputs)?;

    // --- 3. Pipeline health ---
    let pipeline = pipeline_health(&funnel, inputs, close_rate)?;

    Ok(CalculatedTargets {
        annual,
        monthly,
        weekly,
        daily,
        pipeline,
    })
}

fn period_targets(
    funnel: &AnnualFunnel,
    periods: Decimal,
    field: &'static str,
) -> Result<PeriodTargets, PlannerError> {
    Ok(PeriodTargets {
        deals: ceil_count(divide(funnel.deals, periods, field)?),
        opportunities: ceil_count(divide(funnel.opportunities, periods, field)?),
        leads: ceil_count(divide(funnel.leads, periods, field)?),
        revenue: round_currency(divide(funnel.revenue, periods, field)?),
    })
}

fn daily_targets(funnel: &AnnualFunnel, inputs: &FunnelInputs) -> Result<DailyTargets, PlannerError> {
    let days = Decimal::from(inputs.working_days_per_year);
    let field = "working_days_per_year";

    let leads = ceil_count(divide(funnel.leads, days, field)?);
    let touches = |per_lead: Decimal, field: &'static str| {
        leads
            .checked_mul(per_lead)
            .map(ceil_count)
            .ok_or(PlannerError::Overflow(field))
    };

    Ok(DailyTargets {
        // Daily deals are usually below one; ceiling would always show 1.
        deals: divide(funnel.deals, days, field)?
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        opportunities: ceil_count(divide(funnel.opportunities, days, field)?),
        leads,
        revenue: round_currency(divide(funnel.revenue, days, field)?),
        calls: touches(inputs.calls_per_lead, "calls_per_lead")?,
        emails: touches(inputs.emails_per_lead, "emails_per_lead")?,
        texts: touches(inputs.texts_per_lead, "texts_per_lead")?,
    })
}

fn pipeline_health(
    funnel: &AnnualFunnel,
    inputs: &FunnelInputs,
    close_rate: Decimal,
) -> Result<PipelineHealth, PlannerError> {
    let coverage = divide(dec!(100), inputs.opportunity_to_close_rate, "opportunity_to_close_rate")?;
    let required = funnel
        .revenue
        .checked_mul(coverage)
        .ok_or(PlannerError::Overflow("required_pipeline_value"))?;

    let expected_revenue = funnel
        .opportunities
        .checked_mul(close_rate)
        .and_then(|won| won.checked_mul(inputs.average_deal_size))
        .ok_or(PlannerError::Overflow("sales_velocity"))?;
    let velocity = divide(
        expected_revenue,
        Decimal::from(inputs.sales_cycle_days),
        "sales_cycle_days",
    )?;

    Ok(PipelineHealth {
        coverage_ratio: coverage.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero),
        required_pipeline_value: round_currency(required),
        sales_velocity: round_currency(velocity),
    })
}

/// Converts a 0-100 percentage into a fraction, refusing zero and negatives.
fn rate_fraction(rate: Decimal, field: &'static str) -> Result<Decimal, PlannerError> {
    if rate <= Decimal::ZERO {
        tracing::warn!(field, %rate, "Planner called with a non-positive rate");
        return Err(PlannerError::NonPositiveRate(field));
    }
    Ok(rate / dec!(100))
}

fn divide(numerator: Decimal, divisor: Decimal, field: &'static str) -> Result<Decimal, PlannerError> {
    if divisor <= Decimal::ZERO {
        tracing::warn!(field, %divisor, "Planner called with a non-positive divisor");
        return Err(PlannerError::NonPositiveDivisor(field));
    }
    numerator
        .checked_div(divisor)
        .ok_or(PlannerError::Overflow(field))
}

/// Activity counts always round up: one extra call beats falling short.
fn ceil_count(value: Decimal) -> Decimal {
    value.ceil().normalize()
}

fn round_currency(value: Decimal) -> Decimal {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
}
