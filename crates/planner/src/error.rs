use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlannerError {
    /// A conversion rate was zero or negative. Callers must validate first.
    #[error("Division by non-positive rate: '{0}'")]
    NonPositiveRate(&'static str),

    #[error("Division by non-positive value: '{0}'")]
    NonPositiveDivisor(&'static str),

    #[error("Decimal overflow while calculating '{0}'")]
    Overflow(&'static str),

    #[error("Invalid funnel inputs: {}", .0.join("; "))]
    InvalidInput(Vec<String>),
}
