//! # Goal-to-Activity Planner
//!
//! Turns a single annual revenue goal plus funnel conversion rates into a hierarchy of
//! annual, monthly, weekly and daily activity targets, using inverse-funnel arithmetic.
//!
//! ## Architectural Principles
//!
//! - **Pure logic:** no I/O and no state. The same inputs always give the same targets.
//! - **Validate, then calculate:** `validate_funnel_inputs` reports every problem as a
//!   human-readable string. `calculate_targets` assumes validated input and returns a
//!   typed `PlannerError` instead of a nonsensical number when that precondition is
//!   broken.
//!
//! ## Public API
//!
//! - `validate_funnel_inputs` / `calculate_targets`: the two entry points.
//! - `PlannerEngine`: a stateless wrapper that also offers a one-shot `plan`.
//! - `PlannerError`: the error type for precondition and overflow failures.

pub mod engine;
pub mod error;
pub mod validation;

pub use engine::{calculate_targets, PlannerEngine};
pub use error::PlannerError;
pub use validation::{validate_funnel_inputs, InputIssue};
