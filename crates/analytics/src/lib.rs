//! # Adaptive Time-Series Aggregator
//!
//! Groups dated amounts (e.g. logged sales) into day, week, month or year buckets,
//! picking the granularity from the length of the requested range. Every bucket keeps
//! the exact dates it covers so a caller can drill back down into the source records.
//!
//! ## Architectural Principles
//!
//! - **Pure logic:** depends only on `core-types` and `calendar`. No storage, no I/O.
//! - **Stateless calculation:** `TimeSeriesAggregator` holds only display options. The
//!   input slice is never mutated or retained.
//! - **Two bucketing paths:** day and week grids are laid over the whole range whether
//!   or not data exists; month and year buckets are built from the periods that carry
//!   non-zero data unless `EmptyPeriodPolicy::Fill` is requested.
//!
//! ## Public API
//!
//! - `aggregate_time_series` / `TimeSeriesAggregator`: bucketing.
//! - `select_granularity`: which bucketing rule a range falls under.
//! - `drill_down`: the source records behind one bucket.
//! - `revenue_pace` / `PaceReport`: buckets compared with a pro-rated annual goal.

pub mod aggregator;
pub mod drilldown;
pub mod error;
pub mod granularity;
pub mod report;

pub use aggregator::{aggregate_time_series, AggregationOptions, TimeSeriesAggregator};
pub use drilldown::drill_down;
pub use error::AnalyticsError;
pub use granularity::select_granularity;
pub use report::{revenue_pace, BucketPace, PaceReport};
