pub mod enums;
pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{EmptyPeriodPolicy, Granularity, MonthLabelStyle};
pub use error::CoreError;
pub use structs::{
    Bucket, CalculatedTargets, DailyTargets, DatedAmount, FunnelInputs, PeriodTargets,
    PipelineHealth,
};
