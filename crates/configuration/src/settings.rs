use crate::error::ConfigError;
use analytics::AggregationOptions;
use core_types::FunnelInputs;
use serde::Deserialize;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Funnel rates and the revenue goal the planner works from.
    pub funnel: FunnelInputs,
    /// Chart display choices. The whole section may be omitted.
    #[serde(default)]
    pub aggregation: AggregationOptions,
}

impl Config {
    /// Runs the planner's input validation over the `[funnel]` section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let errors = planner::validate_funnel_inputs(&self.funnel);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::InvalidFunnel(errors))
        }
    }
}
