use crate::error::{PipelineError, PipelineResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// Static settings for one pipeline instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Slots in the sample channel and entries in the result buffer
    pub capacity: usize,

    pub sampler_period_ms: u64,

    pub transformer_period_ms: u64,

    /// Polling period of the command reader
    pub control_period_ms: u64,

    /// Fixed RNG seed; drawn from OS entropy when absent
    pub seed: Option<u64>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            capacity: 10,
            sampler_period_ms: 1,
            transformer_period_ms: 100,
            control_period_ms: 1,
            seed: None,
        }
    }
}

impl PipelineConfig {
    /// Parse from JSON, either a bare object or one nested under `pipeline_config`.
    pub fn from_json(config: Value) -> PipelineResult<Self> {
        let section = config.get("pipeline_config").cloned().unwrap_or(config);

        let parsed: Self = serde_json::from_value(section)
            .map_err(|e| PipelineError::InvalidConfig(e.to_string()))?;
        parsed.validate()?;
        Ok(parsed)
    }

    pub fn validate(&self) -> PipelineResult<()> {
        // Capacity is checked when the channel is allocated
        for (name, period) in [
            ("sampler_period_ms", self.sampler_period_ms),
            ("transformer_period_ms", self.transformer_period_ms),
            ("control_period_ms", self.control_period_ms),
        ] {
            if period == 0 {
                return Err(PipelineError::InvalidConfig(format!(
                    "{} must be non-zero",
                    name
                )));
            }
        }

        Ok(())
    }

    pub fn sampler_period(&self) -> Duration {
        Duration::from_millis(self.sampler_period_ms)
    }

    pub fn transformer_period(&self) -> Duration {
        Duration::from_millis(self.transformer_period_ms)
    }

    pub fn control_period(&self) -> Duration {
        Duration::from_millis(self.control_period_ms)
    }
}
