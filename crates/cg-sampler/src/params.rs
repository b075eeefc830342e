use serde::{Deserialize, Serialize};

use crate::error::{Result, SamplerError};

fn default_filter_value() -> f32 {
    f32::NEG_INFINITY
}

/// Parameters controlling one generation run.
///
/// Signed and floating fields are kept loose here so that out-of-range values
/// coming from a host can be rejected by [`SamplingParams::validate`] instead of
/// being silently clamped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingParams {
    /// Temperature for logit scaling. 0.0 = greedy.
    pub temperature: f32,
    /// Top-K filtering. 0 = disabled.
    pub top_k: i64,
    /// Nucleus threshold. 0.0 = disabled, otherwise in (0, 1].
    pub top_p: f32,
    /// Divisor applied to logits of tokens already in the sequence. 1.0 = none.
    pub repetition_penalty: f32,
    /// Number of independent sample lanes sharing the prompt.
    pub num_lanes: usize,
    /// Value written over excluded logits.
    #[serde(skip, default = "default_filter_value")]
    pub filter_value: f32,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            temperature: 1.0,
            top_k: 0,
            top_p: 0.0,
            repetition_penalty: 1.0,
            num_lanes: 1,
            filter_value: default_filter_value(),
        }
    }
}

impl SamplingParams {
    pub fn greedy() -> Self {
        Self {
            temperature: 0.0,
            ..Default::default()
        }
    }

    pub fn is_greedy(&self) -> bool {
        self.temperature == 0.0
    }

    /// Reject parameter combinations that cannot produce a valid run.
    pub fn validate(&self) -> Result<()> {
        if self.top_k < 0 {
            return Err(SamplerError::InvalidConfig(format!(
                "top_k must be >= 0, got {}",
                self.top_k
            )));
        }
        if !(0.0..=1.0).contains(&self.top_p) {
            return Err(SamplerError::InvalidConfig(format!(
                "top_p must be in [0, 1], got {}",
                self.top_p
            )));
        }
        if !(self.repetition_penalty.is_finite() && self.repetition_penalty >= 1.0) {
            return Err(SamplerError::InvalidConfig(format!(
                "repetition_penalty must be a finite value >= 1.0, got {}",
                self.repetition_penalty
            )));
        }
        if !(self.temperature.is_finite() && self.temperature >= 0.0) {
            return Err(SamplerError::InvalidConfig(format!(
                "temperature must be a finite value >= 0, got {}",
                self.temperature
            )));
        }
        if self.num_lanes < 1 {
            return Err(SamplerError::InvalidConfig(
                "num_lanes must be at least 1".to_string(),
            ));
        }
        if self.filter_value.is_nan() || self.filter_value == f32::INFINITY {
            return Err(SamplerError::InvalidConfig(format!(
                "filter_value must be below every retained logit, got {}",
                self.filter_value
            )));
        }
        Ok(())
    }
}
