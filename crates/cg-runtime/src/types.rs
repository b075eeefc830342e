use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RuntimeError};

/// Accepted range for `GenerateTextRequest::length`.
pub const LENGTH_RANGE: RangeInclusive<i64> = 20..=500;
/// Accepted range for `GenerateTextRequest::temperature`.
pub const TEMPERATURE_RANGE: RangeInclusive<f32> = 0.0..=1.0;
/// Accepted range for `GenerateTextRequest::top_p`.
pub const TOP_P_RANGE: RangeInclusive<f32> = 0.0..=1.0;

/// Input of the text generation command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateTextRequest {
    /// Text the generated continuation is conditioned on.
    pub input_prompt: String,
    /// Name of the domain control code, e.g. "Politics".
    pub control_code: String,
    /// Number of tokens to generate.
    pub length: i64,
    /// Sampling temperature. Lower values are more grammatical, higher more varied.
    pub temperature: f32,
    /// Cumulative probability of the token nucleus to sample from.
    pub top_p: f32,
}

impl Default for GenerateTextRequest {
    fn default() -> Self {
        Self {
            input_prompt: String::new(),
            control_code: "Politics".to_string(),
            length: 20,
            temperature: 0.7,
            top_p: 0.9,
        }
    }
}

impl GenerateTextRequest {
    pub fn new(input_prompt: impl Into<String>) -> Self {
        Self {
            input_prompt: input_prompt.into(),
            ..Default::default()
        }
    }

    /// Check the request against the command's input bounds.
    pub fn validate(&self) -> Result<()> {
        if self.input_prompt.is_empty() {
            return Err(RuntimeError::InvalidArgument(
                "input_prompt must not be empty".to_string(),
            ));
        }
        if !LENGTH_RANGE.contains(&self.length) {
            return Err(RuntimeError::InvalidArgument(format!(
                "length must be in {:?}, got {}",
                LENGTH_RANGE, self.length
            )));
        }
        if !TEMPERATURE_RANGE.contains(&self.temperature) {
            return Err(RuntimeError::InvalidArgument(format!(
                "temperature must be in {:?}, got {}",
                TEMPERATURE_RANGE, self.temperature
            )));
        }
        if !TOP_P_RANGE.contains(&self.top_p) {
            return Err(RuntimeError::InvalidArgument(format!(
                "top_p must be in {:?}, got {}",
                TOP_P_RANGE, self.top_p
            )));
        }
        Ok(())
    }
}

/// Output of the text generation command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateTextResponse {
    /// The prompt followed by the continuation of the last sample.
    pub generated_text: String,
    /// Decoded continuation of every sample, prompt excluded.
    pub samples: Vec<String>,
}

/// Settings fixed for the lifetime of a deployment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeSettings {
    pub repetition_penalty: f32,
    pub top_k: i64,
    /// Number of independent samples generated per request.
    pub num_samples: usize,
    /// Seed of the generator shared by every request of the context.
    pub seed: u64,
    /// Decoded text is cut at the first occurrence of this string.
    pub stop_token: Option<String>,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self {
            repetition_penalty: 1.2,
            top_k: 0,
            num_samples: 1,
            seed: 42,
            stop_token: None,
        }
    }
}
