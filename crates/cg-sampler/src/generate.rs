use cg_model::ScoringModel;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::length::resolve_length;
use crate::params::SamplingParams;
use crate::sequence::SequenceSampler;

/// One generation request over token IDs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Prompt tokens.
    pub prompt: Vec<u32>,
    /// Token prepended to the prompt, e.g. a domain control code.
    #[serde(default)]
    pub control_prefix: Option<u32>,
    /// Number of tokens to generate. Negative means as many as allowed.
    pub length: i64,
    #[serde(default)]
    pub params: SamplingParams,
}

impl GenerateRequest {
    /// The sequence every lane starts from.
    pub fn context(&self) -> Vec<u32> {
        let mut context = Vec::with_capacity(self.prompt.len() + 1);
        context.extend(self.control_prefix);
        context.extend_from_slice(&self.prompt);
        context
    }
}

/// Generate a continuation for every lane of the request.
///
/// Returns one token sequence per lane with the context stripped. Any failure
/// discards all lanes.
pub fn generate<M, R>(model: &mut M, rng: &mut R, request: &GenerateRequest) -> Result<Vec<Vec<u32>>>
where
    M: ScoringModel + ?Sized,
    R: Rng + ?Sized,
{
    request.params.validate()?;
    let length = resolve_length(request.length, model.max_positions());
    let context = request.context();

    debug!(
        context_len = context.len(),
        length,
        lanes = request.params.num_lanes,
        temperature = request.params.temperature,
        top_k = request.params.top_k,
        top_p = request.params.top_p,
        repetition_penalty = request.params.repetition_penalty,
        "starting generation"
    );

    let mut sampler = SequenceSampler::new(context, &request.params)?;
    sampler.run(model, rng, length)?;
    Ok(sampler.into_generated())
}
