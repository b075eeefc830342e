use cg_model::{ControlCodes, ScoringModel, TokenCodec};
use cg_sampler::{GenerateRequest, SamplingParams};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::error::{Result, RuntimeError};
use crate::types::{GenerateTextRequest, GenerateTextResponse, RuntimeSettings};

/// Owns the model, the codec, the control-code table and the random generator.
///
/// The generator is seeded once on construction and shared by every request
/// served by this context, so a fixed sequence of requests reproduces the same
/// outputs.
pub struct GenerationContext<M, C> {
    model: M,
    codec: C,
    control_codes: ControlCodes,
    settings: RuntimeSettings,
    rng: StdRng,
}

impl<M, C> GenerationContext<M, C>
where
    M: ScoringModel,
    C: TokenCodec,
{
    pub fn new(model: M, codec: C, control_codes: ControlCodes, settings: RuntimeSettings) -> Self {
        info!(
            seed = settings.seed,
            control_codes = control_codes.len(),
            vocab_size = model.vocab_size(),
            "generation context ready"
        );
        Self {
            rng: StdRng::seed_from_u64(settings.seed),
            model,
            codec,
            control_codes,
            settings,
        }
    }

    pub fn settings(&self) -> &RuntimeSettings {
        &self.settings
    }

    pub fn control_codes(&self) -> &ControlCodes {
        &self.control_codes
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Generate text conditioned on a prompt and a control code.
    pub fn generate_text(&mut self, request: &GenerateTextRequest) -> Result<GenerateTextResponse> {
        request.validate()?;
        let control = self
            .control_codes
            .token_id(&request.control_code)
            .map_err(|e| RuntimeError::InvalidArgument(e.to_string()))?;

        let prompt = self.codec.encode(&request.input_prompt)?;
        let sampling = GenerateRequest {
            prompt,
            control_prefix: Some(control),
            length: request.length,
            params: SamplingParams {
                temperature: request.temperature,
                top_k: self.settings.top_k,
                top_p: request.top_p,
                repetition_penalty: self.settings.repetition_penalty,
                num_lanes: self.settings.num_samples,
                ..Default::default()
            },
        };
        debug!(
            control_code = %request.control_code,
            prompt_tokens = sampling.prompt.len(),
            "generate_text"
        );

        let lanes = cg_sampler::generate(&mut self.model, &mut self.rng, &sampling)?;

        let mut samples = Vec::with_capacity(lanes.len());
        for lane in &lanes {
            let text = self.codec.decode(lane)?;
            samples.push(truncate_at_stop(text, self.settings.stop_token.as_deref()));
        }

        let last = samples.last().map(String::as_str).unwrap_or_default();
        Ok(GenerateTextResponse {
            generated_text: format!("{} {}", request.input_prompt, last),
            samples,
        })
    }
}

/// Cut `text` at the first occurrence of `stop`.
fn truncate_at_stop(mut text: String, stop: Option<&str>) -> String {
    if let Some(pos) = stop.filter(|s| !s.is_empty()).and_then(|s| text.find(s)) {
        text.truncate(pos);
    }
    text
}
