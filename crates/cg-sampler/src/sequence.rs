use cg_model::ScoringModel;
use rand::Rng;
use tracing::{error, trace};

use crate::error::{Result, SamplerError};
use crate::filter::DistributionFilter;
use crate::params::SamplingParams;
use crate::repetition::RepetitionPenalty;
use crate::select::Selection;
use crate::stage::LogitStage;
use crate::temperature::Temperature;

/// Drives generation over a fixed set of lanes that share one context.
///
/// Each call to [`SequenceSampler::step`] scores every lane, penalizes,
/// filters, selects and appends exactly one token per lane. Steps are the
/// only points where a caller can stop a run.
pub struct SequenceSampler {
    lanes: Vec<Vec<u32>>,
    context_len: usize,
    repetition_penalty: f32,
    temperature: Temperature,
    filter: DistributionFilter,
    selection: Selection,
    steps: usize,
}

impl SequenceSampler {
    /// Create a sampler whose lanes all start as a copy of `context`.
    pub fn new(context: Vec<u32>, params: &SamplingParams) -> Result<Self> {
        params.validate()?;
        if context.is_empty() {
            return Err(SamplerError::InvalidConfig(
                "context must contain at least one token".to_string(),
            ));
        }

        let context_len = context.len();
        Ok(Self {
            lanes: vec![context; params.num_lanes],
            context_len,
            repetition_penalty: params.repetition_penalty,
            temperature: Temperature::new(params.temperature),
            filter: DistributionFilter::from_params(params),
            selection: Selection::for_temperature(params.temperature),
            steps: 0,
        })
    }

    /// Number of steps taken so far.
    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn num_lanes(&self) -> usize {
        self.lanes.len()
    }

    /// Full sequences, context included.
    pub fn lanes(&self) -> &[Vec<u32>] {
        &self.lanes
    }

    /// Tokens generated so far in each lane, context excluded.
    pub fn generated(&self) -> Vec<Vec<u32>> {
        self.lanes
            .iter()
            .map(|lane| lane[self.context_len..].to_vec())
            .collect()
    }

    pub fn into_lanes(self) -> Vec<Vec<u32>> {
        self.lanes
    }

    pub fn into_generated(self) -> Vec<Vec<u32>> {
        let context_len = self.context_len;
        self.lanes
            .into_iter()
            .map(|mut lane| lane.split_off(context_len))
            .collect()
    }

    /// Run one generation step across all lanes.
    ///
    /// On error no lane is extended, and the sampler should be discarded.
    pub fn step<M, R>(&mut self, model: &mut M, rng: &mut R) -> Result<()>
    where
        M: ScoringModel + ?Sized,
        R: Rng + ?Sized,
    {
        let vocab_size = model.vocab_size();
        if self.steps == 0 {
            self.check_context(vocab_size)?;
        }

        let rows = {
            let histories: Vec<&[u32]> = self.lanes.iter().map(Vec::as_slice).collect();
            model.score_batch(&histories)?
        };
        if rows.len() != self.lanes.len() {
            return Err(SamplerError::BatchSize {
                expected: self.lanes.len(),
                got: rows.len(),
            });
        }

        let mut next = Vec::with_capacity(self.lanes.len());
        for (lane, row) in rows.into_iter().enumerate() {
            check_row(lane, &row, vocab_size)?;

            let row = self.temperature.apply(row);
            let row = RepetitionPenalty::new(self.repetition_penalty, &self.lanes[lane]).apply(row);
            let row = self.filter.apply(row);

            if self.filter.survivors(&row) == 0 {
                error!(lane, step = self.steps, "every token was excluded");
                return Err(SamplerError::InvariantViolation(format!(
                    "lane {} has no surviving tokens at step {}",
                    lane, self.steps
                )));
            }

            next.push(self.selection.select(&row, rng)?);
        }

        for (lane, token) in self.lanes.iter_mut().zip(next.iter()) {
            lane.push(*token);
        }
        self.steps += 1;
        trace!(step = self.steps, tokens = ?next, "sampled step");
        Ok(())
    }

    /// Run `length` steps.
    pub fn run<M, R>(&mut self, model: &mut M, rng: &mut R, length: usize) -> Result<()>
    where
        M: ScoringModel + ?Sized,
        R: Rng + ?Sized,
    {
        for _ in 0..length {
            self.step(model, rng)?;
        }
        Ok(())
    }

    fn check_context(&self, vocab_size: usize) -> Result<()> {
        let context = &self.lanes[0][..self.context_len];
        if let Some(&token) = context.iter().find(|&&t| t as usize >= vocab_size) {
            return Err(SamplerError::InvalidConfig(format!(
                "context token {} is outside the vocabulary of size {}",
                token, vocab_size
            )));
        }
        Ok(())
    }
}

fn check_row(lane: usize, row: &[f32], vocab_size: usize) -> Result<()> {
    if row.len() != vocab_size || row.is_empty() {
        return Err(SamplerError::MalformedScores {
            lane,
            expected: vocab_size,
            got: row.len(),
        });
    }
    if let Some(index) = row.iter().position(|v| !v.is_finite()) {
        return Err(SamplerError::NonFiniteScore { lane, index });
    }
    Ok(())
}
