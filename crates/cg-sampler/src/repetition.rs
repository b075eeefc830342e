use std::collections::BTreeSet;

use crate::stage::LogitStage;

/// Penalizes tokens that already appear in a lane's sequence.
///
/// Every distinct token value in the history has its logit divided by
/// `penalty` exactly once, however many times it occurs. The division is
/// applied regardless of the logit's sign.
pub struct RepetitionPenalty {
    penalty: f32,
    seen: BTreeSet<u32>,
}

impl RepetitionPenalty {
    /// Build the penalty for the current state of one lane.
    ///
    /// - `penalty`: the divisor (1.0 = no penalty).
    /// - `history`: the lane's full sequence so far, prompt and control prefix included.
    pub fn new(penalty: f32, history: &[u32]) -> Self {
        Self {
            penalty,
            seen: history.iter().copied().collect(),
        }
    }

    /// Number of distinct tokens that will be penalized.
    pub fn distinct_tokens(&self) -> usize {
        self.seen.len()
    }
}

impl LogitStage for RepetitionPenalty {
    fn name(&self) -> &str {
        "repetition_penalty"
    }

    fn apply(&self, mut logits: Vec<f32>) -> Vec<f32> {
        if self.penalty == 1.0 {
            return logits;
        }
        for &token in &self.seen {
            if let Some(v) = logits.get_mut(token as usize) {
                *v /= self.penalty;
            }
        }
        logits
    }
}
