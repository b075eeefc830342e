use crate::select::softmax;
use crate::stage::LogitStage;

/// Nucleus filtering: keeps the smallest prefix of the probability-sorted
/// vocabulary whose cumulative probability exceeds `p`.
///
/// A sorted position is excluded once the mass *before* it already exceeds
/// `p`, so the token that crosses the threshold is kept, and the most likely
/// token is always kept.
pub struct TopP {
    p: f32,
    filter_value: f32,
}

impl TopP {
    /// Create a nucleus stage. `p <= 0.0` disables it.
    pub fn new(p: f32, filter_value: f32) -> Self {
        Self { p, filter_value }
    }
}

impl LogitStage for TopP {
    fn name(&self) -> &str {
        "top_p"
    }

    fn apply(&self, mut logits: Vec<f32>) -> Vec<f32> {
        if self.p <= 0.0 || logits.is_empty() {
            return logits;
        }

        // Stable sort: among equal logits the lower vocabulary index ranks first.
        let mut order: Vec<usize> = (0..logits.len()).collect();
        order.sort_by(|&a, &b| logits[b].total_cmp(&logits[a]));

        let sorted: Vec<f32> = order.iter().map(|&i| logits[i]).collect();
        let probs = softmax(&sorted);

        let mut cumulative = 0.0f32;
        let mut over_before = false;
        for (rank, (&index, &prob)) in order.iter().zip(probs.iter()).enumerate() {
            if rank > 0 && over_before {
                logits[index] = self.filter_value;
            }
            cumulative += prob;
            over_before = cumulative > self.p;
        }
        logits
    }
}
