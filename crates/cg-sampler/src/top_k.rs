use crate::stage::LogitStage;

/// Excludes every token whose logit is strictly below the k-th largest logit.
///
/// The cut is a value comparison, not a rank cutoff: tokens tied with the k-th
/// largest value all survive, so more than `k` tokens can remain.
pub struct TopK {
    k: usize,
    filter_value: f32,
}

impl TopK {
    /// Create a top-K stage. `k == 0` disables it.
    pub fn new(k: usize, filter_value: f32) -> Self {
        Self { k, filter_value }
    }
}

/// The k-th largest value of a non-empty row, `1 <= k <= row.len()`.
fn kth_largest(row: &[f32], k: usize) -> f32 {
    let mut scratch = row.to_vec();
    let (_, kth, _) = scratch.select_nth_unstable_by(k - 1, |a, b| b.total_cmp(a));
    *kth
}

impl LogitStage for TopK {
    fn name(&self) -> &str {
        "top_k"
    }

    fn apply(&self, mut logits: Vec<f32>) -> Vec<f32> {
        if self.k == 0 || logits.is_empty() {
            return logits;
        }
        let k = self.k.min(logits.len());
        let threshold = kth_largest(&logits, k);

        for v in logits.iter_mut() {
            if *v < threshold {
                *v = self.filter_value;
            }
        }
        logits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NEG: f32 = f32::NEG_INFINITY;

    #[test]
    fn test_keeps_top_k() {
        let out = TopK::new(2, NEG).apply(vec![1.0, 4.0, 3.0, 2.0]);
        assert_eq!(out, vec![NEG, 4.0, 3.0, NEG]);
    }

    #[test]
    fn test_ties_at_boundary_survive() {
        let out = TopK::new(2, NEG).apply(vec![5.0, 3.0, 3.0, 1.0, 3.0]);
        assert_eq!(out, vec![5.0, 3.0, 3.0, NEG, 3.0]);
    }

    #[test]
    fn test_k_larger_than_vocab() {
        let row = vec![0.5, -1.0, 2.0];
        assert_eq!(TopK::new(10, NEG).apply(row.clone()), row);
    }

    #[test]
    fn test_zero_disables() {
        let row = vec![0.5, -1.0, 2.0];
        assert_eq!(TopK::new(0, NEG).apply(row.clone()), row);
    }

    #[test]
    fn test_custom_filter_value() {
        let out = TopK::new(1, -1e9).apply(vec![0.0, 1.0]);
        assert_eq!(out, vec![-1e9, 1.0]);
    }
}
