use crate::params::SamplingParams;
use crate::stage::StageChain;
use crate::top_k::TopK;
use crate::top_p::TopP;

/// Top-k then nucleus truncation of a logit row.
///
/// Excluded positions are overwritten with `filter_value`; retained positions
/// keep their values bit-for-bit. The nucleus stage sees the top-k exclusions
/// already in place.
pub struct DistributionFilter {
    chain: StageChain,
    filter_value: f32,
}

impl DistributionFilter {
    /// Build a filter. `top_k == 0` and `top_p <= 0.0` disable their stages.
    pub fn new(top_k: usize, top_p: f32, filter_value: f32) -> Self {
        let mut chain = StageChain::new();
        if top_k > 0 {
            chain = chain.with(Box::new(TopK::new(top_k, filter_value)));
        }
        if top_p > 0.0 {
            chain = chain.with(Box::new(TopP::new(top_p, filter_value)));
        }
        Self {
            chain,
            filter_value,
        }
    }

    /// Build the filter described by validated sampling parameters.
    pub fn from_params(params: &SamplingParams) -> Self {
        Self::new(
            usize::try_from(params.top_k).unwrap_or(0),
            params.top_p,
            params.filter_value,
        )
    }

    pub fn filter_value(&self) -> f32 {
        self.filter_value
    }

    /// Names of the enabled stages, in application order.
    pub fn stages(&self) -> Vec<&str> {
        self.chain.names()
    }

    /// Filter one lane's row.
    pub fn apply(&self, logits: Vec<f32>) -> Vec<f32> {
        self.chain.apply(logits)
    }

    /// Filter every lane's row independently.
    pub fn apply_rows(&self, rows: Vec<Vec<f32>>) -> Vec<Vec<f32>> {
        rows.into_iter().map(|row| self.apply(row)).collect()
    }

    /// Number of entries in `logits` that have not been excluded.
    pub fn survivors(&self, logits: &[f32]) -> usize {
        logits.iter().filter(|&&v| v != self.filter_value).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NEG: f32 = f32::NEG_INFINITY;

    #[test]
    fn test_disabled_filter_is_identity() {
        let f = DistributionFilter::new(0, 0.0, NEG);
        assert!(f.stages().is_empty());
        let row = vec![0.3, -0.2, 1.1];
        assert_eq!(f.apply(row.clone()), row);
    }

    #[test]
    fn test_stage_order() {
        let f = DistributionFilter::new(3, 0.9, NEG);
        assert_eq!(f.stages(), vec!["top_k", "top_p"]);
    }

    #[test]
    fn test_top_p_sees_top_k_exclusions() {
        // top_k = 2 leaves 3.0 and 2.9; their renormalized mass is roughly 0.52 / 0.48.
        // Without top_k first, 3.0 alone would carry less than half the mass.
        let row = vec![3.0, 2.9, 2.8, 2.7];
        let f = DistributionFilter::new(2, 0.5, NEG);
        let out = f.apply(row);
        assert_eq!(out, vec![3.0, NEG, NEG, NEG]);
        assert_eq!(f.survivors(&out), 1);
    }

    #[test]
    fn test_top_p_alone_on_same_row() {
        let row = vec![3.0, 2.9, 2.8, 2.7];
        let out = DistributionFilter::new(0, 0.5, NEG).apply(row);
        // cumulative ~0.29, ~0.55: the second token crosses and is kept
        assert_eq!(out, vec![3.0, 2.9, NEG, NEG]);
    }

    #[test]
    fn test_apply_rows_independent() {
        let f = DistributionFilter::new(1, 0.0, NEG);
        let out = f.apply_rows(vec![vec![1.0, 2.0], vec![5.0, 4.0]]);
        assert_eq!(out, vec![vec![NEG, 2.0], vec![5.0, NEG]]);
    }

    #[test]
    fn test_from_params() {
        let params = SamplingParams {
            top_k: 1,
            top_p: 0.0,
            ..Default::default()
        };
        let f = DistributionFilter::from_params(&params);
        assert_eq!(f.stages(), vec!["top_k"]);
        assert_eq!(f.filter_value(), NEG);
    }
}
