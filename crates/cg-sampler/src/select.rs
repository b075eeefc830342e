use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

use crate::error::{Result, SamplerError};

/// Numerically stable softmax over a row.
///
/// Entries equal to negative infinity get probability zero, provided at least
/// one entry is finite.
pub fn softmax(logits: &[f32]) -> Vec<f32> {
    let max_logit = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits.iter().map(|&v| (v - max_logit).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

/// Index of the largest logit. Ties go to the lowest index.
pub fn argmax(logits: &[f32]) -> Option<u32> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &v) in logits.iter().enumerate() {
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i as u32)
}

/// How the next token is picked from a filtered row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Always take the highest-scoring token.
    Greedy,
    /// Draw proportionally to the softmax of the row.
    Distribution,
}

impl Selection {
    /// Greedy when the temperature is exactly zero, stochastic otherwise.
    pub fn for_temperature(temperature: f32) -> Self {
        if temperature == 0.0 {
            Selection::Greedy
        } else {
            Selection::Distribution
        }
    }

    /// Pick a token from a filtered row.
    pub fn select<R: Rng + ?Sized>(&self, logits: &[f32], rng: &mut R) -> Result<u32> {
        match self {
            Selection::Greedy => argmax(logits).ok_or_else(|| {
                SamplerError::InvariantViolation("cannot select from an empty row".to_string())
            }),
            Selection::Distribution => {
                let probs = softmax(logits);
                let dist = WeightedIndex::new(&probs).map_err(|e| {
                    SamplerError::InvariantViolation(format!("unsampleable distribution: {}", e))
                })?;
                Ok(dist.sample(rng) as u32)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_softmax_sums_to_one() {
        let p = softmax(&[1.0, 2.0, 3.0]);
        let sum: f32 = p.iter().sum();
        assert_relative_eq!(sum, 1.0, epsilon = 1e-6);
        assert!(p[0] < p[1] && p[1] < p[2]);
    }

    #[test]
    fn test_softmax_excluded_entries() {
        let p = softmax(&[f32::NEG_INFINITY, 0.0, 0.0]);
        assert_eq!(p[0], 0.0);
        assert_relative_eq!(p[1], 0.5);
        assert_relative_eq!(p[2], 0.5);
    }

    #[test]
    fn test_argmax_first_occurrence() {
        assert_eq!(argmax(&[1.0, 3.0, 3.0, 2.0]), Some(1));
        assert_eq!(argmax(&[f32::NEG_INFINITY, -5.0]), Some(1));
        assert_eq!(argmax(&[]), None);
    }

    #[test]
    fn test_greedy_ignores_rng() {
        let mut a = StdRng::seed_from_u64(1);
        let mut b = StdRng::seed_from_u64(2);
        let row = [0.1, 0.9, 0.3];
        assert_eq!(Selection::Greedy.select(&row, &mut a).unwrap(), 1);
        assert_eq!(Selection::Greedy.select(&row, &mut b).unwrap(), 1);
    }

    #[test]
    fn test_distribution_never_picks_excluded() {
        let mut rng = StdRng::seed_from_u64(42);
        let row = [f32::NEG_INFINITY, 0.0, f32::NEG_INFINITY, 0.5];
        for _ in 0..200 {
            let t = Selection::Distribution.select(&row, &mut rng).unwrap();
            assert!(t == 1 || t == 3);
        }
    }

    #[test]
    fn test_distribution_is_reproducible() {
        let row = [0.2, 0.1, 0.4, 0.3];
        let draw = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..16)
                .map(|_| Selection::Distribution.select(&row, &mut rng).unwrap())
                .collect::<Vec<_>>()
        };
        assert_eq!(draw(7), draw(7));
    }

    #[test]
    fn test_fully_excluded_row_is_invariant_violation() {
        let mut rng = StdRng::seed_from_u64(0);
        let row = [f32::NEG_INFINITY; 3];
        let err = Selection::Distribution.select(&row, &mut rng).unwrap_err();
        assert!(matches!(err, SamplerError::InvariantViolation(_)));
    }

    #[test]
    fn test_for_temperature() {
        assert_eq!(Selection::for_temperature(0.0), Selection::Greedy);
        assert_eq!(Selection::for_temperature(0.7), Selection::Distribution);
    }
}
