/// Trait for language models that can score the next token of a sequence.
///
/// Implementations wrap whatever actually runs the network. The sampler only
/// ever sees raw, unnormalized logits for the final position of the history.
pub trait ScoringModel: Send {
    /// Score the token that would follow `history`.
    ///
    /// Returns one logit per vocabulary entry, so the result must have
    /// exactly `vocab_size()` elements.
    fn score(&mut self, history: &[u32]) -> crate::Result<Vec<f32>>;

    /// Score several independent histories in one call.
    ///
    /// The default implementation calls `score` once per history. Models that
    /// can batch lanes should override it; the returned rows must be in the
    /// same order as `histories`.
    fn score_batch(&mut self, histories: &[&[u32]]) -> crate::Result<Vec<Vec<f32>>> {
        histories.iter().map(|h| self.score(h)).collect()
    }

    /// Returns the vocabulary size (number of output logits).
    fn vocab_size(&self) -> usize;

    /// Maximum number of positions the model supports.
    ///
    /// Zero or negative means the model has no fixed bound.
    fn max_positions(&self) -> i64 {
        0
    }
}

impl<M: ScoringModel + ?Sized> ScoringModel for Box<M> {
    fn score(&mut self, history: &[u32]) -> crate::Result<Vec<f32>> {
        (**self).score(history)
    }

    fn score_batch(&mut self, histories: &[&[u32]]) -> crate::Result<Vec<Vec<f32>>> {
        (**self).score_batch(histories)
    }

    fn vocab_size(&self) -> usize {
        (**self).vocab_size()
    }

    fn max_positions(&self) -> i64 {
        (**self).max_positions()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo {
        vocab: usize,
    }

    impl ScoringModel for Echo {
        fn score(&mut self, history: &[u32]) -> crate::Result<Vec<f32>> {
            let mut row = vec![0.0; self.vocab];
            if let Some(&last) = history.last() {
                row[last as usize % self.vocab] = 1.0;
            }
            Ok(row)
        }

        fn vocab_size(&self) -> usize {
            self.vocab
        }
    }

    #[test]
    fn test_default_batch_preserves_order() {
        let mut m = Echo { vocab: 4 };
        let a: &[u32] = &[1];
        let b: &[u32] = &[0, 3];
        let rows = m.score_batch(&[a, b]).unwrap();
        assert_eq!(rows, vec![vec![0.0, 1.0, 0.0, 0.0], vec![0.0, 0.0, 0.0, 1.0]]);
    }

    #[test]
    fn test_default_max_positions_unbounded() {
        let m = Echo { vocab: 2 };
        assert_eq!(m.max_positions(), 0);
    }

    #[test]
    fn test_boxed_model_forwards() {
        let mut m: Box<dyn ScoringModel> = Box::new(Echo { vocab: 3 });
        assert_eq!(m.vocab_size(), 3);
        assert_eq!(m.score(&[2]).unwrap(), vec![0.0, 0.0, 1.0]);
    }
}
