use thiserror::Error;

#[derive(Error, Debug)]
pub enum SamplerError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("scoring model error: {0}")]
    Scoring(#[from] cg_model::ModelError),
    #[error("lane {lane}: expected {expected} logits, got {got}")]
    MalformedScores {
        lane: usize,
        expected: usize,
        got: usize,
    },
    #[error("lane {lane}: non-finite logit at index {index}")]
    NonFiniteScore { lane: usize, index: usize },
    #[error("scoring model returned {got} rows for {expected} lanes")]
    BatchSize { expected: usize, got: usize },
    #[error("internal invariant violated: {0}")]
    InvariantViolation(String),
}

pub type Result<T> = std::result::Result<T, SamplerError>;
