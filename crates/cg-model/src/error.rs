use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("scoring failed: {0}")]
    Scoring(String),
    #[error("tokenizer error: {0}")]
    Tokenizer(String),
    #[error("unknown control code: {0}")]
    UnknownControlCode(String),
    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
