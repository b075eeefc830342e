use thiserror::Error;

#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("model error: {0}")]
    Model(#[from] cg_model::ModelError),
    #[error("generation failed: {0}")]
    Sampler(#[from] cg_sampler::SamplerError),
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
