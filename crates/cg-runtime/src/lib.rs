mod context;
mod error;
pub mod logging;
mod types;

pub use context::*;
pub use error::*;
pub use types::*;

pub use cg_model::{ControlCodes, ModelError, ScoringModel, TokenCodec};
pub use cg_sampler::{SamplerError, SamplingParams};
