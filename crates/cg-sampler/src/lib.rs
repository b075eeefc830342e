//! `cg-sampler` - Constrained autoregressive sampling for ctrl-generate.
//!
//! This crate provides:
//! - Logit stages (temperature, repetition penalty, top-k, top-p) behind the `LogitStage` trait
//! - `DistributionFilter`, the top-k then nucleus truncation applied every step
//! - `SequenceSampler`, which drives one or more lanes step by step
//! - `generate`, the single call that resolves length, runs the sampler and strips the context

pub mod error;
pub mod filter;
pub mod generate;
pub mod length;
pub mod params;
pub mod repetition;
pub mod select;
pub mod sequence;
pub mod stage;
pub mod temperature;
pub mod top_k;
pub mod top_p;

pub use error::{Result, SamplerError};
pub use filter::DistributionFilter;
pub use generate::{generate, GenerateRequest};
pub use length::{resolve_length, MAX_LENGTH};
pub use params::SamplingParams;
pub use repetition::RepetitionPenalty;
pub use select::{argmax, softmax, Selection};
pub use sequence::SequenceSampler;
pub use stage::{LogitStage, StageChain};
pub use temperature::Temperature;
pub use top_k::TopK;
pub use top_p::TopP;
