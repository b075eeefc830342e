pub mod codec;
pub mod control;
pub mod error;
pub mod scoring;

pub use codec::TokenCodec;
pub use control::ControlCodes;
pub use error::{ModelError, Result};
pub use scoring::ScoringModel;
