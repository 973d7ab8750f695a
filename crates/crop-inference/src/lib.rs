//! Yield prediction and crop recommendation.
//!
//! [`InferenceEngine`] owns the loaded scoring model and its metadata.
//! Build one, call [`InferenceEngine::load`], and share it by reference with
//! whatever serves requests.

pub mod engine;
pub mod error;
pub mod integrity;
pub mod metadata;
pub mod model;

pub use engine::{EngineState, InferenceEngine};
pub use error::{InferenceError, Result};
pub use integrity::{digest_matches, sha256_hex};
pub use metadata::load_metadata;
pub use model::YieldModel;
