//! Shared data model for crop yield estimation.
//!
//! - **schema**: canonical column names and the raw header mapping
//! - **country**: country alias table
//! - **context**: context source kinds and their file layouts
//! - **records**: inference requests and responses
//! - **bounds**: accepted input ranges
//! - **metadata**: persisted model metadata with defaults

pub mod bounds;
pub mod context;
pub mod country;
pub mod error;
pub mod metadata;
pub mod records;
pub mod schema;

pub use bounds::InputBounds;
pub use context::ContextKind;
pub use country::{COUNTRY_ALIASES, canonical_country};
pub use error::ConfigurationError;
pub use metadata::{DEFAULT_SUPPORTED_CROPS, ModelMetadata, UNKNOWN_MODEL_VERSION};
pub use records::{
    CropRecommendation, Environment, ModelInfo, PredictionOutput, RecommendationOutput,
    YIELD_UNIT, YieldQuery,
};
