//! Feature preprocessing and the persisted scoring pipeline.
//!
//! - **transform**: numeric impute + scale and categorical fill + one-hot
//! - **regressor**: the [`Regressor`] seam and the persisted regressor kinds
//! - **pipeline**: [`FittedPipeline`], its JSON artifact, and raw-row scoring

pub mod error;
pub mod pipeline;
pub mod regressor;
pub mod transform;

pub use error::{PreprocessError, Result};
pub use pipeline::{ARTIFACT_FORMAT_VERSION, FittedPipeline, queries_to_frame};
pub use regressor::{Regressor, RegressorModel};
pub use transform::{
    CategoricalColumn, FittedPreprocessor, MISSING_CATEGORY, NumericColumn, Preprocessor,
};
