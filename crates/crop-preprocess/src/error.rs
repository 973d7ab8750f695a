use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PreprocessError {
    #[error("missing feature column '{column}'")]
    MissingColumn { column: String },

    #[error("cannot fit on an empty table")]
    EmptyFitData,

    /// Regressor and transformed rows disagree on width.
    #[error("feature width mismatch: regressor expects {expected}, transform produces {actual}")]
    WidthMismatch { expected: usize, actual: usize },

    #[error("failed to read pipeline artifact {path}: {source}")]
    ArtifactRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write pipeline artifact {path}: {message}")]
    ArtifactWrite { path: PathBuf, message: String },

    #[error("invalid pipeline artifact: {0}")]
    ArtifactParse(#[from] serde_json::Error),

    #[error("unsupported pipeline artifact version {found} (supported: {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("polars error: {0}")]
    Polars(#[from] PolarsError),
}

pub type Result<T> = std::result::Result<T, PreprocessError>;
