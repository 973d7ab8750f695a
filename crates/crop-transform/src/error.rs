//! Error types for table transformations.
//!
//! Malformed cell values are never errors here; they become nulls. These
//! variants cover structural problems only.

use crop_model::ConfigurationError;
use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransformError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// A column the stage needs is not in the table.
    #[error("{stage}: missing required column '{column}'")]
    MissingColumn { stage: &'static str, column: String },

    /// Two source columns resolve to the same name after renaming.
    #[error("duplicate column '{column}' after renaming")]
    DuplicateColumn { column: String },

    #[error("polars error: {0}")]
    Polars(#[from] PolarsError),
}

pub type Result<T> = std::result::Result<T, TransformError>;
