use std::path::PathBuf;

use thiserror::Error;

/// Errors raised on the inference path.
///
/// `InvalidArgument` is always caller-correctable; `NotLoaded` means the
/// engine must be loaded before it can serve.
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("failed to load model from {path}: {message}")]
    ModelLoad { path: PathBuf, message: String },

    #[error("model not loaded")]
    NotLoaded,

    #[error("a model is already loaded")]
    AlreadyLoaded,

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("scoring failed: {0}")]
    Scoring(String),
}

impl InferenceError {
    pub(crate) fn model_load(path: &std::path::Path, message: impl Into<String>) -> Self {
        InferenceError::ModelLoad {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, InferenceError>;
