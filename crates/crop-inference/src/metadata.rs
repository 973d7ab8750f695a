//! Loading of the metadata document written next to the artifact.

use std::fs;
use std::path::Path;

use crop_model::ModelMetadata;
use tracing::{info, warn};

use crate::error::{InferenceError, Result};

/// Reads model metadata. A missing file falls back to defaults; an
/// unreadable or malformed one is a load failure.
pub fn load_metadata(path: &Path) -> Result<ModelMetadata> {
    if !path.exists() {
        warn!(path = %path.display(), "metadata file not found, using defaults");
        return Ok(ModelMetadata::default());
    }
    let text = fs::read_to_string(path).map_err(|e| InferenceError::model_load(path, e.to_string()))?;
    let metadata: ModelMetadata = serde_json::from_str(&text)
        .map_err(|e| InferenceError::model_load(path, format!("invalid metadata: {e}")))?;
    info!(path = %path.display(), model = metadata.model_version(), "loaded metadata");
    Ok(metadata)
}
