//! Model metadata written alongside a persisted pipeline.
//!
//! Every field is optional on disk. Accessors fall back to the built-in
//! defaults so a missing or partial metadata file never blocks serving.

use serde::{Deserialize, Serialize};

use crate::schema::{BASE_CATEGORICAL_FEATURES, BASE_NUMERIC_FEATURES};

/// Crops offered when metadata does not list any.
pub const DEFAULT_SUPPORTED_CROPS: [&str; 10] = [
    "Maize",
    "Potatoes",
    "Rice, paddy",
    "Sorghum",
    "Soybeans",
    "Wheat",
    "Cassava",
    "Sweet potatoes",
    "Plantains and others",
    "Yams",
];

/// Version label reported when metadata carries none.
pub const UNKNOWN_MODEL_VERSION: &str = "unknown";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelMetadata {
    pub model_name: Option<String>,
    pub supported_crops: Option<Vec<String>>,
    pub supported_countries: Option<Vec<String>>,
    pub numeric_features: Option<Vec<String>>,
    pub categorical_features: Option<Vec<String>>,
    /// Hex SHA-256 of the pipeline artifact bytes.
    pub artifact_sha256: Option<String>,
}

impl ModelMetadata {
    pub fn model_version(&self) -> &str {
        self.model_name.as_deref().unwrap_or(UNKNOWN_MODEL_VERSION)
    }

    /// Ordered candidate list used by recommendations.
    pub fn supported_crops(&self) -> Vec<String> {
        match &self.supported_crops {
            Some(crops) => crops.clone(),
            None => DEFAULT_SUPPORTED_CROPS.iter().map(|c| (*c).to_string()).collect(),
        }
    }

    pub fn supported_countries(&self) -> Vec<String> {
        self.supported_countries.clone().unwrap_or_default()
    }

    /// Numeric followed by categorical feature names.
    pub fn feature_names(&self) -> Vec<String> {
        if self.numeric_features.is_none() && self.categorical_features.is_none() {
            return BASE_NUMERIC_FEATURES
                .iter()
                .chain(BASE_CATEGORICAL_FEATURES.iter())
                .map(|name| (*name).to_string())
                .collect();
        }
        let mut names = self.numeric_features.clone().unwrap_or_default();
        names.extend(self.categorical_features.clone().unwrap_or_default());
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_metadata_uses_defaults() {
        let meta = ModelMetadata::default();
        assert_eq!(meta.model_version(), "unknown");
        assert_eq!(meta.supported_crops().len(), 10);
        assert!(meta.supported_countries().is_empty());
        assert_eq!(
            meta.feature_names(),
            vec!["rainfall_mm", "pesticides_tonnes", "avg_temp", "crop", "country"]
        );
    }

    #[test]
    fn parses_partial_document_and_ignores_extra_fields() {
        let meta: ModelMetadata = serde_json::from_str(
            r#"{"model_name": "ridge-v2", "supported_crops": ["X", "Y"], "metrics": {"r2": 0.9}}"#,
        )
        .unwrap();
        assert_eq!(meta.model_version(), "ridge-v2");
        assert_eq!(meta.supported_crops(), vec!["X", "Y"]);
        assert_eq!(meta.feature_names().len(), 5);
    }

    #[test]
    fn feature_names_concatenate_numeric_then_categorical() {
        let meta = ModelMetadata {
            numeric_features: Some(vec!["a".into()]),
            categorical_features: Some(vec!["b".into(), "c".into()]),
            ..ModelMetadata::default()
        };
        assert_eq!(meta.feature_names(), vec!["a", "b", "c"]);
    }
}
