//! Prediction and recommendation over a loaded scoring model.
//!
//! The engine starts [`EngineState::Unloaded`] and moves to
//! [`EngineState::Loaded`] once; after that the model is shared read-only.
//! Every serving operation checks the state first, so nothing is scored
//! before a model exists.

use std::fmt;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use crop_model::{
    CropRecommendation, Environment, InputBounds, ModelInfo, ModelMetadata, PredictionOutput,
    RecommendationOutput, YIELD_UNIT, YieldQuery,
};
use crop_preprocess::FittedPipeline;
use tracing::{debug, info};

use crate::error::{InferenceError, Result};
use crate::integrity::digest_matches;
use crate::metadata::load_metadata;
use crate::model::YieldModel;

pub enum EngineState {
    Unloaded,
    Loaded(Arc<dyn YieldModel>),
}

impl fmt::Debug for EngineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineState::Unloaded => f.write_str("Unloaded"),
            EngineState::Loaded(_) => f.write_str("Loaded"),
        }
    }
}

#[derive(Debug)]
pub struct InferenceEngine {
    state: EngineState,
    metadata: ModelMetadata,
    bounds: InputBounds,
}

impl Default for InferenceEngine {
    fn default() -> Self {
        Self::new(InputBounds::default())
    }
}

impl InferenceEngine {
    pub fn new(bounds: InputBounds) -> Self {
        Self {
            state: EngineState::Unloaded,
            metadata: ModelMetadata::default(),
            bounds,
        }
    }

    /// Loads metadata, then the pipeline artifact.
    ///
    /// Metadata is kept even when the artifact fails to load, so crop
    /// listings still reflect it; the engine stays unloaded in that case.
    /// When metadata names an artifact digest the bytes must match it.
    pub fn load(&mut self, model_path: &Path, metadata_path: &Path) -> Result<()> {
        if self.is_loaded() {
            return Err(InferenceError::AlreadyLoaded);
        }
        let start = Instant::now();
        self.metadata = load_metadata(metadata_path)?;

        let bytes = std::fs::read(model_path).map_err(|e| {
            InferenceError::model_load(model_path, format!("cannot read artifact: {e}"))
        })?;
        if let Some(expected) = &self.metadata.artifact_sha256
            && !digest_matches(&bytes, expected)
        {
            return Err(InferenceError::model_load(
                model_path,
                "artifact checksum does not match metadata",
            ));
        }
        let pipeline = FittedPipeline::from_json_slice(&bytes)
            .map_err(|e| InferenceError::model_load(model_path, e.to_string()))?;
        if let Some(message) = feature_mismatch(&self.metadata, &pipeline) {
            return Err(InferenceError::model_load(model_path, message));
        }

        self.state = EngineState::Loaded(Arc::new(pipeline));
        info!(
            path = %model_path.display(),
            model = self.metadata.model_version(),
            duration_ms = start.elapsed().as_millis(),
            "model loaded"
        );
        Ok(())
    }

    /// Installs an already-built model, e.g. one shared with other engines.
    pub fn load_model(&mut self, model: Arc<dyn YieldModel>, metadata: ModelMetadata) -> Result<()> {
        if self.is_loaded() {
            return Err(InferenceError::AlreadyLoaded);
        }
        self.metadata = metadata;
        self.state = EngineState::Loaded(model);
        Ok(())
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, EngineState::Loaded(_))
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    pub fn bounds(&self) -> &InputBounds {
        &self.bounds
    }

    pub fn model_version(&self) -> &str {
        self.metadata.model_version()
    }

    pub fn supported_crops(&self) -> Vec<String> {
        self.metadata.supported_crops()
    }

    fn model(&self) -> Result<&Arc<dyn YieldModel>> {
        match &self.state {
            EngineState::Loaded(model) => Ok(model),
            EngineState::Unloaded => Err(InferenceError::NotLoaded),
        }
    }

    /// Exact match gives `(true, "")`. Otherwise `(false, message)`, where the
    /// message suggests the case-insensitive match when there is one.
    pub fn validate_crop(&self, crop: &str) -> (bool, String) {
        check_crop(crop, &self.supported_crops())
    }

    fn check_environment(&self, env: &Environment) -> Result<()> {
        let problems = self.bounds.check(env);
        if problems.is_empty() {
            Ok(())
        } else {
            Err(InferenceError::InvalidArgument(problems.join("; ")))
        }
    }

    fn require_supported(&self, crop: &str) -> Result<()> {
        match self.validate_crop(crop) {
            (true, _) => Ok(()),
            (false, message) if message.starts_with("Did you mean") => Err(
                InferenceError::InvalidArgument(format!("Crop '{crop}' is not supported. {message}")),
            ),
            (false, message) => Err(InferenceError::InvalidArgument(message)),
        }
    }

    /// Predicted yield for one crop, clamped at zero.
    pub fn predict(&self, query: &YieldQuery) -> Result<f64> {
        let model = self.model()?;
        self.require_supported(&query.crop)?;
        self.check_environment(&Environment::new(
            query.country.clone(),
            query.rainfall_mm,
            query.pesticides_tonnes,
            query.avg_temp,
        ))?;

        let scores = score(model.as_ref(), std::slice::from_ref(query))?;
        let predicted = clamp_yield(scores[0]);
        debug!(crop = %query.crop, country = %query.country, predicted, "predicted yield");
        Ok(predicted)
    }

    pub fn prediction(&self, query: &YieldQuery) -> Result<PredictionOutput> {
        let predicted_yield = self.predict(query)?;
        Ok(PredictionOutput {
            crop: query.crop.clone(),
            predicted_yield,
            yield_unit: YIELD_UNIT.to_string(),
            model_version: self.model_version().to_string(),
        })
    }

    /// Scores every candidate crop under `env` and ranks them by predicted
    /// yield, highest first. Ties keep the candidates' input order.
    ///
    /// `crops` defaults to the supported list (also when empty); `top_n`
    /// truncates the ranking and must be at least 1.
    pub fn recommend(
        &self,
        env: &Environment,
        crops: Option<&[String]>,
        top_n: Option<usize>,
    ) -> Result<Vec<CropRecommendation>> {
        let model = self.model()?;
        if top_n == Some(0) {
            return Err(InferenceError::InvalidArgument(
                "top_n must be at least 1".to_string(),
            ));
        }
        let candidates = match crops {
            Some(list) if !list.is_empty() => {
                for crop in list {
                    self.require_supported(crop)?;
                }
                list.to_vec()
            }
            _ => self.supported_crops(),
        };
        self.check_environment(env)?;

        let queries: Vec<YieldQuery> = candidates
            .iter()
            .map(|crop| env.for_crop(crop.as_str()))
            .collect();
        let scores = score(model.as_ref(), &queries)?;
        let ranked = rank(candidates, &scores, top_n);
        debug!(
            country = %env.country,
            candidates = queries.len(),
            returned = ranked.len(),
            "ranked crops"
        );
        Ok(ranked)
    }

    pub fn recommendation(
        &self,
        env: &Environment,
        crops: Option<&[String]>,
        top_n: Option<usize>,
    ) -> Result<RecommendationOutput> {
        let recommendations = self.recommend(env, crops, top_n)?;
        Ok(RecommendationOutput {
            recommendations,
            context: env.clone(),
            model_version: self.model_version().to_string(),
        })
    }

    pub fn model_info(&self) -> Result<ModelInfo> {
        self.model()?;
        Ok(ModelInfo {
            model_version: self.model_version().to_string(),
            supported_crops: self.supported_crops(),
            supported_countries: self.metadata.supported_countries(),
            features: self.metadata.feature_names(),
        })
    }
}

fn score(model: &dyn YieldModel, queries: &[YieldQuery]) -> Result<Vec<f64>> {
    let scores = model.predict_batch(queries)?;
    if scores.len() != queries.len() {
        return Err(InferenceError::Scoring(format!(
            "model returned {} scores for {} rows",
            scores.len(),
            queries.len()
        )));
    }
    Ok(scores)
}

/// Describes the first metadata feature list that differs from the fitted
/// pipeline's columns.
fn feature_mismatch(metadata: &ModelMetadata, pipeline: &FittedPipeline) -> Option<String> {
    let preprocessor = pipeline.preprocessor();
    let numeric: Vec<String> = preprocessor
        .numeric_columns()
        .iter()
        .map(|c| c.name.clone())
        .collect();
    let categorical: Vec<String> = preprocessor
        .categorical_columns()
        .iter()
        .map(|c| c.name.clone())
        .collect();
    [
        ("numeric", &metadata.numeric_features, numeric),
        ("categorical", &metadata.categorical_features, categorical),
    ]
    .into_iter()
    .find_map(|(kind, declared, fitted)| match declared {
        Some(declared) if *declared != fitted => Some(format!(
            "metadata declares {kind} features [{}] but the pipeline was fitted on [{}]",
            declared.join(", "),
            fitted.join(", ")
        )),
        _ => None,
    })
}

/// Yields are never negative and never negative zero. NaN scores are
/// treated as zero.
fn clamp_yield(value: f64) -> f64 {
    if value.is_nan() || value <= 0.0 { 0.0 } else { value }
}

fn rank(crops: Vec<String>, scores: &[f64], top_n: Option<usize>) -> Vec<CropRecommendation> {
    let mut scored: Vec<(String, f64)> = crops
        .into_iter()
        .zip(scores.iter().map(|s| clamp_yield(*s)))
        .collect();
    // Stable: equal yields keep input order.
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored
        .into_iter()
        .take(top_n.unwrap_or(usize::MAX))
        .enumerate()
        .map(|(idx, (crop, predicted))| CropRecommendation::new(idx + 1, crop, predicted))
        .collect()
}

fn check_crop(crop: &str, supported: &[String]) -> (bool, String) {
    if supported.iter().any(|s| s == crop) {
        return (true, String::new());
    }
    let lowered = crop.to_lowercase();
    if let Some(close) = supported.iter().find(|s| s.to_lowercase() == lowered) {
        return (false, format!("Did you mean '{close}'?"));
    }
    (
        false,
        format!(
            "Crop '{crop}' is not supported. Supported crops: {}",
            supported.join(", ")
        ),
    )
}
