//! Request and response records exchanged with the inference engine.

use serde::{Deserialize, Serialize};

/// Unit every yield value is reported in (hectograms per hectare).
pub const YIELD_UNIT: &str = "hg/ha";

/// Environmental conditions shared by every candidate crop in a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    pub country: String,
    pub rainfall_mm: f64,
    pub pesticides_tonnes: f64,
    pub avg_temp: f64,
}

impl Environment {
    pub fn new(
        country: impl Into<String>,
        rainfall_mm: f64,
        pesticides_tonnes: f64,
        avg_temp: f64,
    ) -> Self {
        Self {
            country: country.into(),
            rainfall_mm,
            pesticides_tonnes,
            avg_temp,
        }
    }

    /// Pairs the environment with a crop to form a single scoring row.
    pub fn for_crop(&self, crop: impl Into<String>) -> YieldQuery {
        YieldQuery {
            crop: crop.into(),
            country: self.country.clone(),
            rainfall_mm: self.rainfall_mm,
            pesticides_tonnes: self.pesticides_tonnes,
            avg_temp: self.avg_temp,
        }
    }
}

/// One raw, unbucketed row fed to the fitted pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YieldQuery {
    pub crop: String,
    pub country: String,
    pub rainfall_mm: f64,
    pub pesticides_tonnes: f64,
    pub avg_temp: f64,
}

/// A ranked candidate crop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropRecommendation {
    /// 1-based; 1 is the highest predicted yield.
    pub rank: usize,
    pub crop: String,
    /// Never negative.
    pub predicted_yield: f64,
    pub yield_unit: String,
}

impl CropRecommendation {
    pub fn new(rank: usize, crop: impl Into<String>, predicted_yield: f64) -> Self {
        Self {
            rank,
            crop: crop.into(),
            predicted_yield,
            yield_unit: YIELD_UNIT.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionOutput {
    pub crop: String,
    pub predicted_yield: f64,
    pub yield_unit: String,
    pub model_version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationOutput {
    pub recommendations: Vec<CropRecommendation>,
    /// Inputs the ranking was computed for.
    pub context: Environment,
    pub model_version: String,
}

/// Summary of what a loaded model supports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub model_version: String,
    pub supported_crops: Vec<String>,
    pub supported_countries: Vec<String>,
    pub features: Vec<String>,
}
