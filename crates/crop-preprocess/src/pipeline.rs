//! The persisted scoring pipeline: fitted transform plus regressor.

use std::fs;
use std::path::Path;

use crop_model::YieldQuery;
use crop_model::schema::{AVG_TEMP, COUNTRY, CROP, PESTICIDES_TONNES, RAINFALL_MM};
use polars::prelude::{Column, DataFrame, NamedFrom, Series};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{PreprocessError, Result};
use crate::regressor::{Regressor, RegressorModel};
use crate::transform::FittedPreprocessor;

/// Artifact layout version written by this crate.
pub const ARTIFACT_FORMAT_VERSION: u32 = 1;

/// A fitted transform composed with a regressor, scored as one unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedPipeline {
    format_version: u32,
    preprocessor: FittedPreprocessor,
    regressor: RegressorModel,
}

impl FittedPipeline {
    /// Composes the two parts, checking that their widths agree.
    pub fn new(preprocessor: FittedPreprocessor, regressor: RegressorModel) -> Result<Self> {
        let pipeline = Self {
            format_version: ARTIFACT_FORMAT_VERSION,
            preprocessor,
            regressor,
        };
        pipeline.check_width()?;
        Ok(pipeline)
    }

    fn check_width(&self) -> Result<()> {
        let actual = self.preprocessor.output_width();
        match self.regressor.expected_width() {
            Some(expected) if expected != actual => {
                Err(PreprocessError::WidthMismatch { expected, actual })
            }
            _ => Ok(()),
        }
    }

    pub fn preprocessor(&self) -> &FittedPreprocessor {
        &self.preprocessor
    }

    pub fn regressor(&self) -> &RegressorModel {
        &self.regressor
    }

    /// Scores every row of `df` in one pass.
    pub fn predict_frame(&self, df: &DataFrame) -> Result<Vec<f64>> {
        let rows = self.preprocessor.transform(df)?;
        self.regressor.predict(&rows)
    }

    /// Scores raw queries, one prediction per query in input order.
    pub fn predict_queries(&self, queries: &[YieldQuery]) -> Result<Vec<f64>> {
        let frame = queries_to_frame(queries)?;
        self.predict_frame(&frame)
    }

    /// Parses an artifact, rejecting unknown versions and width mismatches.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
        let pipeline: Self = serde_json::from_slice(bytes)?;
        if pipeline.format_version != ARTIFACT_FORMAT_VERSION {
            return Err(PreprocessError::UnsupportedVersion {
                found: pipeline.format_version,
                supported: ARTIFACT_FORMAT_VERSION,
            });
        }
        pipeline.check_width()?;
        Ok(pipeline)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(|source| PreprocessError::ArtifactRead {
            path: path.to_path_buf(),
            source,
        })?;
        let pipeline = Self::from_json_slice(&bytes)?;
        debug!(path = %path.display(), width = pipeline.preprocessor.output_width(), "loaded pipeline");
        Ok(pipeline)
    }

    /// Writes the artifact, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        let write_error = |message: String| PreprocessError::ArtifactWrite {
            path: path.to_path_buf(),
            message,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| write_error(e.to_string()))?;
        }
        fs::write(path, self.to_json_string()?).map_err(|e| write_error(e.to_string()))?;
        info!(path = %path.display(), "saved pipeline artifact");
        Ok(())
    }
}

/// Raw, unbucketed scoring rows keyed by the base feature names.
pub fn queries_to_frame(queries: &[YieldQuery]) -> Result<DataFrame> {
    let crops: Vec<&str> = queries.iter().map(|q| q.crop.as_str()).collect();
    let countries: Vec<&str> = queries.iter().map(|q| q.country.as_str()).collect();
    let rainfall: Vec<f64> = queries.iter().map(|q| q.rainfall_mm).collect();
    let pesticides: Vec<f64> = queries.iter().map(|q| q.pesticides_tonnes).collect();
    let temps: Vec<f64> = queries.iter().map(|q| q.avg_temp).collect();

    let frame = DataFrame::new(vec![
        Column::from(Series::new(CROP.into(), crops)),
        Column::from(Series::new(COUNTRY.into(), countries)),
        Column::from(Series::new(RAINFALL_MM.into(), rainfall)),
        Column::from(Series::new(PESTICIDES_TONNES.into(), pesticides)),
        Column::from(Series::new(AVG_TEMP.into(), temps)),
    ])?;
    Ok(frame)
}
