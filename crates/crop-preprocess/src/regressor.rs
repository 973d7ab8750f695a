//! Regressors that score transformed feature rows.

use serde::{Deserialize, Serialize};

use crate::error::{PreprocessError, Result};

/// Scores dense, already-transformed feature rows.
pub trait Regressor {
    /// One prediction per row, in row order.
    fn predict(&self, rows: &[Vec<f64>]) -> Result<Vec<f64>>;

    /// Row width the regressor requires, if it constrains it.
    fn expected_width(&self) -> Option<usize>;
}

/// Regressors that can be persisted in a pipeline artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RegressorModel {
    /// `intercept + coefficients · row`.
    Linear {
        coefficients: Vec<f64>,
        intercept: f64,
    },
    /// Predicts the same value for every row.
    Constant { value: f64 },
}

impl RegressorModel {
    /// A constant regressor predicting the mean of `targets` (0 when empty).
    pub fn mean_baseline(targets: &[f64]) -> Self {
        let value = crop_common::mean(targets).unwrap_or(0.0);
        RegressorModel::Constant { value }
    }
}

impl Regressor for RegressorModel {
    fn predict(&self, rows: &[Vec<f64>]) -> Result<Vec<f64>> {
        match self {
            RegressorModel::Linear {
                coefficients,
                intercept,
            } => rows
                .iter()
                .map(|row| {
                    if row.len() != coefficients.len() {
                        return Err(PreprocessError::WidthMismatch {
                            expected: coefficients.len(),
                            actual: row.len(),
                        });
                    }
                    Ok(intercept
                        + row
                            .iter()
                            .zip(coefficients)
                            .map(|(x, w)| x * w)
                            .sum::<f64>())
                })
                .collect(),
            RegressorModel::Constant { value } => Ok(vec![*value; rows.len()]),
        }
    }

    fn expected_width(&self) -> Option<usize> {
        match self {
            RegressorModel::Linear { coefficients, .. } => Some(coefficients.len()),
            RegressorModel::Constant { .. } => None,
        }
    }
}
