//! Column transform: median-impute and standardize numeric features,
//! fill and one-hot encode categorical features.
//!
//! [`Preprocessor`] carries only the column lists. [`Preprocessor::fit`]
//! learns the statistics once from training data and returns a
//! [`FittedPreprocessor`], which applies them unchanged to later inputs.

use std::collections::BTreeSet;

use crop_common::{column_f64_values, column_string_values, mean, median, present, std_dev};
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PreprocessError, Result};

/// Fill value for missing categorical entries.
pub const MISSING_CATEGORY: &str = "unknown";

/// Unfitted column transform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preprocessor {
    numeric: Vec<String>,
    categorical: Vec<String>,
}

impl Preprocessor {
    pub fn new(numeric: Vec<String>, categorical: Vec<String>) -> Self {
        Self {
            numeric,
            categorical,
        }
    }

    /// Learns per-column medians, means, scales, and category vocabularies.
    pub fn fit(self, df: &DataFrame) -> Result<FittedPreprocessor> {
        if df.height() == 0 {
            return Err(PreprocessError::EmptyFitData);
        }

        let mut numeric = Vec::with_capacity(self.numeric.len());
        for name in self.numeric {
            let values = numeric_values(df, &name)?;
            // A column with no values at all imputes to zero.
            let median = median(&present(&values)).unwrap_or(0.0);
            let imputed: Vec<f64> = values.iter().map(|v| v.unwrap_or(median)).collect();
            let mean = mean(&imputed).unwrap_or(0.0);
            let scale = match std_dev(&imputed, 0) {
                Some(sd) if sd > 0.0 => sd,
                _ => 1.0,
            };
            numeric.push(NumericColumn {
                name,
                median,
                mean,
                scale,
            });
        }

        let mut categorical = Vec::with_capacity(self.categorical.len());
        for name in self.categorical {
            let categories: BTreeSet<String> = category_values(df, &name)?.into_iter().collect();
            categorical.push(CategoricalColumn {
                name,
                categories: categories.into_iter().collect(),
            });
        }

        let fitted = FittedPreprocessor {
            numeric,
            categorical,
        };
        debug!(
            rows = df.height(),
            output_width = fitted.output_width(),
            "fitted preprocessor"
        );
        Ok(fitted)
    }
}

/// Learned state of one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericColumn {
    pub name: String,
    pub median: f64,
    pub mean: f64,
    /// Population standard deviation; 1 for constant columns.
    pub scale: f64,
}

impl NumericColumn {
    fn encode(&self, value: Option<f64>) -> f64 {
        (value.unwrap_or(self.median) - self.mean) / self.scale
    }
}

/// Learned vocabulary of one categorical column, sorted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoricalColumn {
    pub name: String,
    pub categories: Vec<String>,
}

impl CategoricalColumn {
    /// Appends one indicator per known category. Unseen values encode as
    /// all zeros.
    fn encode_into(&self, value: &str, row: &mut Vec<f64>) {
        let hit = self.categories.binary_search_by(|c| c.as_str().cmp(value)).ok();
        row.extend((0..self.categories.len()).map(|idx| if Some(idx) == hit { 1.0 } else { 0.0 }));
    }
}

/// Fitted column transform. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedPreprocessor {
    numeric: Vec<NumericColumn>,
    categorical: Vec<CategoricalColumn>,
}

impl FittedPreprocessor {
    pub fn numeric_columns(&self) -> &[NumericColumn] {
        &self.numeric
    }

    pub fn categorical_columns(&self) -> &[CategoricalColumn] {
        &self.categorical
    }

    /// Input column names, numeric first.
    pub fn input_features(&self) -> Vec<String> {
        self.numeric
            .iter()
            .map(|c| c.name.clone())
            .chain(self.categorical.iter().map(|c| c.name.clone()))
            .collect()
    }

    /// Width of a transformed row.
    pub fn output_width(&self) -> usize {
        self.numeric.len()
            + self
                .categorical
                .iter()
                .map(|c| c.categories.len())
                .sum::<usize>()
    }

    /// Names of the transformed columns (`rainfall_mm`, `crop_Maize`, ...).
    pub fn output_features(&self) -> Vec<String> {
        let mut names: Vec<String> = self.numeric.iter().map(|c| c.name.clone()).collect();
        for column in &self.categorical {
            names.extend(
                column
                    .categories
                    .iter()
                    .map(|category| format!("{}_{category}", column.name)),
            );
        }
        names
    }

    /// Transforms every row of `df` into a dense feature row.
    pub fn transform(&self, df: &DataFrame) -> Result<Vec<Vec<f64>>> {
        let numeric: Vec<Vec<Option<f64>>> = self
            .numeric
            .iter()
            .map(|column| numeric_values(df, &column.name))
            .collect::<Result<_>>()?;
        let categorical: Vec<Vec<String>> = self
            .categorical
            .iter()
            .map(|column| category_values(df, &column.name))
            .collect::<Result<_>>()?;

        let width = self.output_width();
        let rows = (0..df.height())
            .map(|idx| {
                let mut row = Vec::with_capacity(width);
                for (column, values) in self.numeric.iter().zip(&numeric) {
                    row.push(column.encode(values[idx]));
                }
                for (column, values) in self.categorical.iter().zip(&categorical) {
                    column.encode_into(&values[idx], &mut row);
                }
                row
            })
            .collect();
        Ok(rows)
    }
}

fn numeric_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    column_f64_values(df, name).ok_or_else(|| PreprocessError::MissingColumn {
        column: name.to_string(),
    })
}

fn category_values(df: &DataFrame, name: &str) -> Result<Vec<String>> {
    let values = column_string_values(df, name).ok_or_else(|| PreprocessError::MissingColumn {
        column: name.to_string(),
    })?;
    Ok(values
        .into_iter()
        .map(|v| v.unwrap_or_else(|| MISSING_CATEGORY.to_string()))
        .collect())
}
