//! Descriptive summary of a consolidated table.

use std::collections::BTreeSet;
use std::fmt::Write as _;

use crop_common::{column_i64_values, column_string_values};
use crop_model::schema::{COUNTRY, CROP, YEAR};
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};

const RULE_WIDTH: usize = 60;

/// Null count of one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingStat {
    pub column: String,
    pub count: usize,
    /// Share of rows, in percent, rounded to two decimals.
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FusionSummary {
    pub total_rows: usize,
    pub total_columns: usize,
    pub columns: Vec<String>,
    /// Earliest and latest year, when a year column with values exists.
    pub year_range: Option<(i64, i64)>,
    pub unique_countries: Option<usize>,
    pub unique_crops: Option<usize>,
    /// Distinct crops, sorted.
    pub crops: Option<Vec<String>>,
    pub missing: Vec<MissingStat>,
}

impl FusionSummary {
    pub fn from_frame(df: &DataFrame) -> Self {
        let total_rows = df.height();
        let columns: Vec<String> = df
            .get_column_names()
            .iter()
            .map(ToString::to_string)
            .collect();

        let year_range = column_i64_values(df, YEAR).and_then(|years| {
            let years: Vec<i64> = years.into_iter().flatten().collect();
            Some((*years.iter().min()?, *years.iter().max()?))
        });
        let countries = distinct(df, COUNTRY);
        let crops = distinct(df, CROP);

        let missing = df
            .get_columns()
            .iter()
            .map(|column| {
                let count = column.null_count();
                let percentage = if total_rows == 0 {
                    0.0
                } else {
                    (count as f64 / total_rows as f64 * 10_000.0).round() / 100.0
                };
                MissingStat {
                    column: column.name().to_string(),
                    count,
                    percentage,
                }
            })
            .collect();

        Self {
            total_rows,
            total_columns: columns.len(),
            columns,
            year_range,
            unique_countries: countries.as_ref().map(BTreeSet::len),
            unique_crops: crops.as_ref().map(BTreeSet::len),
            crops: crops.map(|set| set.into_iter().collect()),
            missing,
        }
    }

    /// Plain-text report written next to the consolidated file.
    pub fn render(&self) -> String {
        let rule = "=".repeat(RULE_WIDTH);
        let mut out = String::new();
        let _ = writeln!(out, "{rule}");
        let _ = writeln!(out, "DATA FUSION SUMMARY");
        let _ = writeln!(out, "{rule}");
        let _ = writeln!(out);
        let _ = writeln!(out, "Total rows: {}", self.total_rows);
        let _ = writeln!(out, "Total columns: {}", self.total_columns);
        let _ = writeln!(out, "Columns: {}", self.columns.join(", "));
        let _ = writeln!(out);

        if let Some((first, last)) = self.year_range {
            let _ = writeln!(out, "Year range: {first} - {last}");
        }
        if let Some(count) = self.unique_countries {
            let _ = writeln!(out, "Unique countries: {count}");
        }
        if let Some(count) = self.unique_crops {
            let _ = writeln!(out, "Unique crops: {count}");
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "Crops included:");
        for crop in self.crops.iter().flatten() {
            let _ = writeln!(out, "  - {crop}");
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "Missing values:");
        for stat in &self.missing {
            let _ = writeln!(
                out,
                "  {}: {} ({:.2}%)",
                stat.column, stat.count, stat.percentage
            );
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "{rule}");
        let _ = writeln!(out, "Fusion strategy:");
        let _ = writeln!(out, "- Join keys: (country, year)");
        let _ = writeln!(out, "- Crop is retained from the yield table");
        let _ = writeln!(out, "- Context values (rainfall, pesticides, temperature) left-joined on country and year");
        let _ = writeln!(out, "- Missing context values are kept as nulls");
        let _ = writeln!(out, "{rule}");
        out
    }
}

fn distinct(df: &DataFrame, column: &str) -> Option<BTreeSet<String>> {
    column_string_values(df, column).map(|values| values.into_iter().flatten().collect())
}
