//! Derived model features and feature-set selection.

use crop_common::column_f64_values;
use crop_model::schema::{
    AVG_TEMP, BASE_CATEGORICAL_FEATURES, BASE_NUMERIC_FEATURES, ENGINEERED_CATEGORICAL_FEATURES,
    ENGINEERED_NUMERIC_FEATURES, LOG_PESTICIDES, PESTICIDES_TONNES, RAINFALL_CATEGORY,
    RAINFALL_MM, TARGET_COLUMN, TEMP_CATEGORY, TEMP_RAIN_INTERACTION,
};
use polars::prelude::DataFrame;

use crate::error::Result;
use crate::frame::{float_column, has_column, string_column};

/// Temperature bucket edges (degrees Celsius) and labels.
pub const TEMP_BINS: [(f64, &str); 3] = [(10.0, "cold"), (20.0, "temperate"), (30.0, "warm")];
pub const TEMP_TOP_LABEL: &str = "hot";

/// Rainfall bucket edges (mm per year) and labels.
pub const RAINFALL_BINS: [(f64, &str); 3] =
    [(500.0, "arid"), (1000.0, "semi_arid"), (2000.0, "moderate")];
pub const RAINFALL_TOP_LABEL: &str = "wet";

/// Places `value` in the first bucket whose upper edge exceeds it; a value
/// equal to an edge belongs to the bucket above.
fn bucket(value: f64, bins: &[(f64, &'static str)], top: &'static str) -> Option<&'static str> {
    if value.is_nan() {
        return None;
    }
    Some(
        bins.iter()
            .find(|(edge, _)| value < *edge)
            .map_or(top, |(_, label)| *label),
    )
}

/// `cold` below 10, `temperate` below 20, `warm` below 30, else `hot`.
///
/// ```
/// use crop_transform::temp_category;
///
/// assert_eq!(temp_category(9.999), Some("cold"));
/// assert_eq!(temp_category(10.0), Some("temperate"));
/// assert_eq!(temp_category(30.0), Some("hot"));
/// ```
pub fn temp_category(avg_temp: f64) -> Option<&'static str> {
    bucket(avg_temp, &TEMP_BINS, TEMP_TOP_LABEL)
}

/// `arid` below 500, `semi_arid` below 1000, `moderate` below 2000, else `wet`.
pub fn rainfall_category(rainfall_mm: f64) -> Option<&'static str> {
    bucket(rainfall_mm, &RAINFALL_BINS, RAINFALL_TOP_LABEL)
}

/// `ln(1 + tonnes)`.
pub fn log_pesticides(pesticides_tonnes: f64) -> f64 {
    pesticides_tonnes.ln_1p()
}

pub fn temp_rain_interaction(avg_temp: f64, rainfall_mm: f64) -> f64 {
    avg_temp * rainfall_mm / 1000.0
}

/// Adds the derived columns whose source columns exist. Missing inputs
/// yield null derived values; missing source columns add nothing.
pub fn build_features(df: &DataFrame) -> Result<DataFrame> {
    let mut out = df.clone();
    let temps = column_f64_values(df, AVG_TEMP);
    let rains = column_f64_values(df, RAINFALL_MM);

    if let Some(temps) = &temps {
        let labels = temps
            .iter()
            .map(|v| v.and_then(temp_category).map(str::to_string))
            .collect();
        out.with_column(string_column(TEMP_CATEGORY, labels))?;
    }
    if let Some(rains) = &rains {
        let labels = rains
            .iter()
            .map(|v| v.and_then(rainfall_category).map(str::to_string))
            .collect();
        out.with_column(string_column(RAINFALL_CATEGORY, labels))?;
    }
    if let Some(pesticides) = column_f64_values(df, PESTICIDES_TONNES) {
        let logs = pesticides.iter().map(|v| v.map(log_pesticides)).collect();
        out.with_column(float_column(LOG_PESTICIDES, logs))?;
    }
    if let (Some(temps), Some(rains)) = (&temps, &rains) {
        let products = temps
            .iter()
            .zip(rains)
            .map(|(t, r)| Some(temp_rain_interaction((*t)?, (*r)?)))
            .collect();
        out.with_column(float_column(TEMP_RAIN_INTERACTION, products))?;
    }
    Ok(out)
}

/// Numeric and categorical model inputs, in column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSet {
    pub numeric: Vec<String>,
    pub categorical: Vec<String>,
}

impl FeatureSet {
    pub fn new(numeric: Vec<String>, categorical: Vec<String>) -> Self {
        Self {
            numeric,
            categorical,
        }
    }

    /// The raw columns the serving path scores on.
    pub fn base() -> Self {
        Self::new(to_owned(&BASE_NUMERIC_FEATURES), to_owned(&BASE_CATEGORICAL_FEATURES))
    }

    /// Base features followed by the derived ones.
    pub fn with_engineered() -> Self {
        let mut set = Self::base();
        set.numeric.extend(to_owned(&ENGINEERED_NUMERIC_FEATURES));
        set.categorical
            .extend(to_owned(&ENGINEERED_CATEGORICAL_FEATURES));
        set
    }

    /// Numeric names followed by categorical names.
    pub fn all(&self) -> Vec<String> {
        self.numeric
            .iter()
            .chain(&self.categorical)
            .cloned()
            .collect()
    }
}

impl Default for FeatureSet {
    fn default() -> Self {
        Self::base()
    }
}

fn to_owned(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| (*name).to_string()).collect()
}

/// Splits a table into the available feature columns and the target.
///
/// Features absent from the table are skipped; the target is `None` when the
/// table has no target column.
pub fn select_features(
    df: &DataFrame,
    features: &FeatureSet,
) -> Result<(DataFrame, Option<DataFrame>)> {
    let available: Vec<String> = features
        .all()
        .into_iter()
        .filter(|name| has_column(df, name))
        .collect();
    let x = df.select(available)?;
    let y = if has_column(df, TARGET_COLUMN) {
        Some(df.select([TARGET_COLUMN])?)
    } else {
        None
    };
    Ok((x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crop_common::column_string_values;
    use polars::prelude::{Column, NamedFrom, Series};

    #[test]
    fn bins_put_edges_in_the_upper_bucket() {
        assert_eq!(temp_category(10.0), Some("temperate"));
        assert_eq!(temp_category(10.0001), Some("temperate"));
        assert_eq!(temp_category(9.999), Some("cold"));
        assert_eq!(temp_category(-40.0), Some("cold"));
        assert_eq!(temp_category(25.0), Some("warm"));
        assert_eq!(rainfall_category(500.0), Some("semi_arid"));
        assert_eq!(rainfall_category(499.9), Some("arid"));
        assert_eq!(rainfall_category(2000.0), Some("wet"));
        assert_eq!(temp_category(f64::NAN), None);
    }

    #[test]
    fn log_of_zero_pesticides_is_zero() {
        assert_eq!(log_pesticides(0.0), 0.0);
    }

    #[test]
    fn builds_every_feature_when_sources_exist() {
        let df = DataFrame::new(vec![
            Column::from(Series::new("avg_temp".into(), &[Some(10.0f64), None])),
            Column::from(Series::new("rainfall_mm".into(), &[500.0f64, 2500.0])),
            Column::from(Series::new("pesticides_tonnes".into(), &[0.0f64, 9.0])),
        ])
        .unwrap();
        let out = build_features(&df).unwrap();

        assert_eq!(
            column_string_values(&out, "temp_category").unwrap(),
            vec![Some("temperate".to_string()), None]
        );
        assert_eq!(
            column_string_values(&out, "rainfall_category").unwrap(),
            vec![Some("semi_arid".to_string()), Some("wet".to_string())]
        );
        let logs = column_f64_values(&out, "log_pesticides").unwrap();
        assert_eq!(logs[0], Some(0.0));
        assert!((logs[1].unwrap() - 10f64.ln()).abs() < 1e-12);
        assert_eq!(
            column_f64_values(&out, "temp_rain_interaction").unwrap(),
            vec![Some(5.0), None]
        );
    }

    #[test]
    fn missing_sources_add_nothing() {
        let df = DataFrame::new(vec![Column::from(Series::new(
            "pesticides_tonnes".into(),
            &[1.0f64],
        ))])
        .unwrap();
        let out = build_features(&df).unwrap();
        assert_eq!(out.width(), 2);
        assert!(out.column("temp_category").is_err());
        assert!(out.column("temp_rain_interaction").is_err());
    }

    #[test]
    fn selects_available_features_and_target() {
        let df = DataFrame::new(vec![
            Column::from(Series::new("crop".into(), &["Maize"])),
            Column::from(Series::new("rainfall_mm".into(), &[1.0f64])),
            Column::from(Series::new("yield".into(), &[2.0f64])),
            Column::from(Series::new("year".into(), &[1990i64])),
        ])
        .unwrap();
        let (x, y) = select_features(&df, &FeatureSet::base()).unwrap();
        let names: Vec<String> = x.get_column_names().iter().map(ToString::to_string).collect();
        assert_eq!(names, vec!["rainfall_mm", "crop"]);
        assert_eq!(y.unwrap().width(), 1);
    }

    #[test]
    fn engineered_set_extends_base() {
        let set = FeatureSet::with_engineered();
        assert_eq!(set.numeric.len(), 5);
        assert_eq!(set.categorical, vec!["crop", "country", "temp_category", "rainfall_category"]);
    }
}
