//! Yield and context table cleaners.
//!
//! Both cleaners turn unparseable cells into nulls instead of failing, so a
//! dirty raw export is never rejected wholesale. Problems surface later in
//! the consolidation report.

use std::collections::BTreeMap;
use std::time::Instant;

use crop_common::column_f64_values;
use crop_model::ContextKind;
use crop_model::schema::{
    CONTEXT_KEY, COUNTRY, CROP, ENGINEERED_NUMERIC_FEATURES, NUMERIC_COLUMNS, OBSERVATION_KEY,
    YEAR, YIELD, default_column_mapping,
};
use polars::prelude::DataFrame;
use tracing::{debug, info};

use crate::columns::standardize_columns;
use crate::country::normalize_country_names;
use crate::dedupe::dedupe_by_keys;
use crate::error::Result;
use crate::frame::{coerce_float, coerce_int, filter_rows, require_column, strip_text};

/// Cleans the primary yield table using the default column mapping.
pub fn clean_yield_data(df: &DataFrame) -> Result<DataFrame> {
    clean_yield_data_with_mapping(df, &default_column_mapping())
}

/// Cleans the primary yield table.
///
/// In order: standardize columns, normalize countries, trim crop names,
/// coerce `year` to integer and the measurement columns to float, drop rows
/// without a yield, and keep the first row of each (country, crop, year).
/// Steps whose column is absent are skipped.
pub fn clean_yield_data_with_mapping(
    df: &DataFrame,
    mapping: &BTreeMap<String, String>,
) -> Result<DataFrame> {
    let start = Instant::now();
    let input_rows = df.height();

    let standardized = standardize_columns(df, mapping)?;
    let mut out = normalize_country_names(&standardized, COUNTRY)?;
    strip_text(&mut out, CROP)?;
    coerce_int(&mut out, YEAR)?;
    for column in NUMERIC_COLUMNS {
        coerce_float(&mut out, column)?;
    }

    if let Some(yields) = column_f64_values(&out, YIELD) {
        let keep: Vec<bool> = yields.iter().map(Option::is_some).collect();
        let missing = keep.iter().filter(|k| !**k).count();
        if missing > 0 {
            debug!(missing, "dropped rows without a yield value");
            out = filter_rows(&out, &keep)?;
        }
    }

    let out = dedupe_by_keys(&out, &OBSERVATION_KEY)?;
    info!(
        input_rows,
        output_rows = out.height(),
        duration_ms = start.elapsed().as_millis(),
        "cleaned yield table"
    );
    Ok(out)
}

/// Cleans one context table into `country`, `year`, and the kind's value
/// column, keeping the first row of each (country, year).
///
/// Fails with a missing-column error when the raw table lacks one of the
/// three columns after renaming.
pub fn clean_context_data(df: &DataFrame, kind: ContextKind) -> Result<DataFrame> {
    let mapping: BTreeMap<String, String> = kind
        .column_mapping()
        .iter()
        .map(|(raw, canonical)| ((*raw).to_string(), (*canonical).to_string()))
        .collect();
    let renamed = standardize_columns(df, &mapping)?;

    let value_column = kind.value_column();
    let selected = [COUNTRY, YEAR, value_column];
    for column in selected {
        require_column(&renamed, kind.as_str(), column)?;
    }
    let mut out = renamed.select(selected)?;

    coerce_float(&mut out, value_column)?;
    let mut out = normalize_country_names(&out, COUNTRY)?;
    coerce_int(&mut out, YEAR)?;
    let out = dedupe_by_keys(&out, &CONTEXT_KEY)?;

    debug!(
        kind = %kind,
        input_rows = df.height(),
        output_rows = out.height(),
        "cleaned context table"
    );
    Ok(out)
}

/// Cleans a context table selected by its textual tag
/// (`pesticides`, `rainfall`, or `temperature`).
pub fn clean_context_data_tagged(df: &DataFrame, tag: &str) -> Result<DataFrame> {
    let kind: ContextKind = tag.parse()?;
    clean_context_data(df, kind)
}

/// Restores column types on a consolidated table read back from CSV.
///
/// `year` becomes Int64; the measurement and engineered numeric columns
/// become Float64. Text columns and absent columns are left alone.
pub fn coerce_consolidated_types(df: &DataFrame) -> Result<DataFrame> {
    let mut out = df.clone();
    coerce_int(&mut out, YEAR)?;
    for column in NUMERIC_COLUMNS.iter().chain(ENGINEERED_NUMERIC_FEATURES.iter()) {
        coerce_float(&mut out, column)?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransformError;
    use crop_common::{column_i64_values, column_string_values};
    use polars::prelude::{Column, DataType, NamedFrom, Series};

    fn raw_yield() -> DataFrame {
        DataFrame::new(vec![
            Column::from(Series::new(
                "Area".into(),
                &["Kenya", " Viet Nam ", "Kenya", "Kenya", "Peru"],
            )),
            Column::from(Series::new(
                "Item".into(),
                &["Maize ", "Rice, paddy", "Maize", "Wheat", "Potatoes"],
            )),
            Column::from(Series::new(
                "Year".into(),
                &["1990", "1990.0", "1990", "1991", "1992"],
            )),
            Column::from(Series::new(
                "hg/ha_yield".into(),
                &[Some("100"), Some("200"), Some("300"), Some("oops"), None],
            )),
            Column::from(Series::new(
                "average_rain_fall_mm_per_year".into(),
                &["630", "1800", "630", "..", "1200"],
            )),
        ])
        .unwrap()
    }

    #[test]
    fn yield_cleaner_applies_every_step() {
        let out = clean_yield_data(&raw_yield()).unwrap();

        // "oops" and null yields dropped, second Kenya/Maize/1990 deduped.
        assert_eq!(out.height(), 2);
        assert_eq!(
            column_string_values(&out, "country").unwrap(),
            vec![Some("Kenya".to_string()), Some("Vietnam".to_string())]
        );
        assert_eq!(
            column_string_values(&out, "crop").unwrap(),
            vec![Some("Maize".to_string()), Some("Rice, paddy".to_string())]
        );
        assert_eq!(
            column_i64_values(&out, "year").unwrap(),
            vec![Some(1990), Some(1990)]
        );
        assert_eq!(
            column_f64_values(&out, "yield").unwrap(),
            vec![Some(100.0), Some(200.0)]
        );
        assert_eq!(out.column("rainfall_mm").unwrap().dtype(), &DataType::Float64);
    }

    #[test]
    fn unparseable_measurements_become_null() {
        let df = DataFrame::new(vec![
            Column::from(Series::new("country".into(), &["Kenya"])),
            Column::from(Series::new("yield".into(), &["5"])),
            Column::from(Series::new("avg_temp".into(), &["warm"])),
        ])
        .unwrap();
        let out = clean_yield_data(&df).unwrap();
        assert_eq!(out.height(), 1);
        assert_eq!(column_f64_values(&out, "avg_temp").unwrap(), vec![None]);
    }

    #[test]
    fn pesticides_context_is_selected_and_renamed() {
        let df = DataFrame::new(vec![
            Column::from(Series::new("Domain".into(), &["Pesticides Use", "Pesticides Use"])),
            Column::from(Series::new("Area".into(), &["Russian Federation", "Russian Federation"])),
            Column::from(Series::new("Year".into(), &["2000", "2000"])),
            Column::from(Series::new("Value".into(), &["12.5", "99"])),
        ])
        .unwrap();
        let out = clean_context_data(&df, ContextKind::Pesticides).unwrap();

        let names: Vec<String> = out
            .get_column_names()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(names, vec!["country", "year", "pesticides_tonnes"]);
        assert_eq!(out.height(), 1);
        assert_eq!(
            column_string_values(&out, "country").unwrap(),
            vec![Some("Russia".to_string())]
        );
        assert_eq!(
            column_f64_values(&out, "pesticides_tonnes").unwrap(),
            vec![Some(12.5)]
        );
    }

    #[test]
    fn rainfall_headers_with_padding_are_accepted() {
        let df = DataFrame::new(vec![
            Column::from(Series::new(" Area".into(), &["Kenya"])),
            Column::from(Series::new("Year".into(), &["1990"])),
            Column::from(Series::new(
                "average_rain_fall_mm_per_year".into(),
                &[".."],
            )),
        ])
        .unwrap();
        let out = clean_context_data(&df, ContextKind::Rainfall).unwrap();
        assert_eq!(column_f64_values(&out, "rainfall_mm").unwrap(), vec![None]);
    }

    #[test]
    fn missing_context_column_is_reported() {
        let df = DataFrame::new(vec![
            Column::from(Series::new("country".into(), &["Kenya"])),
            Column::from(Series::new("year".into(), &["1990"])),
        ])
        .unwrap();
        let err = clean_context_data(&df, ContextKind::Temperature).unwrap_err();
        assert!(matches!(err, TransformError::MissingColumn { ref column, .. } if column == "avg_temp"));
    }

    #[test]
    fn reloaded_text_columns_regain_numeric_types() {
        let df = DataFrame::new(vec![
            Column::from(Series::new("country".into(), &["Kenya"])),
            Column::from(Series::new("year".into(), &["1990"])),
            Column::from(Series::new("yield".into(), &["1500.5"])),
            Column::from(Series::new("log_pesticides".into(), &[""])),
        ])
        .unwrap();
        let out = coerce_consolidated_types(&df).unwrap();
        assert_eq!(out.column("year").unwrap().dtype(), &DataType::Int64);
        assert_eq!(out.column("yield").unwrap().dtype(), &DataType::Float64);
        assert_eq!(column_f64_values(&out, "log_pesticides").unwrap(), vec![None]);
        assert_eq!(out.column("country").unwrap().dtype(), &DataType::String);
    }

    #[test]
    fn unknown_tag_is_configuration_error() {
        let df = DataFrame::empty();
        let err = clean_context_data_tagged(&df, "humidity").unwrap_err();
        assert!(matches!(err, TransformError::Configuration(_)));
    }
}
