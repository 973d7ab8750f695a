//! Column construction helpers shared by the cleaners.

use crop_common::{column_f64_values, column_i64_values, column_string_values};
use polars::prelude::*;

use crate::error::{Result, TransformError};

pub(crate) fn has_column(df: &DataFrame, name: &str) -> bool {
    df.column(name).is_ok()
}

pub(crate) fn require_column(df: &DataFrame, stage: &'static str, name: &str) -> Result<()> {
    if has_column(df, name) {
        Ok(())
    } else {
        Err(TransformError::MissingColumn {
            stage,
            column: name.to_string(),
        })
    }
}

pub(crate) fn float_column(name: &str, values: Vec<Option<f64>>) -> Column {
    Column::from(Series::new(name.into(), values))
}

pub(crate) fn int_column(name: &str, values: Vec<Option<i64>>) -> Column {
    Column::from(Series::new(name.into(), values))
}

pub(crate) fn string_column(name: &str, values: Vec<Option<String>>) -> Column {
    Column::from(Series::new(name.into(), values))
}

/// Replaces `name` with a Float64 column; unparseable cells become null.
pub(crate) fn coerce_float(df: &mut DataFrame, name: &str) -> Result<()> {
    if let Some(values) = column_f64_values(df, name) {
        df.with_column(float_column(name, values))?;
    }
    Ok(())
}

/// Replaces `name` with an Int64 column; non-integral cells become null.
pub(crate) fn coerce_int(df: &mut DataFrame, name: &str) -> Result<()> {
    if let Some(values) = column_i64_values(df, name) {
        df.with_column(int_column(name, values))?;
    }
    Ok(())
}

/// Trims surrounding whitespace from every value of a text column.
pub(crate) fn strip_text(df: &mut DataFrame, name: &str) -> Result<()> {
    if let Some(values) = column_string_values(df, name) {
        let stripped = values
            .into_iter()
            .map(|v| v.map(|s| s.trim().to_string()))
            .collect();
        df.with_column(string_column(name, stripped))?;
    }
    Ok(())
}

/// Keeps the rows whose mask entry is true.
pub(crate) fn filter_rows(df: &DataFrame, keep: &[bool]) -> Result<DataFrame> {
    let mask = BooleanChunked::from_slice("keep".into(), keep);
    Ok(df.filter(&mask)?)
}
