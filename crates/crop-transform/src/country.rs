//! Country name normalization.

use crop_common::column_string_values;
use crop_model::canonical_country;
use polars::prelude::DataFrame;

use crate::error::Result;
use crate::frame::string_column;

/// Trims every value of `column` and replaces known aliases with their
/// canonical country name. A table without the column is returned as is.
pub fn normalize_country_names(df: &DataFrame, column: &str) -> Result<DataFrame> {
    let mut out = df.clone();
    let Some(values) = column_string_values(df, column) else {
        return Ok(out);
    };
    let normalized = values
        .into_iter()
        .map(|value| value.map(|name| canonical_country(&name).to_string()))
        .collect();
    out.with_column(string_column(column, normalized))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{Column, NamedFrom, Series};

    fn frame(values: &[Option<&str>]) -> DataFrame {
        DataFrame::new(vec![Column::from(Series::new("country".into(), values))]).unwrap()
    }

    #[test]
    fn replaces_aliases_and_trims() {
        let df = frame(&[
            Some(" Russian Federation "),
            Some("United States of America"),
            Some("Kenya"),
            None,
        ]);
        let out = normalize_country_names(&df, "country").unwrap();
        assert_eq!(
            column_string_values(&out, "country").unwrap(),
            vec![
                Some("Russia".to_string()),
                Some("United States".to_string()),
                Some("Kenya".to_string()),
                None
            ]
        );
    }

    #[test]
    fn matching_is_case_sensitive() {
        let df = frame(&[Some("russian federation")]);
        let out = normalize_country_names(&df, "country").unwrap();
        assert_eq!(
            column_string_values(&out, "country").unwrap(),
            vec![Some("russian federation".to_string())]
        );
    }

    #[test]
    fn missing_column_is_a_no_op() {
        let df = frame(&[Some("Kenya")]);
        let out = normalize_country_names(&df, "nation").unwrap();
        assert!(out.equals_missing(&df));
    }
}
