//! Column name standardization.

use std::collections::{BTreeMap, BTreeSet};

use polars::prelude::DataFrame;

use crate::error::{Result, TransformError};

/// Strips whitespace from every column name, then renames the names found
/// in `mapping`. Unmapped columns keep their stripped name. Cell values and
/// row count are untouched.
pub fn standardize_columns(
    df: &DataFrame,
    mapping: &BTreeMap<String, String>,
) -> Result<DataFrame> {
    let renamed: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| {
            let stripped = name.trim();
            mapping
                .get(stripped)
                .cloned()
                .unwrap_or_else(|| stripped.to_string())
        })
        .collect();

    let mut seen = BTreeSet::new();
    for name in &renamed {
        if !seen.insert(name.as_str()) {
            return Err(TransformError::DuplicateColumn {
                column: name.clone(),
            });
        }
    }

    let mut out = df.clone();
    out.set_column_names(renamed.iter().map(String::as_str))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crop_model::schema::default_column_mapping;
    use polars::prelude::{Column, NamedFrom, Series};

    fn names(df: &DataFrame) -> Vec<String> {
        df.get_column_names()
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn strips_and_renames() {
        let df = DataFrame::new(vec![
            Column::from(Series::new(" Area ".into(), &["Kenya"])),
            Column::from(Series::new("Item".into(), &["Maize"])),
            Column::from(Series::new("notes".into(), &["x"])),
        ])
        .unwrap();
        let out = standardize_columns(&df, &default_column_mapping()).unwrap();
        assert_eq!(names(&out), vec!["country", "crop", "notes"]);
        assert_eq!(names(&df), vec![" Area ", "Item", "notes"]);
    }

    #[test]
    fn colliding_names_are_rejected() {
        let df = DataFrame::new(vec![
            Column::from(Series::new("Area".into(), &["Kenya"])),
            Column::from(Series::new("country".into(), &["Peru"])),
        ])
        .unwrap();
        let err = standardize_columns(&df, &default_column_mapping()).unwrap_err();
        assert!(matches!(err, TransformError::DuplicateColumn { .. }));
    }
}
