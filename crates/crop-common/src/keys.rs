//! Composite row keys over a set of columns.

use polars::prelude::DataFrame;

use crate::values::column_string_values;

/// One entry per row: the text form of each key column, `None` for nulls.
pub type RowKey = Vec<Option<String>>;

/// Builds the composite key of every row. Returns `None` when any key
/// column is absent.
pub fn composite_keys(df: &DataFrame, keys: &[&str]) -> Option<Vec<RowKey>> {
    let mut columns = Vec::with_capacity(keys.len());
    for key in keys {
        columns.push(column_string_values(df, key)?);
    }
    let rows = (0..df.height())
        .map(|idx| {
            columns
                .iter()
                .map(|values| values[idx].as_ref().map(|v| v.trim().to_string()))
                .collect()
        })
        .collect();
    Some(rows)
}
