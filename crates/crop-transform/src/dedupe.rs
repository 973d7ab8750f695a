//! First-occurrence deduplication on composite keys.

use std::collections::BTreeSet;

use crop_common::composite_keys;
use polars::prelude::DataFrame;
use tracing::debug;

use crate::error::Result;
use crate::frame::filter_rows;

/// Drops every row whose key repeats an earlier row's key. Nulls compare
/// equal to each other. Key columns that are absent are ignored; with no key
/// column present the table is returned unchanged.
pub fn dedupe_by_keys(df: &DataFrame, keys: &[&str]) -> Result<DataFrame> {
    if df.height() == 0 {
        return Ok(df.clone());
    }
    let present: Vec<&str> = keys
        .iter()
        .copied()
        .filter(|key| df.column(key).is_ok())
        .collect();
    let Some(rows) = composite_keys(df, &present).filter(|_| !present.is_empty()) else {
        return Ok(df.clone());
    };

    let mut seen = BTreeSet::new();
    let keep: Vec<bool> = rows.into_iter().map(|key| seen.insert(key)).collect();
    let dropped = keep.iter().filter(|k| !**k).count();
    if dropped == 0 {
        return Ok(df.clone());
    }
    debug!(dropped, keys = ?present, "dropped duplicate rows");
    filter_rows(df, &keep)
}
