//! Left-joins context tables onto the yield table by (country, year).

use std::collections::BTreeMap;
use std::time::Instant;

use crop_model::ContextKind;
use crop_model::schema::{CONTEXT_COLUMNS, CONTEXT_KEY, COUNTRY, YEAR};
use polars::prelude::{
    DataFrame, DataType, IntoLazy, JoinArgs, JoinType, SortMultipleOptions, col,
};
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::frame::require_column;

const ROW_INDEX: &str = "__row";

/// Cleaned context tables keyed by kind. Joins run in kind order
/// (pesticides, rainfall, temperature).
pub type ContextTables = BTreeMap<ContextKind, DataFrame>;

/// True when the table already carries all three context columns.
pub fn has_context_columns(df: &DataFrame) -> bool {
    CONTEXT_COLUMNS.iter().all(|name| df.column(name).is_ok())
}

/// Fuses the yield table with the supplied context tables.
///
/// A table that already has every context column is returned unchanged.
/// Otherwise each context table is left-joined on (country, year): yield
/// rows without a match get a null value and are never dropped. Context keys
/// that repeat fan the matching yield row out once per match. A context
/// whose value column is already present in the yield table is skipped.
pub fn fuse(yield_df: &DataFrame, contexts: &ContextTables) -> Result<DataFrame> {
    if has_context_columns(yield_df) {
        debug!("yield table already carries context columns");
        return Ok(yield_df.clone());
    }

    let start = Instant::now();
    let mut result = yield_df.clone();
    for (kind, context) in contexts {
        let value_column = kind.value_column();
        if result.column(value_column).is_ok() {
            warn!(kind = %kind, column = value_column, "column already present, skipping join");
            continue;
        }
        result = left_join_context(&result, context, *kind)?;
    }

    info!(
        yield_rows = yield_df.height(),
        output_rows = result.height(),
        contexts = contexts.len(),
        duration_ms = start.elapsed().as_millis(),
        "fused context tables"
    );
    Ok(result)
}

fn left_join_context(left: &DataFrame, context: &DataFrame, kind: ContextKind) -> Result<DataFrame> {
    let value_column = kind.value_column();
    for column in CONTEXT_KEY {
        require_column(left, "fusion", column)?;
        require_column(context, kind.as_str(), column)?;
    }
    require_column(context, kind.as_str(), value_column)?;

    let keys = || [col(COUNTRY), col(YEAR)];
    let key_types = || {
        [
            col(COUNTRY).cast(DataType::String),
            col(YEAR).cast(DataType::Int64),
        ]
    };
    let right = context
        .clone()
        .lazy()
        .select([
            col(COUNTRY),
            col(YEAR),
            col(value_column).cast(DataType::Float64),
        ])
        .with_columns(key_types());

    // Null keys never match; the row index restores the yield table's order.
    let joined = left
        .clone()
        .lazy()
        .with_columns(key_types())
        .with_row_index(ROW_INDEX, None)
        .join(right, keys(), keys(), JoinArgs::new(JoinType::Left))
        .sort(
            [ROW_INDEX],
            SortMultipleOptions::default().with_maintain_order(true),
        )
        .collect()?
        .drop(ROW_INDEX)?;

    let fanned_out = joined.height().saturating_sub(left.height());
    if fanned_out > 0 {
        warn!(kind = %kind, extra_rows = fanned_out, "duplicate context keys multiplied yield rows");
    }
    Ok(joined)
}
