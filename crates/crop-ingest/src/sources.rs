//! Discovery and loading of the raw source tables in a data directory.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crop_model::ContextKind;
use polars::prelude::DataFrame;
use tracing::{info, warn};

use crate::frame::{read_csv_frame, read_indexed_csv};
use crate::error::{IngestError, Result};

/// Pre-merged yield table with context columns and a leading index column.
pub const PRE_MERGED_YIELD_FILE: &str = "yield_df.csv";
/// Plain FAO yield export.
pub const PLAIN_YIELD_FILE: &str = "yield.csv";

/// Conventional file locations inside a raw data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSourcePaths {
    pub pre_merged_yield: PathBuf,
    pub plain_yield: PathBuf,
    pub pesticides: PathBuf,
    pub rainfall: PathBuf,
    pub temperature: PathBuf,
}

impl RawSourcePaths {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            pre_merged_yield: dir.join(PRE_MERGED_YIELD_FILE),
            plain_yield: dir.join(PLAIN_YIELD_FILE),
            pesticides: dir.join(ContextKind::Pesticides.default_file_name()),
            rainfall: dir.join(ContextKind::Rainfall.default_file_name()),
            temperature: dir.join(ContextKind::Temperature.default_file_name()),
        }
    }

    pub fn context(&self, kind: ContextKind) -> &Path {
        match kind {
            ContextKind::Pesticides => &self.pesticides,
            ContextKind::Rainfall => &self.rainfall,
            ContextKind::Temperature => &self.temperature,
        }
    }
}

/// Which yield layout was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YieldLayout {
    /// `yield_df.csv`: already carries the context columns.
    PreMerged,
    /// `yield.csv`: FAO export whose yield lives in `Value`.
    Plain,
}

/// Raw tables loaded from disk, untouched apart from the index column drop.
#[derive(Debug, Clone)]
pub struct RawSources {
    pub yield_table: DataFrame,
    pub yield_layout: YieldLayout,
    pub yield_path: PathBuf,
    pub contexts: BTreeMap<ContextKind, DataFrame>,
}

impl RawSources {
    /// Loads the yield table (pre-merged preferred) and every context table
    /// that exists. A missing context file is logged and skipped.
    pub fn load(paths: &RawSourcePaths) -> Result<Self> {
        let (yield_table, yield_layout, yield_path) = if paths.pre_merged_yield.exists() {
            (
                read_indexed_csv(&paths.pre_merged_yield)?,
                YieldLayout::PreMerged,
                paths.pre_merged_yield.clone(),
            )
        } else if paths.plain_yield.exists() {
            (
                read_csv_frame(&paths.plain_yield)?,
                YieldLayout::Plain,
                paths.plain_yield.clone(),
            )
        } else {
            return Err(IngestError::FileNotFound {
                path: paths.pre_merged_yield.clone(),
            });
        };

        let mut contexts = BTreeMap::new();
        for kind in ContextKind::ALL {
            let path = paths.context(kind);
            if path.exists() {
                contexts.insert(kind, read_csv_frame(path)?);
            } else {
                warn!(kind = %kind, path = %path.display(), "context file not found, skipping");
            }
        }

        info!(
            path = %yield_path.display(),
            rows = yield_table.height(),
            contexts = contexts.len(),
            "loaded raw sources"
        );
        Ok(Self {
            yield_table,
            yield_layout,
            yield_path,
            contexts,
        })
    }
}
