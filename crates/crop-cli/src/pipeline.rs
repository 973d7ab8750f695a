//! Consolidation pipeline with explicit stages.
//!
//! 1. **Ingest**: read the yield table and whichever context tables exist
//! 2. **Clean**: standardize, normalize, coerce, deduplicate
//! 3. **Fuse**: left-join the context tables onto the yield table
//! 4. **Features**: optionally derive bucketed and interaction columns
//! 5. **Validate**: build the consolidation report and summary
//! 6. **Output**: write the consolidated CSV and the text summary

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use crop_ingest::{RawSourcePaths, RawSources, YieldLayout, load_consolidated, write_csv_frame};
use crop_model::schema::{YIELD, default_column_mapping};
use crop_transform::{
    ContextTables, build_features, clean_context_data, clean_yield_data_with_mapping,
    coerce_consolidated_types, fuse, has_context_columns,
};
use crop_validate::{ConsolidationReport, FusionSummary, validate_consolidated};
use polars::prelude::DataFrame;
use tracing::{debug, info, info_span, warn};

use crate::config::SUMMARY_FILE;

/// Header carrying the yield in the plain FAO export.
const PLAIN_YIELD_VALUE_COLUMN: &str = "Value";

/// Row count observed after one stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageCount {
    pub stage: String,
    pub rows: usize,
}

impl StageCount {
    fn new(stage: impl Into<String>, rows: usize) -> Self {
        Self {
            stage: stage.into(),
            rows,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsolidateOptions {
    pub raw_dir: PathBuf,
    pub output: PathBuf,
    pub with_features: bool,
}

#[derive(Debug)]
pub struct ConsolidationResult {
    pub table: DataFrame,
    pub stages: Vec<StageCount>,
    pub report: ConsolidationReport,
    pub summary: FusionSummary,
    pub output: PathBuf,
    pub summary_path: PathBuf,
}

/// Runs every stage and writes the outputs.
///
/// The table is written even when the report carries issues so the problem
/// rows can be inspected; callers decide how to treat an invalid report.
pub fn consolidate(options: &ConsolidateOptions) -> Result<ConsolidationResult> {
    let span = info_span!("consolidate", raw_dir = %options.raw_dir.display());
    let _guard = span.enter();
    let start = Instant::now();
    let mut stages = Vec::new();

    let sources = RawSources::load(&RawSourcePaths::in_dir(&options.raw_dir))
        .context("load raw sources")?;
    stages.push(StageCount::new("raw yield", sources.yield_table.height()));

    let (yield_table, contexts) =
        info_span!("clean").in_scope(|| clean_sources(&sources, &mut stages))?;

    let mut table = fuse(&yield_table, &contexts).context("fuse context tables")?;
    stages.push(StageCount::new("fused", table.height()));

    if options.with_features {
        table = build_features(&table).context("build features")?;
    }

    let report = validate_consolidated(&table);
    for message in report.messages() {
        warn!(%message, "consolidation issue");
    }
    let summary = FusionSummary::from_frame(&table);

    write_csv_frame(&table, &options.output).context("write consolidated table")?;
    let summary_path = summary_path_for(&options.output);
    fs::write(&summary_path, summary.render())
        .with_context(|| format!("write summary {}", summary_path.display()))?;

    info!(
        rows = table.height(),
        columns = table.width(),
        issues = report.issue_count(),
        output = %options.output.display(),
        duration_ms = start.elapsed().as_millis(),
        "consolidation complete"
    );
    Ok(ConsolidationResult {
        table,
        stages,
        report,
        summary,
        output: options.output.clone(),
        summary_path,
    })
}

fn clean_sources(
    sources: &RawSources,
    stages: &mut Vec<StageCount>,
) -> Result<(DataFrame, ContextTables)> {
    let mut mapping = default_column_mapping();
    if sources.yield_layout == YieldLayout::Plain {
        mapping.insert(PLAIN_YIELD_VALUE_COLUMN.to_string(), YIELD.to_string());
    }
    let yield_table = clean_yield_data_with_mapping(&sources.yield_table, &mapping)
        .with_context(|| format!("clean {}", sources.yield_path.display()))?;
    stages.push(StageCount::new("clean yield", yield_table.height()));

    let mut contexts = ContextTables::new();
    if has_context_columns(&yield_table) {
        debug!(
            skipped = sources.contexts.len(),
            "yield table already carries context columns, skipping context tables"
        );
        return Ok((yield_table, contexts));
    }
    for (kind, raw) in &sources.contexts {
        let cleaned =
            clean_context_data(raw, *kind).with_context(|| format!("clean {kind} table"))?;
        stages.push(StageCount::new(format!("clean {kind}"), cleaned.height()));
        contexts.insert(*kind, cleaned);
    }
    Ok((yield_table, contexts))
}

/// `fusion_summary.txt` in the directory of `output`.
pub fn summary_path_for(output: &Path) -> PathBuf {
    match output.parent() {
        Some(dir) => dir.join(SUMMARY_FILE),
        None => PathBuf::from(SUMMARY_FILE),
    }
}

/// Reloads a consolidated table and validates it.
pub fn validate_file(path: &Path) -> Result<(ConsolidationReport, FusionSummary)> {
    let raw = load_consolidated(path)?;
    let table = coerce_consolidated_types(&raw)
        .with_context(|| format!("restore column types of {}", path.display()))?;
    let report = validate_consolidated(&table);
    let summary = FusionSummary::from_frame(&table);
    info!(
        path = %path.display(),
        rows = table.height(),
        issues = report.issue_count(),
        "validated consolidated table"
    );
    Ok((report, summary))
}
