//! Consolidation checks.

use std::collections::BTreeMap;

use crop_common::{composite_keys, is_numeric_dtype};
use crop_model::schema::{CANONICAL_COLUMNS, OBSERVATION_KEY, TARGET_COLUMN};
use polars::prelude::DataFrame;
use tracing::{debug, info};

use crate::report::{ConsolidationIssue, ConsolidationReport, IssueKind};

/// Runs every consolidation check on `df` and collects the problems.
///
/// Checks are independent: a failed check never stops the later ones, and
/// the table is never modified.
pub fn validate_consolidated(df: &DataFrame) -> ConsolidationReport {
    let mut report = ConsolidationReport::default();
    check_required_columns(df, &mut report);
    check_duplicate_keys(df, &mut report);
    check_target(df, &mut report);
    check_not_empty(df, &mut report);

    info!(
        rows = df.height(),
        issues = report.issue_count(),
        valid = report.is_valid(),
        "validated consolidated table"
    );
    report
}

fn check_required_columns(df: &DataFrame, report: &mut ConsolidationReport) {
    let missing: Vec<String> = CANONICAL_COLUMNS
        .iter()
        .filter(|name| df.column(name).is_err())
        .map(|name| (*name).to_string())
        .collect();
    if missing.is_empty() {
        return;
    }
    report.issues.push(ConsolidationIssue {
        kind: IssueKind::MissingColumns,
        message: format!("Missing required columns: {}", missing.join(", ")),
        count: Some(missing.len() as u64),
        columns: missing,
    });
}

/// Counts every row that shares its key with another row, first
/// occurrences included.
pub fn duplicate_key_rows(df: &DataFrame, keys: &[&str]) -> Option<u64> {
    let rows = composite_keys(df, keys)?;
    let mut counts = BTreeMap::new();
    for key in &rows {
        *counts.entry(key).or_insert(0u64) += 1;
    }
    Some(counts.values().filter(|count| **count > 1).sum())
}

fn check_duplicate_keys(df: &DataFrame, report: &mut ConsolidationReport) {
    let Some(duplicates) = duplicate_key_rows(df, &OBSERVATION_KEY) else {
        debug!("key columns absent, skipping duplicate check");
        return;
    };
    if duplicates == 0 {
        return;
    }
    report.issues.push(ConsolidationIssue {
        kind: IssueKind::DuplicateKeys,
        message: format!("Found {duplicates} duplicate rows for (country, crop, year)"),
        columns: OBSERVATION_KEY.iter().map(|k| (*k).to_string()).collect(),
        count: Some(duplicates),
    });
}

fn check_target(df: &DataFrame, report: &mut ConsolidationReport) {
    let Ok(target) = df.column(TARGET_COLUMN) else {
        return;
    };
    let nulls = target.null_count() as u64;
    if nulls > 0 {
        report.issues.push(ConsolidationIssue {
            kind: IssueKind::MissingTarget,
            message: format!("Target column '{TARGET_COLUMN}' has {nulls} missing values"),
            columns: vec![TARGET_COLUMN.to_string()],
            count: Some(nulls),
        });
    }
    if !is_numeric_dtype(target.dtype()) {
        report.issues.push(ConsolidationIssue {
            kind: IssueKind::NonNumericTarget,
            message: format!("Target column '{TARGET_COLUMN}' is not numeric"),
            columns: vec![TARGET_COLUMN.to_string()],
            count: None,
        });
    }
}

fn check_not_empty(df: &DataFrame, report: &mut ConsolidationReport) {
    if df.height() == 0 {
        report.issues.push(ConsolidationIssue {
            kind: IssueKind::EmptyTable,
            message: "Table is empty".to_string(),
            columns: Vec::new(),
            count: None,
        });
    }
}
