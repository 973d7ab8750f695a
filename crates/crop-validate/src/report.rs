use serde::{Deserialize, Serialize};

/// Which consolidation check produced an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    MissingColumns,
    DuplicateKeys,
    MissingTarget,
    NonNumericTarget,
    EmptyTable,
}

impl IssueKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MissingColumns => "missing_columns",
            Self::DuplicateKeys => "duplicate_keys",
            Self::MissingTarget => "missing_target",
            Self::NonNumericTarget => "non_numeric_target",
            Self::EmptyTable => "empty_table",
        }
    }
}

/// A problem found in a consolidated table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsolidationIssue {
    pub kind: IssueKind,
    /// Human-readable description.
    pub message: String,
    /// Columns involved, if any.
    pub columns: Vec<String>,
    /// Count of offending rows.
    pub count: Option<u64>,
}

/// Outcome of validating a consolidated table. Valid when no issue was found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsolidationReport {
    pub issues: Vec<ConsolidationIssue>,
}

impl ConsolidationReport {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn issue_count(&self) -> usize {
        self.issues.len()
    }

    /// The issue messages in check order.
    pub fn messages(&self) -> Vec<String> {
        self.issues.iter().map(|issue| issue.message.clone()).collect()
    }

    pub fn has(&self, kind: IssueKind) -> bool {
        self.issues.iter().any(|issue| issue.kind == kind)
    }
}
