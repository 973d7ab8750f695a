//! Diagnostics for consolidated crop yield tables.
//!
//! Validation never repairs or rejects data; it reports. Callers decide
//! whether a table with issues is still usable.

pub mod engine;
pub mod report;
pub mod summary;

pub use engine::{duplicate_key_rows, validate_consolidated};
pub use report::{ConsolidationIssue, ConsolidationReport, IssueKind};
pub use summary::{FusionSummary, MissingStat};
