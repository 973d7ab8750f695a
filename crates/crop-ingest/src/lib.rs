//! Raw data ingestion for crop yield estimation.
//!
//! Reads the FAO-style yield export and the pesticide, rainfall, and
//! temperature context tables as text-typed DataFrames, and writes the
//! consolidated table back out.

pub mod error;
pub mod frame;
pub mod sources;

pub use error::{IngestError, Result};
pub use frame::{
    load_consolidated, read_csv_frame, read_csv_headers, read_indexed_csv, write_csv_frame,
};
pub use sources::{
    PLAIN_YIELD_FILE, PRE_MERGED_YIELD_FILE, RawSourcePaths, RawSources, YieldLayout,
};
