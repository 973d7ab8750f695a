//! Table transformations for crop yield data.
//!
//! Raw tables pass through these stages in order:
//!
//! 1. [`standardize_columns`]: trim header whitespace and rename onto the
//!    canonical schema.
//! 2. [`normalize_country_names`]: collapse country aliases.
//! 3. [`clean_yield_data`] / [`clean_context_data`]: coerce types, drop
//!    unusable rows, and deduplicate keys.
//! 4. [`fuse`]: left-join context tables onto the yield table.
//! 5. [`build_features`]: derive bucketed and interaction features.

pub mod clean;
pub mod columns;
pub mod country;
pub mod dedupe;
pub mod error;
pub mod features;
mod frame;
pub mod fusion;
pub mod impute;

pub use clean::{
    clean_context_data, clean_context_data_tagged, clean_yield_data, clean_yield_data_with_mapping,
    coerce_consolidated_types,
};
pub use columns::standardize_columns;
pub use country::normalize_country_names;
pub use dedupe::dedupe_by_keys;
pub use error::{Result, TransformError};
pub use features::{
    FeatureSet, build_features, log_pesticides, rainfall_category, select_features,
    temp_category, temp_rain_interaction,
};
pub use fusion::{ContextTables, fuse, has_context_columns};
pub use impute::{ImputeStrategy, impute_missing_values, remove_outliers};
