//! Canonical column names and the raw-to-canonical column mapping.
//!
//! Every cleaned table in the workspace uses these names. Raw source files
//! arrive with FAO-style headers (`Area`, `Item`, `hg/ha_yield`, ...) and are
//! renamed onto this schema by the column standardizer.

use std::collections::BTreeMap;

pub const COUNTRY: &str = "country";
pub const CROP: &str = "crop";
pub const YEAR: &str = "year";
pub const YIELD: &str = "yield";
pub const RAINFALL_MM: &str = "rainfall_mm";
pub const PESTICIDES_TONNES: &str = "pesticides_tonnes";
pub const AVG_TEMP: &str = "avg_temp";

/// Prediction target.
pub const TARGET_COLUMN: &str = YIELD;

/// Columns every consolidated table must carry.
pub const CANONICAL_COLUMNS: [&str; 7] = [
    COUNTRY,
    CROP,
    YEAR,
    YIELD,
    RAINFALL_MM,
    PESTICIDES_TONNES,
    AVG_TEMP,
];

/// Uniqueness key of an observation.
pub const OBSERVATION_KEY: [&str; 3] = [COUNTRY, CROP, YEAR];

/// Join key shared by the yield table and every context table.
pub const CONTEXT_KEY: [&str; 2] = [COUNTRY, YEAR];

/// The three context value columns, in join order.
pub const CONTEXT_COLUMNS: [&str; 3] = [PESTICIDES_TONNES, RAINFALL_MM, AVG_TEMP];

/// Numeric columns the yield cleaner coerces.
pub const NUMERIC_COLUMNS: [&str; 4] = [YIELD, RAINFALL_MM, PESTICIDES_TONNES, AVG_TEMP];

// Derived feature columns.
pub const TEMP_CATEGORY: &str = "temp_category";
pub const RAINFALL_CATEGORY: &str = "rainfall_category";
pub const LOG_PESTICIDES: &str = "log_pesticides";
pub const TEMP_RAIN_INTERACTION: &str = "temp_rain_interaction";

/// Raw header to canonical name pairs used when no custom mapping is supplied.
pub const DEFAULT_COLUMN_MAPPING: [(&str, &str); 7] = [
    ("Area", COUNTRY),
    ("Item", CROP),
    ("Year", YEAR),
    ("hg/ha_yield", YIELD),
    ("average_rain_fall_mm_per_year", RAINFALL_MM),
    ("pesticides_tonnes", PESTICIDES_TONNES),
    ("avg_temp", AVG_TEMP),
];

/// Builds an owned copy of [`DEFAULT_COLUMN_MAPPING`].
pub fn default_column_mapping() -> BTreeMap<String, String> {
    DEFAULT_COLUMN_MAPPING
        .iter()
        .map(|(raw, canonical)| ((*raw).to_string(), (*canonical).to_string()))
        .collect()
}

/// Numeric model inputs, in the column order the default pipeline expects.
pub const BASE_NUMERIC_FEATURES: [&str; 3] = [RAINFALL_MM, PESTICIDES_TONNES, AVG_TEMP];

/// Categorical model inputs, in the column order the default pipeline expects.
pub const BASE_CATEGORICAL_FEATURES: [&str; 2] = [CROP, COUNTRY];

pub const ENGINEERED_NUMERIC_FEATURES: [&str; 2] = [LOG_PESTICIDES, TEMP_RAIN_INTERACTION];
pub const ENGINEERED_CATEGORICAL_FEATURES: [&str; 2] = [TEMP_CATEGORY, RAINFALL_CATEGORY];
