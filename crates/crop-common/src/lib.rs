//! Shared helpers for working with polars frames.

pub mod keys;
pub mod stats;
pub mod values;

pub use keys::{RowKey, composite_keys};
pub use stats::{mean, median, present, std_dev};
pub use values::{
    any_to_f64, any_to_i64, any_to_string, column_f64_values, column_i64_values,
    column_string_values, format_numeric, is_numeric_dtype, parse_f64, parse_i64,
};
