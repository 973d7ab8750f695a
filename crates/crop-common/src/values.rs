//! Polars AnyValue utility functions.
//!
//! Conversions used by the cleaners: text columns read from CSV are coerced
//! to numbers here, and anything unparseable comes back as `None`.

use polars::prelude::{AnyValue, DataFrame, DataType};

/// Converts a Polars `AnyValue` to its text form, or `None` for nulls.
///
/// ```
/// use polars::prelude::AnyValue;
/// use crop_common::any_to_string;
///
/// assert_eq!(any_to_string(AnyValue::Null), None);
/// assert_eq!(any_to_string(AnyValue::Int32(42)).as_deref(), Some("42"));
/// assert_eq!(any_to_string(AnyValue::Float64(1.50)).as_deref(), Some("1.5"));
/// ```
pub fn any_to_string(value: AnyValue<'_>) -> Option<String> {
    match value {
        AnyValue::Null => None,
        AnyValue::Int8(v) => Some(v.to_string()),
        AnyValue::Int16(v) => Some(v.to_string()),
        AnyValue::Int32(v) => Some(v.to_string()),
        AnyValue::Int64(v) => Some(v.to_string()),
        AnyValue::UInt8(v) => Some(v.to_string()),
        AnyValue::UInt16(v) => Some(v.to_string()),
        AnyValue::UInt32(v) => Some(v.to_string()),
        AnyValue::UInt64(v) => Some(v.to_string()),
        AnyValue::Float32(v) => Some(format_numeric(f64::from(v))),
        AnyValue::Float64(v) => Some(format_numeric(v)),
        AnyValue::String(s) => Some(s.to_string()),
        AnyValue::StringOwned(s) => Some(s.to_string()),
        AnyValue::Boolean(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

/// Formats a floating-point number without trailing zeros.
///
/// ```
/// use crop_common::format_numeric;
///
/// assert_eq!(format_numeric(1.0), "1");
/// assert_eq!(format_numeric(2.25), "2.25");
/// assert_eq!(format_numeric(0.0), "0");
/// ```
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if !s.contains('.') {
        return s;
    }
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() || trimmed == "-" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Converts an `AnyValue` to `f64`. Nulls, NaN, and unparseable text give `None`.
pub fn any_to_f64(value: AnyValue<'_>) -> Option<f64> {
    let number = match value {
        AnyValue::Null => None,
        AnyValue::Int8(v) => Some(f64::from(v)),
        AnyValue::Int16(v) => Some(f64::from(v)),
        AnyValue::Int32(v) => Some(f64::from(v)),
        AnyValue::Int64(v) => Some(v as f64),
        AnyValue::UInt8(v) => Some(f64::from(v)),
        AnyValue::UInt16(v) => Some(f64::from(v)),
        AnyValue::UInt32(v) => Some(f64::from(v)),
        AnyValue::UInt64(v) => Some(v as f64),
        AnyValue::Float32(v) => Some(f64::from(v)),
        AnyValue::Float64(v) => Some(v),
        AnyValue::String(s) => parse_f64(s),
        AnyValue::StringOwned(s) => parse_f64(&s),
        _ => None,
    };
    number.filter(|v| !v.is_nan())
}

/// Converts an `AnyValue` to `i64`.
///
/// Floats and numeric text are accepted only when integral (`"2001.0"` is
/// 2001, `"2001.5"` is `None`).
pub fn any_to_i64(value: AnyValue<'_>) -> Option<i64> {
    match value {
        AnyValue::Null => None,
        AnyValue::Int8(v) => Some(i64::from(v)),
        AnyValue::Int16(v) => Some(i64::from(v)),
        AnyValue::Int32(v) => Some(i64::from(v)),
        AnyValue::Int64(v) => Some(v),
        AnyValue::UInt8(v) => Some(i64::from(v)),
        AnyValue::UInt16(v) => Some(i64::from(v)),
        AnyValue::UInt32(v) => Some(i64::from(v)),
        AnyValue::UInt64(v) => i64::try_from(v).ok(),
        AnyValue::Float32(v) => integral_f64(f64::from(v)),
        AnyValue::Float64(v) => integral_f64(v),
        AnyValue::String(s) => parse_i64(s),
        AnyValue::StringOwned(s) => parse_i64(&s),
        _ => None,
    }
}

fn integral_f64(v: f64) -> Option<i64> {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < i64::MAX as f64 {
        Some(v as i64)
    } else {
        None
    }
}

/// Parses a string as `f64`, returning `None` for invalid or empty strings.
pub fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// Parses a string as `i64`, accepting integral decimal text such as `"1990.0"`.
pub fn parse_i64(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .parse::<i64>()
        .ok()
        .or_else(|| trimmed.parse::<f64>().ok().and_then(integral_f64))
}

/// True for the integer and floating-point dtypes.
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Extracts a column as optional strings. `None` when the column is absent.
pub fn column_string_values(df: &DataFrame, name: &str) -> Option<Vec<Option<String>>> {
    let column = df.column(name).ok()?;
    let mut values = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        values.push(column.get(idx).ok().and_then(any_to_string));
    }
    Some(values)
}

/// Extracts a column as optional floats. `None` when the column is absent.
pub fn column_f64_values(df: &DataFrame, name: &str) -> Option<Vec<Option<f64>>> {
    let column = df.column(name).ok()?;
    let mut values = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        values.push(column.get(idx).ok().and_then(any_to_f64));
    }
    Some(values)
}

/// Extracts a column as optional integers. `None` when the column is absent.
pub fn column_i64_values(df: &DataFrame, name: &str) -> Option<Vec<Option<i64>>> {
    let column = df.column(name).ok()?;
    let mut values = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        values.push(column.get(idx).ok().and_then(any_to_i64));
    }
    Some(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{Column, NamedFrom, Series};

    #[test]
    fn test_any_to_string_null() {
        assert_eq!(any_to_string(AnyValue::Null), None);
    }

    #[test]
    fn test_any_to_string_numbers() {
        assert_eq!(any_to_string(AnyValue::Int64(-100)).as_deref(), Some("-100"));
        assert_eq!(any_to_string(AnyValue::Float64(1.0)).as_deref(), Some("1"));
    }

    #[test]
    fn test_format_numeric_keeps_integers_intact() {
        assert_eq!(format_numeric(100.0), "100");
        assert_eq!(format_numeric(-0.5), "-0.5");
        assert_eq!(format_numeric(1e21), "1000000000000000000000");
    }

    #[test]
    fn test_any_to_f64() {
        assert_eq!(any_to_f64(AnyValue::Null), None);
        assert_eq!(any_to_f64(AnyValue::Int32(42)), Some(42.0));
        assert_eq!(any_to_f64(AnyValue::String("2.5")), Some(2.5));
        assert_eq!(any_to_f64(AnyValue::String("..")), None);
        assert_eq!(any_to_f64(AnyValue::Float64(f64::NAN)), None);
        assert_eq!(any_to_f64(AnyValue::String("NaN")), None);
    }

    #[test]
    fn test_any_to_i64() {
        assert_eq!(any_to_i64(AnyValue::Int32(1990)), Some(1990));
        assert_eq!(any_to_i64(AnyValue::Float64(1990.0)), Some(1990));
        assert_eq!(any_to_i64(AnyValue::Float64(1990.5)), None);
        assert_eq!(any_to_i64(AnyValue::String("2001")), Some(2001));
        assert_eq!(any_to_i64(AnyValue::String("2001.0")), Some(2001));
        assert_eq!(any_to_i64(AnyValue::String("year")), None);
    }

    #[test]
    fn test_parse_helpers() {
        assert_eq!(parse_f64("  3.25 "), Some(3.25));
        assert_eq!(parse_f64(""), None);
        assert_eq!(parse_i64(" -7 "), Some(-7));
        assert_eq!(parse_i64("   "), None);
    }

    #[test]
    fn test_column_extraction() {
        let df = DataFrame::new(vec![
            Column::from(Series::new("name".into(), &[Some("a"), None])),
            Column::from(Series::new("value".into(), &["1.5", "x"])),
        ])
        .unwrap();
        assert_eq!(
            column_string_values(&df, "name").unwrap(),
            vec![Some("a".to_string()), None]
        );
        assert_eq!(
            column_f64_values(&df, "value").unwrap(),
            vec![Some(1.5), None]
        );
        assert!(column_f64_values(&df, "missing").is_none());
    }
}
