//! Missing-value imputation and outlier filtering for consolidated tables.

use std::collections::BTreeMap;

use crop_common::{column_f64_values, column_string_values, mean, median, present, std_dev};
use crop_model::schema::{COUNTRY, TARGET_COLUMN};
use polars::prelude::{DataFrame, DataType};
use tracing::debug;

use crate::error::Result;
use crate::frame::{filter_rows, float_column, require_column};

/// How missing numeric values are filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImputeStrategy {
    #[default]
    Median,
    Mean,
    /// Per-country median, then the global median for what remains.
    CountryMedian,
}

/// Fills nulls in every Float64 column except the target. A column with no
/// present values is left as is.
pub fn impute_missing_values(df: &DataFrame, strategy: ImputeStrategy) -> Result<DataFrame> {
    let mut out = df.clone();
    let countries = column_string_values(df, COUNTRY);

    let numeric: Vec<String> = df
        .get_columns()
        .iter()
        .filter(|column| column.dtype() == &DataType::Float64)
        .map(|column| column.name().to_string())
        .filter(|name| name != TARGET_COLUMN)
        .collect();

    for name in numeric {
        let Some(mut values) = column_f64_values(df, &name) else {
            continue;
        };
        let missing = values.iter().filter(|v| v.is_none()).count();
        if missing == 0 {
            continue;
        }

        if strategy == ImputeStrategy::CountryMedian
            && let Some(countries) = &countries
        {
            fill_by_group(&mut values, countries);
        }
        let global = match strategy {
            ImputeStrategy::Mean => mean(&present(&values)),
            ImputeStrategy::Median | ImputeStrategy::CountryMedian => median(&present(&values)),
        };
        if let Some(fill) = global {
            for value in values.iter_mut().filter(|v| v.is_none()) {
                *value = Some(fill);
            }
        }

        debug!(column = %name, missing, ?strategy, "imputed missing values");
        out.with_column(float_column(&name, values))?;
    }
    Ok(out)
}

fn fill_by_group(values: &mut [Option<f64>], groups: &[Option<String>]) {
    let mut members: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for (value, group) in values.iter().zip(groups) {
        if let (Some(value), Some(group)) = (value, group) {
            members.entry(group.as_str()).or_default().push(*value);
        }
    }
    let medians: BTreeMap<&str, f64> = members
        .into_iter()
        .filter_map(|(group, vals)| Some((group, median(&vals)?)))
        .collect();

    for (value, group) in values.iter_mut().zip(groups) {
        if value.is_none()
            && let Some(fill) = group.as_deref().and_then(|g| medians.get(g))
        {
            *value = Some(*fill);
        }
    }
}

/// Keeps rows whose `column` lies within mean ± `n_std` sample standard
/// deviations. Rows with a missing value are dropped. With fewer than two
/// present values no spread can be measured and every present row is kept.
pub fn remove_outliers(df: &DataFrame, column: &str, n_std: f64) -> Result<DataFrame> {
    require_column(df, "outlier filter", column)?;
    let values = column_f64_values(df, column).unwrap_or_default();
    let observed = present(&values);

    let bounds = mean(&observed)
        .zip(std_dev(&observed, 1))
        .map(|(mean, std)| (mean - n_std * std, mean + n_std * std));
    let keep: Vec<bool> = values
        .iter()
        .map(|value| match (value, bounds) {
            (Some(v), Some((lower, upper))) => *v >= lower && *v <= upper,
            (Some(_), None) => true,
            (None, _) => false,
        })
        .collect();

    let removed = keep.iter().filter(|k| !**k).count();
    debug!(column, removed, n_std, "removed outliers");
    filter_rows(df, &keep)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{Column, NamedFrom, Series};

    fn frame() -> DataFrame {
        DataFrame::new(vec![
            Column::from(Series::new("country".into(), &["A", "A", "A", "B", "B"])),
            Column::from(Series::new(
                "rainfall_mm".into(),
                &[Some(1.0f64), Some(3.0), None, Some(100.0), None],
            )),
            Column::from(Series::new(
                "yield".into(),
                &[Some(1.0f64), None, Some(2.0), Some(3.0), Some(4.0)],
            )),
        ])
        .unwrap()
    }

    #[test]
    fn median_fills_everything_but_target() {
        let out = impute_missing_values(&frame(), ImputeStrategy::Median).unwrap();
        assert_eq!(
            column_f64_values(&out, "rainfall_mm").unwrap(),
            vec![Some(1.0), Some(3.0), Some(3.0), Some(100.0), Some(3.0)]
        );
        assert_eq!(column_f64_values(&out, "yield").unwrap()[1], None);
    }

    #[test]
    fn mean_strategy_uses_mean() {
        let out = impute_missing_values(&frame(), ImputeStrategy::Mean).unwrap();
        let values = column_f64_values(&out, "rainfall_mm").unwrap();
        assert!((values[2].unwrap() - 104.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn country_median_prefers_group_value() {
        let out = impute_missing_values(&frame(), ImputeStrategy::CountryMedian).unwrap();
        assert_eq!(
            column_f64_values(&out, "rainfall_mm").unwrap(),
            vec![Some(1.0), Some(3.0), Some(2.0), Some(100.0), Some(100.0)]
        );
    }

    #[test]
    fn outliers_outside_band_are_removed() {
        let mut values = vec![Some(10.0f64); 20];
        values.push(Some(1000.0));
        values.push(None);
        let df = DataFrame::new(vec![Column::from(Series::new("yield".into(), values))]).unwrap();
        let out = remove_outliers(&df, "yield", 3.0).unwrap();
        assert_eq!(out.height(), 20);
    }

    #[test]
    fn outlier_filter_requires_column() {
        let df = frame();
        assert!(remove_outliers(&df, "avg_temp", 3.0).is_err());
    }
}
