//! Property tests for the cleaning and feature stages.

use std::collections::{BTreeMap, BTreeSet};

use crop_common::{column_f64_values, column_string_values, composite_keys};
use crop_model::COUNTRY_ALIASES;
use crop_transform::{
    ContextTables, clean_yield_data, fuse, normalize_country_names, rainfall_category,
    standardize_columns, temp_category,
};
use polars::prelude::{Column, DataFrame, NamedFrom, Series};
use proptest::prelude::*;

fn single_column(name: &str, values: Vec<Option<String>>) -> DataFrame {
    DataFrame::new(vec![Column::from(Series::new(name.into(), values))]).unwrap()
}

proptest! {
    #[test]
    fn standardized_names_are_trimmed_and_cells_kept(
        raw in proptest::collection::btree_set("[ ]{0,2}[A-Za-z_]{1,8}[ ]{0,2}", 1..6),
        mapped in proptest::collection::vec(("[A-Za-z_]{1,8}", "[a-z_]{1,8}"), 0..4),
    ) {
        // Distinct trimmed names keep the test away from rename collisions.
        let trimmed: BTreeSet<String> = raw.iter().map(|n| n.trim().to_string()).collect();
        prop_assume!(trimmed.len() == raw.len());

        let columns: Vec<Column> = raw
            .iter()
            .map(|name| Column::from(Series::new(name.as_str().into(), &[name.as_str(), "x"])))
            .collect();
        let df = DataFrame::new(columns).unwrap();
        let mapping: BTreeMap<String, String> = mapped.into_iter().collect();

        if let Ok(out) = standardize_columns(&df, &mapping) {
            prop_assert_eq!(out.height(), df.height());
            let targets: BTreeSet<&String> = mapping.values().collect();
            for (before, after) in df.get_columns().iter().zip(out.get_columns()) {
                let name = after.name().to_string();
                prop_assert_eq!(name.trim(), name.as_str());
                prop_assert!(trimmed.contains(&name) || targets.contains(&name));
                prop_assert!(before.as_materialized_series().equals_missing(after.as_materialized_series()));
            }
        }
    }

    #[test]
    fn country_normalization_is_idempotent(
        names in proptest::collection::vec(prop_oneof![
            proptest::sample::select(COUNTRY_ALIASES.iter().map(|(a, _)| (*a).to_string()).collect::<Vec<_>>()),
            "[ A-Za-z]{0,12}",
        ], 0..20)
    ) {
        let df = single_column("country", names.into_iter().map(Some).collect());
        let once = normalize_country_names(&df, "country").unwrap();
        let twice = normalize_country_names(&once, "country").unwrap();
        prop_assert!(once.equals_missing(&twice));
    }

    #[test]
    fn cleaned_yield_has_no_missing_target_or_duplicate_keys(
        rows in proptest::collection::vec(
            (
                proptest::sample::select(vec!["Kenya", "Peru", " India"]),
                proptest::sample::select(vec!["Maize", "Wheat "]),
                proptest::sample::select(vec!["1990", "1991", "1991.0", "bad"]),
                proptest::option::of(prop_oneof![
                    (0.0f64..1e6).prop_map(|v| v.to_string()),
                    Just("n/a".to_string()),
                ]),
            ),
            0..40,
        )
    ) {
        let df = DataFrame::new(vec![
            Column::from(Series::new("Area".into(), rows.iter().map(|r| r.0).collect::<Vec<_>>())),
            Column::from(Series::new("Item".into(), rows.iter().map(|r| r.1).collect::<Vec<_>>())),
            Column::from(Series::new("Year".into(), rows.iter().map(|r| r.2).collect::<Vec<_>>())),
            Column::from(Series::new(
                "hg/ha_yield".into(),
                rows.iter().map(|r| r.3.clone()).collect::<Vec<_>>(),
            )),
        ])
        .unwrap();
        let out = clean_yield_data(&df).unwrap();

        let yields = column_f64_values(&out, "yield").unwrap();
        prop_assert!(yields.iter().all(Option::is_some));
        let keys = composite_keys(&out, &["country", "crop", "year"]).unwrap();
        let unique: BTreeSet<_> = keys.iter().collect();
        prop_assert_eq!(unique.len(), keys.len());
    }

    #[test]
    fn fusion_with_unique_keys_preserves_row_count(
        countries in proptest::collection::vec(proptest::sample::select(vec!["A", "B", "C"]), 0..30),
        context in proptest::collection::btree_map(proptest::sample::select(vec!["A", "B", "D"]), 0.0f64..3000.0, 0..3),
    ) {
        let n = countries.len();
        let yield_df = DataFrame::new(vec![
            Column::from(Series::new("country".into(), countries.clone())),
            Column::from(Series::new("crop".into(), vec!["Maize"; n])),
            Column::from(Series::new("year".into(), vec![2000i64; n])),
        ])
        .unwrap();
        let rainfall = DataFrame::new(vec![
            Column::from(Series::new("country".into(), context.keys().copied().collect::<Vec<_>>())),
            Column::from(Series::new("year".into(), vec![2000i64; context.len()])),
            Column::from(Series::new("rainfall_mm".into(), context.values().copied().collect::<Vec<_>>())),
        ])
        .unwrap();
        let mut tables = ContextTables::new();
        tables.insert(crop_model::ContextKind::Rainfall, rainfall);

        let out = fuse(&yield_df, &tables).unwrap();
        prop_assert_eq!(out.height(), n);
        prop_assert_eq!(
            column_string_values(&out, "crop").unwrap(),
            vec![Some("Maize".to_string()); n]
        );
    }

    #[test]
    fn bins_are_left_closed(t in -100.0f64..100.0, r in 0.0f64..5000.0) {
        let expected_temp = if t < 10.0 { "cold" } else if t < 20.0 { "temperate" } else if t < 30.0 { "warm" } else { "hot" };
        prop_assert_eq!(temp_category(t), Some(expected_temp));
        let expected_rain = if r < 500.0 { "arid" } else if r < 1000.0 { "semi_arid" } else if r < 2000.0 { "moderate" } else { "wet" };
        prop_assert_eq!(rainfall_category(r), Some(expected_rain));
    }
}
