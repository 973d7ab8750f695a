//! Properties of the fitted transform.

use crop_preprocess::Preprocessor;
use polars::prelude::{Column, DataFrame, NamedFrom, Series};
use proptest::prelude::*;

fn frame(values: &[Option<f64>], crops: &[Option<String>]) -> DataFrame {
    DataFrame::new(vec![
        Column::from(Series::new("rainfall_mm".into(), values)),
        Column::from(Series::new("crop".into(), crops)),
    ])
    .unwrap()
}

proptest! {
    #[test]
    fn rows_have_fixed_width_and_at_most_one_hot(
        train in proptest::collection::vec(
            (proptest::option::of(-1e4f64..1e4), proptest::option::of("[A-C]")),
            1..30,
        ),
        serve in proptest::collection::vec(
            (proptest::option::of(-1e4f64..1e4), proptest::option::of("[A-E]")),
            0..30,
        ),
    ) {
        let (values, crops): (Vec<_>, Vec<_>) = train.into_iter().unzip();
        let fitted = Preprocessor::new(vec!["rainfall_mm".into()], vec!["crop".into()])
            .fit(&frame(&values, &crops))
            .unwrap();

        let (values, crops): (Vec<_>, Vec<_>) = serve.into_iter().unzip();
        let rows = fitted.transform(&frame(&values, &crops)).unwrap();
        prop_assert_eq!(rows.len(), values.len());
        for row in rows {
            prop_assert_eq!(row.len(), fitted.output_width());
            prop_assert!(row[0].is_finite());
            let hot: f64 = row[1..].iter().sum();
            prop_assert!(hot == 0.0 || hot == 1.0);
        }
    }
}
