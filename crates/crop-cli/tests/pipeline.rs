//! End-to-end tests for the consolidation pipeline.

use std::fs;
use std::path::Path;

use crop_cli::pipeline::{ConsolidateOptions, consolidate, summary_path_for, validate_file};
use crop_validate::IssueKind;
use tempfile::TempDir;

const PLAIN_YIELD: &str = "\
Domain,Area,Item,Year,Unit,Value
Crops,Kenya,Maize,1990,hg/ha,15000
Crops,Kenya,Maize,1991,hg/ha,16000
Crops,Viet Nam,\"Rice, paddy\",1990,hg/ha,30000
";

const PESTICIDES: &str = "\
Domain,Area,Element,Item,Year,Unit,Value
Pesticides Use,Kenya,Use,Pesticides (total),1990,tonnes of active ingredients,500
Pesticides Use,Vietnam,Use,Pesticides (total),1990,tonnes of active ingredients,1200
";

const RAINFALL: &str = "\
 Area,Year,average_rain_fall_mm_per_year
Kenya,1990,630
Kenya,1991,630
Vietnam,1990,1821
";

const TEMPERATURE: &str = "\
year,country,avg_temp
1990,Kenya,19.5
1991,Kenya,19.9
1990,Viet Nam,26.1
";

fn write_raw_dir(dir: &Path) {
    fs::write(dir.join("yield.csv"), PLAIN_YIELD).unwrap();
    fs::write(dir.join("pesticides.csv"), PESTICIDES).unwrap();
    fs::write(dir.join("rainfall.csv"), RAINFALL).unwrap();
    fs::write(dir.join("temp.csv"), TEMPERATURE).unwrap();
}

fn options(dir: &TempDir, with_features: bool) -> ConsolidateOptions {
    let raw_dir = dir.path().join("raw");
    fs::create_dir_all(&raw_dir).unwrap();
    write_raw_dir(&raw_dir);
    ConsolidateOptions {
        raw_dir,
        output: dir.path().join("processed").join("consolidated.csv"),
        with_features,
    }
}

#[test]
fn plain_layout_consolidates_into_valid_table() {
    let dir = TempDir::new().unwrap();
    let result = consolidate(&options(&dir, false)).unwrap();

    assert!(result.report.is_valid(), "{:?}", result.report.messages());
    assert_eq!(result.table.height(), 3);
    for column in ["country", "crop", "year", "yield", "pesticides_tonnes", "rainfall_mm", "avg_temp"] {
        assert!(result.table.column(column).is_ok(), "missing {column}");
    }
    assert_eq!(result.summary.unique_countries, Some(2));
    assert_eq!(result.summary.year_range, Some((1990, 1991)));

    let first = result.stages.first().unwrap();
    assert_eq!((first.stage.as_str(), first.rows), ("raw yield", 3));
    let last = result.stages.last().unwrap();
    assert_eq!((last.stage.as_str(), last.rows), ("fused", 3));

    assert!(result.output.exists());
    let summary = fs::read_to_string(&result.summary_path).unwrap();
    assert!(summary.contains("DATA FUSION SUMMARY"));
    assert!(summary.contains("pesticides_tonnes: 1 (33.33%)"));
}

#[test]
fn feature_flag_adds_engineered_columns() {
    let dir = TempDir::new().unwrap();
    let result = consolidate(&options(&dir, true)).unwrap();
    for column in [
        "temp_category",
        "rainfall_category",
        "log_pesticides",
        "temp_rain_interaction",
    ] {
        assert!(result.table.column(column).is_ok(), "missing {column}");
    }
}

#[test]
fn written_table_validates_after_reload() {
    let dir = TempDir::new().unwrap();
    let result = consolidate(&options(&dir, false)).unwrap();
    let (report, summary) = validate_file(&result.output).unwrap();
    assert!(report.is_valid(), "{:?}", report.messages());
    assert_eq!(summary.total_rows, 3);
}

#[test]
fn reloaded_duplicates_are_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("consolidated.csv");
    fs::write(
        &path,
        "country,crop,year,yield,pesticides_tonnes,rainfall_mm,avg_temp\n\
         Kenya,Maize,1990,15000,500,630,19.5\n\
         Kenya,Maize,1990,15500,500,630,19.5\n\
         Peru,Potatoes,1990,,10,1200,12.0\n",
    )
    .unwrap();

    let (report, _) = validate_file(&path).unwrap();
    assert!(!report.is_valid());
    assert!(report.has(IssueKind::DuplicateKeys));
    assert!(report.has(IssueKind::MissingTarget));
    assert!(!report.has(IssueKind::NonNumericTarget));
    assert!(
        report
            .messages()
            .contains(&"Found 2 duplicate rows for (country, crop, year)".to_string())
    );
}

#[test]
fn pre_merged_layout_ignores_unusable_context_files() {
    let dir = TempDir::new().unwrap();
    let raw_dir = dir.path().join("raw");
    fs::create_dir_all(&raw_dir).unwrap();
    fs::write(
        raw_dir.join("yield_df.csv"),
        ",Area,Item,Year,hg/ha_yield,average_rain_fall_mm_per_year,pesticides_tonnes,avg_temp\n\
         0,Albania,Maize,1990,36613,1485,121,16.37\n\
         1,Albania,Potatoes,1990,66667,1485,121,16.37\n",
    )
    .unwrap();
    fs::write(raw_dir.join("pesticides.csv"), "Area,Unit\nAlbania,tonnes\n").unwrap();

    let result = consolidate(&ConsolidateOptions {
        raw_dir,
        output: dir.path().join("consolidated.csv"),
        with_features: false,
    })
    .unwrap();

    assert!(result.report.is_valid(), "{:?}", result.report.messages());
    assert_eq!(result.table.height(), 2);
    assert!(result.stages.iter().all(|s| !s.stage.starts_with("clean pesticides")));
}

#[test]
fn missing_raw_directory_fails() {
    let dir = TempDir::new().unwrap();
    let err = consolidate(&ConsolidateOptions {
        raw_dir: dir.path().join("absent"),
        output: dir.path().join("out.csv"),
        with_features: false,
    })
    .unwrap_err();
    assert!(format!("{err:#}").contains("load raw sources"));
}

#[test]
fn missing_consolidated_file_fails() {
    let dir = TempDir::new().unwrap();
    assert!(validate_file(&dir.path().join("consolidated.csv")).is_err());
}

#[test]
fn summary_lands_next_to_output() {
    assert_eq!(
        summary_path_for(Path::new("data/processed/consolidated.csv")),
        Path::new("data/processed/fusion_summary.txt")
    );
}
