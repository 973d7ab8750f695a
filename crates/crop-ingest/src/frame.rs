//! CSV reading and writing for raw and consolidated tables.
//!
//! Every column is read as text. Type coercion is left to the cleaners so a
//! single dirty cell never aborts a load.

use std::fs::{self, File};
use std::path::Path;

use polars::prelude::*;
use tracing::debug;

use crate::error::{IngestError, Result};

fn open_error(path: &Path, error: std::io::Error) -> IngestError {
    if error.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: error,
        }
    }
}

/// Reads the header row of a CSV file, stripping a UTF-8 BOM.
pub fn read_csv_headers(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path).map_err(|e| open_error(path, e))?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file);

    let mut record = csv::StringRecord::new();
    let found = reader
        .read_record(&mut record)
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    if !found || (record.len() <= 1 && record.iter().all(|cell| cell.trim().is_empty())) {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }

    Ok(record
        .iter()
        .map(|cell| cell.trim_start_matches('\u{feff}').to_string())
        .collect())
}

/// Reads a CSV file into a DataFrame with every column typed as text.
pub fn read_csv_frame(path: &Path) -> Result<DataFrame> {
    read_csv_headers(path)?;

    let mut df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.trim_start_matches('\u{feff}').to_string())
        .collect();
    df.set_column_names(names.iter().map(String::as_str))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "loaded csv"
    );
    Ok(df)
}

/// Reads a CSV whose first column is an unnamed row index and drops it.
///
/// Files without a blank leading header are returned unchanged.
pub fn read_indexed_csv(path: &Path) -> Result<DataFrame> {
    let headers = read_csv_headers(path)?;
    let df = read_csv_frame(path)?;

    let has_index = headers
        .first()
        .is_some_and(|first| first.trim().is_empty());
    if !has_index {
        return Ok(df);
    }

    let Some(index_name) = df.get_column_names().first().map(ToString::to_string) else {
        return Ok(df);
    };
    df.drop(&index_name).map_err(|e| IngestError::CsvParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Writes a DataFrame as CSV with a header row, creating parent directories.
pub fn write_csv_frame(df: &DataFrame, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| IngestError::FileWrite {
            path: parent.to_path_buf(),
            message: e.to_string(),
        })?;
    }
    let mut file = File::create(path).map_err(|e| IngestError::FileWrite {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let mut out = df.clone();
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut out)
        .map_err(|e| IngestError::FileWrite {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    debug!(path = %path.display(), rows = df.height(), "wrote csv");
    Ok(())
}

/// Loads a previously written consolidated table.
pub fn load_consolidated(path: &Path) -> Result<DataFrame> {
    if !path.exists() {
        return Err(IngestError::ConsolidatedNotFound {
            path: path.to_path_buf(),
        });
    }
    read_csv_frame(path)
}
