//! CSV Data Loader Module
//! Handles CSV file loading and column extraction using Polars.

use polars::prelude::*;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Input file not found: {0}")]
    InputFileNotFound(PathBuf),
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
}

/// A raw table loaded from disk, plus where it came from.
pub struct DataLoader {
    df: DataFrame,
    file_path: PathBuf,
}

impl DataLoader {
    /// Load a CSV file using Polars. Column types are inferred from every row.
    pub fn load_csv(file_path: impl AsRef<Path>) -> Result<Self, LoaderError> {
        let file_path = file_path.as_ref();
        if !file_path.is_file() {
            return Err(LoaderError::InputFileNotFound(file_path.to_path_buf()));
        }

        info!(path = %file_path.display(), "Loading CSV");
        let df = LazyCsvReader::new(file_path)
            .with_infer_schema_length(None)
            .with_has_header(true)
            .finish()?
            .collect()?;
        debug!(rows = df.height(), cols = df.width(), "CSV loaded");

        Ok(Self {
            df,
            file_path: file_path.to_path_buf(),
        })
    }

    /// Get list of column names, in file order.
    pub fn get_columns(&self) -> Vec<String> {
        column_names(&self.df)
    }

    /// Get the number of distinct non-null values in a column.
    pub fn get_unique_count(&self, column: &str) -> Result<usize, LoaderError> {
        let values = string_values(&self.df, column)?;
        Ok(values.into_iter().flatten().collect::<HashSet<_>>().len())
    }

    pub fn get_row_count(&self) -> usize {
        self.df.height()
    }

    pub fn get_dataframe(&self) -> &DataFrame {
        &self.df
    }

    pub fn get_file_path(&self) -> &Path {
        &self.file_path
    }
}

/// Column names of a DataFrame as owned strings.
pub fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Read a column as strings; numeric cells are rendered as text.
pub fn string_values(df: &DataFrame, column: &str) -> PolarsResult<Vec<Option<String>>> {
    let as_str = df.column(column)?.cast(&DataType::String)?;
    let ca = as_str.str()?;
    Ok(ca.into_iter().map(|v| v.map(str::to_string)).collect())
}

/// Read a column as floats; unparsable cells become `None`.
pub fn float_values(df: &DataFrame, column: &str) -> PolarsResult<Vec<Option<f64>>> {
    let as_f64 = df.column(column)?.cast(&DataType::Float64)?;
    let ca = as_f64.f64()?;
    Ok(ca.into_iter().map(|v| v.filter(|x| !x.is_nan())).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt::Write as _;

    #[test]
    fn late_float_in_integer_column_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("late_float.csv");
        let mut csv = String::from("orig,value_2022\n");
        for _ in 0..10_005 {
            csv.push_str("CA,1\n");
        }
        writeln!(csv, "NY,30.5").unwrap();
        std::fs::write(&path, csv).unwrap();

        let loader = DataLoader::load_csv(&path).unwrap();
        let values = float_values(loader.get_dataframe(), "value_2022").unwrap();
        assert_eq!(values.len(), 10_006);
        assert_eq!(values[10_005], Some(30.5));
        assert_eq!(values[0], Some(1.0));
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = DataLoader::load_csv(dir.path().join("absent.csv")).err().unwrap();
        assert!(matches!(err, LoaderError::InputFileNotFound(_)));
    }
}
