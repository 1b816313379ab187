//! Report Writer Module
//! Writes summary tables as CSV and echoes them to stdout.

use polars::prelude::*;
use std::fs::{self, File};
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to serialize table: {0}")]
    Polars(#[from] PolarsError),
}

/// Write `df` as CSV with a header row, creating parent directories.
pub fn write_csv(df: &mut DataFrame, path: &Path) -> Result<(), ReportError> {
    let io_err = |source| ReportError::Io {
        path: path.display().to_string(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let mut file = File::create(path).map_err(io_err)?;
    CsvWriter::new(&mut file).include_header(true).finish(df)?;

    info!(path = %path.display(), rows = df.height(), "Saved");
    Ok(())
}

/// Print a table to stdout under a heading.
pub fn print_table(title: &str, df: &DataFrame) {
    println!("\n{title}");
    println!("{df}");
}
