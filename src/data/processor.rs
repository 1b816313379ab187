//! Data Processor Module
//! Reshapes wide per-year value columns into a long table (melt operation).

use super::loader::{float_values, string_values};
use super::resolver::ResolvedSchema;
use super::years::YearColumns;
use polars::prelude::*;
use thiserror::Error;

/// Column names of the long-form table.
pub const ORIGIN: &str = "origin";
pub const DESTINATION: &str = "destination";
pub const MODE: &str = "mode";
pub const YEAR: &str = "year";
pub const VALUE: &str = "value";

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("No year columns to reshape")]
    NoYearColumns,
}

/// Handles the wide to long transformation.
pub struct DataProcessor;

impl DataProcessor {
    /// Transform year columns to long format.
    ///
    /// Output columns: ["origin", "destination", "mode", "year", "value"].
    /// One row per (input row, year column), year-major. Id values are kept
    /// as text; `mode` is all null when the schema has no mode column. Missing
    /// values stay null.
    pub fn melt_years(
        df: &DataFrame,
        schema: &ResolvedSchema,
        years: &YearColumns,
    ) -> Result<DataFrame, ProcessorError> {
        if years.is_empty() {
            return Err(ProcessorError::NoYearColumns);
        }

        let origin_values = string_values(df, &schema.origin)?;
        let destination_values = string_values(df, &schema.destination)?;
        let mode_values = match &schema.mode {
            Some(mode_col) => string_values(df, mode_col)?,
            None => vec![None; df.height()],
        };

        let capacity = df.height() * years.len();
        let mut origins: Vec<Option<String>> = Vec::with_capacity(capacity);
        let mut destinations: Vec<Option<String>> = Vec::with_capacity(capacity);
        let mut modes: Vec<Option<String>> = Vec::with_capacity(capacity);
        let mut year_values: Vec<i32> = Vec::with_capacity(capacity);
        let mut values: Vec<Option<f64>> = Vec::with_capacity(capacity);

        for (year, value_col) in years.iter() {
            let cells = float_values(df, value_col)?;
            for (i, value) in cells.into_iter().enumerate() {
                origins.push(origin_values[i].clone());
                destinations.push(destination_values[i].clone());
                modes.push(mode_values[i].clone());
                year_values.push(year);
                values.push(value);
            }
        }

        let df = DataFrame::new(vec![
            Column::new(ORIGIN.into(), origins),
            Column::new(DESTINATION.into(), destinations),
            Column::new(MODE.into(), modes),
            Column::new(YEAR.into(), year_values),
            Column::new(VALUE.into(), values),
        ])?;

        Ok(df)
    }

    /// Filter the long table to a single year.
    pub fn filter_by_year(df: &DataFrame, year: i32) -> Result<DataFrame, ProcessorError> {
        let filtered = df.clone().lazy().filter(col(YEAR).eq(lit(year))).collect()?;
        Ok(filtered)
    }

    /// True when any `mode` cell matches `mode` case-insensitively.
    pub fn has_mode(df: &DataFrame, mode: &str) -> Result<bool, ProcessorError> {
        let modes = string_values(df, MODE)?;
        Ok(modes
            .iter()
            .flatten()
            .any(|m| m.eq_ignore_ascii_case(mode)))
    }

    /// Keep only rows whose `mode` matches case-insensitively.
    pub fn filter_by_mode(df: &DataFrame, mode: &str) -> Result<DataFrame, ProcessorError> {
        let mask: BooleanChunked = string_values(df, MODE)?
            .iter()
            .map(|m| m.as_deref().is_some_and(|m| m.eq_ignore_ascii_case(mode)))
            .collect();
        Ok(df.filter(&mask)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ColumnAliases;
    use crate::data::{column_names, ColumnResolver, YearColumnDetector};

    fn wide_frame() -> DataFrame {
        df!(
            "ORIG" => ["CA", "CA", "NY"],
            "dest" => ["TX", "TX", "FL"],
            "Mode" => ["truck", "rail", "Truck"],
            "value_2021" => [Some(1.0), None, Some(3.0)],
            "value_2022" => [Some(100.0), Some(50.0), Some(30.0)],
            "tons_2022" => [7.0, 8.0, 9.0]
        )
        .unwrap()
    }

    fn melt(df: &DataFrame) -> DataFrame {
        let columns = column_names(df);
        let aliases = ColumnAliases::default();
        let schema = ColumnResolver::new(&aliases).resolve(&columns).unwrap();
        let years = YearColumnDetector::detect(&columns).unwrap();
        DataProcessor::melt_years(df, &schema, &years).unwrap()
    }

    #[test]
    fn melt_yields_rows_times_years() {
        let wide = wide_frame();
        let long = melt(&wide);
        assert_eq!(long.height(), wide.height() * 2);
        assert_eq!(
            column_names(&long),
            vec!["origin", "destination", "mode", "year", "value"]
        );
    }

    #[test]
    fn melt_copies_ids_and_keeps_nulls() {
        let long = melt(&wide_frame());
        let origins = string_values(&long, ORIGIN).unwrap();
        let modes = string_values(&long, MODE).unwrap();
        let values = float_values(&long, VALUE).unwrap();

        // Year-major: rows 0..3 are 2021, rows 3..6 are 2022.
        assert_eq!(origins[1].as_deref(), Some("CA"));
        assert_eq!(origins[4].as_deref(), Some("CA"));
        assert_eq!(modes[2].as_deref(), Some("Truck"));
        assert_eq!(modes[5].as_deref(), Some("Truck"));
        assert_eq!(values[1], None);
        assert_eq!(values[4], Some(50.0));
    }

    #[test]
    fn melt_without_mode_column_leaves_mode_null() {
        let wide = df!(
            "origin" => [6i64, 48],
            "destination" => [48i64, 6],
            "value_2022" => [1.5, 2.5]
        )
        .unwrap();
        let long = melt(&wide);
        assert!(string_values(&long, MODE).unwrap().iter().all(Option::is_none));
        assert_eq!(
            string_values(&long, ORIGIN).unwrap(),
            vec![Some("6".to_string()), Some("48".to_string())]
        );
    }

    #[test]
    fn year_and_mode_filters() {
        let long = melt(&wide_frame());
        let year = DataProcessor::filter_by_year(&long, 2022).unwrap();
        assert_eq!(year.height(), 3);

        assert!(DataProcessor::has_mode(&year, "TRUCK").unwrap());
        let trucks = DataProcessor::filter_by_mode(&year, "truck").unwrap();
        assert_eq!(trucks.height(), 2);
        assert!(!DataProcessor::has_mode(&year, "air").unwrap());
    }
}
