//! Exploration Pipeline
//! load -> resolve -> reshape -> select year -> filter -> aggregate -> write.

use crate::config::AnalysisConfig;
use crate::data::{
    ColumnResolver, DataLoader, DataProcessor, LoaderError, ProcessorError, ResolveError,
    ResolvedSchema, YearColumnDetector, YearColumnError, YearColumns, VALUE,
};
use crate::report::{self, ReportError};
use crate::stats::{select_target_year, OdAggregator, OdTotal};
use polars::prelude::*;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Loader(#[from] LoaderError),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error(transparent)]
    YearColumns(#[from] YearColumnError),
    #[error(transparent)]
    Processor(#[from] ProcessorError),
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
}

/// Headline numbers about the raw table.
#[derive(Debug, Clone)]
pub struct DatasetFacts {
    pub rows: usize,
    pub unique_origins: usize,
    pub unique_destinations: usize,
    pub years: Vec<i32>,
}

/// How a run ended when it did not fail.
#[derive(Debug)]
pub enum ExplorationOutcome {
    /// The summary table was written.
    Completed {
        schema: ResolvedSchema,
        facts: DatasetFacts,
        target_year: i32,
        mode_filtered: bool,
        top: Vec<OdTotal>,
        output: PathBuf,
    },
    /// No value-year columns in the input; nothing written.
    NoValueColumns,
}

/// Run the top-N OD exploration described by `config`.
pub fn run_exploration(config: &AnalysisConfig) -> Result<ExplorationOutcome, PipelineError> {
    info!(root = %config.root.display(), "Project root");
    let loader = DataLoader::load_csv(&config.input_path)?;
    debug!(path = %loader.get_file_path().display(), rows = loader.get_row_count(), "Raw table");

    let columns = loader.get_columns();
    info!(?columns, "Columns");
    report::print_table("Preview:", &loader.get_dataframe().head(Some(5)));

    let schema = ColumnResolver::new(&config.aliases).resolve(&columns)?;
    info!(
        detected = %serde_json::to_string(&schema).unwrap_or_default(),
        "Detected columns"
    );

    let years = YearColumnDetector::detect(&columns)?;
    if years.is_empty() {
        warn!("No value_YYYY / current_value_YYYY columns found; nothing to aggregate");
        return Ok(ExplorationOutcome::NoValueColumns);
    }
    log_year_columns(&years);

    let facts = DatasetFacts {
        rows: loader.get_row_count(),
        unique_origins: loader.get_unique_count(&schema.origin)?,
        unique_destinations: loader.get_unique_count(&schema.destination)?,
        years: years.years(),
    };
    info!(
        rows = facts.rows,
        unique_origins = facts.unique_origins,
        unique_destinations = facts.unique_destinations,
        years = ?facts.years,
        "Basic facts"
    );

    let long = DataProcessor::melt_years(loader.get_dataframe(), &schema, &years)?;

    let target_year = select_target_year(&facts.years, config.preferred_year)
        .ok_or(ProcessorError::NoYearColumns)?;
    info!(target_year, "Target year");

    let mut subset = DataProcessor::filter_by_year(&long, target_year)?;
    let mode_filtered =
        schema.mode.is_some() && DataProcessor::has_mode(&long, &config.mode_filter)?;
    if mode_filtered {
        subset = DataProcessor::filter_by_mode(&subset, &config.mode_filter)?;
        info!(mode = %config.mode_filter, rows = subset.height(), "Mode filter applied");
    }

    let top = OdAggregator::top_pairs(&subset, VALUE, config.top_n)?;
    let mut summary = OdAggregator::to_dataframe(&top)?;

    report::print_table(
        &format!("Top {} OD pairs by value ({target_year}):", config.top_n),
        &summary,
    );
    report::write_csv(&mut summary, &config.summary_path)?;

    Ok(ExplorationOutcome::Completed {
        schema,
        facts,
        target_year,
        mode_filtered,
        top,
        output: config.summary_path.clone(),
    })
}

fn log_year_columns(years: &YearColumns) {
    for (year, column) in years.iter() {
        info!(year, column, "Value column");
    }
}
