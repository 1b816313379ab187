//! Toy Value Predictor
//! Fits a linear model of shipment value on a few numeric columns.

use crate::config::PredictorConfig;
use crate::data::{float_values, DataLoader, LoaderError};
use crate::report::{self, ReportError};
use crate::stats::{train_test_split, LinearRegression, RegressionError, StatsCalculator};
use polars::prelude::*;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum PredictorError {
    #[error(transparent)]
    Loader(#[from] LoaderError),
    #[error("Missing required columns: {}", .0.join(", "))]
    MissingRequiredColumn(Vec<String>),
    #[error("Only {0} complete rows; need at least two to split")]
    InsufficientRows(usize),
    #[error(transparent)]
    Regression(#[from] RegressionError),
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
}

/// Held-out evaluation of a fitted model.
#[derive(Debug, Clone)]
pub struct PredictionReport {
    pub model: LinearRegression,
    pub r2: f64,
    pub mae: f64,
    pub actual: Vec<f64>,
    pub predicted: Vec<f64>,
    /// Complete rows after dropping nulls.
    pub rows_used: usize,
}

/// Feature matrix and target, restricted to rows with no missing cell.
pub fn complete_rows(
    df: &DataFrame,
    features: &[String],
    target: &str,
) -> Result<(Vec<Vec<f64>>, Vec<f64>), PredictorError> {
    let present: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();
    let missing: Vec<String> = features
        .iter()
        .map(String::as_str)
        .chain(std::iter::once(target))
        .filter(|name| !present.iter().any(|p| p == name))
        .map(str::to_string)
        .collect();
    if !missing.is_empty() {
        return Err(PredictorError::MissingRequiredColumn(missing));
    }

    let feature_columns = features
        .iter()
        .map(|f| float_values(df, f))
        .collect::<PolarsResult<Vec<_>>>()?;
    let target_column = float_values(df, target)?;

    let mut x = Vec::new();
    let mut y = Vec::new();
    for (i, target_value) in target_column.into_iter().enumerate() {
        let row: Option<Vec<f64>> = feature_columns.iter().map(|c| c[i]).collect();
        if let (Some(row), Some(target_value)) = (row, target_value) {
            x.push(row);
            y.push(target_value);
        }
    }
    Ok((x, y))
}

/// Split, fit and score a model on `df`.
pub fn evaluate(df: &DataFrame, config: &PredictorConfig) -> Result<PredictionReport, PredictorError> {
    let (x, y) = complete_rows(df, &config.features, &config.target)?;
    if x.len() < 2 {
        return Err(PredictorError::InsufficientRows(x.len()));
    }

    let split = train_test_split(x.len(), config.test_fraction, config.seed);
    let pick_x = |idx: &[usize]| idx.iter().map(|&i| x[i].clone()).collect::<Vec<_>>();
    let pick_y = |idx: &[usize]| idx.iter().map(|&i| y[i]).collect::<Vec<_>>();

    let model = LinearRegression::fit(&pick_x(&split.train), &pick_y(&split.train))?;
    let actual = pick_y(&split.test);
    let predicted = model.predict(&pick_x(&split.test));

    Ok(PredictionReport {
        r2: StatsCalculator::r2_score(&actual, &predicted),
        mae: StatsCalculator::mean_absolute_error(&actual, &predicted),
        model,
        actual,
        predicted,
        rows_used: x.len(),
    })
}

/// Load, evaluate, print and save predictions per `config`.
pub fn run_prediction(config: &PredictorConfig) -> Result<PredictionReport, PredictorError> {
    let loader = DataLoader::load_csv(&config.input_path)?;
    let report = evaluate(loader.get_dataframe(), config)?;

    info!(
        rows = report.rows_used,
        test_rows = report.actual.len(),
        intercept = report.model.intercept,
        coefficients = ?report.model.coefficients,
        "Model trained"
    );
    println!("Model trained: R\u{b2}={:.3}, MAE={:.2}", report.r2, report.mae);
    println!("Example predictions:");
    for (p, a) in report
        .predicted
        .iter()
        .zip(&report.actual)
        .take(config.preview_rows)
    {
        println!(" Predicted={p:.2} | Actual={a:.2}");
    }

    let mut out = DataFrame::new(vec![
        Column::new("actual".into(), report.actual.clone()),
        Column::new("predicted".into(), report.predicted.clone()),
    ])?;
    report::write_csv(&mut out, &config.output_path)?;

    Ok(report)
}
