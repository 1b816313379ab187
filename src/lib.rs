//! FAF Explorer - freight flow CSV exploration
//!
//! Resolves origin/destination/mode columns in FAF-style tables, melts wide
//! `value_YYYY` columns into a long table, ranks origin-destination pairs
//! by shipment value, charts the ranking and fits a toy value regression.

pub mod charts;
pub mod config;
pub mod data;
pub mod logging;
pub mod pipeline;
pub mod predictor;
pub mod report;
pub mod stats;

pub use config::{AnalysisConfig, ColumnAliases, PredictorConfig, Role};
pub use pipeline::{run_exploration, DatasetFacts, ExplorationOutcome, PipelineError};
pub use predictor::{run_prediction, PredictionReport, PredictorError};
