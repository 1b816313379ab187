//! Statistics module - OD aggregation, year selection and regression

mod aggregator;
mod calculator;
mod regression;
mod selector;

pub use aggregator::{OdAggregator, OdTotal, VALUE_MILLION_USD};
pub use calculator::StatsCalculator;
pub use regression::{train_test_split, LinearRegression, RegressionError, TrainTestSplit};
pub use selector::select_target_year;
