//! Data module - CSV loading, column resolution and reshaping

mod loader;
mod processor;
mod resolver;
mod years;

pub use loader::{column_names, float_values, string_values, DataLoader, LoaderError};
pub use processor::{DataProcessor, ProcessorError, DESTINATION, MODE, ORIGIN, VALUE, YEAR};
pub use resolver::{ColumnResolver, ResolveError, ResolvedSchema};
pub use years::{YearColumnDetector, YearColumnError, YearColumns, YEAR_RANGE};
