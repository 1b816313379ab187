//! Charts module - Static chart rendering

mod bar;

pub use bar::{BarChartRenderer, ChartError, OdBar, CHART_SIZE, CHART_TITLE, Y_LABEL};
