//! OD Bar Chart Renderer
//! Reads the top-N summary table and renders it as a static PNG bar chart.
//!
//! Layout matches a 10x6 inch figure at 150 dpi: title on top, one bar per
//! OD pair, rotated pair labels along the x axis.

use crate::data::{float_values, string_values, DataLoader, LoaderError, DESTINATION, ORIGIN};
use crate::stats::VALUE_MILLION_USD;
use plotters::prelude::*;
use plotters::style::FontTransform;
use polars::prelude::{DataFrame, PolarsError, PolarsResult};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::info;

pub const CHART_SIZE: (u32, u32) = (1500, 900);
pub const CHART_TITLE: &str = "Top 10 State OD Pairs by Freight Value";
pub const Y_LABEL: &str = "Value (million USD)";

const BAR_COLOR: RGBColor = RGBColor(31, 119, 180);

#[derive(Error, Debug)]
pub enum ChartError {
    #[error(transparent)]
    Loader(#[from] LoaderError),
    #[error("Summary table is unreadable: {0}")]
    Polars(#[from] PolarsError),
    #[error("Failed to prepare output directory: {0}")]
    Io(#[from] std::io::Error),
    #[error("Chart rendering failed: {0}")]
    Render(String),
}

fn render_error<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError::Render(e.to_string())
}

/// One bar: "<origin> → <destination>" and its value.
#[derive(Debug, Clone, PartialEq)]
pub struct OdBar {
    pub label: String,
    pub value: f64,
}

/// Renders OD summary tables with plotters.
pub struct BarChartRenderer;

impl BarChartRenderer {
    /// Build bars from a summary table, sorted by value descending.
    pub fn bars_from_summary(df: &DataFrame) -> PolarsResult<Vec<OdBar>> {
        let origins = string_values(df, ORIGIN)?;
        let destinations = string_values(df, DESTINATION)?;
        let values = float_values(df, VALUE_MILLION_USD)?;

        let mut bars: Vec<OdBar> = origins
            .into_iter()
            .zip(destinations)
            .zip(values)
            .map(|((o, d), v)| OdBar {
                label: format!(
                    "{} \u{2192} {}",
                    o.unwrap_or_default(),
                    d.unwrap_or_default()
                ),
                value: v.unwrap_or(0.0),
            })
            .collect();
        bars.sort_by(|a, b| b.value.total_cmp(&a.value));
        Ok(bars)
    }

    /// Load `input` and write the chart to `output`.
    pub fn render_summary_file(input: &Path, output: &Path) -> Result<Vec<OdBar>, ChartError> {
        let loader = DataLoader::load_csv(input)?;
        let bars = Self::bars_from_summary(loader.get_dataframe())?;

        if let Some(parent) = output.parent() {
            fs::create_dir_all(parent)?;
        }
        Self::draw(&bars, output)?;
        info!(path = %output.display(), bars = bars.len(), "Saved");
        Ok(bars)
    }

    /// Draw a vertical bar chart at [`CHART_SIZE`].
    pub fn draw(bars: &[OdBar], output: &Path) -> Result<(), ChartError> {
        let root = BitMapBackend::new(output, CHART_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(render_error)?;

        let n = bars.len().max(1) as u32;
        let y_max = bars
            .iter()
            .map(|b| b.value)
            .fold(0.0_f64, f64::max)
            .max(1.0)
            * 1.05;

        let mut chart = ChartBuilder::on(&root)
            .caption(CHART_TITLE, ("sans-serif", 32))
            .margin(20)
            .x_label_area_size(220)
            .y_label_area_size(90)
            .build_cartesian_2d((0u32..n).into_segmented(), 0f64..y_max)
            .map_err(render_error)?;

        let labels: Vec<String> = bars.iter().map(|b| b.label.clone()).collect();
        let label_of = |v: &SegmentValue<u32>| match v {
            SegmentValue::CenterOf(i) => labels.get(*i as usize).cloned().unwrap_or_default(),
            _ => String::new(),
        };

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(bars.len().max(1))
            .x_label_formatter(&label_of)
            .x_label_style(
                ("sans-serif", 18)
                    .into_font()
                    .transform(FontTransform::Rotate90),
            )
            .y_desc(Y_LABEL)
            .axis_desc_style(("sans-serif", 22))
            .draw()
            .map_err(render_error)?;

        chart
            .draw_series(
                Histogram::vertical(&chart)
                    .style(BAR_COLOR.filled())
                    .margin(12)
                    .data(bars.iter().enumerate().map(|(i, b)| (i as u32, b.value))),
            )
            .map_err(render_error)?;

        root.present().map_err(render_error)?;
        Ok(())
    }
}
