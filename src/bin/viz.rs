//! Turns `plots/top10_value.csv` into `plots/top10_value.png`.

use faf_explorer::charts::BarChartRenderer;
use faf_explorer::logging::init_logging;
use faf_explorer::AnalysisConfig;

fn main() -> anyhow::Result<()> {
    init_logging();

    let config = AnalysisConfig::default();
    BarChartRenderer::render_summary_file(&config.summary_path, &config.chart_path)?;
    Ok(())
}
