//! FAF Explorer - top origin-destination pairs by shipment value
//!
//! Reads `data/raw/sample_bottlenecks.csv`, writes `plots/top10_value.csv`.

use faf_explorer::logging::init_logging;
use faf_explorer::{run_exploration, AnalysisConfig, ExplorationOutcome};
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_logging();

    let config = AnalysisConfig::default();
    match run_exploration(&config)? {
        ExplorationOutcome::Completed { output, .. } => {
            info!(path = %output.display(), "Exploration complete");
        }
        ExplorationOutcome::NoValueColumns => {
            info!("No value columns; no output written");
        }
    }
    Ok(())
}
