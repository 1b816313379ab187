//! Predicts freight value with a least-squares model and saves
//! `plots/ai_predictions.csv`.

use faf_explorer::logging::init_logging;
use faf_explorer::{run_prediction, PredictorConfig};
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_logging();

    let config = PredictorConfig::default();
    info!(path = %config.input_path.display(), "Loading data");
    run_prediction(&config)?;
    Ok(())
}
