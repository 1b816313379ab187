//! Configuration Module
//! Fixed paths, column aliases and tuning knobs for each run.

use std::path::{Path, PathBuf};

/// Logical column roles the resolver looks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Origin,
    Destination,
    Mode,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Origin => "origin",
            Role::Destination => "destination",
            Role::Mode => "mode",
        }
    }
}

/// Ordered candidate column names per role. Earlier entries win.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnAliases {
    pub origin: Vec<String>,
    pub destination: Vec<String>,
    pub mode: Vec<String>,
}

impl Default for ColumnAliases {
    fn default() -> Self {
        fn owned(names: &[&str]) -> Vec<String> {
            names.iter().map(|s| s.to_string()).collect()
        }

        Self {
            origin: owned(&[
                "orig",
                "origin",
                "origin_state",
                "dms_origst",
                "dms_orig",
                "fr_orig",
                "o",
            ]),
            destination: owned(&[
                "dest",
                "destination",
                "destination_state",
                "dms_destst",
                "dms_dest",
                "fr_dest",
                "d",
            ]),
            mode: owned(&["mode", "dms_mode", "fr_inmode", "fr_outmode"]),
        }
    }
}

impl ColumnAliases {
    pub fn for_role(&self, role: Role) -> &[String] {
        match role {
            Role::Origin => &self.origin,
            Role::Destination => &self.destination,
            Role::Mode => &self.mode,
        }
    }
}

/// Settings for the exploration run (resolve, reshape, aggregate, report).
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub root: PathBuf,
    pub input_path: PathBuf,
    pub summary_path: PathBuf,
    pub chart_path: PathBuf,
    pub aliases: ColumnAliases,
    /// Year used when present; otherwise the most recent year is taken.
    pub preferred_year: i32,
    /// Mode value kept when at least one record carries it.
    pub mode_filter: String,
    pub top_n: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self::from_root(project_root())
    }
}

impl AnalysisConfig {
    /// Derive every path from a project root.
    pub fn from_root(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let plots_dir = root.join("plots");
        Self {
            input_path: root.join("data").join("raw").join("sample_bottlenecks.csv"),
            summary_path: plots_dir.join("top10_value.csv"),
            chart_path: plots_dir.join("top10_value.png"),
            root,
            aliases: ColumnAliases::default(),
            preferred_year: 2022,
            mode_filter: "truck".to_string(),
            top_n: 10,
        }
    }
}

/// Settings for the toy value predictor.
#[derive(Debug, Clone)]
pub struct PredictorConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub features: Vec<String>,
    pub target: String,
    pub test_fraction: f64,
    pub seed: u64,
    /// Number of example predictions echoed to stdout.
    pub preview_rows: usize,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self::from_root(project_root())
    }
}

impl PredictorConfig {
    pub fn from_root(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            input_path: root.join("data").join("raw").join("sample_bottlenecks.csv"),
            output_path: root.join("plots").join("ai_predictions.csv"),
            features: vec![
                "tons_2022".to_string(),
                "dist_band".to_string(),
                "tmiles_2022".to_string(),
            ],
            target: "value_2022".to_string(),
            test_fraction: 0.2,
            seed: 42,
            preview_rows: 5,
        }
    }
}

/// Directory holding `data/` and `plots/`.
pub fn project_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}
