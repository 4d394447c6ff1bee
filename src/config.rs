//! Run configuration for the refinement pipeline.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Which columns the sentinel replacement touches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SentinelScope {
    /// Every column of the table.
    #[default]
    All,
    /// Only columns named in the code dictionary.
    Dictionary,
}

/// Tunables of a refinement run. Every field has a default, so a config file
/// only needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RefineConfig {
    /// Destination of the refined CSV.
    pub output: PathBuf,

    /// Code meaning "not applicable".
    pub sentinel: i64,

    pub sentinel_scope: SentinelScope,

    /// Column checked for implausible values.
    pub outlier_column: String,

    /// Values strictly above this are treated as outliers.
    pub outlier_threshold: i64,
}

impl Default for RefineConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("refined_census_data.csv"),
            sentinel: -8,
            sentinel_scope: SentinelScope::All,
            outlier_column: "HOURS_PER_WEEK_WORKED".to_string(),
            // typical 40 hour week plus generous overtime
            outlier_threshold: 100,
        }
    }
}

impl RefineConfig {
    /// Load a JSON config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("parsing config file {}", path.display()))
    }
}
