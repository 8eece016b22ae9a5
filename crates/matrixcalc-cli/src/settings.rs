//! User settings for the calculator front end.
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use matrixcalc_engine::format::DEFAULT_PRECISION;

/// Settings loadable from a JSON file; every field has a default and can be
/// overridden from the command line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CalcSettings {
    /// Where the calculation history lives.
    pub history_path: PathBuf,
    /// Decimals shown when rendering results.
    pub precision: usize,
}

impl Default for CalcSettings {
    fn default() -> Self {
        Self {
            history_path: PathBuf::from("matrixcalc_history.json"),
            precision: DEFAULT_PRECISION,
        }
    }
}

/// Load settings from a JSON file.
pub fn load_settings(path: &Path) -> Result<CalcSettings> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("Malformed settings file: {}", path.display()))
}
