//! Persisted application settings.
//!
//! The config file is JSON at `<config dir>/portcall/config.json`. A missing or
//! unreadable file yields [`AppConfig::default`], so a first run never fails here.

use crate::error::{PortcallError, Result, ResultExt as _};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_INPUT_PATH: &str = "vessel_calls.csv";
pub const DEFAULT_OUTPUT_PATH: &str = "cleaned_dataset.csv";
pub const DEFAULT_CHART_PATH: &str = "cargo_by_call.html";
pub const DEFAULT_OVERVIEW_ROWS: usize = 200;

/// Where the pipeline reads from and writes to.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct PipelineSettings {
    pub input_path: PathBuf,
    /// Overwritten on every run.
    pub output_path: PathBuf,
    pub chart_path: PathBuf,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            chart_path: PathBuf::from(DEFAULT_CHART_PATH),
        }
    }
}

/// Display preferences handed to the reporter at construction.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ReportConfig {
    /// Rows shown in the overview table.
    pub overview_rows: usize,
    /// Console: maximum number of columns printed, `None` for all.
    pub max_columns: Option<usize>,
    /// Console: total line width before columns are dropped, `None` to never wrap.
    pub display_width: Option<usize>,
    /// Console: cells longer than this are truncated with an ellipsis.
    pub max_cell_width: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            overview_rows: DEFAULT_OVERVIEW_ROWS,
            max_columns: None,
            display_width: None,
            max_cell_width: 32,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    pub pipeline: PipelineSettings,
    pub report: ReportConfig,
}

pub fn get_config_path() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join("portcall").join("config.json"))
        .ok_or_else(|| PortcallError::Config("Failed to determine config directory".to_owned()))
}

pub fn load_app_config_from(path: &std::path::Path) -> AppConfig {
    if !path.exists() {
        return AppConfig::default();
    }

    match std::fs::read_to_string(path)
        .map_err(PortcallError::from)
        .and_then(|content| serde_json::from_str::<AppConfig>(&content).map_err(Into::into))
    {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Ignoring unreadable config {}: {e}", path.display());
            AppConfig::default()
        }
    }
}

pub fn save_app_config_to(config: &AppConfig, path: &std::path::Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let content = serde_json::to_string_pretty(config)?;
    std::fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
