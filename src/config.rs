use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::chart::export::DEFAULT_DPI;
use crate::chart::style::ChartStyle;
use crate::data::parser::ParseOptions;

/// Looked up in the working directory at startup.
pub const CONFIG_FILE: &str = "eds-linescan.json";

// ---------------------------------------------------------------------------
// Application configuration
// ---------------------------------------------------------------------------

/// Optional settings; every field falls back to the standard EDS export
/// layout and chart look.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub parse: ParseOptions,
    pub chart: ChartStyle,
    /// Resolution of downloaded PNGs.
    pub export_dpi: u32,
    /// TrueType font for exported charts.
    pub font_path: Option<PathBuf>,
    /// Extra element → `#RRGGBB` defaults, merged over the built-in table.
    pub default_colors: BTreeMap<String, String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            parse: ParseOptions::default(),
            chart: ChartStyle::default(),
            export_dpi: DEFAULT_DPI,
            font_path: None,
            default_colors: BTreeMap::new(),
        }
    }
}

impl AppConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("parsing configuration JSON")
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("in {}", path.display()))
    }

    /// Load [`CONFIG_FILE`] if present. A broken file is logged and ignored.
    pub fn load_or_default() -> Self {
        let path = Path::new(CONFIG_FILE);
        if !path.exists() {
            return Self::default();
        }
        match Self::from_path(path) {
            Ok(config) => {
                log::info!("loaded configuration from {CONFIG_FILE}");
                config
            }
            Err(e) => {
                log::error!("ignoring configuration: {e:#}");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        assert_eq!(AppConfig::from_json("{}").unwrap(), AppConfig::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = AppConfig::from_json(
            r##"{
                "parse": { "header_line": 3 },
                "chart": { "line_width": 1.5 },
                "export_dpi": 150,
                "default_colors": { "MgK": "#00AAFF" }
            }"##,
        )
        .unwrap();
        assert_eq!(config.parse.header_line, 3);
        assert_eq!(config.parse.end_column, "SED");
        assert_eq!(config.chart.line_width, 1.5);
        assert_eq!(config.chart.figure_size, (12.0, 5.0));
        assert_eq!(config.export_dpi, 150);
        assert_eq!(config.default_colors["MgK"], "#00AAFF");
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(AppConfig::from_json("{ not json").is_err());
    }
}
