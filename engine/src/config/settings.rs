// Engine settings, loaded from an optional JSON file; every key falls back to its default.
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::data::csv_loader::TextEncoding;

/// Environment variable naming a JSON settings file, used when no `--config` flag is given.
pub const CONFIG_ENV_VAR: &str = "CASHFLOW_CONFIG";

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct EngineSettings {
    /// Tried in order until one decodes and parses.
    pub encodings: Vec<TextEncoding>,
    pub required_columns: RequiredColumns,
    pub accepted_extension: String,
    pub log_filter: String,
}

/// Header names of the four fields every upload must carry.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct RequiredColumns {
    pub label: String,
    pub date: String,
    pub income: String,
    pub expenses: String,
}

impl RequiredColumns {
    pub fn names(&self) -> [&str; 4] {
        [self.label.as_str(), self.date.as_str(), self.income.as_str(), self.expenses.as_str()]
    }
}

impl Default for RequiredColumns {
    fn default() -> Self {
        RequiredColumns {
            label: "Month".to_string(),
            date: "Date".to_string(),
            income: "Total Income".to_string(),
            expenses: "Fixed Expenses".to_string(),
        }
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            encodings: vec![TextEncoding::Utf8, TextEncoding::Utf8Sig, TextEncoding::Cp1251],
            required_columns: RequiredColumns::default(),
            accepted_extension: ".csv".to_string(),
            log_filter: "info".to_string(),
        }
    }
}

impl EngineSettings {
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let settings: EngineSettings = serde_json::from_str(raw).context("Invalid engine settings JSON")?;
        if settings.encodings.is_empty() {
            anyhow::bail!("Engine settings must list at least one text encoding");
        }
        Ok(settings)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file '{}'", path.display()))?;
        Self::from_json_str(&raw).with_context(|| format!("Failed to load settings from '{}'", path.display()))
    }

    /// Explicit path first, then `CASHFLOW_CONFIG`, then built-in defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_json_file(path);
        }
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::from_json_file(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }
}
