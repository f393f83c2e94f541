//! User settings for the expense tracker
//!
//! Display preferences and defaults. Settings are read from an optional JSON
//! file; the tracker never writes one itself.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ExpenseError;
use crate::models::DEFAULT_CATEGORY;

/// Environment variable naming the settings file
pub const CONFIG_ENV: &str = "EXPENSES_CONFIG";

/// User settings for the expense tracker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Currency symbol shown in front of amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// How many expenses the "recent" view shows
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,

    /// Category given to expenses entered without one
    #[serde(default = "default_category")]
    pub default_category: String,

    /// File name offered when exporting
    #[serde(default = "default_export_file")]
    pub default_export_file: String,
}

fn default_currency() -> String {
    "₹".to_string()
}

fn default_recent_limit() -> usize {
    10
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

fn default_export_file() -> String {
    "export.csv".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency(),
            recent_limit: default_recent_limit(),
            default_category: default_category(),
            default_export_file: default_export_file(),
        }
    }
}

impl Settings {
    /// Load settings from a JSON file, or use defaults when no file is given
    ///
    /// A file that is named but missing is an error; silently ignoring a typo
    /// in the path would hide the user's preferences.
    pub fn load(path: Option<&Path>) -> Result<Self, ExpenseError> {
        let Some(path) = path else {
            return Ok(Settings::default());
        };

        let contents = std::fs::read_to_string(path).map_err(|e| {
            ExpenseError::Config(format!(
                "Failed to read settings file {}: {}",
                path.display(),
                e
            ))
        })?;

        let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
            ExpenseError::Config(format!("Failed to parse settings file: {}", e))
        })?;

        settings.validate()?;
        Ok(settings)
    }

    /// Override the currency symbol
    pub fn with_currency(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = symbol.into();
        self
    }

    fn validate(&self) -> Result<(), ExpenseError> {
        if self.recent_limit == 0 {
            return Err(ExpenseError::Config(
                "recent_limit must be at least 1".into(),
            ));
        }
        if self.default_category.trim().is_empty() {
            return Err(ExpenseError::Config(
                "default_category cannot be blank".into(),
            ));
        }
        Ok(())
    }
}
