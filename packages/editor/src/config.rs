use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::EditorError;

pub const DEFAULT_CONFIG_NAME: &str = "funnel-editor.config.json";

/// Largest margin that still leaves the bottom band non-empty.
pub const MAX_MARGIN_FRACTION: f64 = 1.0 / 6.0;

/// Editor configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    /// Maximum number of history snapshots kept (0 = unlimited)
    #[serde(default)]
    pub history_limit: usize,

    /// Drop indicator tuning
    #[serde(default)]
    pub drop: DropConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropConfig {
    /// Minimum interval between processed pointer samples
    #[serde(default = "default_throttle_ms")]
    pub throttle_ms: u64,

    /// How long a resolved position must hold before it is shown
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Widening of the center band, as a fraction of the container height
    #[serde(default)]
    pub margin_fraction: f64,
}

fn default_throttle_ms() -> u64 {
    50
}

fn default_debounce_ms() -> u64 {
    100
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_limit: 0,
            drop: DropConfig::default(),
        }
    }
}

impl Default for DropConfig {
    fn default() -> Self {
        Self {
            throttle_ms: default_throttle_ms(),
            debounce_ms: default_debounce_ms(),
            margin_fraction: 0.0,
        }
    }
}

impl EditorConfig {
    pub fn from_json(json: &str) -> Result<Self, EditorError> {
        let config: EditorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from a directory, falling back to defaults when absent
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, EditorError> {
        let config_path = dir.as_ref().join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_json(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<(), EditorError> {
        let margin = self.drop.margin_fraction;
        if !margin.is_finite() || !(0.0..=MAX_MARGIN_FRACTION).contains(&margin) {
            return Err(EditorError::Config(format!(
                "marginFraction must be between 0 and {MAX_MARGIN_FRACTION:.3}, got {margin}"
            )));
        }
        Ok(())
    }
}
