//! Rival tracking configuration
//!
//! Options are read from YAML using the same PascalCase keys as the overlay's settings
//! file. Every option is optional and falls back to its default:
//!
//! ```yaml
//! LapsToConsider: 5
//! WeightDecayFactor: 0.7
//! NumOpponentsAhead: 3
//! NumOpponentsBehind: 3
//! UpdateIntervalMs: 100
//! LapsPrecision: 2
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Result, RivalError};

/// Upper bound for the laps-to-catch display precision.
pub const MAX_LAPS_PRECISION: usize = 6;

/// Recognised configuration options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(rename_all = "PascalCase")]
#[serde(default)]
pub struct RivalConfig {
    /// Number of recent laps feeding the pace estimate
    pub laps_to_consider: usize,
    /// Geometric weight decay for older laps, in (0, 1]
    pub weight_decay_factor: f64,
    /// Rivals reported ahead of the subject
    pub num_opponents_ahead: usize,
    /// Rivals reported behind the subject
    pub num_opponents_behind: usize,
    /// Tick period in milliseconds
    pub update_interval_ms: u64,
    /// Decimal places used when formatting laps-to-catch
    pub laps_precision: usize,
}

impl Default for RivalConfig {
    fn default() -> Self {
        Self {
            laps_to_consider: 5,
            weight_decay_factor: 0.7,
            num_opponents_ahead: 3,
            num_opponents_behind: 3,
            update_interval_ms: 100,
            laps_precision: 2,
        }
    }
}

impl RivalConfig {
    /// Parse and validate configuration YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document means "all defaults"
        let config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml_ng::from_str(yaml)
                .map_err(|e| RivalError::parse_error("RivalConfig deserialization", e))?
        };
        config.validate()?;
        Ok(config)
    }

    /// Load and validate configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| RivalError::file_error(path.to_path_buf(), e))?;
        let config = Self::from_yaml(&yaml)?;
        debug!(path = %path.display(), ?config, "Loaded rival configuration");
        Ok(config)
    }

    /// Check every option against its allowed range.
    pub fn validate(&self) -> Result<()> {
        if self.laps_to_consider == 0 {
            return Err(RivalError::invalid_config("LapsToConsider", "must be at least 1"));
        }
        if !(self.weight_decay_factor > 0.0 && self.weight_decay_factor <= 1.0) {
            return Err(RivalError::invalid_config(
                "WeightDecayFactor",
                format!("{} is outside (0, 1]", self.weight_decay_factor),
            ));
        }
        if self.update_interval_ms == 0 {
            return Err(RivalError::invalid_config("UpdateIntervalMs", "must be at least 1"));
        }
        if self.laps_precision > MAX_LAPS_PRECISION {
            return Err(RivalError::invalid_config(
                "LapsPrecision",
                format!("must be at most {}", MAX_LAPS_PRECISION),
            ));
        }
        Ok(())
    }

    /// Tick period as a [`Duration`]
    pub fn update_interval(&self) -> Duration {
        Duration::from_millis(self.update_interval_ms)
    }
}
