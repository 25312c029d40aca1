//! Application configuration.
//!
//! All thresholds are fixed for the lifetime of a session: they are read at
//! startup and never reconfigured while samples are flowing.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{DawdleError, DawdleResult};

/// Ratio above which a candidate's path length counts as "in the zone".
pub const EMOTIONAL_DISTANCE: f64 = 1.30;

/// Ratio below which a candidate's velocity counts as "in the zone".
pub const EMOTIONAL_VELOCITY: f64 = 0.83;

/// Inactivity gap (ms) that closes an action.
pub const ACTION_DELAY_MS: u64 = 200;

/// Quiet period (ms) after the last sample before analysis runs.
pub const DEBOUNCE_WINDOW_MS: u64 = 1000;

/// Global application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Segmentation and zone thresholds.
    pub analysis: AnalysisConfig,

    /// Persisted session history.
    pub history: HistoryConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Thresholds for segmentation, comparison, and triggering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Distance ratio threshold (exclusive lower bound).
    pub emotional_distance: f64,

    /// Velocity ratio threshold (exclusive upper bound).
    pub emotional_velocity: f64,

    /// Gap between samples that splits two actions (ms).
    pub action_delay_ms: u64,

    /// Debounce window (ms).
    pub debounce_window_ms: u64,
}

/// Session history persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Whether finished sessions are appended to the history file.
    pub enabled: bool,

    /// Location of the JSON key-value history file.
    pub path: PathBuf,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "dawdle=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            emotional_distance: EMOTIONAL_DISTANCE,
            emotional_velocity: EMOTIONAL_VELOCITY,
            action_delay_ms: ACTION_DELAY_MS,
            debounce_window_ms: DEBOUNCE_WINDOW_MS,
        }
    }
}

impl AnalysisConfig {
    /// Reject threshold combinations the pipeline cannot honor.
    ///
    /// The debounce window must be longer than the action delay, otherwise
    /// the trailing action is not guaranteed complete when analysis fires.
    pub fn validate(&self) -> DawdleResult<()> {
        if !(self.emotional_distance.is_finite() && self.emotional_distance > 0.0) {
            return Err(DawdleError::config(format!(
                "emotional_distance must be a positive number, got {}",
                self.emotional_distance
            )));
        }
        if !(self.emotional_velocity.is_finite() && self.emotional_velocity > 0.0) {
            return Err(DawdleError::config(format!(
                "emotional_velocity must be a positive number, got {}",
                self.emotional_velocity
            )));
        }
        if self.action_delay_ms == 0 {
            return Err(DawdleError::config("action_delay_ms must be non-zero"));
        }
        if self.debounce_window_ms <= self.action_delay_ms {
            return Err(DawdleError::config(format!(
                "debounce_window_ms ({}) must exceed action_delay_ms ({})",
                self.debounce_window_ms, self.action_delay_ms
            )));
        }
        Ok(())
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: default_history_path(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {:?}: {}", config_path, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Save config to the standard location.
    pub fn save(&self) -> Result<(), std::io::Error> {
        let config_path = config_file_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(config_path, json)
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("dawdle").join("config.json")
}

/// Default session history file.
fn default_history_path() -> PathBuf {
    let base = std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".local").join("share")
        });
    base.join("dawdle").join("history.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let config = AnalysisConfig::default();
        assert_eq!(config.emotional_distance, 1.30);
        assert_eq!(config.emotional_velocity, 0.83);
        assert_eq!(config.action_delay_ms, 200);
        assert_eq!(config.debounce_window_ms, 1000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_short_debounce() {
        let config = AnalysisConfig {
            debounce_window_ms: 200,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(DawdleError::Config { .. })));
    }

    #[test]
    fn test_validate_rejects_bad_ratios() {
        let config = AnalysisConfig {
            emotional_velocity: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = AnalysisConfig {
            emotional_distance: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"analysis": {"action_delay_ms": 150}}"#).unwrap();
        assert_eq!(config.analysis.action_delay_ms, 150);
        assert_eq!(config.analysis.debounce_window_ms, 1000);
        assert!(config.history.enabled);
        assert_eq!(config.logging.level, "info");
    }
}
