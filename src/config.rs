//! Configuration for the Horos segmentation engine.

use crate::calibration::CalibrationMode;
use crate::error::Result;
use crate::metrics::{MetricEngine, WindowSize};
use crate::segmentation::Constraint;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main configuration for one engine invocation.
///
/// Every field has a default, so a JSON file only needs the parts it
/// changes. The default selection has no mode set and must be completed
/// with a threshold or a segment count before use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Score calibration applied before selection.
    pub calibration: CalibrationMode,

    /// Boundary selection constraint.
    pub selection: Constraint,

    /// Evaluation settings.
    pub evaluation: EvaluationConfig,
}

impl Config {
    /// Parses a configuration from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Serializes the configuration as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks calibration parameters and the selection constraint.
    pub fn validate(&self) -> Result<()> {
        self.calibration.validate()?;
        self.selection.validate()
    }
}

/// Evaluation configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    /// Pk/WindowDiff window: a unit count or `"auto"`.
    /// Default: auto.
    pub window_size: WindowSize,

    /// Distance within which boundaries count as matching.
    /// Default: 0 (exact).
    pub boundary_tolerance: usize,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            window_size: WindowSize::Auto,
            boundary_tolerance: 0,
        }
    }
}

impl EvaluationConfig {
    /// Builds the metric engine for these settings.
    pub fn metric_engine(&self) -> MetricEngine {
        MetricEngine::new()
            .with_window_size(self.window_size)
            .with_tolerance(self.boundary_tolerance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segmentation::SelectionMode;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.calibration, CalibrationMode::Identity);
        assert_eq!(config.selection.min_segment_length, 1);
        assert_eq!(config.evaluation.window_size, WindowSize::Auto);
        // no selection mode until one is chosen
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json() {
        let config = Config::from_json_str(
            r#"{
                "calibration": "rank",
                "selection": { "target_segment_count": 4, "min_segment_length": 2 },
                "evaluation": { "window_size": 3 }
            }"#,
        )
        .unwrap();

        assert_eq!(config.calibration, CalibrationMode::Rank);
        assert_eq!(config.selection.mode().unwrap(), SelectionMode::Count(4));
        assert_eq!(config.evaluation.window_size, WindowSize::Fixed(3));
        assert_eq!(config.evaluation.boundary_tolerance, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_json_roundtrip() {
        let config = Config {
            calibration: CalibrationMode::Smooth { sigma: 1.5 },
            selection: Constraint::threshold(0.25),
            ..Default::default()
        };
        let parsed = Config::from_json_str(&config.to_json().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_invalid_json() {
        assert!(Config::from_json_str("{\"calibration\": \"cubic\"}").is_err());
    }
}
