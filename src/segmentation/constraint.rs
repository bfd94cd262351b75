//! Selection constraints.

use crate::error::{HorosError, Result};
use serde::{Deserialize, Serialize};

/// Default minimum units per segment.
pub const DEFAULT_MIN_SEGMENT_LENGTH: usize = 1;

fn default_min_segment_length() -> usize {
    DEFAULT_MIN_SEGMENT_LENGTH
}

/// Constraints for boundary selection.
///
/// Exactly one of `threshold` and `target_segment_count` must be set; which
/// one decides the selection mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Constraint {
    /// Exact number of segments to produce (count mode).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_segment_count: Option<usize>,
    /// Minimum units per segment (default: 1).
    #[serde(default = "default_min_segment_length")]
    pub min_segment_length: usize,
    /// Score cutoff (threshold mode).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
}

impl Default for Constraint {
    fn default() -> Self {
        Self {
            target_segment_count: None,
            min_segment_length: DEFAULT_MIN_SEGMENT_LENGTH,
            threshold: None,
        }
    }
}

/// The selection algorithm a constraint resolves to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectionMode {
    /// Keep every position scoring at least the cutoff.
    Threshold(f64),
    /// Keep the best `count - 1` positions.
    Count(usize),
}

impl Constraint {
    /// Threshold-mode constraint.
    pub fn threshold(threshold: f64) -> Self {
        Self {
            threshold: Some(threshold),
            ..Default::default()
        }
    }

    /// Count-mode constraint producing `segments` segments.
    pub fn segment_count(segments: usize) -> Self {
        Self {
            target_segment_count: Some(segments),
            ..Default::default()
        }
    }

    /// Sets the minimum segment length.
    pub fn with_min_segment_length(mut self, min_segment_length: usize) -> Self {
        self.min_segment_length = min_segment_length;
        self
    }

    /// Resolves the active selection mode, validating every field.
    pub fn mode(&self) -> Result<SelectionMode> {
        if self.min_segment_length < 1 {
            return Err(HorosError::InvalidConstraint(
                "min_segment_length must be at least 1".to_string(),
            ));
        }

        match (self.threshold, self.target_segment_count) {
            (Some(_), Some(_)) => Err(HorosError::InvalidConstraint(
                "threshold and target_segment_count are mutually exclusive".to_string(),
            )),
            (None, None) => Err(HorosError::InvalidConstraint(
                "one of threshold or target_segment_count must be set".to_string(),
            )),
            (Some(t), None) if t.is_nan() => Err(HorosError::InvalidConstraint(
                "threshold must not be NaN".to_string(),
            )),
            (Some(t), None) => Ok(SelectionMode::Threshold(t)),
            (None, Some(0)) => Err(HorosError::InvalidConstraint(
                "target_segment_count must be at least 1".to_string(),
            )),
            (None, Some(k)) => Ok(SelectionMode::Count(k)),
        }
    }

    /// Checks that the constraint selects exactly one valid mode.
    pub fn validate(&self) -> Result<()> {
        self.mode().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modes() {
        assert_eq!(
            Constraint::threshold(0.5).mode().unwrap(),
            SelectionMode::Threshold(0.5)
        );
        assert_eq!(
            Constraint::segment_count(3).mode().unwrap(),
            SelectionMode::Count(3)
        );
    }

    #[test]
    fn test_ambiguous_or_missing_mode() {
        let both = Constraint {
            threshold: Some(0.5),
            target_segment_count: Some(3),
            ..Default::default()
        };
        assert!(matches!(both.mode(), Err(HorosError::InvalidConstraint(_))));
        assert!(matches!(
            Constraint::default().mode(),
            Err(HorosError::InvalidConstraint(_))
        ));
    }

    #[test]
    fn test_invalid_fields() {
        let zero_min = Constraint::threshold(0.5).with_min_segment_length(0);
        assert!(matches!(zero_min.mode(), Err(HorosError::InvalidConstraint(_))));

        assert!(Constraint::segment_count(0).validate().is_err());
        assert!(Constraint::threshold(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_deserialize_defaults() {
        let c: Constraint = serde_json::from_str(r#"{"threshold": 0.4}"#).unwrap();
        assert_eq!(c.min_segment_length, 1);
        assert_eq!(c.mode().unwrap(), SelectionMode::Threshold(0.4));
    }
}
