//! Boundary score profiles.
//!
//! A [`ScoreProfile`] holds one score per gap between consecutive units:
//! for a document of `N` units there are `N - 1` scores, and score `i`
//! (0-based) is the model's confidence that a boundary occurs right after
//! unit `i`, i.e. at boundary position `i + 1`.

use crate::error::{HorosError, Result};
use serde::{Deserialize, Serialize};

/// Ordered, finite boundary scores for a single document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct ScoreProfile {
    scores: Vec<f64>,
}

impl ScoreProfile {
    /// Creates a profile, rejecting NaN and infinite scores.
    pub fn new(scores: Vec<f64>) -> Result<Self> {
        if let Some((i, s)) = scores.iter().enumerate().find(|(_, s)| !s.is_finite()) {
            return Err(HorosError::InvalidProfile(format!(
                "score {} at position {} is not finite",
                s, i
            )));
        }
        Ok(Self { scores })
    }

    /// Creates a profile for a document with a known number of units.
    ///
    /// Fails when `unit_count` is zero or does not equal `scores.len() + 1`.
    pub fn with_unit_count(unit_count: usize, scores: Vec<f64>) -> Result<Self> {
        if unit_count == 0 {
            return Err(HorosError::InvalidProfile(
                "a document needs at least one unit".to_string(),
            ));
        }
        if scores.len() != unit_count - 1 {
            return Err(HorosError::InvalidProfile(format!(
                "{} units need {} scores, got {}",
                unit_count,
                unit_count - 1,
                scores.len()
            )));
        }
        Self::new(scores)
    }

    /// Returns the scores.
    #[inline]
    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    /// Number of units in the scored document.
    #[inline]
    pub fn unit_count(&self) -> usize {
        self.scores.len() + 1
    }

    /// Number of candidate boundary positions.
    #[inline]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// True when the document has a single unit and nothing to cut.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Score of boundary position `boundary` (in `1..unit_count`).
    #[inline]
    pub fn boundary_score(&self, boundary: usize) -> Option<f64> {
        boundary
            .checked_sub(1)
            .and_then(|i| self.scores.get(i).copied())
    }

    /// Population mean and standard deviation of the scores.
    pub fn mean_std(&self) -> (f64, f64) {
        mean_std(&self.scores)
    }

    /// Consumes the profile, returning the raw scores.
    pub fn into_scores(self) -> Vec<f64> {
        self.scores
    }
}

impl TryFrom<Vec<f64>> for ScoreProfile {
    type Error = HorosError;

    fn try_from(scores: Vec<f64>) -> Result<Self> {
        Self::new(scores)
    }
}

impl From<ScoreProfile> for Vec<f64> {
    fn from(profile: ScoreProfile) -> Self {
        profile.scores
    }
}

/// Computes mean and population standard deviation of a slice.
pub(crate) fn mean_std(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;

    let variance = values.iter().map(|&x| (x - mean) * (x - mean)).sum::<f64>() / n;

    (mean, variance.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_count() {
        let profile = ScoreProfile::new(vec![0.1, 0.9, 0.2]).unwrap();
        assert_eq!(profile.unit_count(), 4);
        assert_eq!(profile.len(), 3);

        let empty = ScoreProfile::new(vec![]).unwrap();
        assert_eq!(empty.unit_count(), 1);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_rejects_non_finite() {
        assert!(matches!(
            ScoreProfile::new(vec![0.1, f64::NAN]),
            Err(HorosError::InvalidProfile(_))
        ));
        assert!(matches!(
            ScoreProfile::new(vec![f64::INFINITY]),
            Err(HorosError::InvalidProfile(_))
        ));
    }

    #[test]
    fn test_with_unit_count() {
        assert!(ScoreProfile::with_unit_count(3, vec![0.5, 0.5]).is_ok());
        assert!(ScoreProfile::with_unit_count(3, vec![0.5]).is_err());
        assert!(ScoreProfile::with_unit_count(0, vec![]).is_err());
        assert!(ScoreProfile::with_unit_count(1, vec![]).is_ok());
    }

    #[test]
    fn test_boundary_score() {
        let profile = ScoreProfile::new(vec![0.1, 0.9]).unwrap();
        assert_eq!(profile.boundary_score(0), None);
        assert_eq!(profile.boundary_score(1), Some(0.1));
        assert_eq!(profile.boundary_score(2), Some(0.9));
        assert_eq!(profile.boundary_score(3), None);
    }

    #[test]
    fn test_mean_std() {
        let values = vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let (mean, std) = mean_std(&values);

        assert!((mean - 5.0).abs() < 1e-12);
        assert!((std - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_deserialize_validates() {
        let profile: ScoreProfile = serde_json::from_str("[0.25, 0.75]").unwrap();
        assert_eq!(profile.scores(), &[0.25, 0.75]);

        let bad: std::result::Result<ScoreProfile, _> = serde_json::from_str("[1e999]");
        assert!(bad.is_err());
    }
}
