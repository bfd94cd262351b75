//! Z-score calibration.

use crate::calibration::Calibrator;
use crate::error::Result;
use crate::profile::{mean_std, ScoreProfile};

/// Z-score calibration.
///
/// (x - mean) / std, where std is the population standard deviation (divisor
/// `n`, not `n - 1`). Scores are first divided by their largest magnitude so
/// that the variance of any finite profile stays finite. A profile whose
/// scores are all equal has no spread and maps to all zeros.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZScoreCalibrator;

impl Calibrator for ZScoreCalibrator {
    fn calibrate(&self, profile: &ScoreProfile) -> Result<ScoreProfile> {
        let scores = profile.scores();
        let constant = scores.windows(2).all(|w| w[0] == w[1]);

        if constant {
            return ScoreProfile::new(vec![0.0; scores.len()]);
        }

        // z-scores are scale invariant
        let scale = scores.iter().fold(0.0f64, |m, x| m.max(x.abs()));
        let scaled: Vec<f64> = scores.iter().map(|&x| x / scale).collect();

        let (mean, std) = mean_std(&scaled);
        if std == 0.0 {
            return ScoreProfile::new(vec![0.0; scores.len()]);
        }

        ScoreProfile::new(scaled.iter().map(|&x| (x - mean) / std).collect())
    }
}
