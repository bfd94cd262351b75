//! Score calibration.
//!
//! Calibrators rescale a raw [`ScoreProfile`] into comparable units before
//! boundary selection. Every calibrator is a pure function: it returns a new
//! profile and never mutates its input.

mod rank;
mod smoothing;
mod zscore;

pub use rank::RankCalibrator;
pub use smoothing::{GaussianSmoothing, MAX_SMOOTHING_SIGMA};
pub use zscore::ZScoreCalibrator;

use crate::error::{HorosError, Result};
use crate::profile::ScoreProfile;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default sigma used when `smooth` is requested without one.
pub const DEFAULT_SMOOTHING_SIGMA: f64 = 1.0;

/// Trait for score calibrators.
pub trait Calibrator {
    /// Transforms a profile into a new, calibrated profile.
    fn calibrate(&self, profile: &ScoreProfile) -> Result<ScoreProfile>;
}

/// Identity calibration: returns the scores unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityCalibrator;

impl Calibrator for IdentityCalibrator {
    fn calibrate(&self, profile: &ScoreProfile) -> Result<ScoreProfile> {
        Ok(profile.clone())
    }
}

/// Enum for the available calibration modes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CalibrationMode {
    /// Leave scores untouched.
    #[default]
    Identity,
    /// Subtract the mean and divide by the standard deviation.
    ZScore,
    /// Replace each score with its fractional rank in `[0, 1]`.
    Rank,
    /// Gaussian smoothing of the score curve.
    Smooth {
        /// Kernel standard deviation, in boundary positions.
        sigma: f64,
    },
}

impl CalibrationMode {
    /// Calibrates `profile` with this mode.
    pub fn calibrate(&self, profile: &ScoreProfile) -> Result<ScoreProfile> {
        match *self {
            CalibrationMode::Identity => IdentityCalibrator.calibrate(profile),
            CalibrationMode::ZScore => ZScoreCalibrator.calibrate(profile),
            CalibrationMode::Rank => RankCalibrator.calibrate(profile),
            CalibrationMode::Smooth { sigma } => GaussianSmoothing::new(sigma)?.calibrate(profile),
        }
    }

    /// Checks mode parameters.
    pub fn validate(&self) -> Result<()> {
        if let CalibrationMode::Smooth { sigma } = *self {
            GaussianSmoothing::new(sigma)?;
        }
        Ok(())
    }
}

impl fmt::Display for CalibrationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalibrationMode::Identity => write!(f, "identity"),
            CalibrationMode::ZScore => write!(f, "zscore"),
            CalibrationMode::Rank => write!(f, "rank"),
            CalibrationMode::Smooth { sigma } => write!(f, "smooth:{}", sigma),
        }
    }
}

impl FromStr for CalibrationMode {
    type Err = HorosError;

    /// Parses `identity`, `zscore`, `rank`, `smooth` or `smooth:<sigma>`.
    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_lowercase();
        let mode = match lower.as_str() {
            "identity" | "none" => CalibrationMode::Identity,
            "zscore" | "z-score" => CalibrationMode::ZScore,
            "rank" => CalibrationMode::Rank,
            "smooth" => CalibrationMode::Smooth {
                sigma: DEFAULT_SMOOTHING_SIGMA,
            },
            other => match other.strip_prefix("smooth:") {
                Some(sigma) => CalibrationMode::Smooth {
                    sigma: sigma.parse().map_err(|_| {
                        HorosError::Config(format!("invalid smoothing sigma: {:?}", sigma))
                    })?,
                },
                None => {
                    return Err(HorosError::Config(format!(
                        "unknown calibration mode: {:?}",
                        s
                    )))
                }
            },
        };
        mode.validate()?;
        Ok(mode)
    }
}

/// Calibrates `profile` with `mode`.
pub fn calibrate(profile: &ScoreProfile, mode: CalibrationMode) -> Result<ScoreProfile> {
    mode.calibrate(profile)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity() {
        let profile = ScoreProfile::new(vec![0.3, -1.0, 2.5]).unwrap();
        let out = calibrate(&profile, CalibrationMode::Identity).unwrap();
        assert_eq!(out, profile);
    }

    #[test]
    fn test_parse_modes() {
        assert_eq!("zscore".parse::<CalibrationMode>().unwrap(), CalibrationMode::ZScore);
        assert_eq!("Rank".parse::<CalibrationMode>().unwrap(), CalibrationMode::Rank);
        assert_eq!(
            "smooth:2.5".parse::<CalibrationMode>().unwrap(),
            CalibrationMode::Smooth { sigma: 2.5 }
        );
        assert!("smooth:0".parse::<CalibrationMode>().is_err());
        assert!("smooth:1e20".parse::<CalibrationMode>().is_err());
        assert!("minmax".parse::<CalibrationMode>().is_err());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&CalibrationMode::ZScore).unwrap();
        assert_eq!(json, "\"zscore\"");

        let mode: CalibrationMode = serde_json::from_str(r#"{"smooth":{"sigma":1.5}}"#).unwrap();
        assert_eq!(mode, CalibrationMode::Smooth { sigma: 1.5 });
    }

    #[test]
    fn test_modes_do_not_mutate_input() {
        let profile = ScoreProfile::new(vec![0.1, 0.9, 0.2, 0.8]).unwrap();
        let before = profile.clone();
        for mode in [
            CalibrationMode::Identity,
            CalibrationMode::ZScore,
            CalibrationMode::Rank,
            CalibrationMode::Smooth { sigma: 1.0 },
        ] {
            let out = mode.calibrate(&profile).unwrap();
            assert_eq!(out.len(), profile.len());
        }
        assert_eq!(profile, before);
    }
}
