//! Gaussian smoothing of score curves.

use crate::calibration::Calibrator;
use crate::error::{HorosError, Result};
use crate::profile::ScoreProfile;

/// Largest accepted smoothing sigma. Past a few profile lengths every kernel
/// flattens the curve to the same edge-weighted average.
pub const MAX_SMOOTHING_SIGMA: f64 = 1e6;

/// 1D Gaussian smoothing with edge clamping.
///
/// Kernel radius follows the 3-sigma rule. Profiles shorter than three
/// scores are returned unchanged.
#[derive(Debug, Clone, Copy)]
pub struct GaussianSmoothing {
    sigma: f64,
}

impl GaussianSmoothing {
    /// Creates a smoother; `sigma` must be finite, positive and at most
    /// [`MAX_SMOOTHING_SIGMA`].
    pub fn new(sigma: f64) -> Result<Self> {
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(HorosError::Config(format!(
                "smoothing sigma must be finite and positive, got {}",
                sigma
            )));
        }
        if sigma > MAX_SMOOTHING_SIGMA {
            return Err(HorosError::Config(format!(
                "smoothing sigma must be at most {}, got {}",
                MAX_SMOOTHING_SIGMA, sigma
            )));
        }
        Ok(Self { sigma })
    }

    /// Kernel standard deviation.
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Normalized kernel for a profile of `len` scores.
    ///
    /// Offsets at or beyond `len` clamp onto an edge sample for every
    /// position, so their weight is folded into the outermost entry and the
    /// kernel never grows past `2 * len + 1` taps.
    fn kernel(&self, len: usize) -> Vec<f64> {
        let radius = (3.0 * self.sigma).ceil() as usize;
        let reach = radius.min(len);
        let two_sigma_sq = 2.0 * self.sigma * self.sigma;
        let weight = |d: usize| {
            let x = d as f64;
            (-x * x / two_sigma_sq).exp()
        };

        let mut half: Vec<f64> = (0..=reach).map(weight).collect();
        if radius > reach {
            half[reach] += (reach + 1..=radius).map(weight).sum::<f64>();
        }

        let mut kernel: Vec<f64> = half.iter().rev().chain(&half[1..]).copied().collect();
        let sum: f64 = kernel.iter().sum();
        for k in &mut kernel {
            *k /= sum;
        }
        kernel
    }

    fn smooth(&self, scores: &[f64]) -> Vec<f64> {
        if scores.len() < 3 {
            return scores.to_vec();
        }

        let kernel = self.kernel(scores.len());
        let radius = (kernel.len() / 2) as isize;
        let last = scores.len() as isize - 1;

        (0..scores.len())
            .map(|i| {
                kernel
                    .iter()
                    .enumerate()
                    .map(|(j, &k)| {
                        let idx = (i as isize + j as isize - radius).clamp(0, last) as usize;
                        k * scores[idx]
                    })
                    .sum()
            })
            .collect()
    }
}

impl Calibrator for GaussianSmoothing {
    fn calibrate(&self, profile: &ScoreProfile) -> Result<ScoreProfile> {
        ScoreProfile::new(self.smooth(profile.scores()))
    }
}
