//! Rank calibration.

use crate::calibration::Calibrator;
use crate::error::Result;
use crate::profile::ScoreProfile;

/// Rank calibration.
///
/// Each score becomes its fractional rank `(r - 1) / (n - 1)` where `r` is the
/// 1-based rank, averaged over ties. The result is scale-free: thresholds on
/// ranked scores select a fixed share of positions regardless of how the
/// upstream model spreads its output.
#[derive(Debug, Clone, Copy, Default)]
pub struct RankCalibrator;

impl Calibrator for RankCalibrator {
    fn calibrate(&self, profile: &ScoreProfile) -> Result<ScoreProfile> {
        ScoreProfile::new(fractional_ranks(profile.scores()))
    }
}

/// Average 1-based ranks, ties sharing the mean of the ranks they span.
pub(crate) fn average_ranks(values: &[f64]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut ranks = vec![0.0; values.len()];
    let mut start = 0;
    while start < order.len() {
        let mut end = start;
        while end + 1 < order.len() && values[order[end + 1]] == values[order[start]] {
            end += 1;
        }
        // positions start..=end hold 1-based ranks start+1..=end+1
        let rank = (start + end) as f64 / 2.0 + 1.0;
        for &idx in &order[start..=end] {
            ranks[idx] = rank;
        }
        start = end + 1;
    }

    ranks
}

fn fractional_ranks(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    if n == 1 {
        return vec![0.5];
    }

    let denom = n.saturating_sub(1) as f64;
    average_ranks(values)
        .into_iter()
        .map(|r| (r - 1.0) / denom)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distinct_ranks() {
        let ranks = fractional_ranks(&[0.3, 0.1, 0.9, 0.5, 0.7]);
        assert_eq!(ranks, vec![0.25, 0.0, 1.0, 0.5, 0.75]);
    }

    #[test]
    fn test_ties_average() {
        assert_eq!(average_ranks(&[1.0, 2.0, 2.0, 3.0]), vec![1.0, 2.5, 2.5, 4.0]);

        let ranks = fractional_ranks(&[1.0, 2.0, 2.0, 3.0]);
        assert_eq!(ranks, vec![0.0, 0.5, 0.5, 1.0]);
    }

    #[test]
    fn test_all_tied_and_single() {
        assert_eq!(fractional_ranks(&[4.0, 4.0, 4.0]), vec![0.5, 0.5, 0.5]);
        assert_eq!(fractional_ranks(&[4.0]), vec![0.5]);
        assert!(fractional_ranks(&[]).is_empty());
    }

    #[test]
    fn test_scale_free() {
        let a = ScoreProfile::new(vec![0.1, 0.9, 0.2, 0.8]).unwrap();
        let b = ScoreProfile::new(vec![10.0, 90.0, 20.0, 80.0]).unwrap();

        assert_eq!(
            RankCalibrator.calibrate(&a).unwrap(),
            RankCalibrator.calibrate(&b).unwrap()
        );
    }
}
