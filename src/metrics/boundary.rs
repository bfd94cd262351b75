//! Boundary precision, recall and F1.

use serde::{Deserialize, Serialize};

/// Agreement between two boundary sets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundaryScores {
    /// Matched boundaries.
    pub matched: usize,
    /// Boundaries in the candidate.
    pub candidate: usize,
    /// Boundaries in the reference.
    pub reference: usize,
    /// Fraction of candidate boundaries that are matched.
    pub precision: f64,
    /// Fraction of reference boundaries that are matched.
    pub recall: f64,
    /// Harmonic mean of precision and recall.
    pub f1: f64,
}

impl BoundaryScores {
    /// Derives the ratios from raw counts.
    ///
    /// An empty side scores 1.0 when the other side is empty too, else 0.0.
    pub fn from_counts(matched: usize, candidate: usize, reference: usize) -> Self {
        let precision = ratio(matched, candidate, reference == 0);
        let recall = ratio(matched, reference, candidate == 0);
        let f1 = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };

        Self {
            matched,
            candidate,
            reference,
            precision,
            recall,
            f1,
        }
    }
}

fn ratio(matched: usize, total: usize, other_empty: bool) -> f64 {
    if total == 0 {
        if other_empty {
            1.0
        } else {
            0.0
        }
    } else {
        matched as f64 / total as f64
    }
}

/// Counts one-to-one matches between two increasing boundary lists, pairing
/// boundaries at most `tolerance` positions apart.
///
/// The two-pointer sweep pairs the earliest compatible boundaries first,
/// which is a maximum matching for points on a line.
pub fn count_matches(candidate: &[usize], reference: &[usize], tolerance: usize) -> usize {
    let (mut i, mut j) = (0, 0);
    let mut matched = 0;

    while i < candidate.len() && j < reference.len() {
        let (c, r) = (candidate[i], reference[j]);
        if c.abs_diff(r) <= tolerance {
            matched += 1;
            i += 1;
            j += 1;
        } else if c < r {
            i += 1;
        } else {
            j += 1;
        }
    }

    matched
}

/// Boundary precision/recall/F1 with near-miss tolerance (0 = exact).
pub fn boundary_scores(candidate: &[usize], reference: &[usize], tolerance: usize) -> BoundaryScores {
    let matched = count_matches(candidate, reference, tolerance);
    BoundaryScores::from_counts(matched, candidate.len(), reference.len())
}
