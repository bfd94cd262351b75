//! Count-constrained boundary selection.
//!
//! Picks exactly `K - 1` boundaries maximizing their summed score while every
//! segment, including the first and last, keeps at least `min_length` units.
//!
//! For ordinal `j` (1-based) the `j`-th boundary can only sit in
//! `j * m ..= n - (K - j) * m`. Rows are filled from the last ordinal back to
//! the first; each row stores a suffix maximum over positions together with
//! the earliest position reaching it, so a forward walk recovers the
//! lexicographically earliest optimal boundary set in O(N·K).

use crate::error::{HorosError, Result};
use crate::profile::ScoreProfile;

/// Suffix maximum of one ordinal's best totals.
struct SuffixRow {
    best: Vec<f64>,
    arg: Vec<usize>,
}

impl SuffixRow {
    fn new(len: usize) -> Self {
        Self {
            best: vec![f64::NEG_INFINITY; len],
            arg: vec![0; len],
        }
    }
}

/// Selects `segments - 1` boundaries for `segments` segments.
pub(crate) fn select_by_count(
    profile: &ScoreProfile,
    segments: usize,
    min_length: usize,
) -> Result<Vec<usize>> {
    let unit_count = profile.unit_count();

    let fits = segments
        .checked_mul(min_length)
        .map_or(false, |needed| needed <= unit_count);
    if !fits {
        return Err(HorosError::InfeasibleConstraint {
            segments,
            min_length,
            unit_count,
        });
    }

    let picks = segments - 1;
    if picks == 0 {
        return Ok(Vec::new());
    }

    let rows = fill_rows(profile, picks, min_length);

    let mut boundaries = Vec::with_capacity(picks);
    let mut from = min_length;
    for row in &rows {
        let b = row.arg[from];
        boundaries.push(b);
        from = b + min_length;
    }

    Ok(boundaries)
}

fn fill_rows(profile: &ScoreProfile, picks: usize, min_length: usize) -> Vec<SuffixRow> {
    let n = profile.unit_count();
    let scores = profile.scores();

    let mut rows: Vec<SuffixRow> = (0..picks).map(|_| SuffixRow::new(n + 1)).collect();

    for ordinal in (1..=picks).rev() {
        let lo = ordinal * min_length;
        let hi = n - (picks - ordinal + 1) * min_length;
        let (head, tail) = rows.split_at_mut(ordinal);
        let row = &mut head[ordinal - 1];
        let next = tail.first();

        for p in (0..=n).rev() {
            let value = if (lo..=hi).contains(&p) {
                let rest = next.map_or(0.0, |next| next.best[p + min_length]);
                scores[p - 1] + rest
            } else {
                f64::NEG_INFINITY
            };

            // ties keep the earlier position
            if p == n || value >= row.best[p + 1] {
                row.best[p] = value;
                row.arg[p] = p;
            } else {
                row.best[p] = row.best[p + 1];
                row.arg[p] = row.arg[p + 1];
            }
        }
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example_profile() -> ScoreProfile {
        ScoreProfile::new(vec![0.1, 0.9, 0.2, 0.8, 0.1, 0.1, 0.9, 0.1, 0.2]).unwrap()
    }

    #[test]
    fn test_two_best_with_gap() {
        let boundaries = select_by_count(&example_profile(), 3, 2).unwrap();
        assert_eq!(boundaries, vec![2, 7]);
    }

    #[test]
    fn test_exact_count() {
        let profile = example_profile();
        for k in 1..=10 {
            let boundaries = select_by_count(&profile, k, 1).unwrap();
            assert_eq!(boundaries.len(), k - 1);
        }
    }

    #[test]
    fn test_infeasible() {
        let result = select_by_count(&example_profile(), 4, 3);
        assert!(matches!(
            result,
            Err(HorosError::InfeasibleConstraint {
                segments: 4,
                min_length: 3,
                unit_count: 10
            })
        ));
        assert!(select_by_count(&example_profile(), 11, 1).is_err());
        assert!(select_by_count(&example_profile(), usize::MAX, 2).is_err());
    }

    #[test]
    fn test_tight_packing() {
        // 10 units, 5 segments of 2: only one layout fits
        let boundaries = select_by_count(&example_profile(), 5, 2).unwrap();
        assert_eq!(boundaries, vec![2, 4, 6, 8]);
    }

    #[test]
    fn test_ties_prefer_earliest() {
        let flat = ScoreProfile::new(vec![0.5; 7]).unwrap();
        assert_eq!(select_by_count(&flat, 3, 2).unwrap(), vec![2, 4]);
        assert_eq!(select_by_count(&flat, 2, 1).unwrap(), vec![1]);
    }

    #[test]
    fn test_single_segment() {
        assert!(select_by_count(&example_profile(), 1, 10).unwrap().is_empty());

        let one_unit = ScoreProfile::new(vec![]).unwrap();
        assert!(select_by_count(&one_unit, 1, 1).unwrap().is_empty());
        assert!(select_by_count(&one_unit, 2, 1).is_err());
    }

    #[test]
    fn test_prefers_sum_over_greedy_peak() {
        // greedy would take the 1.0 at boundary 3 and block both 0.8s
        let profile = ScoreProfile::new(vec![0.0, 0.8, 1.0, 0.8, 0.0, 0.0, 0.0]).unwrap();
        assert_eq!(select_by_count(&profile, 3, 2).unwrap(), vec![2, 4]);
    }
}
