//! The segmentation value object.

use crate::error::{HorosError, Result};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A partition of `unit_count` units into contiguous segments.
///
/// Boundary `b` means a segment ends after the first `b` units, so valid
/// boundaries lie in `1..unit_count` and are kept strictly increasing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawSegmentation")]
pub struct Segmentation {
    unit_count: usize,
    boundaries: Vec<usize>,
}

#[derive(Deserialize)]
struct RawSegmentation {
    unit_count: usize,
    #[serde(default)]
    boundaries: Vec<usize>,
}

impl TryFrom<RawSegmentation> for Segmentation {
    type Error = HorosError;

    fn try_from(raw: RawSegmentation) -> Result<Self> {
        Self::new(raw.unit_count, raw.boundaries)
    }
}

impl Segmentation {
    /// Creates a segmentation from a boundary list.
    ///
    /// Fails unless `unit_count >= 1` and the boundaries are strictly
    /// increasing within `1..unit_count`.
    pub fn new(unit_count: usize, boundaries: Vec<usize>) -> Result<Self> {
        if unit_count == 0 {
            return Err(HorosError::InvalidSegmentation(
                "a segmentation needs at least one unit".to_string(),
            ));
        }

        let mut previous = 0usize;
        for &b in &boundaries {
            if b == 0 || b >= unit_count {
                return Err(HorosError::InvalidSegmentation(format!(
                    "boundary {} outside 1..{}",
                    b, unit_count
                )));
            }
            if b <= previous {
                return Err(HorosError::InvalidSegmentation(format!(
                    "boundaries must be strictly increasing, found {} after {}",
                    b, previous
                )));
            }
            previous = b;
        }

        Ok(Self {
            unit_count,
            boundaries,
        })
    }

    /// A single segment spanning every unit.
    pub fn single(unit_count: usize) -> Result<Self> {
        Self::new(unit_count, Vec::new())
    }

    /// Builds a segmentation from consecutive segment lengths.
    pub fn from_segment_lengths(lengths: &[usize]) -> Result<Self> {
        if let Some(i) = lengths.iter().position(|&len| len == 0) {
            return Err(HorosError::InvalidSegmentation(format!(
                "segment {} is empty",
                i
            )));
        }

        let mut boundaries = Vec::with_capacity(lengths.len().saturating_sub(1));
        let mut offset = 0usize;
        for &len in lengths {
            if offset > 0 {
                boundaries.push(offset);
            }
            offset += len;
        }

        Self::new(offset, boundaries)
    }

    /// Number of units.
    #[inline]
    pub fn unit_count(&self) -> usize {
        self.unit_count
    }

    /// Boundary positions in increasing order.
    #[inline]
    pub fn boundaries(&self) -> &[usize] {
        &self.boundaries
    }

    /// Number of boundaries.
    #[inline]
    pub fn boundary_count(&self) -> usize {
        self.boundaries.len()
    }

    /// Number of segments (boundaries + 1).
    #[inline]
    pub fn segment_count(&self) -> usize {
        self.boundaries.len() + 1
    }

    /// Returns true if a boundary occurs after the first `position` units.
    pub fn is_boundary(&self, position: usize) -> bool {
        self.boundaries.binary_search(&position).is_ok()
    }

    /// Unit ranges of each segment, in order.
    pub fn segments(&self) -> Vec<Range<usize>> {
        let mut segments = Vec::with_capacity(self.segment_count());
        let mut start = 0;
        for &b in &self.boundaries {
            segments.push(start..b);
            start = b;
        }
        segments.push(start..self.unit_count);
        segments
    }

    /// Lengths of each segment; they sum to `unit_count`.
    pub fn segment_lengths(&self) -> Vec<usize> {
        self.segments().into_iter().map(|r| r.len()).collect()
    }

    /// Mean segment length in units.
    pub fn mean_segment_length(&self) -> f64 {
        self.unit_count as f64 / self.segment_count() as f64
    }

    /// Segment index of every unit.
    pub fn segment_ids(&self) -> Vec<usize> {
        let mut ids = Vec::with_capacity(self.unit_count);
        for (id, range) in self.segments().into_iter().enumerate() {
            ids.extend(std::iter::repeat(id).take(range.len()));
        }
        ids
    }

    /// Prefix counts: entry `p` is the number of boundaries `<= p`,
    /// for `p` in `0..=unit_count`.
    pub fn boundary_prefix_counts(&self) -> Vec<usize> {
        let mut counts = vec![0usize; self.unit_count + 1];
        for &b in &self.boundaries {
            counts[b] += 1;
        }
        for p in 1..counts.len() {
            counts[p] += counts[p - 1];
        }
        counts
    }

    /// Consumes the segmentation, returning the boundary list.
    pub fn into_boundaries(self) -> Vec<usize> {
        self.boundaries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_lengths() {
        let seg = Segmentation::new(10, vec![2, 4, 7]).unwrap();
        assert_eq!(seg.segment_lengths(), vec![2, 2, 3, 3]);
        assert_eq!(seg.segment_lengths().iter().sum::<usize>(), 10);
        assert_eq!(seg.segment_count(), 4);
        assert_eq!(seg.segments()[2], 4..7);
    }

    #[test]
    fn test_rejects_invalid_boundaries() {
        assert!(Segmentation::new(10, vec![0]).is_err());
        assert!(Segmentation::new(10, vec![10]).is_err());
        assert!(Segmentation::new(10, vec![4, 4]).is_err());
        assert!(Segmentation::new(10, vec![5, 3]).is_err());
        assert!(Segmentation::new(0, vec![]).is_err());
    }

    #[test]
    fn test_single() {
        let seg = Segmentation::single(1).unwrap();
        assert_eq!(seg.segment_lengths(), vec![1]);
        assert_eq!(seg.boundary_count(), 0);
    }

    #[test]
    fn test_from_segment_lengths() {
        let seg = Segmentation::from_segment_lengths(&[3, 3, 4]).unwrap();
        assert_eq!(seg.unit_count(), 10);
        assert_eq!(seg.boundaries(), &[3, 6]);

        assert!(Segmentation::from_segment_lengths(&[3, 0, 4]).is_err());
        assert!(Segmentation::from_segment_lengths(&[]).is_err());
    }

    #[test]
    fn test_segment_ids() {
        let seg = Segmentation::new(5, vec![2, 3]).unwrap();
        assert_eq!(seg.segment_ids(), vec![0, 0, 1, 2, 2]);
    }

    #[test]
    fn test_prefix_counts() {
        let seg = Segmentation::new(6, vec![1, 4]).unwrap();
        assert_eq!(seg.boundary_prefix_counts(), vec![0, 1, 1, 1, 2, 2, 2]);
        assert!(seg.is_boundary(4));
        assert!(!seg.is_boundary(3));
    }

    #[test]
    fn test_deserialize_validates() {
        let seg: Segmentation =
            serde_json::from_str(r#"{"unit_count": 6, "boundaries": [2, 5]}"#).unwrap();
        assert_eq!(seg.boundaries(), &[2, 5]);

        let bad: std::result::Result<Segmentation, _> =
            serde_json::from_str(r#"{"unit_count": 6, "boundaries": [6]}"#);
        assert!(bad.is_err());
    }
}
