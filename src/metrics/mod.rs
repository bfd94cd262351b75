//! Segmentation comparison metrics.
//!
//! The [`MetricEngine`] compares a candidate [`Segmentation`] against a
//! reference of the same document and reports:
//!
//! - boundary precision, recall and F1 (exact, or near-miss tolerant),
//! - Pk (Beeferman et al., 1999),
//! - WindowDiff (Pevzner & Hearst, 2002).

mod boundary;
mod window;

pub use boundary::{boundary_scores, count_matches, BoundaryScores};
pub use window::{auto_window_size, pk, window_diff, WindowSize};

use crate::error::{HorosError, Result};
use crate::segmentation::Segmentation;
use serde::{Deserialize, Serialize};

/// Metrics for one candidate/reference pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricReport {
    /// Boundary precision.
    pub precision: f64,
    /// Boundary recall.
    pub recall: f64,
    /// Boundary F1.
    pub f1: f64,
    /// Pk error rate.
    pub pk: f64,
    /// WindowDiff error rate.
    #[serde(rename = "windowdiff")]
    pub window_diff: f64,
    /// Window size used for Pk and WindowDiff.
    pub window_size: usize,
}

/// Compares segmentations with a fixed window policy and boundary tolerance.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricEngine {
    window_size: WindowSize,
    tolerance: usize,
}

impl MetricEngine {
    /// Creates an engine with an automatic window and exact boundary matching.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the window policy.
    pub fn with_window_size(mut self, window_size: WindowSize) -> Self {
        self.window_size = window_size;
        self
    }

    /// Sets the boundary matching tolerance, in units.
    pub fn with_tolerance(mut self, tolerance: usize) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Window policy in use.
    pub fn window_size(&self) -> WindowSize {
        self.window_size
    }

    /// Boundary tolerance in use.
    pub fn tolerance(&self) -> usize {
        self.tolerance
    }

    /// Compares `candidate` against `reference`.
    pub fn compare(&self, candidate: &Segmentation, reference: &Segmentation) -> Result<MetricReport> {
        if candidate.unit_count() != reference.unit_count() {
            return Err(HorosError::ShapeMismatch {
                candidate: candidate.unit_count(),
                reference: reference.unit_count(),
            });
        }

        let k = self.window_size.resolve(reference);
        let pk = pk(candidate, reference, k)?;
        let window_diff = window_diff(candidate, reference, k)?;
        let scores = boundary_scores(candidate.boundaries(), reference.boundaries(), self.tolerance);

        Ok(MetricReport {
            precision: scores.precision,
            recall: scores.recall,
            f1: scores.f1,
            pk,
            window_diff,
            window_size: k,
        })
    }
}

/// Compares with the automatic window and exact boundary matching.
pub fn compare(candidate: &Segmentation, reference: &Segmentation) -> Result<MetricReport> {
    MetricEngine::new().compare(candidate, reference)
}
