//! Boundary selection.

use crate::error::Result;
use crate::profile::ScoreProfile;
use crate::segmentation::constraint::{Constraint, SelectionMode};
use crate::segmentation::count::select_by_count;
use crate::segmentation::partition::Segmentation;
use crate::segmentation::threshold::select_by_threshold;

/// Turns score profiles into segmentations under a fixed constraint.
///
/// The selector is stateless: the same profile always yields the same
/// segmentation, and one selector can serve any number of documents.
#[derive(Debug, Clone)]
pub struct BoundarySelector {
    constraint: Constraint,
    mode: SelectionMode,
}

impl BoundarySelector {
    /// Creates a selector, failing if the constraint is ambiguous or invalid.
    pub fn new(constraint: Constraint) -> Result<Self> {
        let mode = constraint.mode()?;
        Ok(Self { constraint, mode })
    }

    /// The constraint this selector enforces.
    pub fn constraint(&self) -> &Constraint {
        &self.constraint
    }

    /// The resolved selection mode.
    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Selects boundaries for `profile`.
    pub fn select(&self, profile: &ScoreProfile) -> Result<Segmentation> {
        let min_length = self.constraint.min_segment_length;
        let boundaries = match self.mode {
            SelectionMode::Threshold(threshold) => {
                select_by_threshold(profile, threshold, min_length)
            }
            SelectionMode::Count(segments) => select_by_count(profile, segments, min_length)?,
        };

        Segmentation::new(profile.unit_count(), boundaries)
    }
}

/// Selects boundaries for `profile` under `constraint`.
pub fn select(profile: &ScoreProfile, constraint: &Constraint) -> Result<Segmentation> {
    BoundarySelector::new(*constraint)?.select(profile)
}
