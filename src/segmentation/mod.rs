//! Boundary selection and the segmentation data model.
//!
//! A [`BoundarySelector`] turns a (calibrated) score profile into a
//! [`Segmentation`] using one of two algorithms:
//!
//! - **Threshold mode**: every position scoring at least the cutoff, thinned
//!   by a single greedy sweep that enforces the minimum segment length.
//! - **Count mode**: the `K - 1` positions with the largest score sum that
//!   still leave every segment long enough, found by dynamic programming.

mod constraint;
mod count;
mod partition;
mod selector;
mod threshold;

pub use constraint::{Constraint, SelectionMode, DEFAULT_MIN_SEGMENT_LENGTH};
pub use partition::Segmentation;
pub use selector::{select, BoundarySelector};
