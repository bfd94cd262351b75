//! # Horos - Score-to-Segmentation Engine
//!
//! Horos turns per-position boundary scores, produced upstream by any
//! scoring model over a linear sequence of units (sentences, discourse
//! units, tokens), into a discrete segmentation, and scores segmentations
//! against a reference.
//!
//! ## Overview
//!
//! A document of `N` units comes with `N - 1` scores, one per gap. The
//! engine runs three pure stages:
//!
//! 1. **Calibration** rescales the scores (z-score, rank, smoothing).
//! 2. **Boundary selection** picks cut points, either every position above
//!    a threshold or exactly `K - 1` positions maximizing the score sum,
//!    always honouring a minimum segment length.
//! 3. **Evaluation** compares the result against a gold segmentation with
//!    boundary precision/recall/F1, Pk and WindowDiff.
//!
//! ## Quick Start
//!
//! ```rust
//! use horos::{compare, select, Constraint, ScoreProfile, Segmentation};
//!
//! let profile = ScoreProfile::new(vec![0.1, 0.9, 0.2, 0.8, 0.1, 0.1, 0.9, 0.1, 0.2])?;
//!
//! let by_threshold = select(&profile, &Constraint::threshold(0.5))?;
//! assert_eq!(by_threshold.boundaries(), &[2, 4, 7]);
//!
//! let by_count = select(&profile, &Constraint::segment_count(3).with_min_segment_length(2))?;
//! assert_eq!(by_count.boundaries(), &[2, 7]);
//!
//! let reference = Segmentation::new(10, vec![2, 7])?;
//! let report = compare(&by_threshold, &reference)?;
//! assert_eq!(report.recall, 1.0);
//! # Ok::<(), horos::HorosError>(())
//! ```
//!
//! ## Architecture
//!
//! - [`profile`] - Score profiles
//! - [`calibration`] - Score calibrators
//! - [`segmentation`] - Constraints, boundary selection, segmentations
//! - [`metrics`] - Boundary P/R/F1, Pk, WindowDiff
//! - [`labels`] - BIO/BILOU span decoding and span-level scoring
//! - [`pipeline`] - Per-document and batch processing
//! - [`config`] - Serializable configuration

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod calibration;
pub mod config;
pub mod error;
pub mod labels;
pub mod metrics;
pub mod pipeline;
pub mod profile;
pub mod segmentation;

// Re-export commonly used types
pub use calibration::{calibrate, CalibrationMode, Calibrator};
pub use config::{Config, EvaluationConfig};
pub use error::{HorosError, Result};
pub use labels::{
    score_columns, spans_from_labels, ColumnLayout, LabelParser, LabelScheme, SpanCounts,
    TypedSpan,
};
pub use metrics::{compare, MetricEngine, MetricReport, WindowSize};
pub use pipeline::{BatchSummary, Document, DocumentOutcome, Pipeline};
pub use profile::ScoreProfile;
pub use segmentation::{select, BoundarySelector, Constraint, Segmentation, SelectionMode};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_core_types_are_thread_safe() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ScoreProfile>();
        assert_send_sync::<Segmentation>();
        assert_send_sync::<BoundarySelector>();
        assert_send_sync::<MetricEngine>();
        assert_send_sync::<Pipeline>();
    }
}
