//! Window-based segmentation metrics: Pk and WindowDiff.
//!
//! Both slide a window of `k` units across the document. For a window
//! starting at unit `i` the boundaries inside it are those in `(i, i + k]`;
//! prefix counts make each window O(1), so both metrics are O(N).

use crate::error::{HorosError, Result};
use crate::segmentation::Segmentation;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the window size of Pk/WindowDiff is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "WindowSizeRepr", into = "WindowSizeRepr")]
pub enum WindowSize {
    /// Half the mean reference segment length, rounded, at least 1.
    #[default]
    Auto,
    /// A fixed number of units.
    Fixed(usize),
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum WindowSizeRepr {
    Units(usize),
    Name(String),
}

impl TryFrom<WindowSizeRepr> for WindowSize {
    type Error = HorosError;

    fn try_from(repr: WindowSizeRepr) -> Result<Self> {
        match repr {
            WindowSizeRepr::Units(k) => Ok(WindowSize::Fixed(k)),
            WindowSizeRepr::Name(name) => name.parse(),
        }
    }
}

impl From<WindowSize> for WindowSizeRepr {
    fn from(size: WindowSize) -> Self {
        match size {
            WindowSize::Auto => WindowSizeRepr::Name("auto".to_string()),
            WindowSize::Fixed(k) => WindowSizeRepr::Units(k),
        }
    }
}

impl FromStr for WindowSize {
    type Err = HorosError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("auto") {
            return Ok(WindowSize::Auto);
        }
        s.parse()
            .map(WindowSize::Fixed)
            .map_err(|_| HorosError::Config(format!("invalid window size: {:?}", s)))
    }
}

impl fmt::Display for WindowSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowSize::Auto => write!(f, "auto"),
            WindowSize::Fixed(k) => write!(f, "{}", k),
        }
    }
}

impl WindowSize {
    /// Resolves the window size against a reference segmentation.
    pub fn resolve(&self, reference: &Segmentation) -> usize {
        match *self {
            WindowSize::Auto => auto_window_size(reference),
            WindowSize::Fixed(k) => k,
        }
    }
}

/// Half the mean reference segment length, rounded to nearest, at least 1.
pub fn auto_window_size(reference: &Segmentation) -> usize {
    let half = reference.mean_segment_length() / 2.0;
    (half.round() as usize).max(1)
}

fn check_window(candidate: &Segmentation, reference: &Segmentation, k: usize) -> Result<()> {
    if candidate.unit_count() != reference.unit_count() {
        return Err(HorosError::ShapeMismatch {
            candidate: candidate.unit_count(),
            reference: reference.unit_count(),
        });
    }
    let unit_count = reference.unit_count();
    if k < 1 || k >= unit_count {
        return Err(HorosError::InvalidWindowSize {
            window: k,
            unit_count,
        });
    }
    Ok(())
}

/// Counts windows whose boundary counts fail `agree`, over all starts
/// `0..=N-k-1`, and returns the disagreeing fraction.
fn window_error<F>(candidate: &Segmentation, reference: &Segmentation, k: usize, agree: F) -> f64
where
    F: Fn(usize, usize) -> bool,
{
    let hyp = candidate.boundary_prefix_counts();
    let gold = reference.boundary_prefix_counts();
    let windows = reference.unit_count() - k;

    let errors = (0..windows)
        .filter(|&i| {
            let in_hyp = hyp[i + k] - hyp[i];
            let in_gold = gold[i + k] - gold[i];
            !agree(in_hyp, in_gold)
        })
        .count();

    errors as f64 / windows as f64
}

/// Pk: the share of windows whose ends are in the same segment under one
/// segmentation but not the other. Lower is better.
pub fn pk(candidate: &Segmentation, reference: &Segmentation, k: usize) -> Result<f64> {
    check_window(candidate, reference, k)?;
    Ok(window_error(candidate, reference, k, |h, g| (h > 0) == (g > 0)))
}

/// WindowDiff: the share of windows holding a different number of
/// boundaries in the two segmentations. Lower is better.
pub fn window_diff(candidate: &Segmentation, reference: &Segmentation, k: usize) -> Result<f64> {
    check_window(candidate, reference, k)?;
    Ok(window_error(candidate, reference, k, |h, g| h == g))
}
