//! Threshold-mode boundary selection.

use crate::profile::ScoreProfile;

/// Selects boundaries scoring at least `threshold`, then enforces the
/// minimum segment length with one left-to-right sweep.
///
/// A candidate survives when it lies at least `min_length` units after the
/// last kept boundary (or the document start) and at least `min_length`
/// units before the document end. Keeping the earliest valid candidate of
/// every run yields the largest min-gap subset of the candidates.
pub(crate) fn select_by_threshold(
    profile: &ScoreProfile,
    threshold: f64,
    min_length: usize,
) -> Vec<usize> {
    let unit_count = profile.unit_count();
    let candidates = profile
        .scores()
        .iter()
        .enumerate()
        .filter(|(_, &s)| s >= threshold)
        .map(|(i, _)| i + 1); // +1 because score i sits after unit i

    enforce_min_segment_length(candidates, unit_count, min_length)
}

/// Keeps a boundary only when both segments it closes and opens can reach
/// `min_length` units.
fn enforce_min_segment_length(
    boundaries: impl IntoIterator<Item = usize>,
    unit_count: usize,
    min_length: usize,
) -> Vec<usize> {
    let mut kept = Vec::new();
    let mut segment_start = 0usize;

    for boundary in boundaries {
        let closes_long_enough = boundary - segment_start >= min_length;
        let leaves_room = unit_count - boundary >= min_length;
        if closes_long_enough && leaves_room {
            kept.push(boundary);
            segment_start = boundary;
        }
    }

    kept
}
