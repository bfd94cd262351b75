//! Span-level precision, recall and F1.

use crate::labels::TypedSpan;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Raw span counts; sums across blocks give micro-averaged scores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpanCounts {
    /// Spans present in both gold and system output.
    pub true_positives: usize,
    /// Gold spans.
    pub gold: usize,
    /// System spans.
    pub system: usize,
}

impl SpanCounts {
    /// Counts exact (start, end, type) agreement between two span lists.
    pub fn from_spans(gold: &[TypedSpan], system: &[TypedSpan]) -> Self {
        let gold: HashSet<&TypedSpan> = gold.iter().collect();
        let system: HashSet<&TypedSpan> = system.iter().collect();

        Self {
            true_positives: gold.intersection(&system).count(),
            gold: gold.len(),
            system: system.len(),
        }
    }

    /// Share of system spans that are correct.
    pub fn precision(&self) -> f64 {
        match self.system {
            0 if self.gold == 0 => 1.0,
            0 => 0.0,
            n => self.true_positives as f64 / n as f64,
        }
    }

    /// Share of gold spans that were found.
    pub fn recall(&self) -> f64 {
        match self.gold {
            0 if self.system == 0 => 1.0,
            0 => 0.0,
            n => self.true_positives as f64 / n as f64,
        }
    }

    /// 2·tp / (gold + system).
    pub fn f1(&self) -> f64 {
        match self.gold + self.system {
            0 => 1.0,
            n => 2.0 * self.true_positives as f64 / n as f64,
        }
    }
}

impl Add for SpanCounts {
    type Output = SpanCounts;

    fn add(self, other: SpanCounts) -> SpanCounts {
        SpanCounts {
            true_positives: self.true_positives + other.true_positives,
            gold: self.gold + other.gold,
            system: self.system + other.system,
        }
    }
}

impl AddAssign for SpanCounts {
    fn add_assign(&mut self, other: SpanCounts) {
        *self = *self + other;
    }
}

impl Sum for SpanCounts {
    fn sum<I: Iterator<Item = SpanCounts>>(iter: I) -> Self {
        iter.fold(SpanCounts::default(), Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(start: usize, end: usize, kind: &str) -> TypedSpan {
        TypedSpan::new(start, end, Some(kind.to_string()))
    }

    #[test]
    fn test_type_must_match() {
        let gold = vec![span(0, 2, "PER"), span(3, 4, "LOC")];
        let system = vec![span(0, 2, "PER"), span(3, 4, "ORG")];
        let counts = SpanCounts::from_spans(&gold, &system);

        assert_eq!(counts.true_positives, 1);
        assert!((counts.precision() - 0.5).abs() < 1e-12);
        assert!((counts.recall() - 0.5).abs() < 1e-12);
        assert!((counts.f1() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_micro_average() {
        let blocks = vec![
            SpanCounts { true_positives: 1, gold: 1, system: 1 },
            SpanCounts { true_positives: 0, gold: 3, system: 1 },
        ];
        let total: SpanCounts = blocks.into_iter().sum();

        assert_eq!(total, SpanCounts { true_positives: 1, gold: 4, system: 2 });
        assert!((total.precision() - 0.5).abs() < 1e-12);
        assert!((total.recall() - 0.25).abs() < 1e-12);
        assert!((total.f1() - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_counts() {
        let empty = SpanCounts::default();
        assert_eq!(empty.precision(), 1.0);
        assert_eq!(empty.recall(), 1.0);
        assert_eq!(empty.f1(), 1.0);

        let missed = SpanCounts { true_positives: 0, gold: 2, system: 0 };
        assert_eq!(missed.precision(), 0.0);
        assert_eq!(missed.f1(), 0.0);
    }
}
