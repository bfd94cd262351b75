//! BIO/BILOU span labels.
//!
//! Token-level labels are decoded into typed spans, which can be scored
//! against gold spans ([`SpanCounts`]) or turned into a [`Segmentation`] so
//! that labelled documents get Pk/WindowDiff too.
//!
//! Labels combine an action with an optional type, e.g. `PER_B`:
//!
//! | action | meaning                         | schemes   |
//! |--------|---------------------------------|-----------|
//! | `B`    | begins a span                   | BIO/BILOU |
//! | `I`    | continues the open span         | BIO/BILOU |
//! | `L`    | last unit of the open span      | BILOU     |
//! | `O`    | outside any span                | BIO/BILOU |
//! | `U`    | single-unit span                | BILOU     |

mod columns;
mod counts;
mod parser;

pub use columns::{score_columns, ColumnLayout};
pub use counts::SpanCounts;
pub use parser::{LabelParser, DEFAULT_LABEL_PATTERN};

use crate::error::{HorosError, Result};
use crate::segmentation::Segmentation;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Labelling scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelScheme {
    /// Begin / Inside / Outside.
    Bio,
    /// Begin / Inside / Last / Outside / Unit.
    #[default]
    Bilou,
}

/// The action part of a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Begin.
    B,
    /// Inside.
    I,
    /// Last.
    L,
    /// Outside.
    O,
    /// Unit.
    U,
}

impl FromStr for Action {
    type Err = HorosError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "B" => Ok(Action::B),
            "I" => Ok(Action::I),
            "L" => Ok(Action::L),
            "O" => Ok(Action::O),
            "U" => Ok(Action::U),
            other => Err(HorosError::InvalidLabel(format!("unknown action {:?}", other))),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Action::B => "B",
            Action::I => "I",
            Action::L => "L",
            Action::O => "O",
            Action::U => "U",
        };
        f.write_str(c)
    }
}

/// A parsed label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Label {
    /// Span action.
    pub action: Action,
    /// Span type, if the label carries one.
    pub kind: Option<String>,
}

impl Label {
    /// Creates a label.
    pub fn new(action: Action, kind: Option<&str>) -> Self {
        Self {
            action,
            kind: kind.map(str::to_string),
        }
    }
}

/// A typed half-open span `start..end` of units.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypedSpan {
    /// First unit.
    pub start: usize,
    /// One past the last unit.
    pub end: usize,
    /// Span type.
    pub kind: Option<String>,
}

impl TypedSpan {
    /// Creates a span.
    pub fn new(start: usize, end: usize, kind: Option<String>) -> Self {
        Self { start, end, kind }
    }

    /// Number of units covered.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// True for zero-width spans.
    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }
}

struct OpenSpan<'a> {
    start: usize,
    kind: Option<&'a str>,
}

impl OpenSpan<'_> {
    fn close(self, end: usize) -> TypedSpan {
        TypedSpan::new(self.start, end, self.kind.map(str::to_string))
    }
}

fn invalid(position: usize, label: &Label, reason: &str) -> HorosError {
    let kind = label.kind.as_deref().unwrap_or("-");
    HorosError::InvalidLabel(format!(
        "{} at position {} ({} {})",
        reason, position, label.action, kind
    ))
}

/// Decodes a label sequence into typed spans.
///
/// BILOU is strict: a span must be closed by `L` before anything else starts.
/// BIO closes an open span on `B`, `O` or the end of the sequence.
pub fn spans_from_labels(labels: &[Label], scheme: LabelScheme) -> Result<Vec<TypedSpan>> {
    let bilou = scheme == LabelScheme::Bilou;
    let mut spans = Vec::new();
    let mut open: Option<OpenSpan<'_>> = None;

    for (i, label) in labels.iter().enumerate() {
        let kind = label.kind.as_deref();
        match label.action {
            Action::B => {
                if let Some(span) = open.take() {
                    if bilou {
                        return Err(invalid(i, label, "span opened before the previous one ended"));
                    }
                    spans.push(span.close(i));
                }
                open = Some(OpenSpan { start: i, kind });
            }
            Action::I => match &open {
                None => return Err(invalid(i, label, "inside label without an open span")),
                Some(span) if span.kind != kind => {
                    return Err(invalid(i, label, "incoherent label type"))
                }
                Some(_) => {}
            },
            Action::L => {
                if !bilou {
                    return Err(invalid(i, label, "L is not valid in BIO mode"));
                }
                match open.take() {
                    None => return Err(invalid(i, label, "last label without an open span")),
                    Some(span) if span.kind != kind => {
                        return Err(invalid(i, label, "incoherent label type"))
                    }
                    Some(span) => spans.push(span.close(i + 1)),
                }
            }
            Action::O => {
                if let Some(span) = open.take() {
                    if bilou {
                        return Err(invalid(i, label, "outside label inside an open span"));
                    }
                    spans.push(span.close(i));
                }
            }
            Action::U => {
                if !bilou {
                    return Err(invalid(i, label, "U is not valid in BIO mode"));
                }
                if open.is_some() {
                    return Err(invalid(i, label, "unit label inside an open span"));
                }
                spans.push(TypedSpan::new(i, i + 1, label.kind.clone()));
            }
        }
    }

    if let Some(span) = open {
        if bilou {
            return Err(HorosError::InvalidLabel(format!(
                "span starting at position {} is never closed",
                span.start
            )));
        }
        spans.push(span.close(labels.len()));
    }

    Ok(spans)
}

/// Span counts for one block of gold and system labels.
pub fn score_labels(gold: &[Label], system: &[Label], scheme: LabelScheme) -> Result<SpanCounts> {
    if gold.len() != system.len() {
        return Err(HorosError::ShapeMismatch {
            candidate: system.len(),
            reference: gold.len(),
        });
    }
    let gold_spans = spans_from_labels(gold, scheme)?;
    let system_spans = spans_from_labels(system, scheme)?;
    Ok(SpanCounts::from_spans(&gold_spans, &system_spans))
}

/// Converts spans over `unit_count` units into a segmentation whose
/// boundaries are the span edges strictly inside the document.
pub fn spans_to_segmentation(unit_count: usize, spans: &[TypedSpan]) -> Result<Segmentation> {
    if let Some(span) = spans.iter().find(|s| s.end > unit_count || s.start > s.end) {
        return Err(HorosError::InvalidSegmentation(format!(
            "span {}..{} does not fit in {} units",
            span.start, span.end, unit_count
        )));
    }

    let boundaries: BTreeSet<usize> = spans
        .iter()
        .flat_map(|s| [s.start, s.end])
        .filter(|&b| b > 0 && b < unit_count)
        .collect();

    Segmentation::new(unit_count, boundaries.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(raw: &[&str]) -> Vec<Label> {
        LabelParser::default().parse_all(raw.iter().copied()).unwrap()
    }

    #[test]
    fn test_bilou_spans() {
        let spans = spans_from_labels(
            &labels(&["PER_B", "PER_I", "PER_L", "O", "LOC_U", "O"]),
            LabelScheme::Bilou,
        )
        .unwrap();

        assert_eq!(
            spans,
            vec![
                TypedSpan::new(0, 3, Some("PER".to_string())),
                TypedSpan::new(4, 5, Some("LOC".to_string())),
            ]
        );
    }

    #[test]
    fn test_bio_spans_close_implicitly() {
        let spans = spans_from_labels(
            &labels(&["PER_B", "PER_I", "LOC_B", "O", "ORG_B", "ORG_I"]),
            LabelScheme::Bio,
        )
        .unwrap();

        assert_eq!(spans.len(), 3);
        assert_eq!((spans[0].start, spans[0].end), (0, 2));
        assert_eq!((spans[1].start, spans[1].end), (2, 3));
        // open span at end of sequence is closed
        assert_eq!((spans[2].start, spans[2].end), (4, 6));
    }

    #[test]
    fn test_bilou_rejects_malformed() {
        let cases: &[&[&str]] = &[
            &["PER_B", "PER_B"],
            &["PER_I"],
            &["PER_L"],
            &["PER_B", "O"],
            &["PER_B", "LOC_L"],
            &["PER_B", "PER_U"],
            &["PER_B", "PER_I"],
        ];
        for case in cases {
            let result = spans_from_labels(&labels(case), LabelScheme::Bilou);
            assert!(
                matches!(result, Err(HorosError::InvalidLabel(_))),
                "expected failure for {:?}",
                case
            );
        }
    }

    #[test]
    fn test_bio_rejects_bilou_actions() {
        assert!(spans_from_labels(&labels(&["PER_U"]), LabelScheme::Bio).is_err());
        assert!(spans_from_labels(&labels(&["PER_B", "PER_L"]), LabelScheme::Bio).is_err());
        assert!(spans_from_labels(&labels(&["PER_B", "LOC_I"]), LabelScheme::Bio).is_err());
    }

    #[test]
    fn test_score_labels() {
        let gold = labels(&["PER_B", "PER_L", "O", "LOC_U"]);
        let system = labels(&["PER_B", "PER_L", "O", "O"]);
        let counts = score_labels(&gold, &system, LabelScheme::Bilou).unwrap();

        assert_eq!(counts.true_positives, 1);
        assert_eq!(counts.gold, 2);
        assert_eq!(counts.system, 1);
        assert_eq!(counts.precision(), 1.0);
        assert_eq!(counts.recall(), 0.5);

        assert!(score_labels(&gold, &system[..2], LabelScheme::Bilou).is_err());
    }

    #[test]
    fn test_spans_to_segmentation() {
        let spans = vec![
            TypedSpan::new(0, 3, None),
            TypedSpan::new(3, 5, None),
            TypedSpan::new(7, 10, None),
        ];
        let seg = spans_to_segmentation(10, &spans).unwrap();
        assert_eq!(seg.boundaries(), &[3, 5, 7]);

        assert!(spans_to_segmentation(4, &spans).is_err());
    }
}
