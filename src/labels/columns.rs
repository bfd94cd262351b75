//! Scoring of column-formatted label files.
//!
//! The input is CoNLL-like text: one unit per line, whitespace-separated
//! columns, blocks separated by blank lines. Each block is decoded on its
//! own and the span counts of all blocks are summed.

use crate::error::{HorosError, Result};
use crate::labels::{score_labels, LabelParser, LabelScheme, SpanCounts};

/// Where the gold and system labels live in each row.
///
/// Negative indices count from the end of the row, `-1` being the last
/// column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    /// Column of the gold labels.
    pub gold: isize,
    /// Column of the system labels.
    pub system: isize,
}

impl Default for ColumnLayout {
    /// Gold labels last, system labels just before them.
    fn default() -> Self {
        Self { gold: -1, system: -2 }
    }
}

/// Resolves a possibly negative column index against a row.
fn column<'a>(columns: &[&'a str], index: isize) -> Option<&'a str> {
    let resolved = if index < 0 {
        columns.len().checked_sub(index.unsigned_abs())?
    } else {
        index as usize
    };
    columns.get(resolved).copied()
}

/// One non-empty line and its 1-based line number.
type Row<'a> = (usize, &'a str);

fn score_block(
    block: &[Row<'_>],
    parser: &LabelParser,
    layout: ColumnLayout,
    scheme: LabelScheme,
) -> Result<SpanCounts> {
    let mut gold = Vec::with_capacity(block.len());
    let mut system = Vec::with_capacity(block.len());

    for &(line_no, line) in block {
        let columns: Vec<&str> = line.split_whitespace().collect();
        let invalid = |what: &str| {
            HorosError::InvalidLabel(format!("line {}: {} in {:?}", line_no, what, line))
        };

        let gold_label =
            column(&columns, layout.gold).ok_or_else(|| invalid("missing gold column"))?;
        let sys_label =
            column(&columns, layout.system).ok_or_else(|| invalid("missing system column"))?;

        gold.push(parser.parse(gold_label).map_err(|e| invalid(&e.to_string()))?);
        system.push(parser.parse(sys_label).map_err(|e| invalid(&e.to_string()))?);
    }

    let first_line = block.first().map(|&(n, _)| n).unwrap_or(0);
    score_labels(&gold, &system, scheme).map_err(|e| {
        HorosError::InvalidLabel(format!("block starting at line {}: {}", first_line, e))
    })
}

/// Scores every block of `text` and sums the span counts.
///
/// Blank (or whitespace-only) lines close a block; the last block is scored
/// whether or not a blank line follows it. Errors name the offending line or
/// the first line of the offending block.
pub fn score_columns(
    text: &str,
    parser: &LabelParser,
    layout: ColumnLayout,
    scheme: LabelScheme,
) -> Result<SpanCounts> {
    let mut total = SpanCounts::default();
    let mut block: Vec<Row<'_>> = Vec::new();

    for (i, line) in text.lines().chain(std::iter::once("")).enumerate() {
        let line = line.trim();
        if line.is_empty() {
            if !block.is_empty() {
                total += score_block(&block, parser, layout, scheme)?;
                block.clear();
            }
        } else {
            block.push((i + 1, line));
        }
    }

    Ok(total)
}
