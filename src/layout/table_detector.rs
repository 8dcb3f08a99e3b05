//! Table detection by column alignment across consecutive lines.
//!
//! Lines are walked top to bottom. At each position the detector greedily
//! grows a table: every candidate row needs at least `min_table_cols` runs,
//! and (after the first row) at least that many of its runs must sit within
//! `col_tolerance` of the column anchors accumulated so far. A run of at least
//! `min_table_rows` accepted lines becomes a [`Block::Table`]; otherwise the
//! line at the cursor becomes a single-line [`Block::Paragraph`].
//!
//! Two-line, two-column captions are indistinguishable from 2×2 tables under
//! the default tolerances. Raising `min_table_rows` or `min_table_cols` is the
//! only control for that false positive.

use crate::config::LayoutConfig;
use crate::layout::clustering::{bucket_columns, matches_anchor, Line};

/// A contiguous run of lines classified together.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// A single line of prose
    Paragraph(Line),
    /// Consecutive column-aligned lines
    Table(Vec<Line>),
}

impl Block {
    /// The lines this block covers, in order.
    pub fn lines(&self) -> &[Line] {
        match self {
            Block::Paragraph(line) => std::slice::from_ref(line),
            Block::Table(lines) => lines,
        }
    }

    /// Whether this block is a table.
    pub fn is_table(&self) -> bool {
        matches!(self, Block::Table(_))
    }
}

/// Split lines into paragraph and table blocks.
///
/// Every input line ends up in exactly one block and block order follows line
/// order, so concatenating `block.lines()` reproduces the input.
pub fn segment_blocks(lines: &[Line], config: &LayoutConfig) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        match extract_table(&lines[i..], config) {
            Some(rows) => {
                log::trace!("table of {} rows at line {}", rows.len(), i);
                blocks.push(Block::Table(rows.to_vec()));
                i += rows.len();
            },
            None => {
                blocks.push(Block::Paragraph(lines[i].clone()));
                i += 1;
            },
        }
    }

    blocks
}

/// Try to grow a table from the first line of `lines`.
///
/// Returns the accepted prefix when it has at least `min_table_rows` lines.
pub fn extract_table<'a>(lines: &'a [Line], config: &LayoutConfig) -> Option<&'a [Line]> {
    let tolerance = config.col_tolerance;
    let mut anchors: Vec<f64> = Vec::new();
    let mut accepted = 0;

    for line in lines {
        if line.len() < config.min_table_cols {
            break;
        }

        let xs = line.xs();
        if anchors.is_empty() {
            anchors = bucket_columns(&xs, tolerance);
            if anchors.len() < config.min_table_cols {
                break;
            }
        } else {
            let matched = xs
                .iter()
                .filter(|&&x| matches_anchor(&anchors, x, tolerance))
                .count();
            if matched < config.min_table_cols {
                break;
            }
        }

        accepted += 1;
        anchors.extend_from_slice(&xs);
        anchors = bucket_columns(&anchors, tolerance);
    }

    if accepted > 0 && accepted >= config.min_table_rows {
        Some(&lines[..accepted])
    } else {
        None
    }
}
