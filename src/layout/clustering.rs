//! One-dimensional clustering: runs into lines, x-positions into columns.
//!
//! Both clusterings are single-linkage scans over sorted coordinates with a
//! fixed representative per cluster (the first member), which keeps them
//! deterministic and independent of insertion order within a tolerance band.

use crate::layout::run::PositionedRun;
use crate::utils::float_cmp;

/// Runs sharing approximately the same top edge.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// Representative top edge: the `y` of the first run assigned
    pub y: f64,
    /// Runs ordered left to right; never empty
    pub items: Vec<PositionedRun>,
}

impl Line {
    /// Left edges of the line's runs, left to right.
    pub fn xs(&self) -> Vec<f64> {
        self.items.iter().map(|item| item.x).collect()
    }

    /// Number of runs on the line.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the line has no runs.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The line's text: run texts joined by single spaces and trimmed.
    pub fn text(&self) -> String {
        self.items
            .iter()
            .map(|item| item.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
            .trim()
            .to_string()
    }
}

/// Group runs into lines, top to bottom.
///
/// Runs are stably sorted by `y`; a run joins the open line when it lies
/// within `row_tolerance` of that line's first run, otherwise it opens a new
/// line. Each closed line is stably sorted by `x`.
///
/// # Examples
///
/// ```
/// use pdf_restructure::layout::clustering::group_into_lines;
/// use pdf_restructure::layout::PositionedRun;
///
/// let runs = vec![
///     PositionedRun::new("world", 60.0, 11.0, 30.0, 10.0),
///     PositionedRun::new("hello", 10.0, 10.0, 30.0, 10.0),
///     PositionedRun::new("next", 10.0, 30.0, 20.0, 10.0),
/// ];
/// let lines = group_into_lines(runs, 4.0);
/// assert_eq!(lines.len(), 2);
/// assert_eq!(lines[0].text(), "hello world");
/// assert_eq!(lines[1].text(), "next");
/// ```
pub fn group_into_lines(mut runs: Vec<PositionedRun>, row_tolerance: f64) -> Vec<Line> {
    runs.sort_by(|a, b| float_cmp(a.y, b.y));

    let mut lines: Vec<Line> = Vec::new();
    let mut current: Option<Line> = None;

    for run in runs {
        if let Some(line) = current.as_mut() {
            if (run.y - line.y).abs() <= row_tolerance {
                line.items.push(run);
                continue;
            }
        }

        let opened = Line {
            y: run.y,
            items: vec![run],
        };
        if let Some(line) = current.replace(opened) {
            lines.push(close_line(line));
        }
    }

    if let Some(line) = current {
        lines.push(close_line(line));
    }

    lines
}

fn close_line(mut line: Line) -> Line {
    line.items.sort_by(|a, b| float_cmp(a.x, b.x));
    line
}

/// Bucket x-positions into column anchors.
///
/// Values are sorted ascending; a new anchor starts whenever a value exceeds
/// the last anchor by more than `col_tolerance`. Each anchor is the smallest
/// value of its bucket, so the result is sorted and strictly increasing.
///
/// # Examples
///
/// ```
/// use pdf_restructure::layout::clustering::bucket_columns;
///
/// let anchors = bucket_columns(&[150.0, 52.0, 50.0, 165.0], 18.0);
/// assert_eq!(anchors, vec![50.0, 150.0]);
/// ```
pub fn bucket_columns(xs: &[f64], col_tolerance: f64) -> Vec<f64> {
    let mut sorted = xs.to_vec();
    sorted.sort_by(|a, b| float_cmp(*a, *b));

    let mut anchors: Vec<f64> = Vec::new();
    for x in sorted {
        match anchors.last() {
            Some(&last) if x - last > col_tolerance => anchors.push(x),
            Some(_) => {},
            None => anchors.push(x),
        }
    }
    anchors
}

/// Whether `x` lies within `col_tolerance` of any anchor.
pub fn matches_anchor(anchors: &[f64], x: f64, col_tolerance: f64) -> bool {
    anchors.iter().any(|&anchor| (x - anchor).abs() <= col_tolerance)
}

/// Index of the anchor nearest to `x`; equidistant anchors resolve to the
/// lower index. Returns `None` only for an empty anchor list.
pub fn nearest_anchor(anchors: &[f64], x: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, &anchor) in anchors.iter().enumerate() {
        let distance = (x - anchor).abs();
        if best.map_or(true, |(_, best_distance)| distance < best_distance) {
            best = Some((idx, distance));
        }
    }
    best.map(|(idx, _)| idx)
}
