//! Table content element.
//!
//! A table is a dense row-major grid of strings. Every row has exactly
//! `col_count` cells; an empty cell is the empty string. Spanning or merged
//! cells are not represented.

use serde::Serialize;

/// A rectangular grid of cell strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableContent {
    rows: Vec<Vec<String>>,
    col_count: usize,
}

impl TableContent {
    /// Create a `row_count × col_count` grid of empty cells.
    pub fn new(row_count: usize, col_count: usize) -> Self {
        Self {
            rows: vec![vec![String::new(); col_count]; row_count],
            col_count,
        }
    }

    /// Append text to a cell, separated from existing content by one space.
    ///
    /// `text` is appended verbatim, like run text inside a paragraph line.
    /// Empty text and out-of-range coordinates are ignored.
    pub fn append_to_cell(&mut self, row: usize, col: usize, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(cell) = self.rows.get_mut(row).and_then(|r| r.get_mut(col)) {
            if !cell.is_empty() {
                cell.push(' ');
            }
            cell.push_str(text);
        }
    }

    /// The grid, row-major.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns; every row has this many cells.
    pub fn col_count(&self) -> usize {
        self.col_count
    }

    /// Text of one cell.
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }

    /// Equal column width as a whole percentage of the table width.
    pub fn column_width_percent(&self) -> u32 {
        match self.col_count {
            0 => 0,
            n => 100 / n as u32,
        }
    }

    /// Consume the table, returning its grid.
    pub fn into_rows(self) -> Vec<Vec<String>> {
        self.rows
    }
}
