//! Tuning parameters for layout reconstruction.
//!
//! Different document corpora need different thresholds, so every tolerance the
//! pipeline uses lives in [`LayoutConfig`] and is passed in per call. Nothing is
//! read from globals.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Vertical distance (page units) within which runs share a line.
pub const DEFAULT_ROW_TOLERANCE: f64 = 4.0;

/// Horizontal distance (page units) within which x-positions share a column.
pub const DEFAULT_COL_TOLERANCE: f64 = 18.0;

/// Minimum number of runs a line needs to be a table row.
pub const DEFAULT_MIN_TABLE_COLS: usize = 2;

/// Minimum number of consecutive rows that make a table.
pub const DEFAULT_MIN_TABLE_ROWS: usize = 2;

/// Paragraphs at or above this many characters are never headings.
pub const DEFAULT_HEADING_MAX_LEN: usize = 80;

/// A page with fewer native text characters than this is treated as scanned.
pub const DEFAULT_TEXT_THRESHOLD: usize = 30;

/// Layout reconstruction configuration.
///
/// Missing fields fall back to their defaults when deserialized, so a config
/// file only needs to name the values it overrides.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Row tolerance for line grouping, in page units.
    pub row_tolerance: f64,

    /// Column tolerance for anchor bucketing, in page units.
    pub col_tolerance: f64,

    /// Minimum runs per table row.
    pub min_table_cols: usize,

    /// Minimum rows per table.
    pub min_table_rows: usize,

    /// Exclusive upper bound on heading length, in characters.
    pub heading_max_len: usize,

    /// Character count separating digital pages from scanned ones.
    pub text_threshold: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutConfig {
    /// Create a configuration with the default thresholds.
    pub fn new() -> Self {
        Self {
            row_tolerance: DEFAULT_ROW_TOLERANCE,
            col_tolerance: DEFAULT_COL_TOLERANCE,
            min_table_cols: DEFAULT_MIN_TABLE_COLS,
            min_table_rows: DEFAULT_MIN_TABLE_ROWS,
            heading_max_len: DEFAULT_HEADING_MAX_LEN,
            text_threshold: DEFAULT_TEXT_THRESHOLD,
        }
    }

    /// Configuration that only accepts tables of three rows or more.
    ///
    /// Two-line, two-column captions are indistinguishable from 2×2 tables;
    /// this preset trades small-table recall for fewer of those.
    pub fn strict() -> Self {
        Self::new().with_min_table_rows(3)
    }

    /// Configuration with a wider column tolerance for loosely aligned tables.
    pub fn lenient() -> Self {
        Self::new().with_col_tolerance(30.0)
    }

    /// Set the row tolerance.
    pub fn with_row_tolerance(mut self, tolerance: f64) -> Self {
        self.row_tolerance = tolerance;
        self
    }

    /// Set the column tolerance.
    pub fn with_col_tolerance(mut self, tolerance: f64) -> Self {
        self.col_tolerance = tolerance;
        self
    }

    /// Set the minimum number of columns per table row.
    pub fn with_min_table_cols(mut self, cols: usize) -> Self {
        self.min_table_cols = cols;
        self
    }

    /// Set the minimum number of rows per table.
    pub fn with_min_table_rows(mut self, rows: usize) -> Self {
        self.min_table_rows = rows;
        self
    }

    /// Set the heading length bound.
    pub fn with_heading_max_len(mut self, len: usize) -> Self {
        self.heading_max_len = len;
        self
    }

    /// Set the digital-page text threshold.
    pub fn with_text_threshold(mut self, threshold: usize) -> Self {
        self.text_threshold = threshold;
        self
    }

    /// Check that every parameter is usable.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("row_tolerance", self.row_tolerance),
            ("col_tolerance", self.col_tolerance),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{} must be a non-negative finite number, got {}",
                    name, value
                )));
            }
        }

        for (name, value) in [
            ("min_table_cols", self.min_table_cols),
            ("min_table_rows", self.min_table_rows),
            ("heading_max_len", self.heading_max_len),
        ] {
            if value == 0 {
                return Err(Error::InvalidConfig(format!("{} must be at least 1", name)));
            }
        }

        if self.min_table_cols == 1 {
            log::warn!("min_table_cols = 1 lets single-run lines form tables");
        }

        Ok(())
    }

    /// Parse and validate a configuration from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let config = LayoutConfig::default();
        assert_eq!(config.row_tolerance, 4.0);
        assert_eq!(config.col_tolerance, 18.0);
        assert_eq!(config.min_table_cols, 2);
        assert_eq!(config.min_table_rows, 2);
        assert_eq!(config.heading_max_len, 80);
        assert_eq!(config.text_threshold, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_setters() {
        let config = LayoutConfig::new()
            .with_row_tolerance(2.5)
            .with_col_tolerance(10.0)
            .with_min_table_cols(3)
            .with_min_table_rows(4)
            .with_heading_max_len(40)
            .with_text_threshold(5);

        assert_eq!(config.row_tolerance, 2.5);
        assert_eq!(config.col_tolerance, 10.0);
        assert_eq!(config.min_table_cols, 3);
        assert_eq!(config.min_table_rows, 4);
        assert_eq!(config.heading_max_len, 40);
        assert_eq!(config.text_threshold, 5);
    }

    #[test]
    fn test_presets() {
        assert_eq!(LayoutConfig::strict().min_table_rows, 3);
        assert!(LayoutConfig::lenient().col_tolerance > DEFAULT_COL_TOLERANCE);
    }

    #[test]
    fn test_validate_rejects_bad_tolerances() {
        assert!(LayoutConfig::new().with_row_tolerance(-1.0).validate().is_err());
        assert!(LayoutConfig::new().with_col_tolerance(f64::NAN).validate().is_err());
        assert!(LayoutConfig::new()
            .with_col_tolerance(f64::INFINITY)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_rejects_zero_counts() {
        let err = LayoutConfig::new().with_min_table_rows(0).validate().unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
        assert!(LayoutConfig::new().with_min_table_cols(0).validate().is_err());
        assert!(LayoutConfig::new().with_heading_max_len(0).validate().is_err());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = LayoutConfig::from_json_str(r#"{ "col_tolerance": 10.0 }"#).unwrap();
        assert_eq!(config.col_tolerance, 10.0);
        assert_eq!(config.row_tolerance, DEFAULT_ROW_TOLERANCE);
        assert_eq!(config.min_table_rows, DEFAULT_MIN_TABLE_ROWS);
    }

    #[test]
    fn test_json_validation_applies() {
        let err = LayoutConfig::from_json_str(r#"{ "min_table_cols": 0 }"#).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }
}
