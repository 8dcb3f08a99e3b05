//! Layout analysis for a single page.
//!
//! This module provides the geometric stages of reconstruction:
//! - Normalization of extractor runs into top-down coordinates
//! - Line grouping and column bucketing
//! - Table-versus-paragraph block segmentation
//! - All-caps heading detection

pub mod clustering;
pub mod heading_detector;
pub mod run;
pub mod table_detector;

// Re-export main types
pub use clustering::{bucket_columns, group_into_lines, nearest_anchor, Line};
pub use heading_detector::is_heading_text;
pub use run::{normalize_items, GlyphRun, MarkerItem, OcrPage, PositionedRun, RawItem, RawPage};
pub use table_detector::{extract_table, segment_blocks, Block};
