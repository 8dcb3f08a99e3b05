//! Per-page reconstruction pipeline.
//!
//! ```text
//! RawPage ─normalize─▶ PositionedRun* ─group─▶ Line* ─segment─▶ Block* ─emit─▶ DocElement*
//! ```
//!
//! Every stage is a pure function of its input and the [`LayoutConfig`]; the
//! pipeline holds no state between calls, so pages can be processed
//! independently and in any order.

use crate::config::LayoutConfig;
use crate::elements::{DocElement, TableContent};
use crate::error::Result;
use crate::layout::{
    bucket_columns, group_into_lines, is_heading_text, nearest_anchor, segment_blocks, Block,
    Line, OcrPage, PositionedRun, RawPage,
};

/// Runs the layout stages over one page at a time.
#[derive(Debug, Clone, Default)]
pub struct LayoutPipeline {
    config: LayoutConfig,
}

impl LayoutPipeline {
    /// Create a pipeline with default tuning.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pipeline with custom tuning.
    pub fn with_config(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// The pipeline's configuration.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Reconstruct a digital page.
    ///
    /// Fails only when the page height is not a positive finite number.
    pub fn process_page(&self, page: &RawPage) -> Result<Vec<DocElement>> {
        let runs = page.normalize()?;
        Ok(self.process_runs(runs))
    }

    /// Reconstruct a page from already-normalized runs.
    pub fn process_runs(&self, runs: Vec<PositionedRun>) -> Vec<DocElement> {
        let run_count = runs.len();
        let lines = group_into_lines(runs, self.config.row_tolerance);
        let blocks = segment_blocks(&lines, &self.config);
        let elements = emit_elements(&blocks, &self.config);

        log::debug!(
            "page: {} runs, {} lines, {} blocks ({} tables), {} elements",
            run_count,
            lines.len(),
            blocks.len(),
            blocks.iter().filter(|b| b.is_table()).count(),
            elements.len()
        );

        elements
    }

    /// Turn a scanned page's OCR text into paragraphs.
    pub fn process_ocr(&self, page: &OcrPage) -> Vec<DocElement> {
        ocr_elements(&page.text, &self.config)
    }
}

/// Convert blocks into document elements, in order.
pub fn emit_elements(blocks: &[Block], config: &LayoutConfig) -> Vec<DocElement> {
    blocks
        .iter()
        .filter_map(|block| match block {
            Block::Paragraph(line) => paragraph_element(line, config),
            Block::Table(lines) => Some(table_element(lines, config)),
        })
        .collect()
}

/// A single-line paragraph; `None` if the line has no visible text.
pub fn paragraph_element(line: &Line, config: &LayoutConfig) -> Option<DocElement> {
    text_paragraph(&line.text(), config)
}

/// Lay a table block's runs into a grid.
///
/// Columns are the anchors of every run's `x` across the whole block. Each
/// run goes to the nearest anchor (lower index on ties); runs that land in the
/// same cell are joined with a space in reading order.
pub fn table_element(lines: &[Line], config: &LayoutConfig) -> DocElement {
    let xs: Vec<f64> = lines.iter().flat_map(Line::xs).collect();
    let anchors = bucket_columns(&xs, config.col_tolerance);

    let mut table = TableContent::new(lines.len(), anchors.len());
    for (row, line) in lines.iter().enumerate() {
        for item in &line.items {
            if let Some(col) = nearest_anchor(&anchors, item.x) {
                table.append_to_cell(row, col, &item.text);
            }
        }
    }

    DocElement::Table(table)
}

/// One paragraph per non-blank line of OCR text.
///
/// OCR output carries no geometry, so it never goes through table detection.
pub fn ocr_elements(text: &str, config: &LayoutConfig) -> Vec<DocElement> {
    text.split('\n')
        .filter_map(|line| text_paragraph(line, config))
        .collect()
}

fn text_paragraph(text: &str, config: &LayoutConfig) -> Option<DocElement> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    let is_heading = is_heading_text(text, config.heading_max_len);
    Some(DocElement::paragraph(text, is_heading))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{GlyphRun, RawItem};

    fn run(text: &str, x: f64, y: f64) -> PositionedRun {
        PositionedRun::new(text, x, y, 20.0, 10.0)
    }

    fn line(y: f64, cells: &[(f64, &str)]) -> Line {
        Line {
            y,
            items: cells.iter().map(|&(x, text)| run(text, x, y)).collect(),
        }
    }

    #[test]
    fn test_paragraph_joins_runs() {
        let el = paragraph_element(
            &line(0.0, &[(0.0, "Hello"), (40.0, "world ")]),
            &LayoutConfig::default(),
        );
        assert_eq!(el, Some(DocElement::paragraph("Hello world", false)));
    }

    #[test]
    fn test_paragraph_heading_flag() {
        let config = LayoutConfig::default();
        let el = paragraph_element(&line(0.0, &[(0.0, "SECTION"), (60.0, "ONE")]), &config);
        assert_eq!(el, Some(DocElement::paragraph("SECTION ONE", true)));
    }

    #[test]
    fn test_table_grid_placement() {
        let lines = vec![
            line(10.0, &[(50.0, "A"), (150.0, "B")]),
            line(30.0, &[(50.0, "C"), (150.0, "D")]),
        ];
        let el = table_element(&lines, &LayoutConfig::default());
        let table = el.as_table().unwrap();
        assert_eq!(table.col_count(), 2);
        assert_eq!(
            table.rows(),
            &[
                vec!["A".to_string(), "B".to_string()],
                vec!["C".to_string(), "D".to_string()]
            ]
        );
    }

    #[test]
    fn test_table_missing_cell_stays_empty() {
        let lines = vec![
            line(0.0, &[(50.0, "a"), (150.0, "b"), (250.0, "c")]),
            line(20.0, &[(50.0, "d"), (250.0, "f")]),
        ];
        let el = table_element(&lines, &LayoutConfig::default());
        let table = el.as_table().unwrap();
        assert_eq!(table.col_count(), 3);
        assert_eq!(table.cell(1, 1), Some(""));
        assert_eq!(table.cell(1, 2), Some("f"));
    }

    #[test]
    fn test_table_wide_cell_concatenates() {
        // 60 lies in the bucket anchored at 50, so "long" and "label" share a cell.
        let lines = vec![
            line(0.0, &[(50.0, "long"), (60.0, "label"), (150.0, "1")]),
            line(20.0, &[(50.0, "short"), (150.0, "2")]),
        ];
        let el = table_element(&lines, &LayoutConfig::default());
        let table = el.as_table().unwrap();
        assert_eq!(table.col_count(), 2);
        assert_eq!(table.cell(0, 0), Some("long label"));
        assert_eq!(table.cell(0, 1), Some("1"));
    }

    #[test]
    fn test_table_cells_keep_run_text() {
        let lines = vec![
            line(0.0, &[(50.0, "Amount "), (150.0, " Currency")]),
            line(20.0, &[(50.0, "4,500.00"), (150.0, "USD")]),
        ];
        let el = table_element(&lines, &LayoutConfig::default());
        let table = el.as_table().unwrap();
        assert_eq!(table.cell(0, 0), Some("Amount "));
        assert_eq!(table.cell(0, 1), Some(" Currency"));
    }

    #[test]
    fn test_emit_preserves_block_order() {
        let config = LayoutConfig::default();
        let blocks = vec![
            Block::Paragraph(line(0.0, &[(0.0, "before")])),
            Block::Table(vec![
                line(20.0, &[(50.0, "a"), (150.0, "b")]),
                line(40.0, &[(50.0, "c"), (150.0, "d")]),
            ]),
            Block::Paragraph(line(60.0, &[(0.0, "after")])),
        ];
        let elements = emit_elements(&blocks, &config);
        assert_eq!(elements.len(), 3);
        assert_eq!(elements[0].as_text(), Some("before"));
        assert!(elements[1].is_table());
        assert_eq!(elements[2].as_text(), Some("after"));
    }

    #[test]
    fn test_ocr_lines_become_paragraphs() {
        let elements = ocr_elements("CHAPTER ONE\r\n\n  It was a dark night.  \n\n", &LayoutConfig::default());
        assert_eq!(
            elements,
            vec![
                DocElement::paragraph("CHAPTER ONE", true),
                DocElement::paragraph("It was a dark night.", false),
            ]
        );
    }

    #[test]
    fn test_process_page_end_to_end() {
        let page = RawPage::new(
            vec![
                RawItem::from(GlyphRun::new("REPORT", 50.0, 780.0, 60.0, 12.0)),
                RawItem::from(GlyphRun::new("Item", 50.0, 740.0, 30.0, 10.0)),
                RawItem::from(GlyphRun::new("Cost", 150.0, 740.0, 30.0, 10.0)),
                RawItem::from(GlyphRun::new("Pens", 50.0, 720.0, 30.0, 10.0)),
                RawItem::from(GlyphRun::new("4.50", 150.0, 720.0, 30.0, 10.0)),
            ],
            792.0,
        );
        let elements = LayoutPipeline::new().process_page(&page).unwrap();

        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0], DocElement::paragraph("REPORT", true));
        let table = elements[1].as_table().unwrap();
        assert_eq!(table.cell(0, 1), Some("Cost"));
        assert_eq!(table.cell(1, 0), Some("Pens"));
    }

    #[test]
    fn test_process_page_rejects_bad_height() {
        let page = RawPage::new(vec![], 0.0);
        assert!(LayoutPipeline::new().process_page(&page).is_err());
    }

    #[test]
    fn test_process_runs_empty() {
        assert!(LayoutPipeline::new().process_runs(vec![]).is_empty());
    }
}
