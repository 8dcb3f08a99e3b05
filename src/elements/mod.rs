//! Reconstructed document elements.
//!
//! [`DocElement`] is the output of reconstruction and the input of every
//! writer. It is a closed sum type: writers match on it exhaustively.
//!
//! ## Example
//!
//! ```
//! use pdf_restructure::elements::{DocElement, TableContent};
//!
//! let mut table = TableContent::new(2, 2);
//! table.append_to_cell(0, 0, "Name");
//! table.append_to_cell(0, 1, "Qty");
//!
//! let elements = vec![
//!     DocElement::paragraph("SUMMARY", true),
//!     DocElement::Table(table),
//!     DocElement::PageBreak,
//! ];
//! assert!(elements[2].is_page_break());
//! ```

mod table;

pub use table::TableContent;

use serde::Serialize;

/// One block of the reconstructed document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DocElement {
    /// A line of prose, possibly flagged as a heading
    Paragraph {
        /// Trimmed, non-empty text
        text: String,
        /// Render with a heading style
        is_heading: bool,
    },
    /// A rectangular grid of cell strings
    Table(TableContent),
    /// Hard page break before the next element
    PageBreak,
}

impl DocElement {
    /// Create a paragraph element.
    pub fn paragraph(text: impl Into<String>, is_heading: bool) -> Self {
        DocElement::Paragraph {
            text: text.into(),
            is_heading,
        }
    }

    /// Check if this is a paragraph.
    pub fn is_paragraph(&self) -> bool {
        matches!(self, DocElement::Paragraph { .. })
    }

    /// Check if this is a heading paragraph.
    pub fn is_heading(&self) -> bool {
        matches!(
            self,
            DocElement::Paragraph {
                is_heading: true,
                ..
            }
        )
    }

    /// Check if this is a table.
    pub fn is_table(&self) -> bool {
        matches!(self, DocElement::Table(_))
    }

    /// Check if this is a page break.
    pub fn is_page_break(&self) -> bool {
        matches!(self, DocElement::PageBreak)
    }

    /// Get the paragraph text if this is a paragraph.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            DocElement::Paragraph { text, .. } => Some(text),
            _ => None,
        }
    }

    /// Get as table content if this is a table.
    pub fn as_table(&self) -> Option<&TableContent> {
        match self {
            DocElement::Table(t) => Some(t),
            _ => None,
        }
    }
}
