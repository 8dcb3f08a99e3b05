//! Plain-text serialization.
//!
//! Elements are joined with `\n`. A paragraph renders as its text, a table as
//! its rows joined by `\n` with cells separated by a tab, and a page break as
//! the reserved [`PAGE_BREAK_SENTINEL`] line.

use crate::elements::{DocElement, TableContent};

/// Line that marks a page boundary in the plain-text output.
pub const PAGE_BREAK_SENTINEL: &str = "--- Page Break ---";

/// Render elements as plain text.
///
/// # Examples
///
/// ```
/// use pdf_restructure::converters::to_plain_text;
/// use pdf_restructure::elements::DocElement;
///
/// let text = to_plain_text(&[
///     DocElement::paragraph("a", false),
///     DocElement::PageBreak,
///     DocElement::paragraph("b", false),
/// ]);
/// assert_eq!(text, "a\n--- Page Break ---\nb");
/// ```
pub fn to_plain_text(elements: &[DocElement]) -> String {
    elements
        .iter()
        .map(element_text)
        .collect::<Vec<_>>()
        .join("\n")
}

fn element_text(element: &DocElement) -> String {
    match element {
        DocElement::Paragraph { text, .. } => text.clone(),
        DocElement::Table(table) => table_text(table),
        DocElement::PageBreak => PAGE_BREAK_SENTINEL.to_string(),
    }
}

fn table_text(table: &TableContent) -> String {
    table
        .rows()
        .iter()
        .map(|row| row.join("\t"))
        .collect::<Vec<_>>()
        .join("\n")
}
