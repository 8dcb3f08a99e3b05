//! Writers for reconstructed documents.
//!
//! This module turns a [`DocElement`](crate::elements::DocElement) stream into
//! output formats:
//! - **Plain text**: the storage/preview serialization with page-break sentinels
//! - **DOCX**: a WordprocessingML package (feature `office`)
//!
//! # Examples
//!
//! ```
//! use pdf_restructure::converters::{to_plain_text, PAGE_BREAK_SENTINEL};
//! use pdf_restructure::elements::DocElement;
//!
//! let text = to_plain_text(&[DocElement::PageBreak]);
//! assert_eq!(text, PAGE_BREAK_SENTINEL);
//! ```

pub mod text;

#[cfg(feature = "office")]
#[cfg_attr(docsrs, doc(cfg(feature = "office")))]
pub mod docx;

// Re-export main types
pub use text::{to_plain_text, PAGE_BREAK_SENTINEL};

#[cfg(feature = "office")]
pub use docx::DocxWriter;
