//! # PDF Restructure
//!
//! Layout reconstruction for PDF-to-Word conversion.
//!
//! PDFs carry no notion of paragraphs or tables: text extractors emit glyph
//! runs at absolute positions on a bottom-up page. This crate recovers a
//! structured document from such a stream: paragraphs, all-caps headings,
//! tables with rectangular cell grids, and page breaks.
//!
//! ## Pipeline
//!
//! Each page goes through four pure stages, then pages are joined:
//!
//! 1. **Normalize**: flip runs to top-down coordinates, drop markers and blanks
//! 2. **Line grouping**: cluster runs within a row tolerance, order left to right
//! 3. **Block segmentation**: greedily extract column-aligned line runs as tables
//! 4. **Element emission**: cell grids for tables, one paragraph per other line
//! 5. **Page assembly**: page breaks between pages; OCR text for scanned pages
//!
//! All tolerances live in [`LayoutConfig`] and are passed per call; nothing is
//! global, so pages can be processed in parallel and joined with
//! [`document::join_pages`].
//!
//! ## Quick Start
//!
//! ```
//! use pdf_restructure::layout::{GlyphRun, RawItem, RawPage};
//! use pdf_restructure::{Converter, LayoutConfig, PageContent};
//!
//! # fn main() -> pdf_restructure::Result<()> {
//! let page = RawPage::new(
//!     vec![
//!         RawItem::from(GlyphRun::new("A", 50.0, 772.0, 10.0, 10.0)),
//!         RawItem::from(GlyphRun::new("B", 150.0, 772.0, 10.0, 10.0)),
//!         RawItem::from(GlyphRun::new("C", 50.0, 752.0, 10.0, 10.0)),
//!         RawItem::from(GlyphRun::new("D", 150.0, 752.0, 10.0, 10.0)),
//!     ],
//!     792.0,
//! );
//!
//! let conversion = Converter::new(LayoutConfig::default()).convert(&[PageContent::Digital(page)])?;
//! assert_eq!(conversion.plain_text, "A\tB\nC\tD");
//! # Ok(())
//! # }
//! ```
//!
//! ## License
//!
//! Licensed under either of:
//!
//! * Apache License, Version 2.0 (<http://www.apache.org/licenses/LICENSE-2.0>)
//! * MIT license (<http://opensource.org/licenses/MIT>)
//!
//! at your option.

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Error handling
pub mod error;

// Configuration
pub mod config;

// Layout analysis
pub mod layout;

// Output model
pub mod elements;

// Per-page reconstruction
pub mod pipeline;

// Multi-page assembly
pub mod document;

// Output writers
pub mod converters;

// Re-exports
pub use config::LayoutConfig;
pub use document::{
    assemble_pages, classify_page, Conversion, Converter, PageContent, PageKind,
};
pub use elements::{DocElement, TableContent};
pub use error::{Error, Result};
pub use pipeline::LayoutPipeline;

// Internal utilities
pub(crate) mod utils {
    //! Internal utility functions for the library.

    use std::cmp::Ordering;

    /// Compare coordinates for sorting.
    ///
    /// NaN orders after every number and equal to itself, so sorts never
    /// panic. `-0.0` and `0.0` compare equal, which keeps stable sorts in
    /// input order for runs at the same position.
    #[inline]
    pub fn float_cmp(a: f64, b: f64) -> Ordering {
        match (a.is_nan(), b.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_float_cmp_normal() {
            assert_eq!(float_cmp(1.0, 2.0), Ordering::Less);
            assert_eq!(float_cmp(2.0, 1.0), Ordering::Greater);
            assert_eq!(float_cmp(1.5, 1.5), Ordering::Equal);
        }

        #[test]
        fn test_float_cmp_nan() {
            assert_eq!(float_cmp(f64::NAN, f64::NAN), Ordering::Equal);
            assert_eq!(float_cmp(f64::NAN, 0.0), Ordering::Greater);
            assert_eq!(float_cmp(0.0, f64::NAN), Ordering::Less);
        }

        #[test]
        fn test_float_cmp_signed_zero() {
            assert_eq!(float_cmp(-0.0, 0.0), Ordering::Equal);
            assert_eq!(float_cmp(0.0, -0.0), Ordering::Equal);
        }

        #[test]
        fn test_float_cmp_infinity() {
            assert_eq!(float_cmp(f64::INFINITY, f64::INFINITY), Ordering::Equal);
            assert_eq!(float_cmp(f64::INFINITY, 1.0), Ordering::Greater);
            assert_eq!(float_cmp(f64::NEG_INFINITY, f64::INFINITY), Ordering::Less);
        }
    }
}

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
