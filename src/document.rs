//! Multi-page assembly.
//!
//! Pages are reconstructed independently and joined in page order with a
//! [`DocElement::PageBreak`] between consecutive pages. Digital pages go
//! through the layout pipeline; scanned pages are OCR text, one paragraph per
//! line. A conversion either succeeds for every page or yields an error and no
//! elements at all.

use crate::config::LayoutConfig;
use crate::converters::text::to_plain_text;
use crate::elements::DocElement;
use crate::error::Result;
use crate::layout::{OcrPage, RawPage};
use crate::pipeline::LayoutPipeline;
use serde::{Deserialize, Serialize};

/// How a page's content was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    /// The page has a usable native text layer
    Digital,
    /// The page is an image and needs OCR
    Scanned,
}

/// Decide whether a page's native text layer is worth reconstructing.
///
/// A page is digital when the concatenation of its runs' text, trimmed, has at
/// least `text_threshold` characters.
pub fn classify_page(page: &RawPage, text_threshold: usize) -> PageKind {
    let native = page.native_text();
    if native.trim().chars().count() >= text_threshold {
        PageKind::Digital
    } else {
        PageKind::Scanned
    }
}

/// One page of input, already routed to the right source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageContent {
    /// Extractor output for a page with a text layer
    Digital(RawPage),
    /// OCR output for an image-only page
    Scanned(OcrPage),
}

impl PageContent {
    /// Route an extracted page by [`classify_page`], invoking `ocr` only for
    /// scanned pages.
    ///
    /// OCR failures surface here, before any reconstruction runs.
    pub fn route<F>(page: RawPage, text_threshold: usize, ocr: F) -> Result<Self>
    where
        F: FnOnce() -> Result<OcrPage>,
    {
        match classify_page(&page, text_threshold) {
            PageKind::Digital => Ok(PageContent::Digital(page)),
            PageKind::Scanned => Ok(PageContent::Scanned(ocr()?)),
        }
    }

    /// The page's source kind.
    pub fn kind(&self) -> PageKind {
        match self {
            PageContent::Digital(_) => PageKind::Digital,
            PageContent::Scanned(_) => PageKind::Scanned,
        }
    }
}

/// Join per-page element lists in order, with a page break between pages.
///
/// Useful when pages were reconstructed separately, e.g. on worker threads.
pub fn join_pages<I>(pages: I) -> Vec<DocElement>
where
    I: IntoIterator<Item = Vec<DocElement>>,
{
    let mut elements = Vec::new();
    for (idx, page) in pages.into_iter().enumerate() {
        if idx > 0 {
            elements.push(DocElement::PageBreak);
        }
        elements.extend(page);
    }
    elements
}

/// Reconstruct every page and join them.
///
/// Returns an error, and nothing else, if any digital page is malformed.
pub fn assemble_pages(pages: &[PageContent], config: &LayoutConfig) -> Result<Vec<DocElement>> {
    let pipeline = LayoutPipeline::with_config(*config);
    let per_page = pages
        .iter()
        .map(|page| match page {
            PageContent::Digital(raw) => pipeline.process_page(raw),
            PageContent::Scanned(ocr) => Ok(pipeline.process_ocr(ocr)),
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(join_pages(per_page))
}

/// The result of converting a whole document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    /// Elements for the document writer
    pub elements: Vec<DocElement>,
    /// Plain-text serialization for storage and preview
    pub plain_text: String,
    /// Number of input pages
    pub page_count: usize,
}

/// Converts routed pages into a [`Conversion`].
#[derive(Debug, Clone, Default)]
pub struct Converter {
    config: LayoutConfig,
}

impl Converter {
    /// Create a converter with the given tuning.
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// The converter's configuration.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Convert all pages.
    pub fn convert(&self, pages: &[PageContent]) -> Result<Conversion> {
        let elements = assemble_pages(pages, &self.config)?;
        let plain_text = to_plain_text(&elements);

        log::debug!(
            "converted {} pages ({} scanned) into {} elements",
            pages.len(),
            pages.iter().filter(|p| p.kind() == PageKind::Scanned).count(),
            elements.len()
        );

        Ok(Conversion {
            elements,
            plain_text,
            page_count: pages.len(),
        })
    }
}
