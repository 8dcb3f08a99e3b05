//! Extractor input types and coordinate normalization.
//!
//! PDF text extractors report glyph runs in PDF user space: the origin is the
//! bottom-left corner of the page and `transform[5]` is the run's baseline.
//! Everything downstream works top-down, so [`normalize_items`] flips each run
//! into page-top coordinates and drops anything that carries no text.

use crate::error::{Error, Result};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A glyph run exactly as the extractor reports it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlyphRun {
    /// The run's text (pdf.js calls this `str`)
    #[serde(alias = "str")]
    pub text: String,
    /// Text matrix `[sx, kx, ky, sy, tx, ty]`; only `tx` and `ty` are read
    pub transform: [f64; 6],
    /// Advance width in page units
    #[serde(default)]
    pub width: f64,
    /// Run height in page units (sign varies between extractors)
    #[serde(default)]
    pub height: f64,
    /// Font resource name
    #[serde(default, alias = "fontName")]
    pub font_name: String,
}

impl GlyphRun {
    /// Create a glyph run positioned at baseline `(tx, ty)` with an identity scale.
    pub fn new(text: impl Into<String>, tx: f64, ty: f64, width: f64, height: f64) -> Self {
        Self {
            text: text.into(),
            transform: [1.0, 0.0, 0.0, 1.0, tx, ty],
            width,
            height,
            font_name: String::new(),
        }
    }

    /// Set the font name.
    pub fn with_font(mut self, font_name: impl Into<String>) -> Self {
        self.font_name = font_name.into();
        self
    }
}

/// A structural annotation interleaved with the glyph runs (marked content
/// boundaries and the like). Its payload is never inspected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarkerItem {
    /// Marker type as reported by the extractor, if any
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// One item of the extractor's per-page stream.
///
/// An object carrying a textual payload (`str` or `text`) is a [`GlyphRun`]
/// and must parse as one; a malformed glyph is a deserialization error rather
/// than a marker. Every other object is a [`RawItem::Marker`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RawItem {
    /// Positioned text
    Glyph(GlyphRun),
    /// Non-textual annotation, discarded by normalization
    Marker(MarkerItem),
}

impl RawItem {
    /// Borrow the glyph run, if this item is one.
    pub fn as_glyph(&self) -> Option<&GlyphRun> {
        match self {
            RawItem::Glyph(run) => Some(run),
            RawItem::Marker(_) => None,
        }
    }
}

impl<'de> Deserialize<'de> for RawItem {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let has_text = value
            .as_object()
            .is_some_and(|obj| obj.contains_key("str") || obj.contains_key("text"));

        if has_text {
            GlyphRun::deserialize(value)
                .map(RawItem::Glyph)
                .map_err(|e| D::Error::custom(format!("malformed glyph run: {}", e)))
        } else {
            MarkerItem::deserialize(value)
                .map(RawItem::Marker)
                .map_err(D::Error::custom)
        }
    }
}

impl From<GlyphRun> for RawItem {
    fn from(run: GlyphRun) -> Self {
        RawItem::Glyph(run)
    }
}

/// The extractor's output for one digital page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPage {
    /// Items in content-stream order
    #[serde(default)]
    pub items: Vec<RawItem>,
    /// Height of the page's view box in PDF user units
    #[serde(alias = "pageHeight")]
    pub page_height: f64,
}

impl RawPage {
    /// Create a page from its items and height.
    pub fn new(items: Vec<RawItem>, page_height: f64) -> Self {
        Self { items, page_height }
    }

    /// Reject page heights the coordinate flip cannot use.
    pub fn validate(&self) -> Result<()> {
        if !self.page_height.is_finite() || self.page_height <= 0.0 {
            return Err(Error::MalformedInput(format!(
                "page height must be a positive finite number, got {}",
                self.page_height
            )));
        }
        Ok(())
    }

    /// Normalize the page's glyph runs into top-down [`PositionedRun`]s.
    pub fn normalize(&self) -> Result<Vec<PositionedRun>> {
        self.validate()?;
        Ok(normalize_items(&self.items, self.page_height))
    }

    /// Concatenated text of every glyph run, used to decide digital vs scanned.
    pub fn native_text(&self) -> String {
        self.items
            .iter()
            .filter_map(RawItem::as_glyph)
            .map(|run| run.text.as_str())
            .collect()
    }
}

/// OCR output for one scanned page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OcrPage {
    /// Recognized text, one visual line per `\n`
    pub text: String,
}

impl OcrPage {
    /// Wrap OCR text.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// A glyph run in top-down page coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedRun {
    /// Text, verbatim; never whitespace-only
    pub text: String,
    /// Left edge
    pub x: f64,
    /// Top edge, measured down from the top of the page
    pub y: f64,
    /// Advance width
    pub width: f64,
    /// Height, always non-negative
    pub height: f64,
    /// Font resource name
    pub font_name: String,
}

impl PositionedRun {
    /// Create a run directly in top-down coordinates.
    pub fn new(text: impl Into<String>, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            width,
            height,
            font_name: String::new(),
        }
    }
}

/// Convert extractor items into positioned runs, in input order.
///
/// Markers and whitespace-only runs are dropped. The top edge is
/// `page_height - ty - |height|`. This never fails; degenerate coordinates
/// simply pass through.
pub fn normalize_items(items: &[RawItem], page_height: f64) -> Vec<PositionedRun> {
    items
        .iter()
        .filter_map(RawItem::as_glyph)
        .filter(|run| !run.text.trim().is_empty())
        .map(|run| {
            let height = run.height.abs();
            PositionedRun {
                text: run.text.clone(),
                x: run.transform[4],
                y: page_height - run.transform[5] - height,
                width: run.width,
                height,
                font_name: run.font_name.clone(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flips_to_top_down() {
        let items = vec![RawItem::from(GlyphRun::new("Hello", 72.0, 700.0, 30.0, 12.0))];
        let runs = normalize_items(&items, 792.0);

        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].x, 72.0);
        assert_eq!(runs[0].y, 792.0 - 700.0 - 12.0);
        assert_eq!(runs[0].width, 30.0);
        assert_eq!(runs[0].height, 12.0);
    }

    #[test]
    fn test_negative_height_is_absolute() {
        let items = vec![RawItem::from(GlyphRun::new("x", 0.0, 100.0, 5.0, -10.0))];
        let runs = normalize_items(&items, 200.0);
        assert_eq!(runs[0].height, 10.0);
        assert_eq!(runs[0].y, 90.0);
    }

    #[test]
    fn test_drops_markers_and_blank_runs() {
        let items = vec![
            RawItem::Marker(MarkerItem {
                kind: Some("beginMarkedContent".to_string()),
            }),
            RawItem::from(GlyphRun::new("   ", 0.0, 0.0, 1.0, 1.0)),
            RawItem::from(GlyphRun::new("", 0.0, 0.0, 1.0, 1.0)),
            RawItem::from(GlyphRun::new("kept", 10.0, 10.0, 1.0, 1.0)),
            RawItem::Marker(MarkerItem::default()),
        ];
        let runs = normalize_items(&items, 100.0);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].text, "kept");
    }

    #[test]
    fn test_preserves_text_and_font_verbatim() {
        let items = vec![RawItem::from(
            GlyphRun::new(" padded\t", 1.0, 2.0, 3.0, 4.0).with_font("g_d0_f1"),
        )];
        let runs = normalize_items(&items, 50.0);
        assert_eq!(runs[0].text, " padded\t");
        assert_eq!(runs[0].font_name, "g_d0_f1");
    }

    #[test]
    fn test_preserves_input_order() {
        let items = vec![
            RawItem::from(GlyphRun::new("b", 0.0, 10.0, 1.0, 1.0)),
            RawItem::from(GlyphRun::new("a", 0.0, 90.0, 1.0, 1.0)),
        ];
        let texts: Vec<_> = normalize_items(&items, 100.0)
            .into_iter()
            .map(|r| r.text)
            .collect();
        assert_eq!(texts, vec!["b", "a"]);
    }

    #[test]
    fn test_page_height_validation() {
        assert!(RawPage::new(vec![], 792.0).validate().is_ok());
        for bad in [0.0, -10.0, f64::NAN, f64::INFINITY] {
            let err = RawPage::new(vec![], bad).normalize().unwrap_err();
            assert!(matches!(err, Error::MalformedInput(_)));
        }
    }

    #[test]
    fn test_native_text_skips_markers() {
        let page = RawPage::new(
            vec![
                RawItem::from(GlyphRun::new("ab", 0.0, 0.0, 1.0, 1.0)),
                RawItem::Marker(MarkerItem::default()),
                RawItem::from(GlyphRun::new("cd", 0.0, 0.0, 1.0, 1.0)),
            ],
            10.0,
        );
        assert_eq!(page.native_text(), "abcd");
    }

    #[test]
    fn test_deserialize_extractor_json() {
        let json = r#"{
            "pageHeight": 792,
            "items": [
                { "type": "beginMarkedContentProps", "id": "mc0" },
                { "str": "Total", "transform": [12, 0, 0, 12, 50, 700],
                  "width": 28.5, "height": 12, "fontName": "g_d0_f2", "hasEOL": false },
                { "type": "endMarkedContent" }
            ]
        }"#;
        let page: RawPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.items.len(), 3);
        assert!(matches!(page.items[0], RawItem::Marker(_)));

        let runs = page.normalize().unwrap();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].text, "Total");
        assert_eq!(runs[0].font_name, "g_d0_f2");
        assert_eq!(runs[0].y, 80.0);
    }

    #[test]
    fn test_text_item_with_bad_transform_is_an_error() {
        let json = r#"{
            "pageHeight": 792,
            "items": [
                { "str": "Invoice total 4,500.00", "transform": [1, 0, 0, 1, 50],
                  "width": 90, "height": 10 }
            ]
        }"#;
        let err = serde_json::from_str::<RawPage>(json).unwrap_err();
        assert!(err.to_string().contains("malformed glyph run"));
    }

    #[test]
    fn test_text_item_without_transform_is_an_error() {
        let result = serde_json::from_str::<RawItem>(r#"{ "text": "lost?" }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_object_without_text_is_marker() {
        let item: RawItem =
            serde_json::from_str(r#"{ "type": "beginMarkedContent", "tag": "P" }"#).unwrap();
        assert_eq!(
            item,
            RawItem::Marker(MarkerItem {
                kind: Some("beginMarkedContent".to_string()),
            })
        );

        let item: RawItem = serde_json::from_str("{}").unwrap();
        assert_eq!(item, RawItem::Marker(MarkerItem::default()));
    }

    #[test]
    fn test_item_json_roundtrip() {
        let item = RawItem::from(GlyphRun::new("Total", 50.0, 700.0, 28.0, 12.0));
        let json = serde_json::to_string(&item).unwrap();
        assert_eq!(serde_json::from_str::<RawItem>(&json).unwrap(), item);
    }
}
