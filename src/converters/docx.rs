//! DOCX output.
//!
//! Writes reconstructed elements as a minimal WordprocessingML package:
//! headings use a `Heading1` paragraph style (bold, larger type), page
//! breaks become `<w:br w:type="page"/>`, and tables get equal column widths
//! of `⌊100 / col_count⌋` percent.
//!
//! DOCX files are ZIP archives of XML parts. The main content goes to
//! `word/document.xml`; styles, relationships and core properties are fixed
//! apart from the optional title.

use crate::elements::{DocElement, TableContent};
use crate::error::{Error, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::borrow::Cow;
use std::io::{Cursor, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

const WORDML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Paragraph style used for heading paragraphs.
pub const HEADING_STYLE: &str = "Heading1";

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/><Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/></Types>"#;

const PACKAGE_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/></Relationships>"#;

const DOCUMENT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#;

const STYLES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:qFormat/><w:pPr><w:spacing w:after="120"/></w:pPr><w:rPr><w:sz w:val="22"/></w:rPr></w:style><w:style w:type="paragraph" w:styleId="Heading1"><w:name w:val="heading 1"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/><w:pPr><w:keepNext/><w:spacing w:before="240" w:after="120"/><w:outlineLvl w:val="0"/></w:pPr><w:rPr><w:b/><w:sz w:val="32"/></w:rPr></w:style></w:styles>"#;

const TABLE_BORDERS: [&str; 6] = ["top", "left", "bottom", "right", "insideH", "insideV"];

/// Writes [`DocElement`]s as a `.docx` package.
#[derive(Debug, Clone, Default)]
pub struct DocxWriter {
    title: Option<String>,
}

impl DocxWriter {
    /// Create a writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the document title recorded in the core properties.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Build the package in memory.
    pub fn write(&self, elements: &[DocElement]) -> Result<Vec<u8>> {
        let document = self.document_xml(elements)?;
        let core = self.core_xml()?;

        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

        let parts: [(&str, &[u8]); 6] = [
            ("[Content_Types].xml", CONTENT_TYPES_XML.as_bytes()),
            ("_rels/.rels", PACKAGE_RELS_XML.as_bytes()),
            ("docProps/core.xml", core.as_bytes()),
            ("word/_rels/document.xml.rels", DOCUMENT_RELS_XML.as_bytes()),
            ("word/styles.xml", STYLES_XML.as_bytes()),
            ("word/document.xml", document.as_bytes()),
        ];
        for (name, bytes) in parts {
            zip.start_file(name, options)
                .map_err(|e| Error::Docx(format!("Failed to start {}: {}", name, e)))?;
            zip.write_all(bytes)?;
        }

        let cursor = zip
            .finish()
            .map_err(|e| Error::Docx(format!("Failed to finish archive: {}", e)))?;

        log::debug!("wrote DOCX with {} elements", elements.len());
        Ok(cursor.into_inner())
    }

    /// Build the package and write it to `path`.
    ///
    /// Nothing is written if building the package fails.
    pub fn write_to_path(&self, elements: &[DocElement], path: impl AsRef<Path>) -> Result<()> {
        let bytes = self.write(elements)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Render `word/document.xml`.
    pub fn document_xml(&self, elements: &[DocElement]) -> Result<String> {
        let mut xml = XmlOut::new()?;
        xml.start("w:document", &[("xmlns:w", WORDML_NS)])?;
        xml.start("w:body", &[])?;

        for element in elements {
            match element {
                DocElement::Paragraph { text, is_heading } => {
                    write_paragraph(&mut xml, text, *is_heading)?;
                },
                DocElement::Table(table) => write_table(&mut xml, table)?,
                DocElement::PageBreak => write_page_break(&mut xml)?,
            }
        }

        xml.end("w:body")?;
        xml.end("w:document")?;
        xml.finish()
    }

    fn core_xml(&self) -> Result<String> {
        let mut xml = XmlOut::new()?;
        xml.start(
            "cp:coreProperties",
            &[
                (
                    "xmlns:cp",
                    "http://schemas.openxmlformats.org/package/2006/metadata/core-properties",
                ),
                ("xmlns:dc", "http://purl.org/dc/elements/1.1/"),
            ],
        )?;
        if let Some(title) = &self.title {
            xml.start("dc:title", &[])?;
            xml.text(title)?;
            xml.end("dc:title")?;
        }
        xml.end("cp:coreProperties")?;
        xml.finish()
    }
}

fn write_paragraph(xml: &mut XmlOut, text: &str, is_heading: bool) -> Result<()> {
    xml.start("w:p", &[])?;
    if is_heading {
        xml.start("w:pPr", &[])?;
        xml.empty("w:pStyle", &[("w:val", HEADING_STYLE)])?;
        xml.end("w:pPr")?;
    }
    write_run(xml, text)?;
    xml.end("w:p")
}

fn write_run(xml: &mut XmlOut, text: &str) -> Result<()> {
    if text.is_empty() {
        return Ok(());
    }
    xml.start("w:r", &[])?;
    xml.start("w:t", &[("xml:space", "preserve")])?;
    xml.text(text)?;
    xml.end("w:t")?;
    xml.end("w:r")
}

fn write_page_break(xml: &mut XmlOut) -> Result<()> {
    xml.start("w:p", &[])?;
    xml.start("w:r", &[])?;
    xml.empty("w:br", &[("w:type", "page")])?;
    xml.end("w:r")?;
    xml.end("w:p")
}

fn write_table(xml: &mut XmlOut, table: &TableContent) -> Result<()> {
    // Percent widths are expressed in fiftieths of a percent.
    let cell_width = (table.column_width_percent() * 50).to_string();

    xml.start("w:tbl", &[])?;

    xml.start("w:tblPr", &[])?;
    xml.empty("w:tblW", &[("w:w", "5000"), ("w:type", "pct")])?;
    xml.start("w:tblBorders", &[])?;
    for edge in TABLE_BORDERS {
        xml.empty(
            &format!("w:{}", edge),
            &[
                ("w:val", "single"),
                ("w:sz", "4"),
                ("w:space", "0"),
                ("w:color", "auto"),
            ],
        )?;
    }
    xml.end("w:tblBorders")?;
    xml.empty("w:tblLayout", &[("w:type", "fixed")])?;
    xml.end("w:tblPr")?;

    xml.start("w:tblGrid", &[])?;
    for _ in 0..table.col_count() {
        xml.empty("w:gridCol", &[])?;
    }
    xml.end("w:tblGrid")?;

    for row in table.rows() {
        xml.start("w:tr", &[])?;
        for cell in row {
            xml.start("w:tc", &[])?;
            xml.start("w:tcPr", &[])?;
            xml.empty("w:tcW", &[("w:w", &cell_width), ("w:type", "pct")])?;
            xml.end("w:tcPr")?;
            // Every cell needs a paragraph, even an empty one.
            write_paragraph(xml, cell, false)?;
            xml.end("w:tc")?;
        }
        xml.end("w:tr")?;
    }

    xml.end("w:tbl")
}

/// Drop characters XML 1.0 cannot represent (C0 controls other than tab,
/// newline and carriage return, and the noncharacters U+FFFE and U+FFFF).
/// Escaping does not help here: Word rejects them even as character references.
fn xml_safe_text(text: &str) -> Cow<'_, str> {
    if text.chars().all(is_xml_char) {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(text.chars().filter(|&c| is_xml_char(c)).collect())
    }
}

fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}'
    )
}

/// Thin wrapper over the quick-xml writer that maps errors into [`Error::Docx`].
struct XmlOut {
    writer: Writer<Vec<u8>>,
}

impl XmlOut {
    fn new() -> Result<Self> {
        let mut out = Self {
            writer: Writer::new(Vec::new()),
        };
        out.write(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
        Ok(out)
    }

    fn write(&mut self, event: Event<'_>) -> Result<()> {
        self.writer
            .write_event(event)
            .map_err(|e| Error::Docx(format!("Failed to write XML: {}", e)))
    }

    fn start(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        let tag = BytesStart::new(name).with_attributes(attrs.iter().copied());
        self.write(Event::Start(tag))
    }

    fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        let tag = BytesStart::new(name).with_attributes(attrs.iter().copied());
        self.write(Event::Empty(tag))
    }

    fn end(&mut self, name: &str) -> Result<()> {
        self.write(Event::End(BytesEnd::new(name)))
    }

    fn text(&mut self, text: &str) -> Result<()> {
        let text = xml_safe_text(text);
        self.write(Event::Text(BytesText::new(&text)))
    }

    fn finish(self) -> Result<String> {
        String::from_utf8(self.writer.into_inner())
            .map_err(|e| Error::Docx(format!("Generated XML is not UTF-8: {}", e)))
    }
}
