//! DOCX rendering: WordprocessingML packaged with zip.
//!
//! The document is landscape US letter. Section headings and the title are
//! centered, tables use single-line grid borders, header rows are bold,
//! centered and filled light grey, and shaded rows get a slightly lighter
//! fill. Header rows repeat when a table breaks across pages.
//!
//! Everything is built in memory; nothing touches the filesystem until
//! [`DocxRenderer::write_to`] has a finished archive.

use std::io::{Cursor, Write};
use std::path::Path;

use quick_xml::escape::escape;
use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::document::IndexRenderer;
use super::write_output;
use crate::Result;

/// Fill behind header cells.
pub const HEADER_FILL: &str = "D3D3D3";

/// Fill behind shaded rows.
pub const SHADED_FILL: &str = "E0E0E0";

// Sizes are in half-points, lengths in twentieths of a point.
const TITLE_SIZE: u32 = 60;
const HEADING_SIZE: u32 = 40;
const PAGE_WIDTH: u32 = 15840;
const PAGE_HEIGHT: u32 = 12240;
const PAGE_MARGIN: u32 = 1440;

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

const DOCUMENT_OPEN: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>"#;

/// Renders an index document into a `.docx` archive.
#[derive(Debug, Default)]
pub struct DocxRenderer {
    body: String,
    /// Column count of the open table, if any
    open_columns: Option<usize>,
}

impl DocxRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Close any open table and package the document.
    pub fn finish(mut self) -> Result<Vec<u8>> {
        self.close_table();

        let mut document = String::with_capacity(self.body.len() + 512);
        document.push_str(DOCUMENT_OPEN);
        document.push_str(&self.body);
        document.push_str(&section_properties());
        document.push_str("</w:body></w:document>");

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for (name, contents) in [
            ("[Content_Types].xml", CONTENT_TYPES_XML),
            ("_rels/.rels", RELS_XML),
            ("word/document.xml", document.as_str()),
        ] {
            zip.start_file(name, options)?;
            zip.write_all(contents.as_bytes())?;
        }

        let bytes = zip.finish()?.into_inner();
        debug!(bytes = bytes.len(), "packaged docx");
        Ok(bytes)
    }

    /// Package the document and write it to `path`, creating parent directories.
    pub fn write_to(self, path: impl AsRef<Path>) -> Result<()> {
        let bytes = self.finish()?;
        write_output(path.as_ref(), &bytes)
    }

    fn close_table(&mut self) {
        if self.open_columns.take().is_some() {
            self.body.push_str("</w:tbl>");
        }
    }

    fn open_table(&mut self, columns: usize) {
        self.close_table();

        let width = column_width(columns);
        self.body.push_str("<w:tbl><w:tblPr><w:tblW w:w=\"5000\" w:type=\"pct\"/><w:tblBorders>");
        for edge in ["top", "left", "bottom", "right", "insideH", "insideV"] {
            self.body.push_str(&format!(
                "<w:{edge} w:val=\"single\" w:sz=\"4\" w:space=\"0\" w:color=\"auto\"/>"
            ));
        }
        self.body.push_str("</w:tblBorders></w:tblPr><w:tblGrid>");
        for _ in 0..columns {
            self.body.push_str(&format!("<w:gridCol w:w=\"{width}\"/>"));
        }
        self.body.push_str("</w:tblGrid>");
        self.open_columns = Some(columns);
    }

    fn push_cell(&mut self, text: &str, width: u32, style: CellStyle) {
        self.body
            .push_str(&format!("<w:tc><w:tcPr><w:tcW w:w=\"{width}\" w:type=\"dxa\"/>"));
        if let Some(fill) = style.fill {
            self.body.push_str(&format!(
                "<w:shd w:val=\"clear\" w:color=\"auto\" w:fill=\"{fill}\"/>"
            ));
        }
        self.body.push_str("</w:tcPr><w:p>");
        if style.centered {
            self.body.push_str("<w:pPr><w:jc w:val=\"center\"/></w:pPr>");
        }
        self.body.push_str("<w:r>");
        if style.bold {
            self.body.push_str("<w:rPr><w:b/></w:rPr>");
        }
        self.body.push_str(&run_text(text));
        self.body.push_str("</w:r></w:p></w:tc>");
    }

    fn push_centered_paragraph(&mut self, text: &str, size: u32, heading: bool) {
        self.body.push_str("<w:p><w:pPr>");
        if heading {
            self.body.push_str("<w:keepNext/>");
        }
        self.body
            .push_str("<w:spacing w:before=\"240\" w:after=\"120\"/><w:jc w:val=\"center\"/>");
        if heading {
            self.body.push_str("<w:outlineLvl w:val=\"0\"/>");
        }
        self.body.push_str(&format!(
            "</w:pPr><w:r><w:rPr><w:b/><w:sz w:val=\"{size}\"/><w:szCs w:val=\"{size}\"/></w:rPr>"
        ));
        self.body.push_str(&run_text(text));
        self.body.push_str("</w:r></w:p>");
    }
}

impl IndexRenderer for DocxRenderer {
    fn add_title(&mut self, text: &str) -> Result<()> {
        self.close_table();
        self.push_centered_paragraph(text, TITLE_SIZE, false);
        Ok(())
    }

    fn add_section_heading(&mut self, label: &str) -> Result<()> {
        self.close_table();
        self.push_centered_paragraph(label, HEADING_SIZE, true);
        Ok(())
    }

    fn start_table(&mut self, columns: &[String]) -> Result<()> {
        self.open_table(columns.len());

        let width = column_width(columns.len());
        self.body.push_str("<w:tr><w:trPr><w:tblHeader/></w:trPr>");
        for column in columns {
            self.push_cell(column, width, CellStyle::HEADER);
        }
        self.body.push_str("</w:tr>");
        Ok(())
    }

    /// Rows arriving before any `start_table` open a table without a header row.
    fn add_row(&mut self, values: &[String], shaded: bool) -> Result<()> {
        let columns = match self.open_columns {
            Some(columns) => columns,
            None => {
                self.open_table(values.len());
                values.len()
            }
        };

        let width = column_width(columns);
        let style = if shaded {
            CellStyle::SHADED
        } else {
            CellStyle::PLAIN
        };

        self.body.push_str("<w:tr>");
        for index in 0..columns {
            let value = values.get(index).map(String::as_str).unwrap_or_default();
            self.push_cell(value, width, style);
        }
        self.body.push_str("</w:tr>");
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
struct CellStyle {
    fill: Option<&'static str>,
    bold: bool,
    centered: bool,
}

impl CellStyle {
    const HEADER: CellStyle = CellStyle {
        fill: Some(HEADER_FILL),
        bold: true,
        centered: true,
    };
    const SHADED: CellStyle = CellStyle {
        fill: Some(SHADED_FILL),
        bold: false,
        centered: false,
    };
    const PLAIN: CellStyle = CellStyle {
        fill: None,
        bold: false,
        centered: false,
    };
}

/// Equal share of the printable width for each column.
fn column_width(columns: usize) -> u32 {
    let printable = PAGE_WIDTH - 2 * PAGE_MARGIN;
    printable / u32::try_from(columns.max(1)).unwrap_or(u32::MAX)
}

fn section_properties() -> String {
    format!(
        "<w:sectPr><w:pgSz w:w=\"{PAGE_WIDTH}\" w:h=\"{PAGE_HEIGHT}\" w:orient=\"landscape\"/>\
         <w:pgMar w:top=\"{PAGE_MARGIN}\" w:right=\"{PAGE_MARGIN}\" w:bottom=\"{PAGE_MARGIN}\" \
         w:left=\"{PAGE_MARGIN}\" w:header=\"720\" w:footer=\"720\" w:gutter=\"0\"/></w:sectPr>"
    )
}

/// Run content for `text`; embedded newlines become line breaks.
fn run_text(text: &str) -> String {
    let mut out = String::new();
    for (index, line) in text.split('\n').enumerate() {
        if index > 0 {
            out.push_str("<w:br/>");
        }
        out.push_str("<w:t xml:space=\"preserve\">");
        out.push_str(&xml_text(line));
        out.push_str("</w:t>");
    }
    out
}

/// Escape `text` for XML, dropping characters XML 1.0 cannot carry.
fn xml_text(text: &str) -> String {
    let cleaned: String = text.chars().filter(|&c| is_xml_char(c)).collect();
    escape(cleaned.as_str()).into_owned()
}

fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Table;
    use crate::output::IndexDocument;
    use crate::query::SortOptions;
    use std::io::Read;
    use tempfile::tempdir;
    use zip::ZipArchive;

    fn document_xml(bytes: Vec<u8>) -> String {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut xml = String::new();
        archive
            .by_name("word/document.xml")
            .unwrap()
            .read_to_string(&mut xml)
            .unwrap();
        xml
    }

    #[test]
    fn test_archive_has_required_parts() {
        let bytes = DocxRenderer::new().finish().unwrap();
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert!(archive.by_name("[Content_Types].xml").is_ok());
        assert!(archive.by_name("_rels/.rels").is_ok());
        assert!(archive.by_name("word/document.xml").is_ok());
    }

    #[test]
    fn test_landscape_page() {
        let xml = document_xml(DocxRenderer::new().finish().unwrap());
        assert!(xml.contains("w:orient=\"landscape\""));
        assert!(xml.contains("w:w=\"15840\" w:h=\"12240\""));
    }

    #[test]
    fn test_header_and_shaded_rows() {
        let mut renderer = DocxRenderer::new();
        renderer
            .start_table(&["Topic".to_string(), "Page".to_string()])
            .unwrap();
        renderer
            .add_row(&["Loops".to_string(), "12".to_string()], false)
            .unwrap();
        renderer
            .add_row(&["Maps".to_string(), "3".to_string()], true)
            .unwrap();
        let xml = document_xml(renderer.finish().unwrap());

        assert_eq!(xml.matches("<w:tbl>").count(), 1);
        assert_eq!(xml.matches("</w:tbl>").count(), 1);
        assert_eq!(xml.matches("</w:tr>").count(), 3);
        assert_eq!(xml.matches("w:fill=\"D3D3D3\"").count(), 2);
        assert_eq!(xml.matches("w:fill=\"E0E0E0\"").count(), 2);
        assert!(xml.contains("<w:tblHeader/>"));
    }

    #[test]
    fn test_text_is_escaped_and_split() {
        let mut renderer = DocxRenderer::new();
        renderer.add_title("Q&A <Index>").unwrap();
        renderer.start_table(&["Topic".to_string()]).unwrap();
        renderer
            .add_row(&["line one\nline two\u{0B}".to_string()], false)
            .unwrap();
        let xml = document_xml(renderer.finish().unwrap());

        assert!(xml.contains("Q&amp;A &lt;Index&gt;"));
        assert!(xml.contains("line one</w:t><w:br/><w:t xml:space=\"preserve\">line two</w:t>"));
        assert!(!xml.contains('\u{0B}'));
    }

    #[test]
    fn test_each_section_gets_heading_and_table() {
        let table = Table::from_records(
            ["Topic", "Page"],
            [vec!["apple", "1"], vec!["banana", "2"], vec!["avocado", "3"]],
        );
        let doc =
            IndexDocument::from_table(&table, Some("Fruit"), None, &SortOptions::new()).unwrap();

        let mut renderer = DocxRenderer::new();
        doc.render(&mut renderer).unwrap();
        let xml = document_xml(renderer.finish().unwrap());

        assert_eq!(xml.matches("<w:tbl>").count(), 2);
        assert_eq!(xml.matches("<w:outlineLvl w:val=\"0\"/>").count(), 2);
        assert!(xml.contains("<w:sz w:val=\"60\"/>"));
        let a = xml.find(">a</w:t>").unwrap();
        let b = xml.find(">b</w:t>").unwrap();
        assert!(a < b);
    }

    #[test]
    fn test_row_without_table_opens_one() {
        let mut renderer = DocxRenderer::new();
        renderer.add_row(&["x".to_string()], false).unwrap();
        let xml = document_xml(renderer.finish().unwrap());
        assert_eq!(xml.matches("<w:tbl>").count(), 1);
        assert!(!xml.contains("<w:tblHeader/>"));
    }

    #[test]
    fn test_write_to_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("docs").join("index.docx");

        let mut renderer = DocxRenderer::new();
        renderer.add_title("Index").unwrap();
        renderer.write_to(&path).unwrap();

        assert!(path.is_file());
    }
}
