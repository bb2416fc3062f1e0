//! DOCX extraction
//!
//!     A `.docx` file is a ZIP container; the body lives in `word/document.xml`. Extraction walks
//!     that XML once and emits the body as [`Node`]s in document order:
//!
//!         - `w:p` outside tables becomes a paragraph. `w:br` / `w:cr` become `\n` and `w:tab`
//!           becomes `\t`.
//!         - `w:tbl` becomes a table; each `w:tr` a row and each `w:tc` a cell. Paragraphs
//!           inside a cell are joined with `\n`. Nested tables are flattened into the text of
//!           the enclosing cell.
//!
//!     Only text inside `w:t` is kept, so field instructions and drawing metadata never leak
//!     into question text.

use crate::quiz::document::{Node, Table};
use crate::quiz::error::ParseError;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Cursor, Read};
use zip::ZipArchive;

const DOCUMENT_XML: &str = "word/document.xml";

/// Extract the body of a `.docx` file.
pub fn extract_docx(bytes: &[u8]) -> Result<Vec<Node>, ParseError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ParseError::ExtractionFailure(format!("not a valid .docx archive: {e}")))?;

    let xml = {
        let mut document = archive
            .by_name(DOCUMENT_XML)
            .map_err(|e| ParseError::ExtractionFailure(format!("missing {DOCUMENT_XML}: {e}")))?;
        let mut content = String::new();
        document
            .read_to_string(&mut content)
            .map_err(|e| ParseError::ExtractionFailure(format!("unreadable {DOCUMENT_XML}: {e}")))?;
        content
    };

    let nodes = walk_body(&xml)?;
    tracing::debug!(nodes = nodes.len(), "extracted docx body");
    Ok(nodes)
}

#[derive(Default)]
struct BodyWalker {
    nodes: Vec<Node>,
    /// Nesting depth of `w:tbl`
    table_depth: usize,
    rows: Vec<Vec<String>>,
    row: Vec<String>,
    cell: String,
    paragraph: String,
    in_text: bool,
}

impl BodyWalker {
    fn start(&mut self, name: &[u8]) {
        match name {
            b"w:tbl" => {
                self.table_depth += 1;
                if self.table_depth == 1 {
                    self.rows.clear();
                }
            }
            b"w:tr" if self.table_depth == 1 => self.row.clear(),
            b"w:tc" if self.table_depth == 1 => self.cell.clear(),
            b"w:p" => self.paragraph.clear(),
            b"w:t" => self.in_text = true,
            _ => {}
        }
    }

    fn end(&mut self, name: &[u8]) {
        match name {
            b"w:tbl" => {
                self.table_depth = self.table_depth.saturating_sub(1);
                if self.table_depth == 0 {
                    let rows = std::mem::take(&mut self.rows);
                    self.nodes.push(Node::Table(Table::new(rows)));
                }
            }
            b"w:tr" if self.table_depth == 1 => {
                let row = std::mem::take(&mut self.row);
                self.rows.push(row);
            }
            b"w:tc" if self.table_depth == 1 => {
                let cell = std::mem::take(&mut self.cell);
                self.row.push(cell.trim().to_string());
            }
            b"w:p" => self.end_paragraph(),
            b"w:t" => self.in_text = false,
            _ => {}
        }
    }

    fn empty(&mut self, name: &[u8]) {
        match name {
            b"w:p" => {
                self.paragraph.clear();
                self.end_paragraph();
            }
            b"w:br" | b"w:cr" => self.paragraph.push('\n'),
            b"w:tab" => self.paragraph.push('\t'),
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        if self.in_text {
            self.paragraph.push_str(text);
        }
    }

    fn end_paragraph(&mut self) {
        let paragraph = std::mem::take(&mut self.paragraph);
        if self.table_depth == 0 {
            self.nodes.push(Node::Paragraph(paragraph.trim().to_string()));
            return;
        }
        let paragraph = paragraph.trim();
        if paragraph.is_empty() {
            return;
        }
        if !self.cell.is_empty() {
            self.cell.push('\n');
        }
        self.cell.push_str(paragraph);
    }
}

fn walk_body(xml: &str) -> Result<Vec<Node>, ParseError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(false);

    let mut walker = BodyWalker::default();
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => walker.start(e.name().as_ref()),
            Ok(Event::End(e)) => walker.end(e.name().as_ref()),
            Ok(Event::Empty(e)) => walker.empty(e.name().as_ref()),
            Ok(Event::Text(e)) => {
                let text = e.unescape().map_err(|err| {
                    ParseError::ExtractionFailure(format!("bad text in {DOCUMENT_XML}: {err}"))
                })?;
                walker.text(&text);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ParseError::ExtractionFailure(format!(
                    "malformed {DOCUMENT_XML} at byte {}: {e}",
                    reader.buffer_position()
                )))
            }
            Ok(_) => {}
        }
        buf.clear();
    }
    Ok(walker.nodes)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    /// Wrap body XML into a minimal `.docx` archive.
    pub(crate) fn docx_with_body(body: &str) -> Vec<u8> {
        let xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
        );
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file(DOCUMENT_XML, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    fn para(text: &str) -> String {
        format!("<w:p><w:r><w:t>{text}</w:t></w:r></w:p>")
    }

    #[test]
    fn extracts_paragraphs_and_tables_in_order() {
        let body = format!(
            "{}<w:tbl><w:tr><w:tc>{}</w:tc><w:tc>{}</w:tc></w:tr></w:tbl>{}",
            para("Intro"),
            para("1"),
            para("+"),
            para("After &amp; more")
        );
        let nodes = extract_docx(&docx_with_body(&body)).unwrap();
        assert_eq!(
            nodes,
            vec![
                Node::paragraph("Intro"),
                Node::Table(Table::from_rows([["1", "+"]])),
                Node::paragraph("After & more"),
            ]
        );
    }

    #[test]
    fn joins_runs_and_breaks() {
        let body = r#"<w:p><w:r><w:t>#Que</w:t></w:r><w:r><w:t xml:space="preserve">stion </w:t></w:r><w:r><w:br/><w:t>+yes</w:t></w:r></w:p><w:p/>"#;
        let nodes = extract_docx(&docx_with_body(body)).unwrap();
        assert_eq!(nodes, vec![Node::paragraph("#Question \n+yes"), Node::paragraph("")]);
    }

    #[test]
    fn cell_paragraphs_are_joined() {
        let body = format!(
            "<w:tbl><w:tr><w:tc>{}{}</w:tc></w:tr></w:tbl>",
            para("first"),
            para("second")
        );
        let nodes = extract_docx(&docx_with_body(&body)).unwrap();
        assert_eq!(nodes, vec![Node::Table(Table::from_rows([["first\nsecond"]]))]);
    }

    #[test]
    fn ignores_field_instructions() {
        let body = r#"<w:p><w:r><w:instrText>PAGE</w:instrText></w:r><w:r><w:t>visible</w:t></w:r></w:p>"#;
        let nodes = extract_docx(&docx_with_body(body)).unwrap();
        assert_eq!(nodes, vec![Node::paragraph("visible")]);
    }

    #[test]
    fn rejects_non_zip_input() {
        let err = extract_docx(b"plain text, not a zip").unwrap_err();
        assert!(matches!(err, ParseError::ExtractionFailure(_)));
    }

    #[test]
    fn rejects_archive_without_body() {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("word/styles.xml", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"<w:styles/>").unwrap();
        let bytes = writer.finish().unwrap().into_inner();

        let err = extract_docx(&bytes).unwrap_err();
        assert!(err.to_string().contains("word/document.xml"));
    }
}
