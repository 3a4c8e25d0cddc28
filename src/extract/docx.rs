//! DOCX text backend
//!
//! Raw text extraction via docx-rs. Walks the document body collecting
//! run text from paragraphs, hyperlinks, and table cells; all formatting
//! is discarded.

use super::backends::StructuredDocExtractor;

pub struct DocxTextBackend;

impl DocxTextBackend {
    pub fn new() -> Self {
        Self
    }

    fn collect_child_text(element: &docx_rs::DocumentChild, output: &mut String) {
        match element {
            docx_rs::DocumentChild::Paragraph(para) => {
                for child in &para.children {
                    match child {
                        docx_rs::ParagraphChild::Run(run) => {
                            Self::collect_run_text(run, output);
                        }
                        docx_rs::ParagraphChild::Hyperlink(link) => {
                            for link_child in &link.children {
                                if let docx_rs::ParagraphChild::Run(run) = link_child {
                                    Self::collect_run_text(run, output);
                                }
                            }
                        }
                        _ => {}
                    }
                }
                output.push('\n');
            }
            docx_rs::DocumentChild::Table(table) => {
                for row in &table.rows {
                    let docx_rs::TableChild::TableRow(tr) = row;
                    for cell in &tr.cells {
                        let docx_rs::TableRowChild::TableCell(tc) = cell;
                        for child in &tc.children {
                            if let docx_rs::TableCellContent::Paragraph(para) = child {
                                for p_child in &para.children {
                                    if let docx_rs::ParagraphChild::Run(run) = p_child {
                                        Self::collect_run_text(run, output);
                                    }
                                }
                                output.push(' ');
                            }
                        }
                    }
                    output.push('\n');
                }
            }
            _ => {}
        }
    }

    fn collect_run_text(run: &docx_rs::Run, output: &mut String) {
        for run_child in &run.children {
            if let docx_rs::RunChild::Text(text) = run_child {
                output.push_str(&text.text);
            }
        }
    }
}

impl Default for DocxTextBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl StructuredDocExtractor for DocxTextBackend {
    fn raw_text(&self, bytes: &[u8]) -> Result<String, String> {
        let doc = docx_rs::read_docx(bytes).map_err(|e| format!("Failed to parse DOCX: {}", e))?;

        let mut text = String::new();
        for child in doc.document.children {
            Self::collect_child_text(&child, &mut text);
        }

        tracing::debug!("[DocxBackend] Extracted {} chars", text.len());
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::{Docx, Paragraph, Run};
    use std::io::Cursor;

    fn build_docx(lines: &[&str]) -> Vec<u8> {
        let mut docx = Docx::new();
        for line in lines {
            docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*line)));
        }
        let mut buffer = Cursor::new(Vec::new());
        docx.build().pack(&mut buffer).unwrap();
        buffer.into_inner()
    }

    #[test]
    fn test_extracts_paragraph_text() {
        let bytes = build_docx(&["Jane Doe", "Senior Software Engineer"]);
        let backend = DocxTextBackend::new();
        let text = backend.raw_text(&bytes).unwrap();
        assert!(text.contains("Jane Doe"));
        assert!(text.contains("Senior Software Engineer"));
    }

    #[test]
    fn test_garbage_bytes_fail_cleanly() {
        let backend = DocxTextBackend::new();
        assert!(backend.raw_text(b"not a zip archive").is_err());
    }
}
