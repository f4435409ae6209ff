//! Multi-format text extraction
//!
//! Extraction is dispatched through a registry keyed by normalized file
//! extension. Each format implements the single [`FormatHandler`] contract,
//! so adding a format means registering one handler rather than extending a
//! central match. Files with an unregistered extension extract to an empty
//! string: they are silently skipped, not rejected.

use calamine::Reader;
use std::collections::HashMap;

use crate::error::{Error, Result};

/// A single-format text extractor: raw file bytes in, flat text out.
pub trait FormatHandler: Send + Sync {
    /// Extract the file's textual content as a single string.
    fn extract(&self, data: &[u8]) -> Result<String>;
}

/// Extension-dispatched extractor registry
pub struct Extractor {
    handlers: HashMap<String, Box<dyn FormatHandler>>,
}

impl Extractor {
    /// Registry with the default formats: plain text, PDF, Word, and
    /// spreadsheets (`.xlsx`/`.xls`).
    pub fn new() -> Self {
        let mut extractor = Self {
            handlers: HashMap::new(),
        };

        extractor.register("txt", PlainText);
        extractor.register("pdf", Pdf);
        extractor.register("docx", Docx);
        extractor.register("xlsx", Spreadsheet);
        extractor.register("xls", Spreadsheet);
        extractor
    }

    /// Register a handler for an extension (normalized to lowercase).
    pub fn register(&mut self, extension: &str, handler: impl FormatHandler + 'static) {
        self.handlers
            .insert(extension.to_lowercase(), Box::new(handler));
    }

    /// Extract text from a file, dispatching on the filename's extension.
    /// Unrecognized extensions yield an empty string without an error.
    pub fn extract(&self, filename: &str, data: &[u8]) -> Result<String> {
        let extension = filename
            .rsplit('.')
            .next()
            .unwrap_or_default()
            .to_lowercase();

        match self.handlers.get(&extension) {
            Some(handler) => handler.extract(data),
            None => {
                tracing::debug!("No handler for extension '{}', skipping", extension);
                Ok(String::new())
            }
        }
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Plain text: lossy UTF-8 decode of the raw bytes
struct PlainText;

impl FormatHandler for PlainText {
    fn extract(&self, data: &[u8]) -> Result<String> {
        Ok(String::from_utf8_lossy(data).to_string())
    }
}

/// PDF: pages concatenated in order
struct Pdf;

impl FormatHandler for Pdf {
    fn extract(&self, data: &[u8]) -> Result<String> {
        pdf_extract::extract_text_from_mem(data)
            .map_err(|e| Error::extract("document.pdf", e.to_string()))
    }
}

/// Word document: paragraph runs concatenated, paragraphs newline-separated
struct Docx;

impl FormatHandler for Docx {
    fn extract(&self, data: &[u8]) -> Result<String> {
        let doc = docx_rs::read_docx(data)
            .map_err(|e| Error::extract("document.docx", e.to_string()))?;

        let mut content = String::new();
        for child in doc.document.children {
            if let docx_rs::DocumentChild::Paragraph(p) = child {
                for child in p.children {
                    if let docx_rs::ParagraphChild::Run(run) = child {
                        for child in run.children {
                            if let docx_rs::RunChild::Text(t) = child {
                                content.push_str(&t.text);
                            }
                        }
                    }
                }
                content.push('\n');
            }
        }

        Ok(content)
    }
}

/// Spreadsheet: per sheet, non-empty cells joined with " | " per row, rows
/// newline-separated, sheets concatenated in workbook order
struct Spreadsheet;

impl FormatHandler for Spreadsheet {
    fn extract(&self, data: &[u8]) -> Result<String> {
        let cursor = std::io::Cursor::new(data);
        let mut workbook = calamine::open_workbook_auto_from_rs(cursor)
            .map_err(|e| Error::extract("spreadsheet", e.to_string()))?;

        let mut rows = Vec::new();
        for sheet_name in workbook.sheet_names().to_vec() {
            if let Ok(range) = workbook.worksheet_range(&sheet_name) {
                for row in range.rows() {
                    let cells: Vec<String> = row
                        .iter()
                        .filter_map(|cell| match cell {
                            calamine::Data::Empty => None,
                            calamine::Data::String(s) => Some(s.clone()),
                            calamine::Data::Float(f) => Some(f.to_string()),
                            calamine::Data::Int(i) => Some(i.to_string()),
                            calamine::Data::Bool(b) => Some(b.to_string()),
                            calamine::Data::DateTime(dt) => Some(dt.to_string()),
                            _ => None,
                        })
                        .collect();

                    if !cells.is_empty() {
                        rows.push(cells.join(" | "));
                    }
                }
            }
        }

        Ok(rows.join("\n"))
    }
}
