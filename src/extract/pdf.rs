//! PDF text backend
//!
//! Pure Rust page-level text extraction via pdf-extract. Wrapped in
//! catch_unwind because the pdf_extract crate (and its cff-parser
//! dependency) can panic on certain fonts/glyphs; a panic is reported as
//! an extraction failure, never propagated.

use super::backends::PaginatedDocExtractor;

pub struct PdfTextBackend;

impl PdfTextBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PdfTextBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl PaginatedDocExtractor for PdfTextBackend {
    fn page_texts(&self, bytes: &[u8]) -> Result<Vec<String>, String> {
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(bytes)
        }));

        match result {
            Ok(Ok(pages)) => {
                tracing::debug!("[PdfBackend] Extracted {} pages", pages.len());
                Ok(pages)
            }
            Ok(Err(e)) => {
                tracing::warn!("[PdfBackend] PDF extraction failed: {}", e);
                Err(format!("PDF extraction failed: {}", e))
            }
            Err(_panic) => {
                tracing::error!("[PdfBackend] PDF extraction panicked - likely malformed font/glyph");
                Err("PDF extraction panicked - likely contains malformed fonts".to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_bytes_fail_cleanly() {
        let backend = PdfTextBackend::new();
        let result = backend.page_texts(b"this is definitely not a pdf");
        assert!(result.is_err());
    }

    #[test]
    fn test_backend_reports_available() {
        let backend = PdfTextBackend::new();
        assert!(backend.is_available());
    }
}
