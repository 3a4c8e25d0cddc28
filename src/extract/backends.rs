//! Format-extraction capability traits
//!
//! Document backends are host-provided capabilities that may or may not be
//! initialized when the pipeline runs. Each format family gets its own
//! trait with an explicit availability query so a missing backend surfaces
//! as a distinct failure instead of a crash.

/// Paginated documents (PDF-like): page count plus per-page text tokens.
pub trait PaginatedDocExtractor: Send + Sync {
    /// Whether the backing library has been initialized by the host
    fn is_available(&self) -> bool {
        true
    }

    /// Extract per-page text, page order preserved starting at page 1
    fn page_texts(&self, bytes: &[u8]) -> Result<Vec<String>, String>;
}

/// Structured documents (DOCX-like): raw text extraction, formatting discarded.
pub trait StructuredDocExtractor: Send + Sync {
    fn is_available(&self) -> bool {
        true
    }

    /// Extract the document's text content unmodified
    fn raw_text(&self, bytes: &[u8]) -> Result<String, String>;
}
