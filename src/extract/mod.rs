//! Content extraction
//!
//! Converts an arbitrary user-supplied file into a normalized payload for
//! analysis. Dispatch is by extension/MIME family:
//!
//! ```text
//! image (jpg/jpeg/png/webp/heic/heif, or image/* MIME)  -> base64 inline payload
//! txt                                                   -> verbatim text
//! pdf                                                   -> paginated backend, page order preserved
//! docx                                                  -> structured backend, raw text
//! anything else                                         -> UnsupportedFormat
//! ```
//!
//! Image dispatch takes precedence over extension-based text dispatch.
//! Extraction reads the input once and never retries; failures are
//! terminal for that call.

pub mod backends;
pub mod docx;
pub mod image;
pub mod pdf;

use std::path::Path;

use crate::error::AnalysisError;
use backends::{PaginatedDocExtractor, StructuredDocExtractor};
use docx::DocxTextBackend;
use pdf::PdfTextBackend;

/// Extensions treated as images regardless of declared MIME
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "heic", "heif"];

/// An opaque byte source handed in by the caller
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Original filename (used for extension dispatch)
    pub name: String,
    /// Declared MIME type; may be empty
    pub mime: String,
    /// Raw file bytes
    pub bytes: Vec<u8>,
}

impl SourceFile {
    /// Build a source from a path on disk, guessing the MIME from the name
    pub async fn from_path(path: &Path) -> Result<Self, String> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mime = mime_guess::from_path(path)
            .first()
            .map(|m| m.essence_str().to_string())
            .unwrap_or_default();
        Ok(Self { name, mime, bytes })
    }

    fn extension(&self) -> Option<String> {
        Path::new(&self.name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
    }
}

/// Normalized payload produced from a single source; request-scoped,
/// consumed once. Exactly one variant is ever populated.
#[derive(Debug, Clone, PartialEq)]
pub enum FileContent {
    Text { content: String },
    Image { mime_type: String, data: String },
}

/// Format-dispatching extractor with injected per-family backends
pub struct ContentExtractor {
    paginated: Option<Box<dyn PaginatedDocExtractor>>,
    structured: Option<Box<dyn StructuredDocExtractor>>,
}

impl ContentExtractor {
    /// Extractor with the default pure-Rust backends installed
    pub fn new() -> Self {
        Self {
            paginated: Some(Box::new(PdfTextBackend::new())),
            structured: Some(Box::new(DocxTextBackend::new())),
        }
    }

    /// Extractor with caller-supplied backends; `None` models a host
    /// capability that has not been initialized
    pub fn with_backends(
        paginated: Option<Box<dyn PaginatedDocExtractor>>,
        structured: Option<Box<dyn StructuredDocExtractor>>,
    ) -> Self {
        Self {
            paginated,
            structured,
        }
    }

    /// Convert a source file into normalized content
    pub fn extract(&self, source: &SourceFile) -> Result<FileContent, AnalysisError> {
        let ext = source.extension();

        // Images first: the extension set plus any declared image/* MIME
        if is_image_source(ext.as_deref(), &source.mime) {
            tracing::debug!("[Extractor] Image source: {}", source.name);
            return Ok(image::encode_image(source));
        }

        match ext.as_deref() {
            Some("txt") => Ok(FileContent::Text {
                content: String::from_utf8_lossy(&source.bytes).into_owned(),
            }),
            Some("pdf") => {
                let backend = self
                    .paginated
                    .as_ref()
                    .filter(|b| b.is_available())
                    .ok_or(AnalysisError::BackendUnavailable("PDF text extraction"))?;
                let pages = backend
                    .page_texts(&source.bytes)
                    .map_err(AnalysisError::Extraction)?;
                tracing::info!(
                    "[Extractor] PDF {}: {} pages extracted",
                    source.name,
                    pages.len()
                );
                Ok(FileContent::Text {
                    content: join_pages(&pages),
                })
            }
            Some("docx") => {
                let backend = self
                    .structured
                    .as_ref()
                    .filter(|b| b.is_available())
                    .ok_or(AnalysisError::BackendUnavailable("DOCX text extraction"))?;
                let content = backend
                    .raw_text(&source.bytes)
                    .map_err(AnalysisError::Extraction)?;
                tracing::info!(
                    "[Extractor] DOCX {}: {} chars extracted",
                    source.name,
                    content.len()
                );
                Ok(FileContent::Text { content })
            }
            other => Err(AnalysisError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

impl Default for ContentExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn is_image_source(ext: Option<&str>, mime: &str) -> bool {
    if let Some(e) = ext {
        if IMAGE_EXTENSIONS.contains(&e) {
            return true;
        }
    }
    mime.starts_with("image/")
}

/// Join page texts into one block: tokens within a page joined by a single
/// space, one newline per page, page order preserved. Downstream length
/// and validity checks depend on this monotonic concatenation.
fn join_pages(pages: &[String]) -> String {
    let mut out = String::new();
    for page in pages {
        let tokens: Vec<&str> = page.split_whitespace().collect();
        out.push_str(&tokens.join(" "));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedPages(Vec<String>);
    impl PaginatedDocExtractor for FixedPages {
        fn page_texts(&self, _bytes: &[u8]) -> Result<Vec<String>, String> {
            Ok(self.0.clone())
        }
    }

    struct FixedText(String);
    impl StructuredDocExtractor for FixedText {
        fn raw_text(&self, _bytes: &[u8]) -> Result<String, String> {
            Ok(self.0.clone())
        }
    }

    fn source(name: &str, mime: &str, bytes: &[u8]) -> SourceFile {
        SourceFile {
            name: name.to_string(),
            mime: mime.to_string(),
            bytes: bytes.to_vec(),
        }
    }

    #[test]
    fn test_join_pages_preserves_order_with_newlines() {
        let pages = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        assert_eq!(join_pages(&pages), "A\nB\nC\n");
    }

    #[test]
    fn test_join_pages_collapses_intra_page_whitespace() {
        let pages = vec!["Jane   Doe\n Engineer".to_string()];
        assert_eq!(join_pages(&pages), "Jane Doe Engineer\n");
    }

    #[test]
    fn test_txt_is_read_verbatim() {
        let extractor = ContentExtractor::new();
        let result = extractor
            .extract(&source("resume.txt", "text/plain", b"hello  world\n"))
            .unwrap();
        assert_eq!(
            result,
            FileContent::Text {
                content: "hello  world\n".to_string()
            }
        );
    }

    #[test]
    fn test_pdf_dispatch_uses_paginated_backend() {
        let pages = FixedPages(vec!["page one".to_string(), "page two".to_string()]);
        let extractor = ContentExtractor::with_backends(Some(Box::new(pages)), None);
        let result = extractor
            .extract(&source("resume.pdf", "application/pdf", b"%PDF"))
            .unwrap();
        assert_eq!(
            result,
            FileContent::Text {
                content: "page one\npage two\n".to_string()
            }
        );
    }

    #[test]
    fn test_docx_dispatch_uses_structured_backend() {
        let extractor =
            ContentExtractor::with_backends(None, Some(Box::new(FixedText("body".to_string()))));
        let result = extractor.extract(&source("resume.docx", "", b"PK")).unwrap();
        assert_eq!(
            result,
            FileContent::Text {
                content: "body".to_string()
            }
        );
    }

    #[test]
    fn test_missing_backend_is_distinct_failure() {
        let extractor = ContentExtractor::with_backends(None, None);
        let err = extractor
            .extract(&source("resume.pdf", "application/pdf", b"%PDF"))
            .unwrap_err();
        assert!(matches!(err, AnalysisError::BackendUnavailable(_)));
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let extractor = ContentExtractor::new();
        let err = extractor
            .extract(&source("malware.exe", "", b"MZ"))
            .unwrap_err();
        assert!(matches!(err, AnalysisError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_image_extension_beats_text_dispatch() {
        let extractor = ContentExtractor::new();
        let result = extractor
            .extract(&source("photo.HEIC", "", &[0x00, 0x01]))
            .unwrap();
        assert!(matches!(result, FileContent::Image { .. }));
    }

    #[tokio::test]
    async fn test_source_from_path_guesses_mime() {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::with_suffix(".txt").unwrap();
        write!(file, "plain text resume").unwrap();

        let source = SourceFile::from_path(file.path()).await.unwrap();
        assert_eq!(source.mime, "text/plain");
        assert!(source.name.ends_with(".txt"));
        assert_eq!(source.bytes, b"plain text resume");
    }

    #[test]
    fn test_image_mime_prefix_dispatches_without_known_extension() {
        let extractor = ContentExtractor::new();
        let result = extractor
            .extract(&source("upload.bin", "image/png", &[0x89]))
            .unwrap();
        match result {
            FileContent::Image { mime_type, .. } => assert_eq!(mime_type, "image/png"),
            other => panic!("expected image content, got {:?}", other),
        }
    }
}
