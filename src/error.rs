//! Pipeline error taxonomy
//!
//! Every failure path in the analysis pipeline resolves to one of these
//! variants. Extraction and validation failures are raised before any
//! remote call is made; `ModelFallbackExhausted` is raised only after
//! every configured model has been tried.

use thiserror::Error;

/// Minimum number of characters a text document must contain before it
/// is sent for analysis. Shorter inputs cannot structurally be a resume
/// and would waste a billed API call.
pub const MIN_TEXT_LENGTH: usize = 200;

#[derive(Debug, Error)]
pub enum AnalysisError {
    /// File extension / MIME type matches no recognized format family
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// A format-specific extraction backend has not been initialized
    #[error("{0} backend is not available")]
    BackendUnavailable(&'static str),

    /// Extraction ran but failed (corrupt file, malformed fonts, ...)
    #[error("extraction failed: {0}")]
    Extraction(String),

    /// Text content is below [`MIN_TEXT_LENGTH`]; raised before any remote call
    #[error("document text too short: {length} chars (minimum {MIN_TEXT_LENGTH})")]
    TooShort { length: usize },

    /// The model answered successfully but flagged the document as not a resume
    #[error("document is not a valid resume")]
    InvalidDocument,

    /// Every model in the fallback chain failed; carries the last attempt's
    /// raw error message (earlier attempts are not retained)
    #[error("all models failed; last error: {0}")]
    ModelFallbackExhausted(String),
}
