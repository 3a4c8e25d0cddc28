//! resumelens: resume ingestion and AI review pipeline
//!
//! Converts an arbitrary user-supplied document (PDF, DOCX, TXT, or image)
//! into a normalized payload, submits it to a schema-constrained generative
//! model with sequential fallback across model identifiers, and classifies
//! any failure into a stable, user-actionable taxonomy with server-advised
//! retry delays.

pub mod analysis;
pub mod classify;
pub mod countdown;
pub mod error;
pub mod extract;

pub use analysis::orchestrator::{AnalysisOrchestrator, MODEL_FALLBACK_CHAIN};
pub use analysis::transport::{GeminiClient, GeminiConfig, ModelTransport};
pub use analysis::types::ResumeAnalysis;
pub use analysis::Analyzer;
pub use classify::{classify, classify_raw, ClassifiedError, ErrorKind};
pub use countdown::{CountdownState, RetryCountdown};
pub use error::AnalysisError;
pub use extract::{ContentExtractor, FileContent, SourceFile};
