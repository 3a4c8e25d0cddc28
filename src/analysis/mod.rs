//! Resume analysis pipeline
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │  1. EXTRACT: format dispatch -> normalized FileContent         │
//! │  2. GATE: text below 200 chars fails before any remote call    │
//! │  3. ORCHESTRATE: sequential model fallback, schema-constrained │
//! │  4. SENTINEL: score 0 + INVALID_RESUME -> validation failure   │
//! │  5. CLASSIFY: one classified error per failed run              │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Exactly one pipeline is in flight per user action; every stage is
//! cooperative (no parallel workers) and nothing here is fatal to the
//! process: each failure path returns a classified result to the caller.

pub mod orchestrator;
pub mod prompts;
pub mod schema;
pub mod transport;
pub mod types;

use std::path::Path;
use std::sync::Arc;

use crate::classify::{classify, ClassifiedError};
use crate::error::{AnalysisError, MIN_TEXT_LENGTH};
use crate::extract::{ContentExtractor, FileContent, SourceFile};
use orchestrator::AnalysisOrchestrator;
use transport::{GeminiClient, GeminiConfig, ModelTransport};
use types::ResumeAnalysis;

/// End-to-end pipeline: extraction, validation gate, model fallback,
/// top-level error classification.
pub struct Analyzer {
    extractor: ContentExtractor,
    orchestrator: AnalysisOrchestrator,
}

impl Analyzer {
    /// Analyzer over a caller-supplied transport (tests use a mock here)
    pub fn new(transport: Arc<dyn ModelTransport>) -> Self {
        Self {
            extractor: ContentExtractor::new(),
            orchestrator: AnalysisOrchestrator::new(transport),
        }
    }

    /// Analyzer backed by the Gemini API, key taken from the environment
    pub fn from_env() -> Result<Self, String> {
        let client = GeminiClient::new(GeminiConfig::from_env()?)?;
        Ok(Self::new(Arc::new(client)))
    }

    pub fn with_extractor(mut self, extractor: ContentExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Analyze a file on disk
    pub async fn analyze_file(&self, path: &Path) -> Result<ResumeAnalysis, ClassifiedError> {
        let source = SourceFile::from_path(path)
            .await
            .map_err(|e| classify(&AnalysisError::Extraction(e)))?;
        self.analyze_source(&source).await
    }

    /// Analyze an in-memory source. All failures funnel through the
    /// classifier exactly once, here.
    pub async fn analyze_source(
        &self,
        source: &SourceFile,
    ) -> Result<ResumeAnalysis, ClassifiedError> {
        self.run(source).await.map_err(|e| {
            tracing::warn!("[Analyzer] Pipeline failed for {}: {}", source.name, e);
            classify(&e)
        })
    }

    async fn run(&self, source: &SourceFile) -> Result<ResumeAnalysis, AnalysisError> {
        let content = self.extractor.extract(source)?;
        enforce_min_length(&content)?;
        self.orchestrator.analyze(&content).await
    }
}

/// Pre-submission validation gate. Applies only to text: image payloads
/// always proceed since their content length cannot be cheaply estimated.
fn enforce_min_length(content: &FileContent) -> Result<(), AnalysisError> {
    if let FileContent::Text { content } = content {
        let length = content.chars().count();
        if length < MIN_TEXT_LENGTH {
            tracing::info!(
                "[Analyzer] Rejecting short text: {} chars < {}",
                length,
                MIN_TEXT_LENGTH
            );
            return Err(AnalysisError::TooShort { length });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::ErrorKind;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use transport::AnalysisRequest;

    /// Always succeeds; counts how many remote calls were made
    struct CountingTransport {
        calls: AtomicUsize,
    }

    impl CountingTransport {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ModelTransport for CountingTransport {
        async fn generate(
            &self,
            _model_id: &str,
            _request: &AnalysisRequest,
        ) -> Result<String, String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(types::sample_analysis_json(8.0, "Strong resume"))
        }
    }

    fn text_source(content: &str) -> SourceFile {
        SourceFile {
            name: "resume.txt".to_string(),
            mime: "text/plain".to_string(),
            bytes: content.as_bytes().to_vec(),
        }
    }

    #[tokio::test]
    async fn test_short_text_never_reaches_the_model() {
        let transport = Arc::new(CountingTransport::new());
        let analyzer = Analyzer::new(Arc::clone(&transport) as Arc<dyn ModelTransport>);

        let result = analyzer.analyze_source(&text_source("too short")).await;
        assert_eq!(result.unwrap_err().kind, ErrorKind::TooShort);
        assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_long_text_flows_through_to_a_result() {
        let transport = Arc::new(CountingTransport::new());
        let analyzer = Analyzer::new(Arc::clone(&transport) as Arc<dyn ModelTransport>);

        let body = "Jane Doe, Senior Software Engineer. ".repeat(10);
        let analysis = analyzer.analyze_source(&text_source(&body)).await.unwrap();
        assert_eq!(analysis.overall_score, 8.0);
        assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_image_source_skips_the_length_gate() {
        let transport = Arc::new(CountingTransport::new());
        let analyzer = Analyzer::new(Arc::clone(&transport) as Arc<dyn ModelTransport>);

        let source = SourceFile {
            name: "resume.png".to_string(),
            mime: "image/png".to_string(),
            bytes: vec![0x89, 0x50],
        };
        assert!(analyzer.analyze_source(&source).await.is_ok());
        assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unsupported_format_is_classified_without_remote_call() {
        let transport = Arc::new(CountingTransport::new());
        let analyzer = Analyzer::new(Arc::clone(&transport) as Arc<dyn ModelTransport>);

        let source = SourceFile {
            name: "talk.pptx".to_string(),
            mime: String::new(),
            bytes: vec![0x50, 0x4B],
        };
        let result = analyzer.analyze_source(&source).await;
        assert_eq!(result.unwrap_err().kind, ErrorKind::UnsupportedFormat);
        assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_gate_boundary_is_exactly_200_chars() {
        let at_limit = FileContent::Text {
            content: "x".repeat(200),
        };
        assert!(enforce_min_length(&at_limit).is_ok());

        let below = FileContent::Text {
            content: "x".repeat(199),
        };
        assert!(matches!(
            enforce_min_length(&below),
            Err(AnalysisError::TooShort { length: 199 })
        ));
    }
}
