//! Analysis orchestrator
//!
//! Owns the ordered model fallback chain and the retry-across-models loop.
//! Models are tried strictly sequentially, never in parallel: at most one
//! successful billed call per analysis, and the preference order is
//! deterministic. Only the last attempt's error is retained when the
//! whole chain fails.

use std::sync::Arc;

use super::prompts::ANALYSIS_PROMPT;
use super::transport::{AnalysisRequest, ModelTransport, RequestContents};
use super::types::ResumeAnalysis;
use crate::error::AnalysisError;
use crate::extract::FileContent;

/// Ordered fallback chain, most capable first
pub const MODEL_FALLBACK_CHAIN: &[&str] = &[
    "gemini-2.5-flash",
    "gemini-2.5-flash-lite",
    "gemini-2.0-flash",
];

pub struct AnalysisOrchestrator {
    transport: Arc<dyn ModelTransport>,
    models: Vec<String>,
}

impl AnalysisOrchestrator {
    pub fn new(transport: Arc<dyn ModelTransport>) -> Self {
        Self::with_models(
            transport,
            MODEL_FALLBACK_CHAIN.iter().map(|m| m.to_string()).collect(),
        )
    }

    pub fn with_models(transport: Arc<dyn ModelTransport>, models: Vec<String>) -> Self {
        Self { transport, models }
    }

    /// Run the fallback loop over normalized content.
    ///
    /// The identical request goes to each model in order; the first
    /// success stops the loop. A response that parses but matches the
    /// sentinel condition is a validation failure, never a success.
    pub async fn analyze(&self, content: &FileContent) -> Result<ResumeAnalysis, AnalysisError> {
        let request = build_request(content);
        let mut last_error = "no models configured".to_string();

        for model in &self.models {
            tracing::info!("[Orchestrator] Attempting model {}", model);
            let text = match self.transport.generate(model, &request).await {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!("[Orchestrator] Model {} failed: {}", model, e);
                    last_error = e;
                    continue;
                }
            };

            // Malformed JSON despite the schema contract counts as a
            // failure of this attempt and advances the chain
            match serde_json::from_str::<ResumeAnalysis>(&text) {
                Ok(analysis) => {
                    if analysis.is_invalid_resume() {
                        tracing::info!(
                            "[Orchestrator] Model {} flagged document as not a resume",
                            model
                        );
                        return Err(AnalysisError::InvalidDocument);
                    }
                    tracing::info!(
                        "[Orchestrator] Model {} succeeded (score {})",
                        model,
                        analysis.overall_score
                    );
                    return Ok(analysis);
                }
                Err(e) => {
                    tracing::warn!(
                        "[Orchestrator] Model {} returned malformed payload: {}",
                        model,
                        e
                    );
                    last_error = format!("Failed to parse model response: {}", e);
                }
            }
        }

        Err(AnalysisError::ModelFallbackExhausted(last_error))
    }
}

/// Build the request payload for one piece of normalized content
fn build_request(content: &FileContent) -> AnalysisRequest {
    match content {
        FileContent::Text { content } => AnalysisRequest::new(RequestContents::Text(format!(
            "{}\n\nResume content:\n{}",
            ANALYSIS_PROMPT, content
        ))),
        FileContent::Image { mime_type, data } => {
            AnalysisRequest::new(RequestContents::Multipart {
                text: ANALYSIS_PROMPT.to_string(),
                mime_type: mime_type.clone(),
                data: data.clone(),
            })
        }
    }
}
