//! Model transport
//!
//! The remote generative service is an opaque capability behind the
//! `ModelTransport` trait: submit one structured request for one model id,
//! receive the raw response text or a raw error message. The fallback loop
//! in the orchestrator is the only caller, and tests swap in mock
//! transports that fail N times then succeed.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use super::prompts::SYSTEM_INSTRUCTION;
use super::schema::response_schema;

/// Payload for one analysis attempt. Identical across every model in the
/// fallback chain: deterministic decoding, strict JSON output contract.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub contents: RequestContents,
    pub system_instruction: &'static str,
    /// Fixed at 0 for all attempts (deterministic decoding requested)
    pub temperature: f32,
    pub response_schema: serde_json::Value,
}

#[derive(Debug, Clone)]
pub enum RequestContents {
    /// Prompt and document concatenated as a single text block
    Text(String),
    /// Prompt as one part, inline image as a second part
    Multipart {
        text: String,
        mime_type: String,
        data: String,
    },
}

impl AnalysisRequest {
    pub fn new(contents: RequestContents) -> Self {
        Self {
            contents,
            system_instruction: SYSTEM_INSTRUCTION,
            temperature: 0.0,
            response_schema: response_schema(),
        }
    }
}

/// Submit one request to one model; at most one billed call per invocation
#[async_trait]
pub trait ModelTransport: Send + Sync {
    /// Returns the raw response text payload, or the raw error message
    /// (which may be a JSON error body) for the classifier to sniff.
    async fn generate(&self, model_id: &str, request: &AnalysisRequest) -> Result<String, String>;
}

/// Gemini REST client configuration
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            timeout_secs: 120,
        }
    }
}

impl GeminiConfig {
    /// Read the API key from the environment (dotenvy loads .env at startup)
    pub fn from_env() -> Result<Self, String> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("GOOGLE_API_KEY"))
            .map_err(|_| "No Gemini API key found (GEMINI_API_KEY or GOOGLE_API_KEY)")?;
        Ok(Self {
            api_key,
            ..Self::default()
        })
    }
}

/// reqwest-backed transport for the Gemini generateContent endpoint
pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, String> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| format!("Failed to create HTTP client: {}", e))?;
        Ok(Self { client, config })
    }

    fn build_body(request: &AnalysisRequest) -> serde_json::Value {
        let contents = match &request.contents {
            RequestContents::Text(text) => json!([{ "parts": [{ "text": text }] }]),
            RequestContents::Multipart {
                text,
                mime_type,
                data,
            } => json!([{
                "parts": [
                    { "text": text },
                    { "inlineData": { "mimeType": mime_type, "data": data } }
                ]
            }]),
        };

        json!({
            "contents": contents,
            "systemInstruction": { "parts": [{ "text": request.system_instruction }] },
            "generationConfig": {
                "temperature": request.temperature,
                "responseMimeType": "application/json",
                "responseSchema": request.response_schema,
            }
        })
    }
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[async_trait]
impl ModelTransport for GeminiClient {
    async fn generate(&self, model_id: &str, request: &AnalysisRequest) -> Result<String, String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url, model_id
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&Self::build_body(request))
            .send()
            .await
            .map_err(|e| format!("network error: {}", e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            // JSON error bodies pass through verbatim so the classifier
            // can unwrap error.message and any retry-delay hint
            if body.trim_start().starts_with('{') {
                return Err(body);
            }
            return Err(format!("API error ({}): {}", status, body));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| format!("Failed to parse response envelope: {}", e))?;

        parsed
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .and_then(|p| p.text.clone())
            .ok_or_else(|| "No response content from model".to_string())
    }
}
