//! Error classification
//!
//! Maps raw pipeline failures to a stable, user-facing taxonomy. Provider
//! errors arrive as unstructured text (sometimes a JSON body, sometimes a
//! transport message), so remote failures are classified by an ordered
//! rule table of substring matchers evaluated top to bottom. The order is
//! a contract: quota messages frequently carry a 503-style wrapper from
//! the transport layer, so rate-limit detection must run first.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::error::{AnalysisError, MIN_TEXT_LENGTH};

/// Maximum length of an `Unknown` user message (raw text preserved for debugging)
const MAX_UNKNOWN_MESSAGE_LEN: usize = 500;

/// Matches server-advised retry delays like "Please retry in 18.6s"
static RETRY_DELAY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)retry in (\d+(?:\.\d+)?)s").expect("valid regex"));

/// Stable failure classification surfaced to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    UnsupportedFormat,
    BackendUnavailable,
    TooShort,
    InvalidDocument,
    RateLimited,
    ServiceUnavailable,
    AuthError,
    NetworkError,
    Unknown,
}

/// One classified failure per pipeline run
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedError {
    pub kind: ErrorKind,
    pub user_message: String,
    /// Server-advised wait before retrying, when one could be extracted
    pub retry_after_secs: Option<u64>,
}

/// How a rule's markers are matched against the working message
enum Matcher {
    /// Case-insensitive substring match on any marker
    AnyOf(&'static [&'static str]),
    /// Case-sensitive substring match on any marker
    AnyOfExact(&'static [&'static str]),
}

struct Rule {
    matcher: Matcher,
    kind: ErrorKind,
    user_message: &'static str,
}

/// Priority-ordered classification table. First match wins. Auth and
/// network markers are checked last because they collide more easily
/// with unrelated text.
const RULES: &[Rule] = &[
    Rule {
        matcher: Matcher::AnyOf(&["quota", "429", "rate limit", "exceeded"]),
        kind: ErrorKind::RateLimited,
        user_message: "Too many requests. Please wait a moment and try again.",
    },
    Rule {
        matcher: Matcher::AnyOf(&["503", "unavailable", "high demand"]),
        kind: ErrorKind::ServiceUnavailable,
        user_message: "The analysis service is experiencing high demand. Please try again shortly.",
    },
    Rule {
        matcher: Matcher::AnyOfExact(&["API Key", "api_key", "401"]),
        kind: ErrorKind::AuthError,
        user_message: "The analysis service is not configured correctly. Please check the API key setup.",
    },
    Rule {
        matcher: Matcher::AnyOf(&["network", "fetch", "failed to fetch"]),
        kind: ErrorKind::NetworkError,
        user_message: "Could not reach the analysis service. Please check your connection and try again.",
    },
];

/// Classify a pipeline failure into a user-actionable result.
///
/// Typed extraction/validation variants map to fixed messages directly;
/// raw remote messages go through the sniffing table. Called exactly once
/// per failed pipeline run, at the top level.
pub fn classify(error: &AnalysisError) -> ClassifiedError {
    match error {
        AnalysisError::UnsupportedFormat(_) => fixed(
            ErrorKind::UnsupportedFormat,
            "Unsupported file format. Please upload a PDF, DOCX, TXT, or image file.",
        ),
        AnalysisError::BackendUnavailable(_) => fixed(
            ErrorKind::BackendUnavailable,
            "Document processing is still starting up. Please try again in a moment.",
        ),
        AnalysisError::TooShort { .. } => ClassifiedError {
            kind: ErrorKind::TooShort,
            user_message: format!(
                "The document is too short to analyze. Please upload a complete resume (at least {} characters of text).",
                MIN_TEXT_LENGTH
            ),
            retry_after_secs: None,
        },
        AnalysisError::InvalidDocument => fixed(
            ErrorKind::InvalidDocument,
            "This file does not appear to be a resume. Please upload a valid resume and try again.",
        ),
        AnalysisError::ModelFallbackExhausted(raw) | AnalysisError::Extraction(raw) => {
            classify_raw(raw)
        }
    }
}

/// Classify a raw error message. Pure and total: never panics, never fails.
pub fn classify_raw(raw: &str) -> ClassifiedError {
    let message = unwrap_json_message(raw);
    let retry_after_secs = extract_retry_delay(&message);

    let lowered = message.to_lowercase();
    for rule in RULES {
        let hit = match rule.matcher {
            Matcher::AnyOf(markers) => markers.iter().any(|m| lowered.contains(m)),
            Matcher::AnyOfExact(markers) => markers.iter().any(|m| message.contains(m)),
        };
        if hit {
            return ClassifiedError {
                kind: rule.kind,
                user_message: rule.user_message.to_string(),
                retry_after_secs,
            };
        }
    }

    // Unknown: keep the (post-unwrap) raw text verbatim, truncated, to aid debugging
    ClassifiedError {
        kind: ErrorKind::Unknown,
        user_message: message.chars().take(MAX_UNKNOWN_MESSAGE_LEN).collect(),
        retry_after_secs,
    }
}

fn fixed(kind: ErrorKind, user_message: &str) -> ClassifiedError {
    ClassifiedError {
        kind,
        user_message: user_message.to_string(),
        retry_after_secs: None,
    }
}

/// Providers often return a JSON error body as the message. When the text
/// looks like JSON, pull out `error.message` (or top-level `message`) and
/// classify that instead; otherwise keep the original text.
fn unwrap_json_message(raw: &str) -> String {
    let trimmed = raw.trim_start();
    if !trimmed.starts_with('{') && !trimmed.starts_with('[') {
        return raw.to_string();
    }

    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(value) => value
            .pointer("/error/message")
            .or_else(|| value.pointer("/message"))
            .and_then(|m| m.as_str())
            .map(|m| m.to_string())
            .unwrap_or_else(|| raw.to_string()),
        Err(_) => raw.to_string(),
    }
}

/// Extract a server-advised retry delay ("retry in 18.6s" -> 19)
fn extract_retry_delay(message: &str) -> Option<u64> {
    let caps = RETRY_DELAY_RE.captures(message)?;
    let seconds: f64 = caps.get(1)?.as_str().parse().ok()?;
    Some(seconds.ceil() as u64)
}
