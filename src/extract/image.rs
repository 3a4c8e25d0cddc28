//! Image payload encoding
//!
//! Images are shipped inline to the model as base64 with a MIME type.
//! Some callers hand us bytes that are already a `data:<mime>;base64,`
//! URI; in that case the payload is the data segment only, and the prefix
//! MIME fills in when the caller declared none. MIME resolution order:
//! declared type, data-URI prefix, extension guess, then `image/jpeg`.

use base64::Engine;

use super::{FileContent, SourceFile};

/// Fallback when no MIME type can be determined from any source
const DEFAULT_IMAGE_MIME: &str = "image/jpeg";

/// Encode an image source as an inline base64 payload
pub fn encode_image(source: &SourceFile) -> FileContent {
    let (prefix_mime, data) = match parse_data_uri(&source.bytes) {
        Some((mime, payload)) => (Some(mime), payload),
        None => (
            None,
            base64::engine::general_purpose::STANDARD.encode(&source.bytes),
        ),
    };

    let mime_type = resolve_mime(source, prefix_mime);

    FileContent::Image { mime_type, data }
}

/// Split a `data:<mime>;base64,<payload>` URI into its MIME and payload.
/// Returns None when the bytes are not a well-formed data URI.
fn parse_data_uri(bytes: &[u8]) -> Option<(String, String)> {
    let text = std::str::from_utf8(bytes).ok()?;
    let rest = text.strip_prefix("data:")?;
    let (mime, payload) = rest.split_once(";base64,")?;
    Some((mime.to_string(), payload.to_string()))
}

fn resolve_mime(source: &SourceFile, prefix_mime: Option<String>) -> String {
    if !source.mime.is_empty() {
        return source.mime.clone();
    }
    if let Some(mime) = prefix_mime.filter(|m| !m.is_empty()) {
        return mime;
    }
    if let Some(guessed) = mime_guess::from_path(&source.name)
        .first()
        .filter(|m| m.type_() == mime_guess::mime::IMAGE)
    {
        return guessed.essence_str().to_string();
    }
    DEFAULT_IMAGE_MIME.to_string()
}
