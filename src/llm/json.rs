//! Parsing JSON out of free-text model responses

use crate::error::{Result, SkillGapError};
use serde::de::DeserializeOwned;

const EXCERPT_CHARS: usize = 120;

/// Strips Markdown code fences around a JSON payload.
///
/// A ```` ```json ```` fence wins over a bare ```` ``` ```` fence; text without fences
/// is returned trimmed.
pub fn strip_code_fences(raw: &str) -> &str {
    let body = if let Some((_, rest)) = raw.split_once("```json") {
        rest
    } else if let Some((_, rest)) = raw.split_once("```") {
        rest
    } else {
        return raw.trim();
    };

    match body.split_once("```") {
        Some((inner, _)) => inner.trim(),
        None => body.trim(),
    }
}

/// Parse a model response as JSON, tolerating optional fencing.
pub fn parse_model_json<T: DeserializeOwned>(raw: &str) -> Result<T> {
    let payload = strip_code_fences(raw);
    if payload.is_empty() {
        return Err(SkillGapError::UnparsableModelOutput(
            "model returned an empty response".to_string(),
        ));
    }

    serde_json::from_str(payload).map_err(|e| {
        let excerpt: String = payload.chars().take(EXCERPT_CHARS).collect();
        SkillGapError::UnparsableModelOutput(format!("{} (response began: {:?})", e, excerpt))
    })
}
