//! Generative-language clients
//!
//! Every step that needs a model receives an `Arc<dyn LanguageModel>` at pipeline
//! build time. One call, one prompt, one text completion; no retries.

use crate::error::{Result, SkillGapError};
use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Model identifier, for log and console lines.
    fn name(&self) -> &str;

    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Stand-in used when the credentials for a provider are absent.
pub struct DisabledModel {
    env_var: &'static str,
}

impl DisabledModel {
    pub fn new(env_var: &'static str) -> Self {
        Self { env_var }
    }
}

#[async_trait]
impl LanguageModel for DisabledModel {
    fn name(&self) -> &str {
        "disabled"
    }

    async fn generate(&self, _prompt: &str) -> Result<String> {
        Err(SkillGapError::MissingCredentials(self.env_var))
    }
}

#[derive(Debug, Serialize)]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiCandidateContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    text: Option<String>,
}

/// Google Gemini `generateContent` client.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_key,
            model,
            base_url: GEMINI_API_BASE.to_string(),
        })
    }
}

#[async_trait]
impl LanguageModel for GeminiClient {
    fn name(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let body = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart { text: prompt }],
            }],
        };

        debug!("Gemini request: model={}, prompt_chars={}", self.model, prompt.len());
        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let response: GeminiResponse = check_status(response).await?.json().await?;

        let text: String = response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(SkillGapError::UnparsableModelOutput(
                "Gemini returned no text candidates".to_string(),
            ));
        }
        Ok(text)
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

/// OpenAI-compatible `/chat/completions` client (Groq by default).
pub struct ChatCompletionsClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl ChatCompletionsClient {
    pub fn new(api_key: String, model: String, base_url: String, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl LanguageModel for ChatCompletionsClient {
    fn name(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        debug!("Chat completion request: model={}, prompt_chars={}", self.model, prompt.len());
        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let response: ChatResponse = check_status(response).await?.json().await?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or_else(|| {
                SkillGapError::UnparsableModelOutput("chat completion returned no content".to_string())
            })
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Maps non-success statuses onto the error taxonomy the CLI knows how to explain.
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(status_error(status, &body))
}

fn status_error(status: StatusCode, body: &str) -> SkillGapError {
    let message = serde_json::from_str::<ApiErrorEnvelope>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.to_string());

    match status {
        StatusCode::TOO_MANY_REQUESTS => SkillGapError::QuotaExceeded(message),
        StatusCode::NOT_FOUND => SkillGapError::ModelNotFound(message),
        _ => SkillGapError::LlmApi {
            status: status.as_u16(),
            message,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_disabled_model_reports_missing_credentials() {
        let model = DisabledModel::new("GEMINI_API_KEY");
        let result = model.generate("hello").await;
        assert!(matches!(result, Err(SkillGapError::MissingCredentials("GEMINI_API_KEY"))));
    }

    #[test]
    fn test_rate_limit_maps_to_quota_exceeded() {
        let body = r#"{"error": {"code": 429, "message": "Quota exceeded for metric", "status": "RESOURCE_EXHAUSTED"}}"#;
        match status_error(StatusCode::TOO_MANY_REQUESTS, body) {
            SkillGapError::QuotaExceeded(message) => assert_eq!(message, "Quota exceeded for metric"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_model_maps_to_model_not_found() {
        let err = status_error(StatusCode::NOT_FOUND, "models/gemini-x is not found");
        assert!(matches!(err, SkillGapError::ModelNotFound(ref m) if m.contains("gemini-x")));
    }

    #[test]
    fn test_other_statuses_keep_code() {
        let err = status_error(StatusCode::BAD_REQUEST, "bad");
        assert!(matches!(err, SkillGapError::LlmApi { status: 400, .. }));
    }

    #[test]
    fn test_gemini_response_shape() {
        let raw = r#"{"candidates":[{"content":{"parts":[{"text":"[\"Rust\"]"}],"role":"model"}}]}"#;
        let parsed: GeminiResponse = serde_json::from_str(raw).unwrap();
        let part = &parsed.candidates[0].content.as_ref().unwrap().parts[0];
        assert_eq!(part.text.as_deref(), Some("[\"Rust\"]"));
    }
}
