//! Error handling for the skillgap pipelines

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SkillGapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("Failed to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: std::io::Error },

    #[error("PDF authoring error: {0}")]
    PdfAuthoring(String),

    #[error("Missing credentials: {0} is not set")]
    MissingCredentials(&'static str),

    #[error("State field '{0}' was read before any step wrote it")]
    MissingField(&'static str),

    #[error("Missing precondition: {0}")]
    MissingPrecondition(String),

    #[error("Quota exceeded (429): {0}")]
    QuotaExceeded(String),

    #[error("Model not found (404): {0}")]
    ModelNotFound(String),

    #[error("LLM API error (status {status}): {message}")]
    LlmApi { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unparsable model output: {0}")]
    UnparsableModelOutput(String),

    #[error("Search error: {0}")]
    Search(String),

    #[error("Rendering error: {0}")]
    Render(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Input stream closed while waiting for an answer")]
    InputClosed,

    #[error("Invalid pipeline definition: {0}")]
    PipelineDefinition(String),
}

pub type Result<T> = std::result::Result<T, SkillGapError>;

impl SkillGapError {
    /// Hint printed under the failure banner, when the cause is a known one.
    pub fn diagnosis(&self) -> Option<String> {
        match self {
            SkillGapError::QuotaExceeded(_) => Some(
                "API quota exceeded: you have hit the provider's rate limit. Wait about a minute and try again."
                    .to_string(),
            ),
            SkillGapError::ModelNotFound(_) => Some(
                "Model name mismatch: the provider does not know the configured model. Check `llm.*_model` in the config file (no `models/` prefix)."
                    .to_string(),
            ),
            SkillGapError::MissingCredentials(var) => Some(format!(
                "Set {} in the environment or in a local .env file.",
                var
            )),
            SkillGapError::FileNotFound(path) => Some(format!(
                "Check that {} exists and is readable.",
                path.display()
            )),
            SkillGapError::PdfExtraction(_) => {
                Some("Ensure the file is a valid, text-based PDF (scanned images are not supported).".to_string())
            }
            _ => None,
        }
    }
}
