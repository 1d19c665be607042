//! LLM integration module

pub mod client;
pub mod json;
pub mod prompts;

pub use client::{ChatCompletionsClient, DisabledModel, GeminiClient, LanguageModel};
pub use json::{parse_model_json, strip_code_fences};
pub use prompts::PromptTemplates;
