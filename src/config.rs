//! Configuration management for skillgap

use crate::error::{Result, SkillGapError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub llm: LlmConfig,
    pub search: SearchConfig,
    pub analysis: AnalysisConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    pub gemini_model: String,
    pub roadmap_model: String,
    pub roadmap_base_url: String,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    pub max_results: usize,
    pub search_depth: String,
    pub default_location: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub max_cv_chars: usize,
    pub requirements_count: usize,
    pub verification_limit: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub output_dir: PathBuf,
    pub templates_dir: PathBuf,
    pub color_output: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm: LlmConfig {
                gemini_model: "gemini-2.5-flash".to_string(),
                roadmap_model: "llama-3.3-70b-versatile".to_string(),
                roadmap_base_url: "https://api.groq.com/openai/v1".to_string(),
                request_timeout_secs: 120,
            },
            search: SearchConfig {
                max_results: 10,
                search_depth: "advanced".to_string(),
                default_location: "remote".to_string(),
            },
            analysis: AnalysisConfig {
                max_cv_chars: 15_000,
                requirements_count: 10,
                verification_limit: 5,
            },
            output: OutputConfig {
                output_dir: PathBuf::from("output"),
                templates_dir: PathBuf::from("templates"),
                color_output: true,
            },
        }
    }
}

impl Config {
    /// Loads from an explicit path, or from the user config dir (creating it with
    /// defaults on first use).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => {
                let config_path = Self::config_path();
                if config_path.exists() {
                    Self::load_from(&config_path)
                } else {
                    let config = Self::default();
                    config.save()?;
                    Ok(config)
                }
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(SkillGapError::FileNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| SkillGapError::Configuration(format!("Failed to parse config: {}", e)))
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| SkillGapError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("skillgap")
            .join("config.toml")
    }

    pub fn ensure_output_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.output.output_dir)?;
        Ok(())
    }
}

/// API keys read from the process environment (and `.env`, if present).
///
/// A missing key is not an error here; the matching collaborator is disabled instead.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub gemini_api_key: Option<String>,
    pub groq_api_key: Option<String>,
    pub tavily_api_key: Option<String>,
}

impl Credentials {
    pub const GEMINI_VAR: &'static str = "GEMINI_API_KEY";
    pub const GROQ_VAR: &'static str = "GROQ_API_KEY";
    pub const TAVILY_VAR: &'static str = "TAVILY_API_KEY";

    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            gemini_api_key: non_empty_var(Self::GEMINI_VAR),
            groq_api_key: non_empty_var(Self::GROQ_VAR).or_else(|| non_empty_var("grokai_api_key")),
            tavily_api_key: non_empty_var(Self::TAVILY_VAR),
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
