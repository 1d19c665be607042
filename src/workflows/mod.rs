//! The three pipelines: CV analysis, job search and learning roadmap
//!
//! Steps never construct their own clients. Everything external is handed in
//! through [`Collaborators`], so tests can swap in fakes.

pub mod cv;
pub mod jobs;
pub mod roadmap;

pub use cv::{cv_pipeline, CvState};
pub use jobs::{job_search_pipeline, JobSearchState};
pub use roadmap::{roadmap_pipeline, RoadmapState};

use crate::config::{Config, Credentials};
use crate::error::Result;
use crate::input::{DocumentReader, InputSource, PdfExtractor, TerminalInput};
use crate::llm::{ChatCompletionsClient, DisabledModel, GeminiClient, LanguageModel, PromptTemplates};
use crate::output::{PdfAuthor, PrintPdfAuthor};
use crate::search::{DisabledSearch, SearchProvider, TavilyClient};
use log::{info, warn};
use std::sync::Arc;
use std::time::Duration;

/// External handles shared by every step of a run.
#[derive(Clone)]
pub struct Collaborators {
    pub documents: Arc<dyn DocumentReader>,
    /// Model for CV parsing, requirements and verification questions.
    pub model: Arc<dyn LanguageModel>,
    pub roadmap_model: Arc<dyn LanguageModel>,
    pub search: Arc<dyn SearchProvider>,
    pub input: Arc<dyn InputSource>,
    pub pdf: Arc<dyn PdfAuthor>,
    pub prompts: PromptTemplates,
}

impl Collaborators {
    /// Real clients for every credential present; disabled stand-ins otherwise.
    pub fn from_config(config: &Config, credentials: &Credentials) -> Result<Self> {
        let timeout = Duration::from_secs(config.llm.request_timeout_secs);

        let model: Arc<dyn LanguageModel> = match &credentials.gemini_api_key {
            Some(key) => {
                info!("Using Gemini model {}", config.llm.gemini_model);
                Arc::new(GeminiClient::new(key.clone(), config.llm.gemini_model.clone(), timeout)?)
            }
            None => {
                warn!("{} not set; CV analysis will run without a language model", Credentials::GEMINI_VAR);
                Arc::new(DisabledModel::new(Credentials::GEMINI_VAR))
            }
        };

        let roadmap_model: Arc<dyn LanguageModel> = match &credentials.groq_api_key {
            Some(key) => Arc::new(ChatCompletionsClient::new(
                key.clone(),
                config.llm.roadmap_model.clone(),
                config.llm.roadmap_base_url.clone(),
                timeout,
            )?),
            None => {
                warn!("{} not set; roadmap generation is disabled", Credentials::GROQ_VAR);
                Arc::new(DisabledModel::new(Credentials::GROQ_VAR))
            }
        };

        let search: Arc<dyn SearchProvider> = match &credentials.tavily_api_key {
            Some(key) => Arc::new(TavilyClient::new(key.clone(), config.search.search_depth.clone(), timeout)?),
            None => {
                warn!("{} not set; job search will return no results", Credentials::TAVILY_VAR);
                Arc::new(DisabledSearch::new(Credentials::TAVILY_VAR))
            }
        };

        Ok(Self {
            documents: Arc::new(PdfExtractor),
            model,
            roadmap_model,
            search,
            input: Arc::new(TerminalInput),
            pdf: Arc::new(PrintPdfAuthor),
            prompts: PromptTemplates::default(),
        })
    }
}
