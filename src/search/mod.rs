//! Web-search collaborator

pub mod tavily;

use crate::error::{Result, SkillGapError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use tavily::TavilyClient;

/// One ranked search result, as returned by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub content: Option<String>,
}

#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>>;
}

/// Stand-in used when the search credentials are absent.
pub struct DisabledSearch {
    env_var: &'static str,
}

impl DisabledSearch {
    pub fn new(env_var: &'static str) -> Self {
        Self { env_var }
    }
}

#[async_trait]
impl SearchProvider for DisabledSearch {
    async fn search(&self, _query: &str, _max_results: usize) -> Result<Vec<SearchHit>> {
        Err(SkillGapError::MissingCredentials(self.env_var))
    }
}
