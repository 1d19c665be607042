//! Tavily search API client

use super::{SearchHit, SearchProvider};
use crate::error::{Result, SkillGapError};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const TAVILY_SEARCH_URL: &str = "https://api.tavily.com/search";

#[derive(Debug, Serialize)]
struct TavilyRequest<'a> {
    api_key: &'a str,
    query: &'a str,
    search_depth: &'a str,
    max_results: usize,
}

#[derive(Debug, Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    results: Vec<SearchHit>,
}

pub struct TavilyClient {
    client: Client,
    api_key: String,
    search_depth: String,
}

impl TavilyClient {
    pub fn new(api_key: String, search_depth: String, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_key,
            search_depth,
        })
    }
}

#[async_trait]
impl SearchProvider for TavilyClient {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>> {
        let request = TavilyRequest {
            api_key: &self.api_key,
            query,
            search_depth: &self.search_depth,
            max_results,
        };

        debug!("Tavily search: {:?} (max {})", query, max_results);
        let response = self.client.post(TAVILY_SEARCH_URL).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SkillGapError::Search(format!("Tavily returned {}: {}", status, body)));
        }

        let parsed: TavilyResponse = response.json().await?;
        Ok(parsed.results)
    }
}
